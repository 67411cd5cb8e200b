use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// FlowIntensity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowIntensity {
    Light,
    Normal,
    Heavy,
}

impl FromStr for FlowIntensity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "normal" | "medium" => Ok(Self::Normal),
            "heavy" => Ok(Self::Heavy),
            other => Err(anyhow::anyhow!(
                "unknown flow intensity: {other} (expected light/normal/heavy)"
            )),
        }
    }
}

impl fmt::Display for FlowIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Normal => write!(f, "normal"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// One of the four cyclical stages. Always derived from a reference date,
/// never tracked as state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    /// The phase that follows this one: menstrual → follicular → ovulation
    /// → luteal → menstrual.
    pub fn next(self) -> Self {
        match self {
            Self::Menstrual => Self::Follicular,
            Self::Follicular => Self::Ovulation,
            Self::Ovulation => Self::Luteal,
            Self::Luteal => Self::Menstrual,
        }
    }
}

impl FromStr for Phase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "menstrual" => Ok(Self::Menstrual),
            "follicular" => Ok(Self::Follicular),
            "ovulation" => Ok(Self::Ovulation),
            "luteal" => Ok(Self::Luteal),
            other => Err(anyhow::anyhow!("unknown cycle phase: {other}")),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menstrual => write!(f, "menstrual"),
            Self::Follicular => write!(f, "follicular"),
            Self::Ovulation => write!(f, "ovulation"),
            Self::Luteal => write!(f, "luteal"),
        }
    }
}

// ---------------------------------------------------------------------------
// CycleProfile
// ---------------------------------------------------------------------------

pub const DEFAULT_CYCLE_LENGTH: u32 = 28;
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

/// Average cycle and period length used by the history predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProfile {
    pub cycle_length: u32,
    pub period_length: u32,
}

impl Default for CycleProfile {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_length: DEFAULT_PERIOD_LENGTH,
        }
    }
}

// ---------------------------------------------------------------------------
// CycleEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleEntry {
    pub id: String,
    pub period_start_date: NaiveDate,
    pub flow_intensity: FlowIntensity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CycleEntry {
    pub fn new(period_start_date: NaiveDate, flow_intensity: FlowIntensity) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            period_start_date,
            flow_intensity,
            symptoms: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Attach symptoms, dropping blanks and repeats while keeping first-seen order.
    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for s in symptoms {
            let s = s.as_ref().trim();
            if !s.is_empty() && !self.symptoms.iter().any(|e| e == s) {
                self.symptoms.push(s.to_string());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cycles_back_to_menstrual() {
        let mut p = Phase::Menstrual;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(p);
            p = p.next();
        }
        assert_eq!(p, Phase::Menstrual);
        assert_eq!(
            seen,
            vec![
                Phase::Menstrual,
                Phase::Follicular,
                Phase::Ovulation,
                Phase::Luteal
            ]
        );
    }

    #[test]
    fn phase_from_str_is_case_insensitive() {
        assert_eq!("Luteal".parse::<Phase>().unwrap(), Phase::Luteal);
        assert!("premenstrual".parse::<Phase>().is_err());
    }

    #[test]
    fn flow_from_str_accepts_medium_alias() {
        assert_eq!(
            "medium".parse::<FlowIntensity>().unwrap(),
            FlowIntensity::Normal
        );
        assert!("spotting".parse::<FlowIntensity>().is_err());
    }

    #[test]
    fn symptoms_are_deduplicated_in_order() {
        let d = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let e = CycleEntry::new(d, FlowIntensity::Normal)
            .with_symptoms(["cramps", " bloating", "cramps", ""]);
        assert_eq!(e.symptoms, vec!["cramps", "bloating"]);
    }

    #[test]
    fn phase_serde_is_lowercase() {
        let json = serde_json::to_string(&Phase::Ovulation).unwrap();
        assert_eq!(json, "\"ovulation\"");
    }
}
