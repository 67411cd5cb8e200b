use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::cycle::Phase;

/// Coarse health signals derived from a medicine list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineAnalysis {
    pub medicines: Vec<String>,
    pub has_hormones: bool,
    pub has_pain_relief: bool,
    pub has_iron: bool,
}

/// Result of the bill-driven predictor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePredictionData {
    pub next_period_date: NaiveDate,
    pub cycle_length: u32,
    pub confidence: u32,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertileWindow {
    pub ovulation: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FertileWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

// ---------------------------------------------------------------------------
// PredictionSource
// ---------------------------------------------------------------------------

/// Where a stored prediction's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Medicine heuristics over an uploaded bill.
    Bill,
    /// Accepted from the text generator.
    Generated,
    /// Arithmetic fallback over cycle history.
    Fallback,
}

impl FromStr for PredictionSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bill" => Ok(Self::Bill),
            "generated" => Ok(Self::Generated),
            "fallback" => Ok(Self::Fallback),
            other => Err(anyhow::anyhow!("unknown prediction source: {other}")),
        }
    }
}

impl fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bill => write!(f, "bill"),
            Self::Generated => write!(f, "generated"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Result of the history-driven predictor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPrediction {
    pub next_period_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub predicted_phase: Phase,
    pub confidence: u32,
    pub health_insights: Vec<String>,
    pub cycle_length: u32,
    pub observed_cycle_length: Option<u32>,
    pub source: PredictionSource,
}

// ---------------------------------------------------------------------------
// PredictionRecord
// ---------------------------------------------------------------------------

/// The persisted shape shared by both predictor paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    pub prediction_date: NaiveDate,
    pub next_period_date: NaiveDate,
    pub cycle_length: u32,
    pub confidence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fertile_window_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fertile_window_end: Option<NaiveDate>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub source: PredictionSource,
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn from_bill(
        bill_id: Option<&str>,
        prediction_date: NaiveDate,
        p: &CyclePredictionData,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            bill_id: bill_id.map(String::from),
            prediction_date,
            next_period_date: p.next_period_date,
            cycle_length: p.cycle_length,
            confidence: p.confidence,
            predicted_phase: None,
            fertile_window_start: None,
            fertile_window_end: None,
            insights: p.insights.clone(),
            recommendations: p.recommendations.clone(),
            source: PredictionSource::Bill,
            created_at: Utc::now(),
        }
    }

    pub fn from_history(prediction_date: NaiveDate, p: &HistoryPrediction) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            bill_id: None,
            prediction_date,
            next_period_date: p.next_period_date,
            cycle_length: p.cycle_length,
            confidence: p.confidence,
            predicted_phase: Some(p.predicted_phase),
            fertile_window_start: Some(p.fertile_window_start),
            fertile_window_end: Some(p.fertile_window_end),
            insights: p.health_insights.clone(),
            recommendations: Vec::new(),
            source: p.source,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn prediction_serializes_iso_date_and_snake_case() {
        let p = CyclePredictionData {
            next_period_date: d(2025, 11, 25),
            cycle_length: 28,
            confidence: 70,
            insights: vec!["a".into()],
            recommendations: vec![],
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["next_period_date"], "2025-11-25");
        assert_eq!(v["cycle_length"], 28);
        assert_eq!(v["confidence"], 70);
        assert!(v["recommendations"].as_array().unwrap().is_empty());
    }

    #[test]
    fn fertile_window_contains_is_inclusive() {
        let w = FertileWindow {
            ovulation: d(2025, 11, 11),
            start: d(2025, 11, 6),
            end: d(2025, 11, 12),
        };
        assert!(w.contains(d(2025, 11, 6)));
        assert!(w.contains(d(2025, 11, 12)));
        assert!(!w.contains(d(2025, 11, 13)));
    }

    #[test]
    fn source_roundtrips_through_str() {
        for s in [
            PredictionSource::Bill,
            PredictionSource::Generated,
            PredictionSource::Fallback,
        ] {
            assert_eq!(s.to_string().parse::<PredictionSource>().unwrap(), s);
        }
    }
}
