use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::generator::{Generated, TextGenerator, parse_prediction};
use crate::core::insight;
use crate::core::phase::{classify_phase, days_until, fertile_window, shift_days};
use crate::error::CoreError;
use crate::models::cycle::{CycleEntry, CycleProfile, DEFAULT_CYCLE_LENGTH, Phase};
use crate::models::prediction::{
    CyclePredictionData, FertileWindow, HistoryPrediction, MedicineAnalysis, PredictionSource,
};

pub const BASE_CONFIDENCE: u32 = 70;
pub const HORMONE_BONUS: u32 = 15;
pub const PAIN_AND_IRON_BONUS: u32 = 10;
pub const FALLBACK_CONFIDENCE: u32 = 75;
/// Most recent entries considered by the history predictor.
pub const HISTORY_LIMIT: usize = 6;

// ---------------------------------------------------------------------------
// Bill path
// ---------------------------------------------------------------------------

/// Predict from a medicine analysis. Without a known last period the
/// prediction is anchored on today.
pub fn predict(
    analysis: &MedicineAnalysis,
    last_period: Option<NaiveDate>,
) -> Result<CyclePredictionData, CoreError> {
    let anchor = last_period.unwrap_or_else(|| Local::now().date_naive());
    predict_from(analysis, anchor)
}

/// Predict from a medicine analysis with an explicit anchor date.
/// Confidence is the plain sum of base and bonuses and is not clamped.
pub fn predict_from(
    analysis: &MedicineAnalysis,
    anchor: NaiveDate,
) -> Result<CyclePredictionData, CoreError> {
    let cycle_length = DEFAULT_CYCLE_LENGTH;
    let mut confidence = BASE_CONFIDENCE;
    if analysis.has_hormones {
        confidence += HORMONE_BONUS;
    }
    if analysis.has_pain_relief && analysis.has_iron {
        confidence += PAIN_AND_IRON_BONUS;
    }

    Ok(CyclePredictionData {
        next_period_date: shift_days(anchor, i64::from(cycle_length))?,
        cycle_length,
        confidence,
        insights: insight::medicine_insights(analysis),
        recommendations: insight::medicine_recommendations(analysis),
    })
}

// ---------------------------------------------------------------------------
// History path
// ---------------------------------------------------------------------------

/// Most recent first, capped at [`HISTORY_LIMIT`].
pub fn recent_entries(entries: &[CycleEntry]) -> Vec<&CycleEntry> {
    let mut sorted: Vec<&CycleEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.period_start_date.cmp(&a.period_start_date));
    sorted.truncate(HISTORY_LIMIT);
    sorted
}

/// Mean gap in days between consecutive period starts, rounded.
/// Needs at least two entries.
pub fn observed_cycle_length(entries: &[&CycleEntry]) -> Option<u32> {
    if entries.len() < 2 {
        return None;
    }
    let mut starts: Vec<NaiveDate> = entries.iter().map(|e| e.period_start_date).collect();
    starts.sort();
    let gaps: Vec<i64> = starts
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .filter(|d| *d > 0)
        .collect();
    if gaps.is_empty() {
        return None;
    }
    let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    Some(mean.round() as u32)
}

pub fn build_history_prompt(profile: &CycleProfile, entries: &[&CycleEntry]) -> String {
    let history = entries
        .iter()
        .map(|e| format!("Date: {}, Flow: {}", e.period_start_date, e.flow_intensity))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following menstrual cycle data:
- Average cycle length: {} days
- Average period length: {} days
- Recent cycle history:
{history}

Generate a JSON prediction with the following structure:
{{
  \"next_period_date\": \"YYYY-MM-DD\",
  \"fertile_window_start\": \"YYYY-MM-DD\",
  \"fertile_window_end\": \"YYYY-MM-DD\",
  \"predicted_phase\": \"menstrual|follicular|ovulation|luteal\",
  \"confidence\": 0-100,
  \"health_insights\": [\"insight1\", \"insight2\", \"insight3\"]
}}

Return ONLY valid JSON, no markdown or additional text.
",
        profile.cycle_length, profile.period_length
    )
}

/// Predict from stored cycle history.
///
/// The generator is asked first. A failed call or an answer that does not
/// validate falls through to [`fallback_prediction`]; only a missing profile
/// or empty history is reported as an error.
pub fn predict_from_history(
    profile: Option<&CycleProfile>,
    entries: &[CycleEntry],
    today: NaiveDate,
    generator: &dyn TextGenerator,
) -> Result<HistoryPrediction, CoreError> {
    let profile = profile.ok_or(CoreError::InsufficientData("cycle profile is not set"))?;
    let recent = recent_entries(entries);
    let latest = recent
        .first()
        .ok_or(CoreError::InsufficientData("no cycle entries recorded"))?;
    let observed = observed_cycle_length(&recent);

    let prompt = build_history_prompt(profile, &recent);
    let answer = match generator.generate(&prompt) {
        Ok(text) => parse_prediction(&text),
        Err(e) => Generated::Unparseable(e.to_string()),
    };

    match answer {
        Generated::Parsed(p) => {
            debug!(next = %p.next_period_date, "accepted generated prediction");
            Ok(HistoryPrediction {
                next_period_date: p.next_period_date,
                fertile_window_start: p.fertile_window_start,
                fertile_window_end: p.fertile_window_end,
                predicted_phase: p.predicted_phase,
                confidence: p.confidence,
                health_insights: p.health_insights,
                cycle_length: profile.cycle_length,
                observed_cycle_length: observed,
                source: PredictionSource::Generated,
            })
        }
        Generated::Unparseable(reason) => {
            warn!(%reason, "generated prediction rejected, using arithmetic fallback");
            let mut p = fallback_prediction(profile, latest.period_start_date, today)?;
            p.observed_cycle_length = observed;
            Ok(p)
        }
    }
}

/// Deterministic prediction from the latest period start and the profile.
pub fn fallback_prediction(
    profile: &CycleProfile,
    last_period_start: NaiveDate,
    today: NaiveDate,
) -> Result<HistoryPrediction, CoreError> {
    let next_period_date = shift_days(last_period_start, i64::from(profile.cycle_length))?;
    let window = fertile_window(next_period_date)?;
    Ok(HistoryPrediction {
        next_period_date,
        fertile_window_start: window.start,
        fertile_window_end: window.end,
        predicted_phase: classify_phase(today, next_period_date, profile),
        confidence: FALLBACK_CONFIDENCE,
        health_insights: insight::fallback_history_insights(),
        cycle_length: profile.cycle_length,
        observed_cycle_length: None,
        source: PredictionSource::Fallback,
    })
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CycleStatus {
    pub date: NaiveDate,
    pub last_period_start: NaiveDate,
    pub next_period_date: NaiveDate,
    pub days_until_next_period: i64,
    pub phase: Phase,
    pub fertile_window: FertileWindow,
    pub in_fertile_window: bool,
    pub cycle_length: u32,
    pub period_length: u32,
}

/// Where the user is in the cycle on `today`, from the latest entry alone.
pub fn cycle_status(
    profile: Option<&CycleProfile>,
    entries: &[CycleEntry],
    today: NaiveDate,
) -> Result<CycleStatus, CoreError> {
    let profile = profile.ok_or(CoreError::InsufficientData("cycle profile is not set"))?;
    let latest = entries
        .iter()
        .map(|e| e.period_start_date)
        .max()
        .ok_or(CoreError::InsufficientData("no cycle entries recorded"))?;

    let next_period_date = shift_days(latest, i64::from(profile.cycle_length))?;
    let window = fertile_window(next_period_date)?;
    Ok(CycleStatus {
        date: today,
        last_period_start: latest,
        next_period_date,
        days_until_next_period: days_until(today, next_period_date),
        phase: classify_phase(today, next_period_date, profile),
        in_fertile_window: window.contains(today),
        fertile_window: window,
        cycle_length: profile.cycle_length,
        period_length: profile.period_length,
    })
}
