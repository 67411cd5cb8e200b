use chrono::Utc;
use cyclepredict::core::phase::fertile_window;
use cyclepredict::core::predict::{CycleStatus, fallback_prediction, predict_from};
use cyclepredict::models::bill::ExtractedBillData;
use cyclepredict::models::cycle::{CycleProfile, Phase};
use cyclepredict::models::prediction::MedicineAnalysis;
use cyclepredict::output::human::{
    format_bill_list, format_cycle_list, format_extracted, format_history_prediction,
    format_prediction, format_prediction_date, format_prediction_list, format_recommendations,
    format_status,
};
use cyclepredict::output::{failure, success};
use serde_json::{Value, json};

mod common;
use common::{date, entry};

// ─── envelopes ──────────────────────────────────────────────────────────────

#[test]
fn test_success_envelope_structure() {
    let data = json!({"count": 2});
    let result = success("bills", data.clone());
    assert_eq!(result["status"], "ok");
    assert_eq!(result["command"], "bills");
    assert_eq!(result["data"], data);
    assert!(result["error"].is_null());
}

#[test]
fn test_failure_envelope_structure() {
    let result = failure("status", "insufficient_data", "no cycle entries recorded", Value::Null);
    assert_eq!(result["status"], "error");
    assert_eq!(result["command"], "status");
    assert!(result["data"].is_null());
    assert_eq!(result["error"]["code"], "insufficient_data");
    assert_eq!(result["error"]["message"], "no cycle entries recorded");
}

#[test]
fn test_failure_envelope_keeps_payload() {
    let result = failure(
        "recommend",
        "generation_failed",
        "no text generator configured",
        json!({ "recommendations": [] }),
    );
    assert_eq!(result["data"]["recommendations"], json!([]));
}

// ─── human formatting ───────────────────────────────────────────────────────

#[test]
fn test_prediction_date_long_form() {
    assert_eq!(format_prediction_date(date(2025, 11, 25)), "November 25, 2025");
    assert_eq!(format_prediction_date(date(2026, 1, 3)), "January 3, 2026");
}

#[test]
fn test_format_extracted_uses_dash_for_empty() {
    let data = ExtractedBillData {
        dates: Vec::new(),
        medicines: vec!["Iron".to_string(), "Zinc".to_string()],
        amounts: vec!["$4.00".to_string()],
    };
    assert_eq!(
        format_extracted(&data),
        "Dates: -\nMedicines: Iron, Zinc\nAmounts: $4.00"
    );
}

#[test]
fn test_format_prediction_lists_insights() {
    let p = predict_from(&MedicineAnalysis::default(), date(2025, 10, 28)).unwrap();
    let out = format_prediction(&p);
    assert!(out.contains("November 25, 2025"));
    assert!(out.contains("confidence 70%"));
    assert!(out.contains("Insights:"));
    assert!(out.contains("Stay hydrated throughout your cycle"));
}

#[test]
fn test_format_history_prediction_shows_source() {
    let p = fallback_prediction(&CycleProfile::default(), date(2025, 10, 27), date(2025, 11, 5)).unwrap();
    let out = format_history_prediction(&p);
    assert!(out.contains("November 24, 2025"));
    assert!(out.contains("Source: fallback"));
    assert!(out.contains("2025-11-05 to 2025-11-11"));
}

#[test]
fn test_format_status() {
    let status = CycleStatus {
        date: date(2025, 11, 8),
        last_period_start: date(2025, 10, 27),
        next_period_date: date(2025, 11, 24),
        days_until_next_period: 16,
        phase: Phase::Follicular,
        fertile_window: fertile_window(date(2025, 11, 24)).unwrap(),
        in_fertile_window: true,
        cycle_length: 28,
        period_length: 5,
    };
    let out = format_status(&status);
    assert!(out.contains("Phase:"));
    assert!(out.contains("in 16 day(s)"));
    assert!(out.contains("Today is inside the fertile window."));
}

#[test]
fn test_empty_lists() {
    assert_eq!(format_bill_list(&[]), "No bills analyzed yet.");
    assert_eq!(format_cycle_list(&[]), "No cycle entries recorded.");
    assert_eq!(format_prediction_list(&[]), "No predictions yet.");
    assert_eq!(format_recommendations(&[]), "No recommendations.");
}

#[test]
fn test_cycle_list_table_has_rows() {
    let mut e = entry(date(2025, 10, 27)).with_symptoms(["cramps"]);
    e.created_at = Utc::now();
    let out = format_cycle_list(&[e]);
    assert!(out.contains("2025-10-27"));
    assert!(out.contains("cramps"));
    assert!(out.contains("normal"));
}
