use chrono::{Duration, Local, NaiveDate};
use cyclepredict::core::analyze::analyze;
use cyclepredict::core::extract::extract;
use cyclepredict::core::insight::{
    BASELINE_RECOMMENDATIONS, GENERIC_INSIGHT, HORMONE_INSIGHT, IRON_INSIGHT,
    IRON_RECOMMENDATION, PAIN_RELIEF_INSIGHT, PAIN_RELIEF_RECOMMENDATION,
};
use cyclepredict::core::predict::{predict, predict_from};
use cyclepredict::error::CoreError;
use cyclepredict::models::prediction::MedicineAnalysis;

mod common;
use common::date;

fn flags(hormones: bool, pain: bool, iron: bool) -> MedicineAnalysis {
    MedicineAnalysis {
        medicines: Vec::new(),
        has_hormones: hormones,
        has_pain_relief: pain,
        has_iron: iron,
    }
}

// ── analyzer ────────────────────────────────────────────────────────────────

#[test]
fn test_analyze_pain_and_iron() {
    let a = analyze(&["Ibuprofen", "Iron"]);
    assert!(a.has_pain_relief);
    assert!(a.has_iron);
    assert!(!a.has_hormones);
    assert_eq!(a.medicines, vec!["Ibuprofen", "Iron"]);
}

#[test]
fn test_analyze_hormone_markers() {
    assert!(analyze(&["Birth Control"]).has_hormones);
    assert!(analyze(&["Progesterone"]).has_hormones);
    assert!(analyze(&["estrogens"]).has_hormones);
}

#[test]
fn test_analyze_substring_match_raises_flags() {
    let a = analyze(&["painkillers"]);
    assert!(a.has_pain_relief);
    let a = analyze(&["Ironman"]);
    assert!(a.has_iron);
}

#[test]
fn test_analyze_unflagged_medicines() {
    let a = analyze(&["Aspirin", "Vitamin", "Calcium"]);
    assert!(!a.has_hormones);
    assert!(!a.has_pain_relief);
    assert!(!a.has_iron);
}

#[test]
fn test_analyze_empty_list() {
    let a = analyze::<&str>(&[]);
    assert_eq!(a, MedicineAnalysis::default());
}

// ── predictor ───────────────────────────────────────────────────────────────

#[test]
fn test_predict_next_date_is_anchor_plus_28() {
    let p = predict_from(&flags(false, false, false), date(2025, 10, 28)).unwrap();
    assert_eq!(p.next_period_date, date(2025, 11, 25));
    assert_eq!(p.cycle_length, 28);
}

#[test]
fn test_predict_base_confidence() {
    assert_eq!(predict_from(&flags(false, false, false), date(2025, 1, 1)).unwrap().confidence, 70);
    assert_eq!(predict_from(&flags(false, true, false), date(2025, 1, 1)).unwrap().confidence, 70);
    assert_eq!(predict_from(&flags(false, false, true), date(2025, 1, 1)).unwrap().confidence, 70);
}

#[test]
fn test_predict_confidence_bonuses() {
    assert_eq!(predict_from(&flags(true, false, false), date(2025, 1, 1)).unwrap().confidence, 85);
    assert_eq!(predict_from(&flags(false, true, true), date(2025, 1, 1)).unwrap().confidence, 80);
    assert_eq!(predict_from(&flags(true, true, true), date(2025, 1, 1)).unwrap().confidence, 95);
}

#[test]
fn test_predict_confidence_is_sum_of_bonuses() {
    // The largest possible sum stays at 95, so no clamp is needed.
    for h in [false, true] {
        for p in [false, true] {
            for i in [false, true] {
                let c = predict_from(&flags(h, p, i), date(2025, 1, 1)).unwrap().confidence;
                let expected = 70 + if h { 15 } else { 0 } + if p && i { 10 } else { 0 };
                assert_eq!(c, expected);
                assert!(c <= 95);
            }
        }
    }
}

#[test]
fn test_predict_without_last_period_uses_today() {
    let p = predict(&flags(false, false, false), None).unwrap();
    let today = Local::now().date_naive();
    assert_eq!(p.next_period_date, today + Duration::days(28));
}

#[test]
fn test_predict_with_last_period() {
    let p = predict(&flags(false, false, false), Some(date(2025, 12, 20))).unwrap();
    assert_eq!(p.next_period_date, date(2026, 1, 17));
}

#[test]
fn test_predict_past_last_representable_date_is_error() {
    let err = predict_from(&flags(false, false, false), NaiveDate::MAX).unwrap_err();
    assert!(matches!(err, CoreError::DateOutOfRange(_)));
}

// ── insights and recommendations ────────────────────────────────────────────

#[test]
fn test_insights_in_fixed_order() {
    let p = predict_from(&flags(true, true, true), date(2025, 1, 1)).unwrap();
    assert_eq!(
        p.insights,
        vec![PAIN_RELIEF_INSIGHT, IRON_INSIGHT, HORMONE_INSIGHT]
    );
}

#[test]
fn test_generic_insight_when_nothing_fires() {
    let p = predict_from(&flags(false, false, false), date(2025, 1, 1)).unwrap();
    assert_eq!(p.insights, vec![GENERIC_INSIGHT]);
}

#[test]
fn test_recommendations_baseline_only() {
    let p = predict_from(&flags(true, false, false), date(2025, 1, 1)).unwrap();
    assert_eq!(p.recommendations, BASELINE_RECOMMENDATIONS.to_vec());
}

#[test]
fn test_recommendations_iron_before_pain_relief() {
    let p = predict_from(&flags(false, true, true), date(2025, 1, 1)).unwrap();
    assert_eq!(p.recommendations.len(), 5);
    assert_eq!(p.recommendations[..3], BASELINE_RECOMMENDATIONS);
    assert_eq!(p.recommendations[3], IRON_RECOMMENDATION);
    assert_eq!(p.recommendations[4], PAIN_RELIEF_RECOMMENDATION);
}

// ── end to end ──────────────────────────────────────────────────────────────

#[test]
fn test_bill_text_to_prediction() {
    let data = extract("Paid $12.50 for Ibuprofen on 11/08/2025 and Iron tablets");
    let analysis = analyze(&data.medicines);
    let p = predict_from(&analysis, date(2025, 10, 28)).unwrap();

    assert_eq!(p.next_period_date, date(2025, 11, 25));
    assert_eq!(p.confidence, 80);
    assert_eq!(p.insights, vec![PAIN_RELIEF_INSIGHT, IRON_INSIGHT]);
    assert_eq!(p.recommendations.len(), 5);
}
