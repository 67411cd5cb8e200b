use crate::models::prediction::MedicineAnalysis;

pub const PAIN_RELIEF_INSIGHT: &str =
    "Your recent pain relief purchases suggest period management. Your cycle appears regular.";
pub const IRON_INSIGHT: &str =
    "Iron supplement purchases align with typical supplementation patterns for cycle support.";
pub const HORMONE_INSIGHT: &str =
    "Hormonal medication detected. Your cycle may have specific patterns related to hormone use.";
pub const GENERIC_INSIGHT: &str =
    "Based on your health data, your cycle appears to follow a regular pattern.";

pub const BASELINE_RECOMMENDATIONS: [&str; 3] = [
    "Stay hydrated throughout your cycle",
    "Maintain a balanced diet rich in iron and calcium",
    "Continue tracking your symptoms for better predictions",
];
pub const IRON_RECOMMENDATION: &str =
    "Continue taking iron supplements as needed for energy support";
pub const PAIN_RELIEF_RECOMMENDATION: &str =
    "Consider using pain relief before symptoms become severe";

pub const HISTORY_FALLBACK_INSIGHTS: [&str; 3] = [
    "Track symptoms for better predictions",
    "Stay hydrated during your cycle",
    "Regular sleep improves cycle regularity",
];

/// Insights for a medicine analysis: pain relief, iron, then hormones.
/// Falls back to a single generic line when none applies.
pub fn medicine_insights(analysis: &MedicineAnalysis) -> Vec<String> {
    let rules = [
        (analysis.has_pain_relief, PAIN_RELIEF_INSIGHT),
        (analysis.has_iron, IRON_INSIGHT),
        (analysis.has_hormones, HORMONE_INSIGHT),
    ];

    let mut insights: Vec<String> = rules
        .iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, text)| text.to_string())
        .collect();

    if insights.is_empty() {
        insights.push(GENERIC_INSIGHT.to_string());
    }
    insights
}

/// Baseline recommendations followed by the iron and pain-relief tips.
pub fn medicine_recommendations(analysis: &MedicineAnalysis) -> Vec<String> {
    let mut recommendations: Vec<String> = BASELINE_RECOMMENDATIONS
        .iter()
        .map(|s| s.to_string())
        .collect();
    if analysis.has_iron {
        recommendations.push(IRON_RECOMMENDATION.to_string());
    }
    if analysis.has_pain_relief {
        recommendations.push(PAIN_RELIEF_RECOMMENDATION.to_string());
    }
    recommendations
}

pub fn fallback_history_insights() -> Vec<String> {
    HISTORY_FALLBACK_INSIGHTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
