use crate::models::prediction::MedicineAnalysis;

const HORMONE_MARKERS: &[&str] = &["hormone", "estrogen", "progesterone", "birth control"];
const PAIN_RELIEF_MARKERS: &[&str] = &["ibuprofen", "paracetamol", "naproxen", "painkiller"];
const IRON_MARKERS: &[&str] = &["iron"];

fn any_contains(lowered: &[String], markers: &[&str]) -> bool {
    lowered
        .iter()
        .any(|m| markers.iter().any(|marker| m.contains(marker)))
}

/// Classify a medicine list into independent health-signal flags.
///
/// Matching is a case-insensitive substring test, so one medicine can raise
/// more than one flag.
pub fn analyze<S: AsRef<str>>(medicines: &[S]) -> MedicineAnalysis {
    let lowered: Vec<String> = medicines
        .iter()
        .map(|m| m.as_ref().to_lowercase())
        .collect();

    MedicineAnalysis {
        medicines: medicines.iter().map(|m| m.as_ref().to_string()).collect(),
        has_hormones: any_contains(&lowered, HORMONE_MARKERS),
        has_pain_relief: any_contains(&lowered, PAIN_RELIEF_MARKERS),
        has_iron: any_contains(&lowered, IRON_MARKERS),
    }
}
