use serde::Deserialize;
use tracing::warn;

use crate::core::generator::{Generated, TextGenerator, json_block};
use crate::error::CoreError;
use crate::models::cycle::{CycleEntry, Phase};
use crate::models::recommendation::Recommendation;

/// User context handed to the generator.
pub fn build_context(phase: Option<Phase>, entries: &[CycleEntry], has_bills: bool) -> String {
    let phase = phase.map_or_else(|| "unknown".to_string(), |p| p.to_string());
    let mut context = format!("Current cycle phase: {phase}\n");

    let mut symptoms: Vec<&str> = Vec::new();
    for s in entries.iter().flat_map(|e| e.symptoms.iter()) {
        if !symptoms.contains(&s.as_str()) {
            symptoms.push(s);
        }
    }
    if !symptoms.is_empty() {
        context.push_str(&format!("Recent symptoms: {}\n", symptoms.join(", ")));
    }

    if has_bills {
        context.push_str("Has tracked medical expenses\n");
    }
    context
}

pub fn build_prompt(context: &str, phase: Option<Phase>) -> String {
    let phase = phase.map_or_else(|| "unknown".to_string(), |p| p.to_string());
    format!(
        "Based on the following user data:
{context}
Generate 8-10 personalized health recommendations in JSON format. Include recommendations for:
- Nutrition (based on cycle phase)
- Exercise (based on cycle phase)
- Wellness/lifestyle (based on cycle phase and symptoms)
- Medical/health (based on tracked symptoms or expenses)

Return a JSON object with this structure:
{{
  \"recommendations\": [
    {{
      \"id\": \"rec_1\",
      \"category\": \"nutrition|exercise|wellness|medical\",
      \"title\": \"Recommendation title\",
      \"description\": \"Brief description\",
      \"details\": [\"detail1\", \"detail2\", \"detail3\"],
      \"phase\": \"{phase}\",
      \"priority\": \"high|medium|low\"
    }}
  ]
}}

Focus on evidence-based recommendations for menstrual health and wellness."
    )
}

#[derive(Deserialize)]
struct RecommendationPayload {
    recommendations: Vec<Recommendation>,
}

/// Read the outermost JSON object out of the answer. Every item must match
/// the recommendation schema and carry a non-empty title.
pub fn parse_recommendations(text: &str) -> Generated<Vec<Recommendation>> {
    let Some(block) = json_block(text) else {
        return Generated::Unparseable("no JSON object in response".to_string());
    };
    let payload: RecommendationPayload = match serde_json::from_str(block) {
        Ok(p) => p,
        Err(e) => return Generated::Unparseable(format!("invalid recommendations JSON: {e}")),
    };
    if let Some(bad) = payload
        .recommendations
        .iter()
        .find(|r| r.title.trim().is_empty())
    {
        return Generated::Unparseable(format!("recommendation {} has no title", bad.id));
    }
    Generated::Parsed(payload.recommendations)
}

/// Ask the generator for wellness recommendations.
pub fn generate(
    phase: Option<Phase>,
    entries: &[CycleEntry],
    has_bills: bool,
    generator: &dyn TextGenerator,
) -> Result<Vec<Recommendation>, CoreError> {
    let context = build_context(phase, entries, has_bills);
    let prompt = build_prompt(&context, phase);
    let text = generator
        .generate(&prompt)
        .map_err(|e| CoreError::GenerationFailed(e.to_string()))?;

    match parse_recommendations(&text) {
        Generated::Parsed(recs) => Ok(recs),
        Generated::Unparseable(reason) => {
            warn!(%reason, "generated recommendations rejected");
            Err(CoreError::GenerationFailed(reason))
        }
    }
}
