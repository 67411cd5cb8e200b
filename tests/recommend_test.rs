use cyclepredict::core::generator::{DisabledGenerator, Generated};
use cyclepredict::core::recommend::{build_context, build_prompt, generate, parse_recommendations};
use cyclepredict::error::CoreError;
use cyclepredict::models::cycle::Phase;
use cyclepredict::models::recommendation::{Priority, RecommendationCategory};

mod common;
use common::{FailingGenerator, StaticGenerator, date, entry};

const ANSWER: &str = r#"{
  "recommendations": [
    {
      "id": "rec_1",
      "category": "nutrition",
      "title": "Eat iron-rich foods",
      "description": "Replenish iron lost during your period.",
      "details": ["Spinach", "Lentils"],
      "phase": "luteal",
      "priority": "high"
    },
    {
      "id": "rec_2",
      "category": "exercise",
      "title": "Gentle yoga",
      "description": "Low intensity movement eases cramps.",
      "phase": "luteal",
      "priority": "medium"
    }
  ]
}"#;

#[test]
fn test_context_with_phase_symptoms_and_bills() {
    let entries = vec![
        entry(date(2025, 10, 27)).with_symptoms(["cramps", "bloating"]),
        entry(date(2025, 9, 29)).with_symptoms(["cramps", "fatigue"]),
    ];
    let context = build_context(Some(Phase::Luteal), &entries, true);
    assert_eq!(
        context,
        "Current cycle phase: luteal\n\
         Recent symptoms: cramps, bloating, fatigue\n\
         Has tracked medical expenses\n"
    );
}

#[test]
fn test_context_without_data() {
    let context = build_context(None, &[], false);
    assert_eq!(context, "Current cycle phase: unknown\n");
}

#[test]
fn test_prompt_embeds_context_and_phase() {
    let context = build_context(Some(Phase::Ovulation), &[], false);
    let prompt = build_prompt(&context, Some(Phase::Ovulation));
    assert!(prompt.contains("Current cycle phase: ovulation"));
    assert!(prompt.contains("\"phase\": \"ovulation\""));
    assert!(prompt.contains("8-10 personalized health recommendations"));
}

#[test]
fn test_parse_plain_answer() {
    let recs = parse_recommendations(ANSWER).ok().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].category, RecommendationCategory::Nutrition);
    assert_eq!(recs[0].priority, Priority::High);
    assert_eq!(recs[0].details, vec!["Spinach", "Lentils"]);
    assert!(recs[1].details.is_empty());
}

#[test]
fn test_parse_chatty_answer() {
    let chatty = format!("Here are your recommendations:\n```json\n{ANSWER}\n```\nStay well!");
    let recs = parse_recommendations(&chatty).ok().unwrap();
    assert_eq!(recs[1].title, "Gentle yoga");
}

#[test]
fn test_parse_rejects_unknown_category() {
    let bad = ANSWER.replace("\"exercise\"", "\"astrology\"");
    assert!(matches!(parse_recommendations(&bad), Generated::Unparseable(_)));
}

#[test]
fn test_parse_rejects_blank_title() {
    let bad = ANSWER.replace("Gentle yoga", "  ");
    assert!(matches!(parse_recommendations(&bad), Generated::Unparseable(_)));
}

#[test]
fn test_parse_rejects_answer_without_json() {
    assert!(matches!(
        parse_recommendations("I cannot help with that."),
        Generated::Unparseable(_)
    ));
    assert!(matches!(
        parse_recommendations(r#"{"tips": []}"#),
        Generated::Unparseable(_)
    ));
}

#[test]
fn test_generate_returns_parsed_recommendations() {
    let generator = StaticGenerator::new(ANSWER);
    let recs = generate(Some(Phase::Luteal), &[], true, &generator).unwrap();
    assert_eq!(recs.len(), 2);
    assert!(
        generator
            .last_prompt
            .borrow()
            .contains("Has tracked medical expenses")
    );
}

#[test]
fn test_generate_without_generator_fails() {
    let err = generate(Some(Phase::Luteal), &[], false, &DisabledGenerator).unwrap_err();
    assert!(matches!(err, CoreError::GenerationFailed(_)));
    assert_eq!(err.code(), "generation_failed");
}

#[test]
fn test_generate_error_and_garbage_fail() {
    assert!(generate(None, &[], false, &FailingGenerator).is_err());
    let generator = StaticGenerator::new("not json at all");
    let err = generate(None, &[], false, &generator).unwrap_err();
    assert!(matches!(err, CoreError::GenerationFailed(_)));
}
