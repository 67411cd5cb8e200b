use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::models::cycle::Phase;

// ---------------------------------------------------------------------------
// TextGenerator
// ---------------------------------------------------------------------------

/// External text generation: a prompt goes in, free text comes out.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Used when no generator is configured. Every call fails, which sends the
/// caller down its deterministic path.
pub struct DisabledGenerator;

impl TextGenerator for DisabledGenerator {
    fn generate(&self, _prompt: &str) -> Result<String> {
        bail!("no text generator configured")
    }
}

/// Runs a program once per prompt: prompt on stdin, answer on stdout.
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Build from an argv list; `None` when the list is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        debug!(program = %self.program, prompt_len = prompt.len(), "running text generator");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            bail!(
                "text generator '{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Pick the generator described by a config argv list.
pub fn from_config(argv: &[String]) -> Box<dyn TextGenerator> {
    match CommandGenerator::from_argv(argv) {
        Some(g) => Box::new(g),
        None => Box::new(DisabledGenerator),
    }
}

// ---------------------------------------------------------------------------
// Parse-then-validate
// ---------------------------------------------------------------------------

/// Outcome of reading generator output as a structured record.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Parsed(T),
    Unparseable(String),
}

impl<T> Generated<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Parsed(v) => Some(v),
            Self::Unparseable(_) => None,
        }
    }
}

/// Cycle prediction as proposed by the generator, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPrediction {
    pub next_period_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub predicted_phase: Phase,
    pub confidence: u32,
    pub health_insights: Vec<String>,
}

#[derive(Deserialize)]
struct PredictionPayload {
    next_period_date: String,
    fertile_window_start: String,
    fertile_window_end: String,
    predicted_phase: String,
    confidence: u32,
    health_insights: Vec<String>,
}

fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("{field} is not a YYYY-MM-DD date: {value:?}"))
}

/// Strictly parse a prediction answer. The whole answer must be the JSON
/// object; anything else, or any field failing validation, is unparseable.
pub fn parse_prediction(text: &str) -> Generated<GeneratedPrediction> {
    let payload: PredictionPayload = match serde_json::from_str(text.trim()) {
        Ok(p) => p,
        Err(e) => return Generated::Unparseable(format!("invalid prediction JSON: {e}")),
    };
    match validate_prediction(payload) {
        Ok(p) => Generated::Parsed(p),
        Err(reason) => Generated::Unparseable(reason),
    }
}

fn validate_prediction(p: PredictionPayload) -> Result<GeneratedPrediction, String> {
    let next_period_date = parse_iso_date("next_period_date", &p.next_period_date)?;
    let fertile_window_start = parse_iso_date("fertile_window_start", &p.fertile_window_start)?;
    let fertile_window_end = parse_iso_date("fertile_window_end", &p.fertile_window_end)?;
    if fertile_window_start > fertile_window_end {
        return Err("fertile window ends before it starts".to_string());
    }
    let predicted_phase: Phase = p
        .predicted_phase
        .parse()
        .map_err(|e: anyhow::Error| e.to_string())?;
    if p.confidence > 100 {
        return Err(format!("confidence out of range: {}", p.confidence));
    }
    Ok(GeneratedPrediction {
        next_period_date,
        fertile_window_start,
        fertile_window_end,
        predicted_phase,
        confidence: p.confidence,
        health_insights: p.health_insights,
    })
}

/// The outermost `{...}` block of a chatty answer, if any.
pub fn json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
