use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use crate::models::bill::ExtractedBillData;

/// Medicine stems recognised on bills, in match order.
pub const MEDICINE_STEMS: &[&str] = &[
    "ibuprofen",
    "paracetamol",
    "aspirin",
    "naproxen",
    "iron",
    "vitamin",
    "supplement",
    "painkiller",
    "contraceptive",
    "hormone",
    "estrogen",
    "progesterone",
    "birth control",
    "pill",
    "menstrual",
    "period",
    "calcium",
    "magnesium",
    "zinc",
    "b12",
    "folic acid",
];

/// Date families, applied in this order: D/M/Y, Y/M/D, then "D Month Y".
/// Digits and month letters are ASCII only.
static DATE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"[0-9]{1,2}[-/][0-9]{1,2}[-/][0-9]{2,4}").expect("valid regex"),
        Regex::new(r"[0-9]{4}[-/][0-9]{1,2}[-/][0-9]{1,2}").expect("valid regex"),
        Regex::new(
            r"(?i)[0-9]{1,2}\s+(?-u:(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*)\s+[0-9]{4}",
        )
        .expect("valid regex"),
    ]
});

static MEDICINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MEDICINE_STEMS
        .iter()
        .map(|stem| {
            Regex::new(&format!(r"(?i-u)\b{}[a-z]*\b", regex::escape(stem)))
                .expect("valid regex")
        })
        .collect()
});

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?[0-9]+(?:\.[0-9]{2})?").expect("valid regex"));

/// Insertion-ordered set of matched substrings.
#[derive(Default)]
struct OrderedSet<'a> {
    seen: HashSet<&'a str>,
    items: Vec<String>,
}

impl<'a> OrderedSet<'a> {
    fn insert(&mut self, s: &'a str) {
        if self.seen.insert(s) {
            self.items.push(s.to_string());
        }
    }
}

/// Pull dates, medicine mentions and amounts out of raw bill text.
///
/// Never fails: text with no matches gives empty lists.
pub fn extract(text: &str) -> ExtractedBillData {
    let (dates, date_spans) = extract_dates(text);
    ExtractedBillData {
        dates,
        medicines: extract_medicines(text),
        amounts: extract_amounts(text, &date_spans),
    }
}

fn extract_dates(text: &str) -> (Vec<String>, Vec<Range<usize>>) {
    let mut found = OrderedSet::default();
    let mut spans = Vec::new();
    for pattern in DATE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            spans.push(m.range());
            found.insert(m.as_str());
        }
    }
    (found.items, spans)
}

fn extract_medicines(text: &str) -> Vec<String> {
    let mut found = OrderedSet::default();
    for pattern in MEDICINE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            found.insert(m.as_str());
        }
    }
    found.items
}

/// Numbers that sit inside a matched date are parts of that date, not money.
fn extract_amounts(text: &str, date_spans: &[Range<usize>]) -> Vec<String> {
    let mut found = OrderedSet::default();
    for m in AMOUNT_PATTERN.find_iter(text) {
        let overlaps_date = date_spans
            .iter()
            .any(|span| m.start() < span.end && m.end() > span.start);
        if !overlaps_date {
            found.insert(m.as_str());
        }
    }
    found.items
}

/// Numeric value of an amount string such as `"$12.50"`.
pub fn parse_amount(amount: &str) -> Option<f64> {
    amount.trim_start_matches('$').parse().ok()
}
