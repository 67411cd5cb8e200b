use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::extract::parse_amount;
use crate::db::Database;
use crate::models::bill::Bill;
use crate::models::prediction::PredictionRecord;

const TOP_MEDICINES: usize = 5;

#[derive(Debug, Serialize)]
pub struct InsightsReport {
    pub trends: Vec<MonthlySpending>,
    pub top_medicines: Vec<MedicineFrequency>,
    pub total_bills: u32,
    pub total_predictions: u32,
    pub average_confidence: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlySpending {
    pub month: String,
    pub spending: f64,
    pub bills: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MedicineFrequency {
    pub name: String,
    pub frequency: u32,
    pub last_purchased: NaiveDate,
}

/// A bill's total: its largest `$` amount, or zero when it has none.
pub fn bill_total(amounts: &[String]) -> f64 {
    amounts
        .iter()
        .filter(|a| a.starts_with('$'))
        .filter_map(|a| parse_amount(a))
        .fold(0.0, f64::max)
}

/// Build the insights report from everything stored.
pub fn generate(db: &Database) -> Result<InsightsReport> {
    let bills = db.list_bills(None)?;
    let predictions = db.list_predictions(None)?;
    Ok(summarize(&bills, &predictions))
}

pub fn summarize(bills: &[Bill], predictions: &[PredictionRecord]) -> InsightsReport {
    let mut months: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for bill in bills {
        let key = bill.created_at.format("%Y-%m").to_string();
        let slot = months.entry(key).or_default();
        slot.0 += bill_total(&bill.amounts);
        slot.1 += 1;
    }
    let trends = months
        .into_iter()
        .map(|(month, (spending, count))| MonthlySpending {
            month,
            spending: (spending * 100.0).round() / 100.0,
            bills: count,
        })
        .collect();

    let average_confidence = if predictions.is_empty() {
        0.0
    } else {
        let sum: u32 = predictions.iter().map(|p| p.confidence).sum();
        (sum as f64 / predictions.len() as f64 * 10.0).round() / 10.0
    };

    InsightsReport {
        trends,
        top_medicines: top_medicines(bills),
        total_bills: bills.len() as u32,
        total_predictions: predictions.len() as u32,
        average_confidence,
    }
}

/// Medicines by number of bills they appear on. Ties keep first-seen order.
fn top_medicines(bills: &[Bill]) -> Vec<MedicineFrequency> {
    let mut counts: Vec<MedicineFrequency> = Vec::new();
    let mut ordered: Vec<&Bill> = bills.iter().collect();
    ordered.sort_by_key(|b| b.created_at);

    for bill in ordered {
        let day = bill.created_at.date_naive();
        for name in &bill.medicines {
            if let Some(entry) = counts.iter_mut().find(|m| &m.name == name) {
                entry.frequency += 1;
                entry.last_purchased = entry.last_purchased.max(day);
            } else {
                counts.push(MedicineFrequency {
                    name: name.clone(),
                    frequency: 1,
                    last_purchased: day,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    counts.truncate(TOP_MEDICINES);
    counts
}
