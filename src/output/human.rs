use colored::{ColoredString, Colorize};
use comfy_table::{Table, presets::UTF8_FULL};

use crate::core::predict::CycleStatus;
use crate::core::report::InsightsReport;
use crate::models::bill::{Bill, ExtractedBillData};
use crate::models::cycle::{CycleEntry, Phase};
use crate::models::prediction::{CyclePredictionData, HistoryPrediction, PredictionRecord};
use crate::models::recommendation::Recommendation;

/// Long-form date, e.g. "November 25, 2025".
pub fn format_prediction_date(date: chrono::NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn phase_label(phase: Phase) -> ColoredString {
    let label = phase.to_string();
    match phase {
        Phase::Menstrual => label.red(),
        Phase::Follicular => label.green(),
        Phase::Ovulation => label.magenta(),
        Phase::Luteal => label.yellow(),
    }
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}:", title));
    for item in items {
        out.push_str(&format!("\n  - {}", item));
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Extracted fields of a bill, one line per field.
pub fn format_extracted(data: &ExtractedBillData) -> String {
    format!(
        "Dates: {}\nMedicines: {}\nAmounts: {}",
        join_or_dash(&data.dates),
        join_or_dash(&data.medicines),
        join_or_dash(&data.amounts)
    )
}

pub fn format_prediction(p: &CyclePredictionData) -> String {
    let mut out = format!(
        "Next period: {} (cycle {} days, confidence {}%)",
        format_prediction_date(p.next_period_date),
        p.cycle_length,
        p.confidence
    );
    bullet_list(&mut out, "Insights", &p.insights);
    bullet_list(&mut out, "Recommendations", &p.recommendations);
    out
}

pub fn format_history_prediction(p: &HistoryPrediction) -> String {
    let mut out = format!(
        "Next period: {} | phase: {} | confidence {}%\nFertile window: {} to {}",
        format_prediction_date(p.next_period_date),
        phase_label(p.predicted_phase),
        p.confidence,
        p.fertile_window_start,
        p.fertile_window_end,
    );
    if let Some(observed) = p.observed_cycle_length {
        out.push_str(&format!(
            "\nObserved cycle length: {} days (profile: {})",
            observed, p.cycle_length
        ));
    }
    out.push_str(&format!("\nSource: {}", p.source));
    bullet_list(&mut out, "Insights", &p.health_insights);
    out
}

pub fn format_status(s: &CycleStatus) -> String {
    let mut out = format!("=== Cycle Status — {} ===\n\n", s.date);
    out.push_str(&format!("Phase: {}\n", phase_label(s.phase)));
    out.push_str(&format!(
        "Last period started: {}\n",
        format_prediction_date(s.last_period_start)
    ));
    let until = match s.days_until_next_period {
        d if d > 0 => format!("in {} day(s)", d),
        0 => "today".to_string(),
        d => format!("started {} day(s) ago", -d),
    };
    out.push_str(&format!(
        "Next period: {} ({})\n",
        format_prediction_date(s.next_period_date),
        until
    ));
    out.push_str(&format!(
        "Fertile window: {} to {} (ovulation {})",
        s.fertile_window.start, s.fertile_window.end, s.fertile_window.ovulation
    ));
    if s.in_fertile_window {
        out.push_str("\nToday is inside the fertile window.");
    }
    out
}

pub fn format_bill_list(bills: &[Bill]) -> String {
    if bills.is_empty() {
        return "No bills analyzed yet.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Uploaded", "File", "Medicines", "Amounts"]);
    for b in bills {
        table.add_row(vec![
            b.created_at.format("%Y-%m-%d %H:%M").to_string(),
            b.file_name.clone().unwrap_or_else(|| "(text)".to_string()),
            join_or_dash(&b.medicines),
            join_or_dash(&b.amounts),
        ]);
    }
    table.to_string()
}

pub fn format_cycle_list(entries: &[CycleEntry]) -> String {
    if entries.is_empty() {
        return "No cycle entries recorded.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Period start", "Flow", "Symptoms", "Id"]);
    for e in entries {
        table.add_row(vec![
            e.period_start_date.to_string(),
            e.flow_intensity.to_string(),
            join_or_dash(&e.symptoms),
            e.id.clone(),
        ]);
    }
    table.to_string()
}

pub fn format_prediction_list(records: &[PredictionRecord]) -> String {
    if records.is_empty() {
        return "No predictions yet.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Made on", "Next period", "Phase", "Confidence", "Source"]);
    for r in records {
        table.add_row(vec![
            r.prediction_date.to_string(),
            r.next_period_date.to_string(),
            r.predicted_phase
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            format!("{}%", r.confidence),
            r.source.to_string(),
        ]);
    }
    table.to_string()
}

pub fn format_report(r: &InsightsReport) -> String {
    let mut out = format!(
        "Bills analyzed: {} | Predictions: {} | Avg confidence: {:.1}%",
        r.total_bills, r.total_predictions, r.average_confidence
    );
    if !r.trends.is_empty() {
        out.push_str("\n\nSpending by month:");
        for t in &r.trends {
            out.push_str(&format!(
                "\n  {}  ${:.2} ({} bill(s))",
                t.month, t.spending, t.bills
            ));
        }
    }
    if !r.top_medicines.is_empty() {
        out.push_str("\n\nTop medicines:");
        for m in &r.top_medicines {
            out.push_str(&format!(
                "\n  {} x{} (last {})",
                m.name, m.frequency, m.last_purchased
            ));
        }
    }
    out
}

pub fn format_recommendations(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "No recommendations.".to_string();
    }
    let mut out = String::new();
    for (i, r) in recs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "[{:?}/{:?}] {}: {}",
            r.category, r.priority, r.title, r.description
        ));
        for d in &r.details {
            out.push_str(&format!("\n    • {}", d));
        }
    }
    out
}
