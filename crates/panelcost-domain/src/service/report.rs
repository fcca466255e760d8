//! Plain-text estimate report

use crate::model::{round2, Estimate};

pub fn generate_estimate_report(estimate: &Estimate) -> String {
    let selection = &estimate.selection;

    let mut report = String::new();
    report.push_str("==========================================================================\n");
    report.push_str("              COST ESTIMATE (Tinkering, R&R, Painting)                    \n");
    report.push_str("==========================================================================\n\n");
    report.push_str("[Selection]\n");
    report.push_str(&format!("  Maker:       {}\n", selection.maker));
    report.push_str(&format!("  Model:       {}\n", selection.model));
    report.push_str(&format!("  Year:        {}\n", selection.year));
    report.push_str(&format!("  City:        {}\n", selection.city));
    report.push_str(&format!("  Paint type:  {}\n", selection.paint_finish));
    report.push_str(&format!(
        "  Garage:      {} (rate {:.2}, not applied)\n",
        selection.garage_tier, estimate.garage_discount_rate
    ));
    report.push_str(&format!("  Unit rate:   {:.2}\n\n", estimate.unit_rate));

    report.push_str("[Final Estimate]\n");
    report.push_str("-".repeat(74).as_str());
    report.push('\n');
    report.push_str(&format!(
        "{:<20} {:>11} {:>11} {:>11} {:>7} {:>11}\n",
        "Description", "Tinkering", "R&R", "Painting", "Disc %", "Schedule"
    ));
    report.push_str("-".repeat(74).as_str());
    report.push('\n');
    for item in &estimate.items {
        report.push_str(&format!(
            "{:<20} {:>11.2} {:>11.2} {:>11.2} {:>7.2} {:>11.2}\n",
            truncate_str(&item.part, 20),
            round2(item.tinkering_cost),
            round2(item.rnr_cost),
            round2(item.painting_cost),
            round2(item.discount_pct),
            round2(item.paint_schedule)
        ));
    }
    report.push('\n');

    let totals = &estimate.totals;
    report.push_str("[Summary]\n");
    report.push_str("-".repeat(74).as_str());
    report.push('\n');
    report.push_str(&format!(
        "{:<20} {:>11} {:>11} {:>11}\n",
        "Description", "Tinkering", "R&R", "Painting"
    ));
    report.push_str(&format!(
        "{:<20} {:>11.2} {:>11.2} {:>11.2}\n",
        "Sub Total",
        round2(totals.tinkering),
        round2(totals.rnr),
        round2(totals.painting)
    ));
    report.push_str(&format!(
        "{:<20} {:>11} {:>11} {:>11.2}\n",
        "Grand Total",
        "",
        "",
        round2(totals.grand_total)
    ));
    report.push_str("==========================================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
