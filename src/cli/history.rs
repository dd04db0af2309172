use super::ui;
use crate::core::RateRecord;
use crate::store::RateLog;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};

pub fn run(log: &RateLog, limit: Option<usize>, base: &str, target: &str) -> Result<()> {
    let records = log.load()?;
    if records.is_empty() {
        println!(
            "No rates recorded yet in {}",
            ui::style_text(&log.path().display().to_string(), ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!(
        "\n{}",
        ui::style_text(&format!("{base} to {target} history"), ui::StyleType::Title)
    );
    println!("{}", build_table(&records, limit));
    Ok(())
}

/// Most recent `limit` records, oldest first, each with its change from the day before.
pub fn build_table(records: &[RateRecord], limit: Option<usize>) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Rate"),
        ui::header_cell("Change"),
    ]);

    let start = limit.map_or(0, |n| records.len().saturating_sub(n));
    for (i, record) in records.iter().enumerate().skip(start) {
        let change = i
            .checked_sub(1)
            .and_then(|prev| record.change_from(&records[prev]));
        table.add_row(vec![
            Cell::new(record.date.format("%Y-%m-%d")),
            Cell::new(record.rate).set_alignment(CellAlignment::Right),
            change.map_or_else(ui::na_cell, ui::change_cell),
        ]);
    }
    table
}
