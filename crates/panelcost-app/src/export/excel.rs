//! Excel export functionality

use std::path::Path;

use chrono::Local;
use panelcost_domain::model::Estimate;
use panelcost_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export an estimate to an Excel file
pub fn export_estimate_to_excel(estimate: &Estimate, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    // Itemized sheet
    let items_sheet = workbook.add_worksheet();
    write_items_sheet(items_sheet, estimate)?;

    // Summary sheet
    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, estimate)?;

    workbook.save(output_path).map_err(excel_err)?;

    Ok(())
}

fn write_items_sheet(sheet: &mut Worksheet, estimate: &Estimate) -> Result<()> {
    sheet.set_name("Estimate").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("0.00");

    let headers = [
        "Description",
        "Tinkering",
        "R&R",
        "Painting",
        "Paint Discount (%)",
        "Schedule",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    // Full-precision values; the cell format handles the 2-decimal display
    for (row_idx, item) in estimate.items.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, &item.part).map_err(excel_err)?;
        let values = [
            item.tinkering_cost,
            item.rnr_cost,
            item.painting_cost,
            item.discount_pct,
            item.paint_schedule,
        ];
        for (offset, value) in values.iter().enumerate() {
            sheet
                .write_number_with_format(row, (offset + 1) as u16, *value, &money_format)
                .map_err(excel_err)?;
        }
    }

    sheet.set_column_width(0, 30).map_err(excel_err)?;
    for col in 1..=5u16 {
        sheet.set_column_width(col, 16).map_err(excel_err)?;
    }

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, estimate: &Estimate) -> Result<()> {
    sheet.set_name("Summary").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("0.00");
    let selection = &estimate.selection;

    sheet
        .write_string_with_format(0, 0, "Repair Cost Estimate", &header_format)
        .map_err(excel_err)?;
    sheet.write_string(1, 0, "Generated:").map_err(excel_err)?;
    sheet
        .write_string(1, 1, Local::now().format("%Y-%m-%d %H:%M").to_string())
        .map_err(excel_err)?;

    let fields = [
        ("Maker:", selection.maker.clone()),
        ("Model:", selection.model.clone()),
        ("Year:", selection.year.clone()),
        ("City:", selection.city.clone()),
        ("Paint Type:", selection.paint_finish.clone()),
        ("Garage Type:", selection.garage_tier.to_string()),
    ];
    let mut row = 3;
    for (label, value) in &fields {
        sheet.write_string(row, 0, *label).map_err(excel_err)?;
        sheet.write_string(row, 1, value).map_err(excel_err)?;
        row += 1;
    }
    sheet.write_string(row, 0, "Unit Rate:").map_err(excel_err)?;
    sheet
        .write_number(row, 1, estimate.unit_rate)
        .map_err(excel_err)?;

    row += 2;
    for (col, header) in ["Description", "Tinkering", "R&R", "Painting"].iter().enumerate() {
        sheet
            .write_string_with_format(row, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    let totals = &estimate.totals;
    row += 1;
    sheet.write_string(row, 0, "Sub Total").map_err(excel_err)?;
    for (offset, value) in [totals.tinkering, totals.rnr, totals.painting].iter().enumerate() {
        sheet
            .write_number_with_format(row, (offset + 1) as u16, *value, &money_format)
            .map_err(excel_err)?;
    }

    row += 1;
    sheet.write_string(row, 0, "Grand Total").map_err(excel_err)?;
    sheet
        .write_number_with_format(row, 3, totals.grand_total, &money_format)
        .map_err(excel_err)?;

    sheet.set_column_width(0, 18).map_err(excel_err)?;
    sheet.set_column_width(1, 18).map_err(excel_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelcost_domain::model::{EstimateTotals, LineItemResult, SelectionKey};
    use panelcost_types::GarageTier;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_workbook() {
        let items = vec![LineItemResult {
            part: "BUMPER".to_string(),
            tinkering_cost: 6600.0,
            rnr_cost: 0.0,
            painting_cost: 500.0,
            discount_pct: 50.0,
            paint_schedule: 1000.0,
        }];
        let totals = EstimateTotals::from_items(&items);
        let estimate = Estimate {
            selection: SelectionKey::new("HONDA", "CIVIC", "2020", "MUMBAI", "METALLIC", GarageTier::A),
            garage_discount_rate: 0.0,
            unit_rate: 3300.0,
            items,
            totals,
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("estimate.xlsx");
        export_estimate_to_excel(&estimate, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
