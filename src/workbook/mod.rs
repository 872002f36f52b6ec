//! Shipment notification workbook parsing
//!
//! The notification spreadsheet has a fixed positional layout: one
//! column header row, a banner row whose first cell usually carries the
//! order number, and data rows starting at a fixed offset. Cells are
//! addressed by column position, not header name, and blank or
//! unreadable cells are tolerated value-by-value rather than rejected
//! row-by-row.

use crate::error::{Result, ShiptrackError};
use crate::record::{ShipmentLine, ShipmentNotification};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use regex::Regex;
use std::path::Path;

/// Worksheet holding the notification data rows
pub const SHIPMENT_SHEET: &str = "Shipment";

/// Banner row holding the order-number text
const BANNER_ROW: u32 = 1;
/// First data row
const DATA_START_ROW: u32 = 5;

const COL_DISTRICT: u32 = 0;
const COL_DELIVERY_TYPE: u32 = 1;
const COL_LOCATION_CODE: u32 = 2;
const COL_STATION_NUMBER: u32 = 3;
const COL_SHIPPING_ADDRESS: u32 = 4;
const COL_CITY: u32 = 5;
const COL_STATE: u32 = 6;
const COL_FACILITY: u32 = 7;
const COL_ZIP_CODE: u32 = 8;
const COL_TRACKING_NUMBER: u32 = 9;
const COL_SKU: u32 = 10;
const COL_DESCRIPTION: u32 = 11;
const COL_CLIN: u32 = 12;
const COL_QTY: u32 = 13;
const COL_SERVICE_TAG: u32 = 14;
const COL_PURCHASE_ORDER: u32 = 15;
const COL_ORDER_NUMBER: u32 = 16;

lazy_static::lazy_static! {
    static ref SCTASK_RE: Regex = Regex::new(r"SCTASK(\d+)").unwrap();
}

/// Cell as a trimmed string; blank, missing and error cells become ""
pub(crate) fn cell_str(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) | Some(Data::Error(_)) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::DateTime(dt)) => dt.as_f64().to_string(),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => s.trim().to_string(),
    }
}

/// Cell as an integer; anything that does not parse becomes `default`
pub(crate) fn cell_int(range: &Range<Data>, row: u32, col: u32, default: i64) -> i64 {
    match range.get_value((row, col)) {
        Some(Data::Int(i)) => *i,
        Some(Data::Float(f)) => *f as i64,
        Some(Data::String(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

/// Parse the given shipment notification workbook.
///
/// The order number is the `SCTASK` match in the banner cell; when no
/// match exists, the first non-blank value in the order-number column
/// among the data rows is used instead. The notification-level station
/// number and facility are the first non-blank values in their columns.
pub fn parse_shipment_notification(path: &Path) -> Result<ShipmentNotification> {
    if !path.exists() {
        return Err(ShiptrackError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| ShiptrackError::Workbook(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ShiptrackError::Workbook("workbook has no sheets".to_string()))?
        .map_err(|e| ShiptrackError::Workbook(e.to_string()))?;

    let banner = cell_str(&range, BANNER_ROW, COL_DISTRICT);
    let mut order_number = SCTASK_RE
        .find(&banner)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let mut alt_order_number = String::new();
    let mut station_number = String::new();
    let mut facility = String::new();
    let mut lines = Vec::new();

    let end_row = range.end().map(|(row, _)| row).unwrap_or(0);
    for row in DATA_START_ROW..=end_row {
        let line_order_number = cell_str(&range, row, COL_ORDER_NUMBER);
        let line_station = cell_str(&range, row, COL_STATION_NUMBER);
        let line_facility = cell_str(&range, row, COL_FACILITY);

        // fall back to the first non-blank order number among the rows
        if alt_order_number.is_empty() && !line_order_number.is_empty() {
            alt_order_number = line_order_number.clone();
        }
        if station_number.is_empty() && !line_station.is_empty() {
            station_number = line_station.clone();
        }
        if facility.is_empty() && !line_facility.is_empty() {
            facility = line_facility.clone();
        }

        lines.push(ShipmentLine {
            district: cell_str(&range, row, COL_DISTRICT),
            delivery_type: cell_str(&range, row, COL_DELIVERY_TYPE),
            location_code: cell_str(&range, row, COL_LOCATION_CODE),
            station_number: line_station,
            shipping_address: cell_str(&range, row, COL_SHIPPING_ADDRESS),
            city: cell_str(&range, row, COL_CITY),
            state: cell_str(&range, row, COL_STATE),
            facility: line_facility,
            zip_code: cell_str(&range, row, COL_ZIP_CODE),
            tracking_number: cell_str(&range, row, COL_TRACKING_NUMBER),
            sku: cell_str(&range, row, COL_SKU),
            description: cell_str(&range, row, COL_DESCRIPTION),
            clin: cell_str(&range, row, COL_CLIN),
            qty: cell_int(&range, row, COL_QTY, 1),
            service_tag: cell_str(&range, row, COL_SERVICE_TAG),
            purchase_order: cell_str(&range, row, COL_PURCHASE_ORDER),
            order_number: line_order_number,
        });
    }

    if order_number.is_empty() {
        order_number = alt_order_number;
    }

    Ok(ShipmentNotification {
        order_number,
        station_number,
        facility,
        lines,
    })
}

/// Derive the one-workbook serial summary: every sheet of the source
/// except the shipment sheet, values copied cell-by-cell.
pub fn write_serial_summary(src: &Path, dest: &Path) -> Result<()> {
    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(src).map_err(|e: calamine::XlsxError| ShiptrackError::Workbook(e.to_string()))?;
    let names = workbook.sheet_names().to_owned();

    let mut out = rust_xlsxwriter::Workbook::new();
    let mut copied = 0;

    for name in names {
        if name == SHIPMENT_SHEET {
            continue;
        }
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ShiptrackError::Workbook(e.to_string()))?;

        let sheet = out.add_worksheet();
        sheet
            .set_name(&name)
            .map_err(|e| ShiptrackError::WorkbookWrite(e.to_string()))?;
        copy_cells(&range, sheet)?;
        copied += 1;
    }

    if copied == 0 {
        return Err(ShiptrackError::Workbook(format!(
            "{} has no sheets besides \"{}\"",
            src.display(),
            SHIPMENT_SHEET
        )));
    }

    out.save(dest)
        .map_err(|e| ShiptrackError::WorkbookWrite(e.to_string()))?;
    Ok(())
}

fn copy_cells(range: &Range<Data>, sheet: &mut rust_xlsxwriter::Worksheet) -> Result<()> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    for (r, c, value) in range.used_cells() {
        let row = start_row + r as u32;
        let col = (start_col as usize + c) as u16;
        let written = match value {
            Data::String(s) => sheet.write_string(row, col, s),
            Data::Float(f) => sheet.write_number(row, col, *f),
            Data::Int(i) => sheet.write_number(row, col, *i as f64),
            Data::Bool(b) => sheet.write_boolean(row, col, *b),
            Data::DateTime(dt) => sheet.write_number(row, col, dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => sheet.write_string(row, col, s),
            Data::Empty | Data::Error(_) => continue,
        };
        written.map_err(|e| ShiptrackError::WorkbookWrite(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_with(cells: &[(u32, u32, Data)]) -> Range<Data> {
        let mut range = Range::new((0, 0), (10, 20));
        for (row, col, value) in cells {
            range.set_value((*row, *col), value.clone());
        }
        range
    }

    #[test]
    fn test_cell_str_defaults_to_empty() {
        let range = range_with(&[(0, 0, Data::String("  hello  ".into()))]);
        assert_eq!(cell_str(&range, 0, 0), "hello");
        assert_eq!(cell_str(&range, 5, 5), "");
    }

    #[test]
    fn test_cell_str_formats_whole_floats() {
        let range = range_with(&[(0, 0, Data::Float(512.0)), (0, 1, Data::Float(1.5))]);
        assert_eq!(cell_str(&range, 0, 0), "512");
        assert_eq!(cell_str(&range, 0, 1), "1.5");
    }

    #[test]
    fn test_cell_int_defaults() {
        let range = range_with(&[
            (0, 0, Data::Float(3.0)),
            (0, 1, Data::String("7".into())),
            (0, 2, Data::String("seven".into())),
        ]);
        assert_eq!(cell_int(&range, 0, 0, 1), 3);
        assert_eq!(cell_int(&range, 0, 1, 1), 7);
        assert_eq!(cell_int(&range, 0, 2, 1), 1);
        assert_eq!(cell_int(&range, 9, 9, 1), 1);
    }

    #[test]
    fn test_sctask_pattern() {
        assert_eq!(
            SCTASK_RE.find("Shipment Notification - SCTASK12345 / week 3").map(|m| m.as_str()),
            Some("SCTASK12345")
        );
        assert!(SCTASK_RE.find("no order here").is_none());
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_shipment_notification(Path::new("/nonexistent/notification.xlsx"));
        assert!(matches!(result, Err(ShiptrackError::FileNotFound(_))));
    }
}
