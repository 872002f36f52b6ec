//! Submit pipeline
//!
//! Creates the per-record item folder, copies the two source documents
//! in under derived names, derives the serial summary workbook, and
//! builds the record. All of this runs before any registry mutation,
//! so a failure here leaves the registry untouched. The filesystem
//! steps themselves are not rolled back on a later failure.

use crate::config::Config;
use crate::error::{Result, ShiptrackError};
use crate::record::{Record, RecordData, ShipmentNotification};
use crate::session::Draft;
use crate::workbook;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Item folder for a record identity
pub fn item_folder(config: &Config, record: &Record) -> PathBuf {
    config
        .files_root
        .join(record.project.name())
        .join(&record.title)
}

/// Display name of a source document
pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Run the intake side effects for a validated draft and build the
/// record. The spreadsheet copy lands as `{order}.xlsx` and the
/// derived summary as `{order}_SN.xlsx` next to the purchase order.
pub fn execute(draft: &Draft, shipment: ShipmentNotification, config: &Config) -> Result<Record> {
    let spreadsheet = draft
        .spreadsheet_path
        .as_deref()
        .ok_or_else(|| ShiptrackError::InvalidDraft("no shipment notification selected".into()))?;
    let purchase_order = draft
        .purchase_order_path
        .as_deref()
        .ok_or_else(|| ShiptrackError::InvalidDraft("no purchase order selected".into()))?;

    if shipment.order_number.is_empty() {
        return Err(ShiptrackError::Workbook(
            "no order number found in the notification".into(),
        ));
    }

    let folder = config
        .files_root
        .join(draft.project.name())
        .join(&shipment.order_number);
    std::fs::create_dir_all(&folder)?;

    let purchase_order_file = file_display_name(purchase_order);
    std::fs::copy(purchase_order, folder.join(&purchase_order_file))?;

    let spreadsheet_dest = folder.join(format!("{}.xlsx", shipment.order_number));
    std::fs::copy(spreadsheet, &spreadsheet_dest)?;

    workbook::write_serial_summary(
        &spreadsheet_dest,
        &folder.join(format!("{}_SN.xlsx", shipment.order_number)),
    )?;

    Ok(Record {
        project: draft.project,
        spreadsheet_file: file_display_name(spreadsheet),
        purchase_order_file,
        title: shipment.order_number.clone(),
        email_generated: false,
        date_added: Local::now().naive_local(),
        date_sent: None,
        alive: true,
        data: RecordData::ShipmentNotification(shipment),
    })
}
