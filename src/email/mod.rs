//! Notification email generation
//!
//! Drafts are rendered from a plain-text template and written out as
//! `.eml` files for the user's mail client. Nothing is ever sent from
//! here. The tracking submodule maintains a local index of tracking
//! numbers found in stored notification emails.

pub mod draft;
pub mod template;
pub mod tracking;

pub use draft::{compose_notification, EmailDraft, NOTIFICATION_TEMPLATE};
pub use template::render;
pub use tracking::{extract_tracking_numbers, TrackingIndex};

use crate::config::Config;
use crate::error::{Result, ShiptrackError};
use crate::record::{Record, RecordData};
use crate::registry::Registry;
use crate::sites::SiteDirectory;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Compose and write the notification draft for the record at `index`,
/// then flag it in the registry. The draft lands in the record's item
/// folder unless an explicit output path is given. A missing site list
/// or an unknown station code degrades to blank contact fields.
pub fn generate_for_record(
    config: &Config,
    registry: &Registry,
    records: &[Record],
    index: usize,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let record = records
        .get(index)
        .ok_or(ShiptrackError::RecordNotFound(index))?;

    let site = match &record.data {
        RecordData::ShipmentNotification(shipment) if config.site_list_path.exists() => {
            SiteDirectory::from_xlsx(&config.site_list_path)
                .ok()
                .and_then(|dir| {
                    dir.lookup(&shipment.station_number, &shipment.facility)
                        .ok()
                        .cloned()
                })
        }
        _ => None,
    };

    let template = config.notification_template()?;
    let mut draft = compose_notification(record, site.as_ref(), &template);

    let folder = crate::intake::item_folder(config, record);
    draft.attachments = [
        folder.join(&record.purchase_order_file),
        folder.join(format!("{}.xlsx", record.title)),
        folder.join(format!("{}_SN.xlsx", record.title)),
    ]
    .into_iter()
    .filter(|p| p.exists())
    .collect();

    let default_path = folder.join(format!("{}.eml", record.title));
    let path = output.unwrap_or(&default_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    draft.write_eml(path)?;

    registry.mark_email_generated(index, Local::now().naive_local())?;
    Ok(path.to_path_buf())
}
