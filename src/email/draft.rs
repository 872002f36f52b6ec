//! Notification email drafts

use crate::email::template::render;
use crate::error::Result;
use crate::record::{Record, RecordData};
use crate::sites::SiteDetails;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default body for a shipment notification email
pub const NOTIFICATION_TEMPLATE: &str = "\
Good afternoon,

Please be advised of the following shipment for {facility} (station {station_number}).

Order number: {order_number}
Purchase order: {purchase_order_file}

Items shipped:
{items}

Shipping to:
{shipping_address}
{shipping_city}, {shipping_state} {shipping_zip}

Delivery point of contact: {delivery_poc}

Thank you,
Logistics
";

/// A composed draft, ready to be written out for the mail client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
    /// Files the user should attach before sending
    pub attachments: Vec<PathBuf>,
}

impl EmailDraft {
    /// Write an RFC-822-shaped draft. `X-Unsent` makes mail clients
    /// open it in compose mode; the user reviews and sends manually.
    pub fn write_eml(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "To: {}", self.to.join("; "))?;
        if !self.cc.is_empty() {
            writeln!(writer, "Cc: {}", self.cc.join("; "))?;
        }
        writeln!(writer, "Subject: {}", self.subject)?;
        writeln!(writer, "X-Unsent: 1")?;
        // reminder headers; mail clients ignore these, the user reads them
        for attachment in &self.attachments {
            writeln!(writer, "X-Attachment: {}", attachment.display())?;
        }
        writeln!(writer, "Content-Type: text/plain; charset=utf-8")?;
        writeln!(writer)?;
        writer.write_all(self.body.as_bytes())?;
        Ok(())
    }
}

/// Compose the notification email for a record. Site details fill the
/// recipient lists and the contact placeholders; with no site match the
/// draft is still produced with those fields blank.
pub fn compose_notification(
    record: &Record,
    site: Option<&SiteDetails>,
    template: &str,
) -> EmailDraft {
    let items = summarize_items(record);

    let blank = SiteDetails::default();
    let site = site.unwrap_or(&blank);

    let (station_number, facility) = match &record.data {
        RecordData::ShipmentNotification(shipment) => {
            (shipment.station_number.as_str(), shipment.facility.as_str())
        }
        RecordData::DeliveryRequest(_) => (site.station.as_str(), site.area.as_str()),
    };

    let body = render(
        template,
        &[
            ("order_number", &record.title),
            ("purchase_order_file", &record.purchase_order_file),
            ("station_number", station_number),
            ("facility", facility),
            ("items", &items),
            ("shipping_address", &site.shipping_address),
            ("shipping_city", &site.shipping_city),
            ("shipping_state", &site.shipping_state),
            ("shipping_zip", &site.shipping_zip),
            ("delivery_poc", &site.delivery_poc.name),
        ],
    );

    let mut to = split_addresses(&site.logistics_emails);
    if !site.delivery_poc.email.is_empty() {
        to.push(site.delivery_poc.email.clone());
    }
    let cc = split_addresses(&site.it_emails);

    EmailDraft {
        to,
        cc,
        subject: format!("Shipment Notification - {} - {}", record.title, record.project),
        body,
        attachments: Vec::new(),
    }
}

/// One summary line per tracked item
fn summarize_items(record: &Record) -> String {
    let lines: Vec<String> = match &record.data {
        RecordData::ShipmentNotification(shipment) => shipment
            .lines
            .iter()
            .filter(|line| !line.description.is_empty() || !line.tracking_number.is_empty())
            .map(|line| {
                let mut entry = format!("  - {} x {}", line.qty, line.description);
                if !line.sku.is_empty() {
                    entry.push_str(&format!(" (SKU {})", line.sku));
                }
                if !line.tracking_number.is_empty() {
                    entry.push_str(&format!(", tracking {}", line.tracking_number));
                }
                entry
            })
            .collect(),
        RecordData::DeliveryRequest(shipments) => shipments
            .iter()
            .map(|shipment| {
                format!(
                    "  - {} {} shipped {}",
                    shipment.carrier, shipment.tracking_number, shipment.ship_date
                )
            })
            .collect(),
    };

    if lines.is_empty() {
        "  (none)".to_string()
    } else {
        lines.join("\n")
    }
}

fn split_addresses(list: &str) -> Vec<String> {
    list.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
