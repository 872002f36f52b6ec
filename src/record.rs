//! Record types
//!
//! A `Record` is one persisted unit of tracked work: a shipment
//! notification associated with a purchase order. Identity fields
//! (title, payload kind, date_added) are immutable after creation;
//! only `alive`, `date_sent` and `email_generated` change later.

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fixed set of projects a record can belong to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Project {
    SupportingTechnologies,
    Pvaas,
    SpecializedDevices,
    #[default]
    Other,
}

impl Project {
    pub const ALL: [Project; 4] = [
        Project::SupportingTechnologies,
        Project::Pvaas,
        Project::SpecializedDevices,
        Project::Other,
    ];

    /// Display name, also used as the folder name under the files root
    pub fn name(&self) -> &'static str {
        match self {
            Project::SupportingTechnologies => "Supporting Technologies",
            Project::Pvaas => "PVaaS",
            Project::SpecializedDevices => "Specialized Devices",
            Project::Other => "Other",
        }
    }

    /// Position in `Project::ALL`
    pub fn index(&self) -> usize {
        match self {
            Project::SupportingTechnologies => 0,
            Project::Pvaas => 1,
            Project::SpecializedDevices => 2,
            Project::Other => 3,
        }
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One persisted shipment/purchase-order association
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub project: Project,
    /// Display name of the source spreadsheet
    pub spreadsheet_file: String,
    /// Display name of the purchase order document
    pub purchase_order_file: String,
    /// Order number extracted from the source spreadsheet
    pub title: String,
    pub email_generated: bool,
    pub date_added: NaiveDateTime,
    pub date_sent: Option<NaiveDateTime>,
    /// Active vs. archived; there is no delete
    pub alive: bool,
    pub data: RecordData,
}

impl Record {
    pub fn date_label(&self) -> String {
        self.date_added.format("%m/%d/%Y").to_string()
    }
}

/// Parsed payload of a record, discriminated by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum RecordData {
    ShipmentNotification(ShipmentNotification),
    DeliveryRequest(Vec<DeliveryShipment>),
}

impl RecordData {
    pub fn kind_label(&self) -> &'static str {
        match self {
            RecordData::ShipmentNotification(_) => "Shipment Notification",
            RecordData::DeliveryRequest(_) => "Delivery Request",
        }
    }
}

/// Parsed content of a shipment notification spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentNotification {
    pub order_number: String,
    /// First non-blank station number among the data rows
    pub station_number: String,
    /// First non-blank facility name among the data rows
    pub facility: String,
    pub lines: Vec<ShipmentLine>,
}

/// One data row of a shipment notification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentLine {
    pub district: String,
    pub delivery_type: String,
    pub location_code: String,
    pub station_number: String,
    pub shipping_address: String,
    pub city: String,
    pub state: String,
    pub facility: String,
    pub zip_code: String,
    pub tracking_number: String,
    pub sku: String,
    pub description: String,
    pub clin: String,
    pub qty: i64,
    pub service_tag: String,
    pub purchase_order: String,
    pub order_number: String,
}

/// One shipment within a delivery-notification request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryShipment {
    pub project: String,
    pub location_code: String,
    pub location_name: String,
    pub sales_order: String,
    pub invoice: String,
    pub tracking_number: String,
    pub carrier: String,
    pub ship_date: String,
    pub delivery_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_record() -> Record {
        Record {
            project: Project::Pvaas,
            spreadsheet_file: "notification.xlsx".to_string(),
            purchase_order_file: "po.pdf".to_string(),
            title: "SCTASK12345".to_string(),
            email_generated: false,
            date_added: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            date_sent: None,
            alive: true,
            data: RecordData::ShipmentNotification(ShipmentNotification {
                order_number: "SCTASK12345".to_string(),
                station_number: "512".to_string(),
                facility: "Baltimore".to_string(),
                lines: vec![],
            }),
        }
    }

    #[test]
    fn test_project_names() {
        assert_eq!(Project::SupportingTechnologies.name(), "Supporting Technologies");
        assert_eq!(Project::Pvaas.name(), "PVaaS");
        assert_eq!(Project::SpecializedDevices.name(), "Specialized Devices");
        assert_eq!(Project::Other.name(), "Other");
    }

    #[test]
    fn test_project_index_matches_all() {
        for (i, project) in Project::ALL.iter().enumerate() {
            assert_eq!(project.index(), i);
        }
    }

    #[test]
    fn test_record_roundtrip() {
        let original = sample_record();
        let json = serde_json::to_string(&original).expect("serialize failed");
        let restored: Record = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(original, restored);
    }

    #[test]
    fn test_record_data_tagged() {
        let record = sample_record();
        let json = serde_json::to_string(&record).expect("serialize failed");
        assert!(json.contains("\"kind\":\"ShipmentNotification\""));
    }

    #[test]
    fn test_kind_labels() {
        let record = sample_record();
        assert_eq!(record.data.kind_label(), "Shipment Notification");
        let request = RecordData::DeliveryRequest(vec![]);
        assert_eq!(request.kind_label(), "Delivery Request");
    }

    #[test]
    fn test_date_label() {
        let record = sample_record();
        assert_eq!(record.date_label(), "03/14/2026");
    }
}
