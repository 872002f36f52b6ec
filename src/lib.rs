//! shiptrack
//!
//! Tracks shipment notifications and the purchase orders they belong
//! to: import an Excel notification, file it as a record, and generate
//! the notification email draft later.

pub mod cli;
pub mod config;
pub mod email;
pub mod error;
pub mod intake;
pub mod record;
pub mod registry;
pub mod session;
pub mod sites;
pub mod workbook;

pub use error::{Result, ShiptrackError};
pub use record::{Project, Record, RecordData, ShipmentNotification};
pub use registry::category::{build_tree, CategoryTree};
pub use registry::Registry;
pub use session::{Draft, Session};
