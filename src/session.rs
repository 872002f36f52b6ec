//! Session state machine
//!
//! A session is the transient controller between the user and the
//! registry: either no record is loaded and the form is a blank entry
//! draft (`New`), or exactly one record is loaded for viewing
//! (`Loaded`). A loaded record's project and source-file associations
//! are immutable, so the only ways out of `Loaded` are `close` (discard
//! the working copy) and actions that go through the registry.
//!
//! Transitions:
//! - `New --select(id)--> Loaded`
//! - `Loaded --close--> New`
//! - `New --submit(valid draft)--> New` (record appended, blank draft)

use crate::config::Config;
use crate::email;
use crate::error::{Result, ShiptrackError};
use crate::intake;
use crate::record::{Project, Record, RecordData, ShipmentNotification};
use crate::registry::category::{build_tree, CategoryTree};
use crate::registry::Registry;
use dialoguer::Input;
use std::path::PathBuf;

/// Editable working state of the blank entry form
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub project: Project,
    pub spreadsheet_path: Option<PathBuf>,
    pub purchase_order_path: Option<PathBuf>,
}

impl Draft {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            spreadsheet_path: None,
            purchase_order_path: None,
        }
    }

    /// Submit gate: both source documents must point at existing files
    /// at check time.
    pub fn is_valid(&self) -> bool {
        let exists = |path: &Option<PathBuf>| path.as_deref().is_some_and(|p| p.exists());
        exists(&self.spreadsheet_path) && exists(&self.purchase_order_path)
    }
}

pub enum Session {
    New(Draft),
    Loaded {
        /// Node id the record was selected under
        id: u32,
        /// Registry index of the loaded record
        index: usize,
        /// Working copy of the record for display
        working: Record,
    },
}

impl Session {
    pub fn new() -> Self {
        Session::New(Draft::default())
    }

    pub fn with_draft(draft: Draft) -> Self {
        Session::New(draft)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Session::Loaded { .. })
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Session::New(draft) => Some(draft),
            Session::Loaded { .. } => None,
        }
    }

    /// `New --select--> Loaded`. The node id comes from the displayed
    /// tree; the tree maps it back to the registry index.
    pub fn select(&mut self, tree: &CategoryTree, records: &[Record], id: u32) -> Result<&Record> {
        if self.is_loaded() {
            return Err(ShiptrackError::Session(
                "close the loaded record before selecting another".into(),
            ));
        }

        let index = tree
            .record_index(id)
            .ok_or(ShiptrackError::RecordNotFound(id as usize))?;
        let working = records
            .get(index)
            .cloned()
            .ok_or(ShiptrackError::RecordNotFound(index))?;

        *self = Session::Loaded { id, index, working };
        match self {
            Session::Loaded { working, .. } => Ok(working),
            Session::New(_) => unreachable!(),
        }
    }

    /// `Loaded --close--> New`. Discards the working copy; the record
    /// itself is untouched.
    pub fn close(&mut self) {
        *self = Session::new();
    }

    /// `New --submit(valid)--> New`. Runs the intake pipeline, appends
    /// to the registry, and resets the draft. Intake failures abort
    /// before the registry is touched.
    pub fn submit(
        &mut self,
        shipment: ShipmentNotification,
        registry: &Registry,
        config: &Config,
    ) -> Result<Record> {
        let Session::New(draft) = &*self else {
            return Err(ShiptrackError::Session(
                "submit is only available with no record loaded".into(),
            ));
        };
        if !draft.is_valid() {
            return Err(ShiptrackError::InvalidDraft(
                "both source documents must exist".into(),
            ));
        }

        let record = intake::execute(draft, shipment, config)?;
        registry.append(record.clone())?;
        *self = Session::new();
        Ok(record)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Review action chosen while a record is loaded
enum ReviewAction {
    Email,
    Archive,
    Close,
    Quit,
}

/// Interactively walk the registry: pick a record from the tree, view
/// it, generate its email or archive it, close, repeat.
pub fn run_interactive_review(config: &Config) -> Result<()> {
    let registry = Registry::new(&config.registry_path);
    let mut records = registry.load()?;
    let mut tree = build_tree(&records);
    let mut session = Session::new();

    println!("Controls: node id to load, then [e]mail [a]rchive [c]lose [q]uit");
    println!("---\n");

    loop {
        match &session {
            Session::New(_) => {
                print!("{}", tree.render());
                let input: String = Input::new()
                    .with_prompt("node id (q:quit)")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| ShiptrackError::Prompt(e.to_string()))?;
                let trimmed = input.trim();

                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.eq_ignore_ascii_case("q") {
                    break;
                }
                let Ok(id) = trimmed.parse::<u32>() else {
                    println!("  not a node id: {}\n", trimmed);
                    continue;
                };
                match session.select(&tree, &records, id) {
                    Ok(record) => print_record(record),
                    Err(e) => println!("  {}\n", e),
                }
            }
            Session::Loaded { index, .. } => {
                let index = *index;
                match prompt_review_action()? {
                    ReviewAction::Email => {
                        match email::generate_for_record(config, &registry, &records, index, None) {
                            Ok(path) => println!("  ✔ draft written: {}\n", path.display()),
                            Err(e) => println!("  email generation failed: {}\n", e),
                        }
                        records = registry.load()?;
                        tree = build_tree(&records);
                        session.close();
                    }
                    ReviewAction::Archive => {
                        match registry.mark_archived(index) {
                            Ok(record) => println!("  ✔ archived {}\n", record.title),
                            Err(e) => println!("  archive failed: {}\n", e),
                        }
                        records = registry.load()?;
                        tree = build_tree(&records);
                        session.close();
                    }
                    ReviewAction::Close => session.close(),
                    ReviewAction::Quit => break,
                }
            }
        }
    }

    Ok(())
}

fn prompt_review_action() -> Result<ReviewAction> {
    loop {
        let input: String = Input::new()
            .with_prompt("action (e:email a:archive c:close q:quit)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ShiptrackError::Prompt(e.to_string()))?;

        match input.trim() {
            "e" | "E" => return Ok(ReviewAction::Email),
            "a" | "A" => return Ok(ReviewAction::Archive),
            "" | "c" | "C" => return Ok(ReviewAction::Close),
            "q" | "Q" => return Ok(ReviewAction::Quit),
            other => println!("  unknown action: {}", other),
        }
    }
}

/// Detail view of a loaded record
pub fn print_record(record: &Record) {
    println!("\n{} [{}]", record.title, record.data.kind_label());
    println!("  project:        {}", record.project);
    println!("  spreadsheet:    {}", record.spreadsheet_file);
    println!("  purchase order: {}", record.purchase_order_file);
    println!("  added:          {}", record.date_label());
    println!("  status:         {}", if record.alive { "Active" } else { "Inactive" });
    println!(
        "  email:          {}",
        match record.date_sent {
            Some(sent) => format!("generated {}", sent.format("%m/%d/%Y")),
            None if record.email_generated => "generated".to_string(),
            None => "not generated".to_string(),
        }
    );
    match &record.data {
        RecordData::ShipmentNotification(shipment) => {
            println!("  station:        {}", shipment.station_number);
            println!("  facility:       {}", shipment.facility);
            println!("  lines:          {}", shipment.lines.len());
        }
        RecordData::DeliveryRequest(shipments) => {
            println!("  shipments:      {}", shipments.len());
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(title: &str, project: Project) -> Record {
        Record {
            project,
            spreadsheet_file: format!("{}.xlsx", title),
            purchase_order_file: format!("{}.pdf", title),
            title: title.to_string(),
            email_generated: false,
            date_added: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            date_sent: None,
            alive: true,
            data: RecordData::ShipmentNotification(ShipmentNotification {
                order_number: title.to_string(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_blank_draft_is_invalid() {
        assert!(!Draft::default().is_valid());
    }

    #[test]
    fn test_draft_with_missing_files_is_invalid() {
        let draft = Draft {
            project: Project::Other,
            spreadsheet_path: Some(PathBuf::from("/nonexistent/notification.xlsx")),
            purchase_order_path: Some(PathBuf::from("/nonexistent/po.pdf")),
        };
        assert!(!draft.is_valid());
    }

    #[test]
    fn test_draft_with_existing_files_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let spreadsheet = dir.path().join("notification.xlsx");
        let po = dir.path().join("po.pdf");
        std::fs::write(&spreadsheet, b"x").unwrap();
        std::fs::write(&po, b"x").unwrap();

        let draft = Draft {
            project: Project::Other,
            spreadsheet_path: Some(spreadsheet),
            purchase_order_path: Some(po),
        };
        assert!(draft.is_valid());
    }

    #[test]
    fn test_select_and_close() {
        let records = vec![record("SCTASK100", Project::Pvaas)];
        let tree = build_tree(&records);
        let mut session = Session::new();

        let loaded = session.select(&tree, &records, 1).unwrap();
        assert_eq!(loaded.title, "SCTASK100");
        assert!(session.is_loaded());
        assert!(session.draft().is_none());

        session.close();
        assert!(!session.is_loaded());
        assert!(session.draft().is_some());
    }

    #[test]
    fn test_select_unknown_id() {
        let records = vec![record("SCTASK100", Project::Pvaas)];
        let tree = build_tree(&records);
        let mut session = Session::new();
        assert!(session.select(&tree, &records, 42).is_err());
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_select_while_loaded_is_rejected() {
        let records = vec![
            record("SCTASK100", Project::Pvaas),
            record("SCTASK200", Project::Other),
        ];
        let tree = build_tree(&records);
        let mut session = Session::new();

        session.select(&tree, &records, 1).unwrap();
        let result = session.select(&tree, &records, 2);
        assert!(matches!(result, Err(ShiptrackError::Session(_))));
    }

    #[test]
    fn test_submit_with_invalid_draft_leaves_registry_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::new(dir.path().join("registry.json"));
        let config = Config {
            registry_path: dir.path().join("registry.json"),
            files_root: dir.path().join("files"),
            ..Default::default()
        };

        let mut session = Session::with_draft(Draft {
            project: Project::Other,
            spreadsheet_path: Some(PathBuf::from("/nonexistent/notification.xlsx")),
            purchase_order_path: Some(PathBuf::from("/nonexistent/po.pdf")),
        });

        let result = session.submit(ShipmentNotification::default(), &registry, &config);
        assert!(matches!(result, Err(ShiptrackError::InvalidDraft(_))));
        assert!(registry.load().unwrap().is_empty());
        assert!(!dir.path().join("files").exists());
    }

    #[test]
    fn test_submit_while_loaded_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::new(dir.path().join("registry.json"));
        let config = Config::default();

        let records = vec![record("SCTASK100", Project::Pvaas)];
        let tree = build_tree(&records);
        let mut session = Session::new();
        session.select(&tree, &records, 1).unwrap();

        let result = session.submit(ShipmentNotification::default(), &registry, &config);
        assert!(matches!(result, Err(ShiptrackError::Session(_))));
    }
}
