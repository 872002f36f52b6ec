//! Submit pipeline end-to-end: intake side effects plus registry append

use rust_xlsxwriter::Workbook;
use shiptrack::config::Config;
use shiptrack::record::Project;
use shiptrack::registry::category::build_tree;
use shiptrack::registry::Registry;
use shiptrack::session::{Draft, Session};
use shiptrack::workbook::parse_shipment_notification;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_notification(path: &Path, banner: &str) {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Shipment").unwrap();
    sheet.write_string(0, 0, "Column 0").unwrap();
    sheet.write_string(1, 0, banner).unwrap();
    sheet.write_string(5, 3, "512").unwrap();
    sheet.write_string(5, 7, "Baltimore").unwrap();
    sheet.write_string(5, 11, "Laptop").unwrap();
    sheet.write_number(5, 13, 2.0).unwrap();

    let serial = workbook.add_worksheet();
    serial.set_name("Serials").unwrap();
    serial.write_string(0, 0, "Service Tag").unwrap();
    serial.write_string(1, 0, "ABC123").unwrap();

    workbook.save(path).unwrap();
}

fn test_config(root: &Path) -> Config {
    Config {
        files_root: root.join("files"),
        registry_path: root.join("settings").join("registry.json"),
        site_list_path: root.join("settings").join("site_list.xlsx"),
        emails_dir: root.join("emails"),
        template_path: None,
    }
}

#[test]
fn test_submit_files_the_item_and_appends() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let registry = Registry::new(&config.registry_path);

    let spreadsheet = dir.path().join("notification.xlsx");
    write_notification(&spreadsheet, "Shipment Notification - SCTASK12345");
    let purchase_order = dir.path().join("po_4411.pdf");
    std::fs::write(&purchase_order, b"%PDF-1.4").unwrap();

    let mut session = Session::with_draft(Draft {
        project: Project::Pvaas,
        spreadsheet_path: Some(spreadsheet),
        purchase_order_path: Some(purchase_order),
    });

    let shipment = parse_shipment_notification(
        session.draft().unwrap().spreadsheet_path.as_deref().unwrap(),
    )
    .unwrap();
    let record = session.submit(shipment, &registry, &config).unwrap();

    assert_eq!(record.title, "SCTASK12345");
    assert!(record.alive);
    assert!(!record.email_generated);

    // the session is back to a blank draft
    assert!(!session.is_loaded());
    assert!(session.draft().unwrap().spreadsheet_path.is_none());

    // item folder layout
    let folder = config.files_root.join("PVaaS").join("SCTASK12345");
    assert!(folder.join("po_4411.pdf").exists());
    assert!(folder.join("SCTASK12345.xlsx").exists());
    assert!(folder.join("SCTASK12345_SN.xlsx").exists());

    // registry holds the record, categorized under Active
    let records = registry.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0], &record);

    let tree = build_tree(&records);
    let pvaas = &tree.projects[Project::Pvaas.index()];
    assert_eq!(pvaas.active.len(), 1);
    assert_eq!(pvaas.active[0].title, "SCTASK12345");
}

#[test]
fn test_submit_with_missing_source_leaves_registry_unchanged() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let registry = Registry::new(&config.registry_path);

    let mut session = Session::with_draft(Draft {
        project: Project::Other,
        spreadsheet_path: Some(PathBuf::from("/nonexistent/notification.xlsx")),
        purchase_order_path: Some(PathBuf::from("/nonexistent/po.pdf")),
    });

    let result = session.submit(Default::default(), &registry, &config);
    assert!(result.is_err());
    assert!(registry.load().unwrap().is_empty());
    assert!(!config.files_root.exists());
}

#[test]
fn test_failed_intake_does_not_touch_the_registry() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let registry = Registry::new(&config.registry_path);

    // valid draft, but the spreadsheet is not a workbook at all
    let spreadsheet = dir.path().join("notification.xlsx");
    std::fs::write(&spreadsheet, b"not a workbook").unwrap();
    let purchase_order = dir.path().join("po.pdf");
    std::fs::write(&purchase_order, b"%PDF-1.4").unwrap();

    let shipment = parse_shipment_notification(&spreadsheet);
    assert!(shipment.is_err());
    assert!(registry.load().unwrap().is_empty());
}
