//! Site directory loading from a generated site list workbook

use rust_xlsxwriter::Workbook;
use shiptrack::sites::SiteDirectory;
use std::path::Path;
use tempfile::tempdir;

const HEADERS: &[&str] = &[
    "Station#",
    "District",
    "Area",
    "Region",
    "Location Code",
    "Shipping Address",
    "Shipping City",
    "Shipping State",
    "Shipping Zip Code",
    "Logistics Distribution List",
    "IT Distribution List",
    "Delivery POC",
    "Delivery POC Phone#",
    "Delivery POC Cell Phone#",
    "Delivery POC Email",
    "Alternate POC",
    "Alternate POC Phone#",
    "Alternate POC Cell Phone#",
    "Alternate POC Email",
];

fn write_site_list(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(1 + i as u32, col as u16, *value).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

#[test]
fn test_load_and_lookup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site_list.xlsx");
    write_site_list(
        &path,
        &[
            &[
                "512", "District 1", "East", "5", "BAL", "10 North Greene St", "Baltimore", "MD",
                "21201", "logistics@example.org", "it@example.org", "Pat Doe", "410-555-0100",
                "410-555-0101", "pat.doe@example.org",
            ],
            &["688", "District 1", "Capital", "5", "WAS", "50 Irving St NW", "Washington", "DC", "20422"],
        ],
    );

    let directory = SiteDirectory::from_xlsx(&path).unwrap();
    assert_eq!(directory.len(), 2);

    let site = directory.lookup("512", "").unwrap();
    assert_eq!(site.shipping_city, "Baltimore");
    assert_eq!(site.logistics_emails, "logistics@example.org");
    assert_eq!(site.delivery_poc.name, "Pat Doe");
    assert_eq!(site.delivery_poc.email, "pat.doe@example.org");
    // unfilled trailing columns default to blank
    assert_eq!(site.alternate_poc.name, "");

    let site = directory.lookup("688", "").unwrap();
    assert_eq!(site.shipping_state, "DC");
}

#[test]
fn test_duplicate_station_disambiguated_by_area() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site_list.xlsx");
    write_site_list(
        &path,
        &[
            &["589", "District 2", "Heartland", "15", "KC", "4801 Linwood Blvd", "Kansas City", "MO", "64128"],
            &["589", "District 2", "Ozarks", "15", "CG", "1500 N Westwood Blvd", "Poplar Bluff", "MO", "63901"],
        ],
    );

    let directory = SiteDirectory::from_xlsx(&path).unwrap();
    let site = directory.lookup("589", "Ozarks").unwrap();
    assert_eq!(site.shipping_city, "Poplar Bluff");

    // no matching area falls back to the first entry with that code
    let site = directory.lookup("589", "").unwrap();
    assert_eq!(site.shipping_city, "Kansas City");
}

#[test]
fn test_rows_without_station_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site_list.xlsx");
    write_site_list(&path, &[&["", "District 9"], &["512", "District 1", "East"]]);

    let directory = SiteDirectory::from_xlsx(&path).unwrap();
    assert_eq!(directory.len(), 1);
}

#[test]
fn test_missing_station_column_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site_list.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Site").unwrap();
    workbook.save(&path).unwrap();

    assert!(SiteDirectory::from_xlsx(&path).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(SiteDirectory::from_xlsx(Path::new("/nonexistent/site_list.xlsx")).is_err());
}
