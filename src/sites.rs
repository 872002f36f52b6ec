//! Site directory
//!
//! Maps a station code to shipping and contact details for the
//! receiving site. Loaded from the site list workbook, whose columns
//! are addressed by header name. Station codes are not unique: a
//! duplicate code is disambiguated by the area name.

use crate::error::{Result, ShiptrackError};
use crate::workbook::cell_str;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One point of contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub cell: String,
    pub email: String,
}

/// Shipping and contact details for one receiving site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDetails {
    pub station: String,
    pub district: String,
    pub area: String,
    pub region: String,
    pub location_code: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_zip: String,
    /// Semicolon-separated logistics distribution list
    pub logistics_emails: String,
    /// Semicolon-separated IT distribution list
    pub it_emails: String,
    pub delivery_poc: Contact,
    pub alternate_poc: Contact,
}

pub struct SiteDirectory {
    sites: Vec<SiteDetails>,
}

impl SiteDirectory {
    /// Load the site list workbook. The first row is the header row;
    /// rows with a blank station cell are skipped.
    pub fn from_xlsx(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ShiptrackError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
            open_workbook(path).map_err(|e: calamine::XlsxError| ShiptrackError::Workbook(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ShiptrackError::Workbook("site list has no sheets".to_string()))?
            .map_err(|e| ShiptrackError::Workbook(e.to_string()))?;

        let columns = header_columns(&range);
        let column = |name: &str| -> Option<u32> { columns.get(name).copied() };
        let cell = |row: u32, name: &str| -> String {
            column(name)
                .map(|col| cell_str(&range, row, col))
                .unwrap_or_default()
        };

        if column("Station#").is_none() {
            return Err(ShiptrackError::Workbook(
                "site list is missing the Station# column".to_string(),
            ));
        }

        let mut sites = Vec::new();
        let end_row = range.end().map(|(row, _)| row).unwrap_or(0);
        for row in 1..=end_row {
            let station = cell(row, "Station#");
            if station.is_empty() {
                continue;
            }
            sites.push(SiteDetails {
                station,
                district: cell(row, "District"),
                area: cell(row, "Area"),
                region: cell(row, "Region"),
                location_code: cell(row, "Location Code"),
                shipping_address: cell(row, "Shipping Address"),
                shipping_city: cell(row, "Shipping City"),
                shipping_state: cell(row, "Shipping State"),
                shipping_zip: cell(row, "Shipping Zip Code"),
                logistics_emails: cell(row, "Logistics Distribution List"),
                it_emails: cell(row, "IT Distribution List"),
                delivery_poc: Contact {
                    name: cell(row, "Delivery POC"),
                    phone: cell(row, "Delivery POC Phone#"),
                    cell: cell(row, "Delivery POC Cell Phone#"),
                    email: cell(row, "Delivery POC Email"),
                },
                alternate_poc: Contact {
                    name: cell(row, "Alternate POC"),
                    phone: cell(row, "Alternate POC Phone#"),
                    cell: cell(row, "Alternate POC Cell Phone#"),
                    email: cell(row, "Alternate POC Email"),
                },
            });
        }

        Ok(Self { sites })
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Look up a station code. When the code appears more than once,
    /// the area name picks the right site; if no area matches, the
    /// first entry with that code wins. Unknown codes are an error the
    /// caller is expected to degrade gracefully on.
    pub fn lookup(&self, station: &str, area: &str) -> Result<&SiteDetails> {
        let mut first = None;
        for site in self.sites.iter().filter(|s| s.station == station) {
            if site.area == area {
                return Ok(site);
            }
            first.get_or_insert(site);
        }
        first.ok_or_else(|| ShiptrackError::UnknownStation(station.to_string()))
    }
}

fn header_columns(range: &Range<Data>) -> HashMap<String, u32> {
    let mut columns = HashMap::new();
    let end_col = range.end().map(|(_, col)| col).unwrap_or(0);
    for col in 0..=end_col {
        let name = cell_str(range, 0, col);
        if !name.is_empty() {
            columns.entry(name).or_insert(col);
        }
    }
    columns
}
