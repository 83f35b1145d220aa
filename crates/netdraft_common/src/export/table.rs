//! Tabular IP-allocation export.
//!
//! The record list is recovered from the IP-allocation HTML fragment, not
//! from the graph: strip the heading and list tags line by line, split each
//! entry on the first ": ", drop entries without a value. A lossy markup
//! round-trip, kept deliberately - the fragment is the report of record.

use crate::error::NetdraftError;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};

/// One (Device, IP) row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRecord {
    #[serde(rename = "Device")]
    pub device: String,
    #[serde(rename = "IP")]
    pub ip: String,
}

static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}(/\d{1,2})?").expect("static pattern")
});

/// First dotted-quad (optionally with a prefix length) in a node label
pub fn ip_from_label(label: &str) -> Option<&str> {
    DOTTED_QUAD.find(label).map(|m| m.as_str())
}

/// Re-parse the IP-allocation fragment into (Device, IP) records.
pub fn parse_ip_table(fragment: &str) -> Vec<IpRecord> {
    let mut records = Vec::new();
    for raw_line in fragment.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("<h3") || line == "<ul>" || line == "</ul>" {
            continue;
        }
        let entry = line
            .strip_prefix("<li>")
            .and_then(|rest| rest.strip_suffix("</li>"))
            .unwrap_or(line);
        let Some((device, ip)) = entry.split_once(": ") else {
            continue;
        };
        let device = device.trim();
        let ip = ip.trim();
        if device.is_empty() || ip.is_empty() {
            continue;
        }
        records.push(IpRecord {
            device: device.to_string(),
            ip: ip.to_string(),
        });
    }
    records
}

/// Serialize records as CSV with a Device,IP header row.
pub fn to_csv(records: &[IpRecord]) -> Result<Vec<u8>, NetdraftError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Device", "IP"])
        .map_err(|e| NetdraftError::Export(format!("csv: {e}")))?;
    for record in records {
        writer
            .write_record([record.device.as_str(), record.ip.as_str()])
            .map_err(|e| NetdraftError::Export(format!("csv: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| NetdraftError::Export(format!("csv: {e}")))
}

/// Serialize records as an XLSX workbook with one "IP Allocation" sheet.
pub fn to_xlsx(records: &[IpRecord]) -> Result<Vec<u8>, NetdraftError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("IP Allocation")
        .map_err(|e| NetdraftError::Export(format!("xlsx: {e}")))?;
    worksheet
        .write_string(0, 0, "Device")
        .map_err(|e| NetdraftError::Export(format!("xlsx: {e}")))?;
    worksheet
        .write_string(0, 1, "IP")
        .map_err(|e| NetdraftError::Export(format!("xlsx: {e}")))?;
    for (row, record) in records.iter().enumerate() {
        let row = row as u32 + 1;
        worksheet
            .write_string(row, 0, record.device.as_str())
            .map_err(|e| NetdraftError::Export(format!("xlsx: {e}")))?;
        worksheet
            .write_string(row, 1, record.ip.as_str())
            .map_err(|e| NetdraftError::Export(format!("xlsx: {e}")))?;
    }
    workbook
        .save_to_buffer()
        .map_err(|e| NetdraftError::Export(format!("xlsx: {e}")))
}
