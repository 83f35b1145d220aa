//! Requirements model - the business inputs a design is generated from.
//!
//! Loaded from a TOML file by the CLI or from JSON by the daemon. Validation
//! only warns; the generator accepts any non-negative counts.

use crate::error::NetdraftError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Physical transport the design should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Wifi,
    Lan,
    #[default]
    Both,
}

impl NetworkType {
    /// Whether the design includes wireless infrastructure
    pub fn has_wifi(&self) -> bool {
        matches!(self, NetworkType::Wifi | NetworkType::Both)
    }
}

/// Company-wide sizing figures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    pub company_size: u32,
    pub budget: u64,
    pub office_users: u32,
    pub remote_users: u32,
    pub servers: u32,
    pub printers: u32,
    pub departments: u32,
}

/// One organizational unit with its own subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Department {
    pub name: String,
    pub users: u32,
    pub servers: u32,
    pub printers: u32,
}

/// Everything the generator needs for one design run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkRequirements {
    pub business: BusinessProfile,
    pub departments: Vec<Department>,
    pub network_type: NetworkType,
    pub redundancy: bool,
    pub security_level: u8,
}

impl NetworkRequirements {
    /// Load requirements from a TOML file
    pub fn load(path: &Path) -> Result<Self, NetdraftError> {
        let raw = fs::read_to_string(path)?;
        let mut req: NetworkRequirements = toml::from_str(&raw)
            .map_err(|e| NetdraftError::Requirements(format!("{}: {}", path.display(), e)))?;
        req.normalize();
        Ok(req)
    }

    /// Clamp the security level into its 1-3 range and reconcile the
    /// department list with the declared count. A declared count wins, as it
    /// does in the intake form: the list grows with zero-valued entries or
    /// truncates to match. An undeclared count is taken from the list.
    pub fn normalize(&mut self) {
        self.security_level = self.security_level.clamp(1, 3);
        let declared = self.business.departments as usize;
        if declared == 0 {
            self.business.departments = self.departments.len() as u32;
        } else if declared != self.departments.len() {
            warn!(
                declared,
                listed = self.departments.len(),
                "department count does not match the department list; resizing the list"
            );
            resize_departments(&mut self.departments, declared);
        }
        if self.departments.len() > 10 {
            // Department index 10 lands on 192.168.20.0/24, the fixed VPN
            // remote-access block. Kept as-is; the allocation scheme is not
            // ours to change without a requirement change.
            warn!(
                departments = self.departments.len(),
                "more than 10 departments: subnet 192.168.20.0/24 overlaps the VPN block"
            );
        }
    }

    pub fn total_servers(&self) -> u32 {
        self.departments.iter().map(|d| d.servers).sum()
    }

    pub fn total_printers(&self) -> u32 {
        self.departments.iter().map(|d| d.printers).sum()
    }
}

/// Number of access points: one per 25 office users, rounded up
pub fn access_point_count(office_users: u32) -> u32 {
    office_users.div_ceil(25)
}

/// Resize the department list in place when the count field changes.
/// Entries beyond the new count are truncated; new entries are zero-valued.
pub fn resize_departments(departments: &mut Vec<Department>, count: usize) {
    while departments.len() < count {
        departments.push(Department::default());
    }
    departments.truncate(count);
}
