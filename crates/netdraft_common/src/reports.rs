//! Report builders - the three HTML fragments rendered next to the diagram.
//!
//! Fragments are plain strings with one element per line; the tabular
//! exporter re-parses the IP-allocation fragment line by line, so the line
//! structure is part of the contract.

use crate::catalog::{device, DeviceKind};
use crate::requirements::{access_point_count, NetworkRequirements};
use std::fmt::Write;

/// The three report fragments of one design run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkOutput {
    pub ip_allocation: String,
    pub recommendations: String,
    pub cost_estimate: String,
}

/// Build all three reports
pub fn generate_output(req: &NetworkRequirements) -> NetworkOutput {
    NetworkOutput {
        ip_allocation: ip_allocation(req),
        recommendations: recommendations(req),
        cost_estimate: cost_breakdown(req).to_html(),
    }
}

/// The IP-allocation fragment. The wireless block is always listed, whatever
/// the network type; only the VPN block is conditional.
pub fn ip_allocation(req: &NetworkRequirements) -> String {
    let mut out = String::new();
    out.push_str("<h3>IP Allocation:</h3>\n<ul>\n");
    out.push_str("<li>Public IP (Router WAN): 203.0.113.1/24 (example)</li>\n");
    out.push_str("<li>Internal Network: 192.168.0.0/16</li>\n");
    out.push_str("<li>Router: 192.168.1.1</li>\n");
    if req.redundancy {
        out.push_str("<li>Backup Router: 192.168.1.2</li>\n");
    }
    out.push_str("<li>Firewall: 192.168.2.1</li>\n");
    if req.redundancy {
        out.push_str("<li>Backup Firewall: 192.168.2.2</li>\n");
    }
    out.push_str("<li>Core Switch: 192.168.3.1</li>\n");
    if req.redundancy {
        out.push_str("<li>Backup Core Switch: 192.168.3.2</li>\n");
    }
    out.push_str("<li>Wireless Infrastructure: 192.168.4.0/24</li>\n");
    for (index, dept) in req.departments.iter().enumerate() {
        let _ = writeln!(out, "<li>{}: 192.168.{}.0/24</li>", dept.name, 10 + index);
    }
    if req.business.remote_users > 0 {
        out.push_str("<li>VPN Users: 192.168.20.0/24</li>\n");
    }
    out.push_str("</ul>");
    out
}

/// Device and security recommendations. Security tiers are cumulative:
/// level 3 output is a strict superset of level 1.
pub fn recommendations(req: &NetworkRequirements) -> String {
    let dup = if req.redundancy { "2x " } else { "" };
    let mut out = String::new();
    out.push_str("<h3>Device Recommendations:</h3>\n<ul>\n");
    let _ = writeln!(out, "<li>Router: {dup}{}</li>", device(DeviceKind::Router).name);
    let _ = writeln!(out, "<li>Firewall: {dup}{}</li>", device(DeviceKind::Firewall).name);
    let _ = writeln!(
        out,
        "<li>Core Switch: {dup}{}</li>",
        device(DeviceKind::CoreSwitch).name
    );
    let _ = writeln!(
        out,
        "<li>Servers: {}x {}</li>",
        req.total_servers(),
        device(DeviceKind::Server).name
    );
    let _ = writeln!(
        out,
        "<li>Printers: {}x {}</li>",
        req.total_printers(),
        device(DeviceKind::Printer).name
    );
    if req.network_type.has_wifi() {
        let _ = writeln!(
            out,
            "<li>Wireless: {}</li>",
            device(DeviceKind::WirelessController).name
        );
        let _ = writeln!(
            out,
            "<li>Access Points: {}x {}</li>",
            access_point_count(req.business.office_users),
            device(DeviceKind::AccessPoint).name
        );
    }
    if req.business.remote_users > 0 {
        let _ = writeln!(
            out,
            "<li>VPN: {} (License per user)</li>",
            device(DeviceKind::VpnLicense).name
        );
    }
    out.push_str("</ul>\n");

    out.push_str("<h3>Security Recommendations:</h3>\n<ul>\n");
    if req.security_level >= 1 {
        out.push_str("<li>Implement strong password policies</li>\n");
        out.push_str("<li>Enable firewall on all devices</li>\n");
    }
    if req.security_level >= 2 {
        out.push_str("<li>Set up a VLAN for each department</li>\n");
        out.push_str("<li>Implement network access control (NAC)</li>\n");
    }
    if req.security_level >= 3 {
        out.push_str("<li>Deploy an intrusion detection/prevention system (IDS/IPS)</li>\n");
        out.push_str("<li>Implement multi-factor authentication for all users</li>\n");
    }
    out.push_str("</ul>");
    out
}

/// One priced line of the estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostItem {
    pub label: &'static str,
    pub amount: u64,
}

/// Itemized estimate plus the budget it is judged against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBreakdown {
    pub items: Vec<CostItem>,
    pub total: u64,
    pub budget: u64,
}

/// Price the design. The total is the sum of the items, nothing else.
pub fn cost_breakdown(req: &NetworkRequirements) -> CostBreakdown {
    let infra_multiplier = if req.redundancy { 2 } else { 1 };
    let mut items = vec![
        CostItem {
            label: "Router(s)",
            amount: device(DeviceKind::Router).price * infra_multiplier,
        },
        CostItem {
            label: "Firewall(s)",
            amount: device(DeviceKind::Firewall).price * infra_multiplier,
        },
        CostItem {
            label: "Core Switch(es)",
            amount: device(DeviceKind::CoreSwitch).price * infra_multiplier,
        },
        CostItem {
            label: "Servers",
            amount: u64::from(req.total_servers()) * device(DeviceKind::Server).price,
        },
        CostItem {
            label: "Printers",
            amount: u64::from(req.total_printers()) * device(DeviceKind::Printer).price,
        },
    ];

    if req.network_type.has_wifi() {
        let ap_count = u64::from(access_point_count(req.business.office_users));
        items.push(CostItem {
            label: "Wireless Infrastructure",
            amount: device(DeviceKind::WirelessController).price
                + ap_count * device(DeviceKind::AccessPoint).price,
        });
    }

    if req.business.remote_users > 0 {
        items.push(CostItem {
            label: "VPN Licenses",
            amount: u64::from(req.business.remote_users) * device(DeviceKind::VpnLicense).price,
        });
    }

    let total = items.iter().map(|i| i.amount).sum();
    CostBreakdown {
        items,
        total,
        budget: req.business.budget,
    }
}

impl CostBreakdown {
    /// Render the fragment, including the over/under budget verdict.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<h3>Cost Estimate:</h3>\n<ul>\n");
        for item in &self.items {
            let _ = writeln!(
                out,
                "<li>{}: ${}</li>",
                item.label,
                format_thousands(item.amount)
            );
        }
        let _ = writeln!(
            out,
            "</ul>\n<p><strong>Total Estimated Cost: ${}</strong></p>",
            format_thousands(self.total)
        );
        if self.total > self.budget {
            let _ = write!(
                out,
                "<p style=\"color: red;\">Warning: The estimated cost exceeds your budget by ${}.</p>",
                format_thousands(self.total - self.budget)
            );
        } else {
            let _ = write!(
                out,
                "<p style=\"color: green;\">Good news! The estimated cost is within your budget. You have ${} remaining.</p>",
                format_thousands(self.budget - self.total)
            );
        }
        out
    }
}

/// Shorthand for the fragment alone
pub fn cost_estimate(req: &NetworkRequirements) -> String {
    cost_breakdown(req).to_html()
}

/// en-US style thousands separators, integer amounts only
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{BusinessProfile, Department, NetworkType};

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(6500), "6,500");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_security_tiers_are_additive() {
        let mut req = NetworkRequirements {
            security_level: 1,
            ..Default::default()
        };
        let level1 = recommendations(&req);
        req.security_level = 3;
        let level3 = recommendations(&req);
        assert!(level1.contains("password policies"));
        assert!(!level1.contains("IDS/IPS"));
        for line in level1.lines() {
            assert!(level3.contains(line), "level 3 lost line: {line}");
        }
        assert!(level3.contains("multi-factor authentication"));
    }

    #[test]
    fn test_wireless_block_listed_even_for_lan() {
        let req = NetworkRequirements {
            network_type: NetworkType::Lan,
            security_level: 1,
            ..Default::default()
        };
        assert!(ip_allocation(&req).contains("Wireless Infrastructure: 192.168.4.0/24"));
    }

    #[test]
    fn test_cost_total_is_sum_of_items() {
        let req = NetworkRequirements {
            business: BusinessProfile {
                budget: 10000,
                office_users: 30,
                remote_users: 4,
                ..Default::default()
            },
            departments: vec![Department {
                name: "Ops".into(),
                users: 10,
                servers: 2,
                printers: 1,
            }],
            network_type: NetworkType::Both,
            redundancy: true,
            security_level: 2,
        };
        let breakdown = cost_breakdown(&req);
        let sum: u64 = breakdown.items.iter().map(|i| i.amount).sum();
        assert_eq!(breakdown.total, sum);
        // 2x2000 + 2x1500 + 2x3000 + 2x5000 + 500 + (2000 + 2x500) + 4x50
        assert_eq!(breakdown.total, 4000 + 3000 + 6000 + 10000 + 500 + 3000 + 200);
    }

    #[test]
    fn test_budget_verdicts() {
        let mut req = NetworkRequirements {
            business: BusinessProfile {
                budget: 100_000,
                ..Default::default()
            },
            network_type: NetworkType::Lan,
            security_level: 1,
            ..Default::default()
        };
        let under = cost_estimate(&req);
        assert!(under.contains("Good news!"));
        assert!(under.contains("$93,500 remaining"));
        req.business.budget = 5000;
        let over = cost_estimate(&req);
        assert!(over.contains("exceeds your budget by $1,500."));
    }
}
