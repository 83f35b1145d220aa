//! Device catalog - the fixed model/price table every estimate draws from.
//!
//! Prices are whole USD. The table is intentionally static: the generator
//! must stay deterministic, so nothing here is configurable at runtime.

use serde::{Deserialize, Serialize};

/// Device roles priced by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceKind {
    Router,
    Firewall,
    CoreSwitch,
    Server,
    Printer,
    WirelessController,
    AccessPoint,
    VpnLicense,
}

/// A catalog entry. `specs` and `ports` are empty for per-seat licenses.
#[derive(Debug, Clone, Copy)]
pub struct DeviceInfo {
    pub name: &'static str,
    pub specs: &'static str,
    pub ports: &'static str,
    pub image: &'static str,
    pub price: u64,
}

const ROUTER: DeviceInfo = DeviceInfo {
    name: "Cisco ISR 4321 Router",
    specs: "2-core CPU, 4 GB DRAM, 4 GB flash memory",
    ports: "2x GE, 2x SFP",
    image: "https://api.iconify.design/mdi:router-wireless.svg",
    price: 2000,
};

const FIREWALL: DeviceInfo = DeviceInfo {
    name: "Fortinet FortiGate 60F Next-Generation Firewall",
    specs: "Dual-core CPU, 4 GB memory",
    ports: "10x GE RJ45 ports, 2x SFP ports",
    image: "https://api.iconify.design/mdi:firewall.svg",
    price: 1500,
};

const CORE_SWITCH: DeviceInfo = DeviceInfo {
    name: "Cisco Catalyst 9200 24-port Switch",
    specs: "Quad-core CPU, 8 GB DRAM, 16 GB flash memory",
    ports: "24x GE ports, 4x 10G SFP+ uplink ports",
    image: "https://api.iconify.design/mdi:switch.svg",
    price: 3000,
};

const SERVER: DeviceInfo = DeviceInfo {
    name: "Dell PowerEdge R440 Rack Server",
    specs: "Intel Xeon Silver 4210, 32 GB RAM, 2x 480GB SSD",
    ports: "4x 1GbE",
    image: "https://api.iconify.design/mdi:server.svg",
    price: 5000,
};

const PRINTER: DeviceInfo = DeviceInfo {
    name: "HP LaserJet Pro M404dn",
    specs: "1200 MHz processor, 256 MB memory",
    ports: "1x Gigabit Ethernet, 1x Hi-Speed USB 2.0",
    image: "https://api.iconify.design/mdi:printer.svg",
    price: 500,
};

const WIRELESS_CONTROLLER: DeviceInfo = DeviceInfo {
    name: "Cisco 3504 Wireless Controller",
    specs: "4-core CPU, 8 GB DRAM",
    ports: "8x GE ports",
    image: "https://api.iconify.design/mdi:wifi.svg",
    price: 2000,
};

const ACCESS_POINT: DeviceInfo = DeviceInfo {
    name: "Cisco Aironet 2800 Series Access Point",
    specs: "4x4 MU-MIMO with 3 spatial streams",
    ports: "1x GE",
    image: "https://api.iconify.design/mdi:access-point.svg",
    price: 500,
};

const VPN_LICENSE: DeviceInfo = DeviceInfo {
    name: "Cisco AnyConnect Secure Mobility Client",
    specs: "",
    ports: "",
    image: "",
    price: 50,
};

/// Look up the catalog entry for a device role
pub fn device(kind: DeviceKind) -> &'static DeviceInfo {
    match kind {
        DeviceKind::Router => &ROUTER,
        DeviceKind::Firewall => &FIREWALL,
        DeviceKind::CoreSwitch => &CORE_SWITCH,
        DeviceKind::Server => &SERVER,
        DeviceKind::Printer => &PRINTER,
        DeviceKind::WirelessController => &WIRELESS_CONTROLLER,
        DeviceKind::AccessPoint => &ACCESS_POINT,
        DeviceKind::VpnLicense => &VPN_LICENSE,
    }
}

/// All priced roles, in catalog display order
pub const ALL_KINDS: [DeviceKind; 8] = [
    DeviceKind::Router,
    DeviceKind::Firewall,
    DeviceKind::CoreSwitch,
    DeviceKind::Server,
    DeviceKind::Printer,
    DeviceKind::WirelessController,
    DeviceKind::AccessPoint,
    DeviceKind::VpnLicense,
];

// Icons for nodes that are not priced devices.
pub const INTERNET_ICON: &str = "https://api.iconify.design/mdi:cloud.svg";
pub const DEPARTMENT_ICON: &str = "https://api.iconify.design/mdi:domain.svg";
pub const WORKSTATION_ICON: &str = "https://api.iconify.design/mdi:desktop-classic.svg";
pub const VPN_ICON: &str = "https://api.iconify.design/mdi:vpn.svg";
pub const REMOTE_USERS_ICON: &str = "https://api.iconify.design/mdi:account-group.svg";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices() {
        assert_eq!(device(DeviceKind::Router).price, 2000);
        assert_eq!(device(DeviceKind::Server).price, 5000);
        assert_eq!(device(DeviceKind::VpnLicense).price, 50);
    }

    #[test]
    fn test_license_entry_has_no_hardware_fields() {
        let vpn = device(DeviceKind::VpnLicense);
        assert!(vpn.specs.is_empty());
        assert!(vpn.ports.is_empty());
    }
}
