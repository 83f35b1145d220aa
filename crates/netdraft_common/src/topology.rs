//! Topology generator - business requirements in, network graph out.
//!
//! Deterministic: the same requirements always produce the same graph, node
//! for node and edge for edge. Insertion order is part of the contract; the
//! layout engine and the draw.io exporter both derive positions and ids
//! from it.

use crate::catalog::{self, device, DeviceKind};
use crate::graph::{NetworkGraph, NodeKind};
use crate::reports::{self, NetworkOutput};
use crate::requirements::{access_point_count, NetworkRequirements};

/// A full design run: the graph plus the three reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDesign {
    pub graph: NetworkGraph,
    pub output: NetworkOutput,
}

/// Generate the complete design for one set of requirements.
pub fn generate_design(req: &NetworkRequirements) -> NetworkDesign {
    NetworkDesign {
        graph: build_topology(req),
        output: reports::generate_output(req),
    }
}

/// Build the topology graph.
///
/// Construction order: internet, router(s), firewall(s), core switch(es),
/// one subtree per department in input order (servers, then printers, then
/// user workstations), wireless infrastructure, VPN. Backup devices attach
/// to the matching backup upstream, not the primary.
pub fn build_topology(req: &NetworkRequirements) -> NetworkGraph {
    let mut graph = NetworkGraph::new();

    graph.add_node(
        "internet",
        "Internet".to_string(),
        NodeKind::Internet,
        catalog::INTERNET_ICON,
    );

    let router = device(DeviceKind::Router);
    graph.add_node(
        "router",
        "Router\n192.168.1.1".to_string(),
        NodeKind::Router,
        router.image,
    );
    graph.add_edge("internet", "router");

    if req.redundancy {
        graph.add_node(
            "router2",
            "Backup Router\n192.168.1.2".to_string(),
            NodeKind::Router,
            router.image,
        );
        graph.add_edge("internet", "router2");
        graph.add_dashed_edge("router", "router2");
    }

    let firewall = device(DeviceKind::Firewall);
    graph.add_node(
        "firewall",
        "Firewall\n192.168.2.1".to_string(),
        NodeKind::Firewall,
        firewall.image,
    );
    graph.add_edge("router", "firewall");

    if req.redundancy {
        graph.add_node(
            "firewall2",
            "Backup Firewall\n192.168.2.2".to_string(),
            NodeKind::Firewall,
            firewall.image,
        );
        graph.add_edge("router2", "firewall2");
        graph.add_dashed_edge("firewall", "firewall2");
    }

    let core_switch = device(DeviceKind::CoreSwitch);
    graph.add_node(
        "coreSwitch",
        "Core Switch\n192.168.3.1".to_string(),
        NodeKind::CoreSwitch,
        core_switch.image,
    );
    graph.add_edge("firewall", "coreSwitch");

    if req.redundancy {
        graph.add_node(
            "coreSwitch2",
            "Backup Core Switch\n192.168.3.2".to_string(),
            NodeKind::CoreSwitch,
            core_switch.image,
        );
        graph.add_edge("firewall2", "coreSwitch2");
        graph.add_dashed_edge("coreSwitch", "coreSwitch2");
    }

    // Host suffixes for servers and printers run across all departments,
    // not per department; printers sit in the 100+ range.
    let mut server_counter: u32 = 1;
    let mut printer_counter: u32 = 1;

    for (index, dept) in req.departments.iter().enumerate() {
        let subnet = 10 + index;
        let dept_id = format!("dept{index}");
        graph.add_node(
            &dept_id,
            format!("{}\n192.168.{subnet}.0/24", dept.name),
            NodeKind::Department,
            catalog::DEPARTMENT_ICON,
        );
        graph.add_edge("coreSwitch", &dept_id);

        for i in 1..=dept.servers {
            let server_id = format!("server{server_counter}");
            graph.add_node(
                &server_id,
                format!("{} Server {i}\n192.168.{subnet}.{server_counter}", dept.name),
                NodeKind::Server,
                device(DeviceKind::Server).image,
            );
            graph.add_edge(&dept_id, &server_id);
            server_counter += 1;
        }

        for i in 1..=dept.printers {
            let printer_id = format!("printer{printer_counter}");
            graph.add_node(
                &printer_id,
                format!(
                    "{} Printer {i}\n192.168.{subnet}.{}",
                    dept.name,
                    100 + printer_counter
                ),
                NodeKind::Printer,
                device(DeviceKind::Printer).image,
            );
            graph.add_edge(&dept_id, &printer_id);
            printer_counter += 1;
        }

        for i in 1..=dept.users {
            let user_id = format!("{dept_id}_user{i}");
            graph.add_node(
                &user_id,
                format!("{} User {i}\n192.168.{subnet}.{}", dept.name, 200 + i),
                NodeKind::Workstation,
                catalog::WORKSTATION_ICON,
            );
            graph.add_edge(&dept_id, &user_id);
        }
    }

    if req.network_type.has_wifi() {
        graph.add_node(
            "wirelessController",
            "Wireless Controller\n192.168.4.1".to_string(),
            NodeKind::WirelessController,
            device(DeviceKind::WirelessController).image,
        );
        graph.add_edge("coreSwitch", "wirelessController");

        for i in 1..=access_point_count(req.business.office_users) {
            let ap_id = format!("ap{i}");
            graph.add_node(
                &ap_id,
                format!("AP {i}\n192.168.4.{}", i + 1),
                NodeKind::AccessPoint,
                device(DeviceKind::AccessPoint).image,
            );
            graph.add_edge("wirelessController", &ap_id);
        }
    }

    if req.business.remote_users > 0 {
        graph.add_node(
            "vpnConcentrator",
            "VPN Concentrator\n192.168.20.1".to_string(),
            NodeKind::VpnConcentrator,
            catalog::VPN_ICON,
        );
        graph.add_edge("firewall", "vpnConcentrator");
        graph.add_node(
            "remoteUsers",
            "Remote Users\n192.168.20.0/24".to_string(),
            NodeKind::RemoteUsers,
            catalog::REMOTE_USERS_ICON,
        );
        graph.add_edge("vpnConcentrator", "remoteUsers");
    }

    graph
}
