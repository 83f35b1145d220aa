//! Golden tests for the design generator.
//!
//! Pins the exact node set, id scheme and addressing of known inputs so any
//! change to construction order or allocation shows up as a diff here.

use netdraft_common::requirements::{BusinessProfile, Department, NetworkRequirements, NetworkType};
use netdraft_common::topology::{build_topology, generate_design};
use netdraft_common::NodeKind;
use std::collections::HashSet;

fn sales_lan() -> NetworkRequirements {
    NetworkRequirements {
        business: BusinessProfile {
            company_size: 4,
            budget: 50_000,
            office_users: 2,
            remote_users: 0,
            servers: 1,
            printers: 1,
            departments: 1,
        },
        departments: vec![Department {
            name: "Sales".into(),
            users: 2,
            servers: 1,
            printers: 1,
        }],
        network_type: NetworkType::Lan,
        redundancy: false,
        security_level: 1,
    }
}

#[test]
fn single_department_lan_golden() {
    let graph = build_topology(&sales_lan());

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "internet",
            "router",
            "firewall",
            "coreSwitch",
            "dept0",
            "server1",
            "printer1",
            "dept0_user1",
            "dept0_user2",
        ]
    );

    assert_eq!(
        graph.node("server1").unwrap().label,
        "Sales Server 1\n192.168.10.1"
    );
    assert_eq!(
        graph.node("printer1").unwrap().label,
        "Sales Printer 1\n192.168.10.101"
    );
    assert_eq!(
        graph.node("dept0_user1").unwrap().label,
        "Sales User 1\n192.168.10.201"
    );
    assert_eq!(
        graph.node("dept0_user2").unwrap().label,
        "Sales User 2\n192.168.10.202"
    );

    assert!(!graph
        .nodes
        .iter()
        .any(|n| matches!(n.kind, NodeKind::WirelessController | NodeKind::AccessPoint)));
    assert!(!graph
        .nodes
        .iter()
        .any(|n| matches!(n.kind, NodeKind::VpnConcentrator | NodeKind::RemoteUsers)));
}

#[test]
fn access_point_count_follows_office_users() {
    let mut req = sales_lan();
    req.network_type = NetworkType::Wifi;
    req.business.office_users = 130;
    let graph = build_topology(&req);
    let ap_count = graph
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::AccessPoint)
        .count();
    assert_eq!(ap_count, 6);
    assert_eq!(graph.node("ap6").unwrap().label, "AP 6\n192.168.4.7");
}

#[test]
fn generator_is_deterministic() {
    let mut req = sales_lan();
    req.redundancy = true;
    req.network_type = NetworkType::Both;
    req.business.remote_users = 7;
    req.business.office_users = 60;
    req.security_level = 3;

    let first = generate_design(&req);
    let second = generate_design(&req);
    assert_eq!(first.graph, second.graph);
    assert_eq!(first.output.ip_allocation, second.output.ip_allocation);
    assert_eq!(first.output.recommendations, second.output.recommendations);
    assert_eq!(first.output.cost_estimate, second.output.cost_estimate);
}

#[test]
fn node_ids_stay_unique_at_scale() {
    let departments: Vec<Department> = (0..10)
        .map(|i| Department {
            name: format!("Dept {i}"),
            users: 50,
            servers: 3,
            printers: 2,
        })
        .collect();
    let req = NetworkRequirements {
        business: BusinessProfile {
            office_users: 500,
            remote_users: 40,
            budget: 1_000_000,
            ..Default::default()
        },
        departments,
        network_type: NetworkType::Both,
        redundancy: true,
        security_level: 3,
    };

    let graph = build_topology(&req);
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        assert!(seen.insert(node.id.as_str()), "duplicate id: {}", node.id);
    }
    // 10 depts x (1 + 3 + 2 + 50) + 7 infra (redundant) + controller
    // + 20 APs + vpn + remote users
    assert_eq!(graph.nodes.len(), 560 + 7 + 1 + 20 + 2);

    for edge in &graph.edges {
        assert!(graph.contains(&edge.from), "dangling from: {}", edge.from);
        assert!(graph.contains(&edge.to), "dangling to: {}", edge.to);
    }
}

#[test]
fn eleventh_department_collides_with_vpn_block() {
    // Latent behavior, pinned on purpose: department index 10 is assigned
    // 192.168.20.0/24, the same block the VPN remote-access side uses.
    let departments: Vec<Department> = (0..11)
        .map(|i| Department {
            name: format!("Dept {i}"),
            ..Default::default()
        })
        .collect();
    let req = NetworkRequirements {
        business: BusinessProfile {
            remote_users: 1,
            ..Default::default()
        },
        departments,
        network_type: NetworkType::Lan,
        redundancy: false,
        security_level: 1,
    };
    let graph = build_topology(&req);
    assert_eq!(
        graph.node("dept10").unwrap().label,
        "Dept 10\n192.168.20.0/24"
    );
    assert_eq!(
        graph.node("remoteUsers").unwrap().label,
        "Remote Users\n192.168.20.0/24"
    );
}
