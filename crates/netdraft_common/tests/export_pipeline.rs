//! End-to-end export pipeline checks: one design run feeding every exporter.

use netdraft_common::export::{drawio_xml, parse_ip_table, to_csv, wrap_png_in_pdf};
use netdraft_common::export::table::ip_from_label;
use netdraft_common::layout::compute_layout;
use netdraft_common::render::render_png;
use netdraft_common::requirements::{BusinessProfile, Department, NetworkRequirements, NetworkType};
use netdraft_common::topology::generate_design;

fn req() -> NetworkRequirements {
    NetworkRequirements {
        business: BusinessProfile {
            budget: 60_000,
            office_users: 30,
            remote_users: 5,
            ..Default::default()
        },
        departments: vec![
            Department {
                name: "Sales".into(),
                users: 3,
                servers: 1,
                printers: 1,
            },
            Department {
                name: "Support".into(),
                users: 2,
                servers: 0,
                printers: 1,
            },
        ],
        network_type: NetworkType::Both,
        redundancy: false,
        security_level: 2,
    }
}

#[test]
fn department_subnets_in_report_match_graph_labels() {
    let design = generate_design(&req());
    let records = parse_ip_table(&design.output.ip_allocation);

    for node in &design.graph.nodes {
        // Department nodes carry the same subnet the report allocates.
        if node.id.starts_with("dept") && !node.id.contains("user") {
            let (name, subnet) = node.label.split_once('\n').unwrap();
            let record = records
                .iter()
                .find(|r| r.device == name)
                .unwrap_or_else(|| panic!("report missing department {name}"));
            assert_eq!(record.ip, subnet);
        }
    }
}

#[test]
fn every_report_record_with_an_address_parses() {
    let design = generate_design(&req());
    let records = parse_ip_table(&design.output.ip_allocation);
    assert!(records.len() >= 8);
    for record in &records {
        assert!(ip_from_label(&record.ip).is_some(), "{:?}", record);
    }
}

#[test]
fn exporters_consume_one_shared_layout() {
    let design = generate_design(&req());
    let layout = compute_layout(&design.graph);
    assert_eq!(layout.positions.len(), design.graph.nodes.len());

    let xml = drawio_xml(&design.graph, &layout).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<mxGraphModel"));

    let png = render_png(&design.graph, &layout, 1.0).unwrap();
    let pdf = wrap_png_in_pdf(&png).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let csv_bytes = to_csv(&parse_ip_table(&design.output.ip_allocation)).unwrap();
    assert!(csv_bytes.starts_with(b"Device,IP\n"));
}
