//! draw.io (mxGraph) interchange export.
//!
//! Emits the minimal subset the diagramming tool needs to re-open a design:
//! fixed header boilerplate, one vertex cell per node at its layout
//! coordinates, one edge cell per connector. Connector endpoints are
//! resolved through an id→index map built once per export, so node
//! reordering can never silently corrupt them.

use crate::error::NetdraftError;
use crate::graph::NetworkGraph;
use crate::layout::Layout;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::collections::HashMap;

const NODE_STYLE_PREFIX: &str = "shape=image;image=";
const NODE_STYLE_SUFFIX: &str =
    ";verticalLabelPosition=bottom;verticalAlign=top;rounded=1;whiteSpace=wrap;html=1;";
const EDGE_STYLE: &str = "endArrow=classic;html=1;";

fn xml_err<E: std::fmt::Display>(e: E) -> NetdraftError {
    NetdraftError::Export(format!("drawio: {e}"))
}

/// Serialize the graph as a .drawio document.
pub fn drawio_xml(graph: &NetworkGraph, layout: &Layout) -> Result<String, NetdraftError> {
    let index_by_id: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.as_str(), index))
        .collect();

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;

    let mut mxfile = BytesStart::new("mxfile");
    mxfile.push_attribute(("host", "app.diagrams.net"));
    mxfile.push_attribute(("modified", "2023-06-03T12:00:00.000Z"));
    mxfile.push_attribute(("agent", "netdraft"));
    mxfile.push_attribute(("version", "14.7.4"));
    mxfile.push_attribute(("type", "device"));
    writer.write_event(Event::Start(mxfile)).map_err(xml_err)?;

    let mut diagram = BytesStart::new("diagram");
    diagram.push_attribute(("id", "netdraft-topology"));
    diagram.push_attribute(("name", "Network Diagram"));
    writer.write_event(Event::Start(diagram)).map_err(xml_err)?;

    let mut model = BytesStart::new("mxGraphModel");
    for (key, value) in [
        ("dx", "1422"),
        ("dy", "794"),
        ("grid", "1"),
        ("gridSize", "10"),
        ("guides", "1"),
        ("tooltips", "1"),
        ("connect", "1"),
        ("arrows", "1"),
        ("fold", "1"),
        ("page", "1"),
        ("pageScale", "1"),
        ("pageWidth", "827"),
        ("pageHeight", "1169"),
        ("math", "0"),
        ("shadow", "0"),
    ] {
        model.push_attribute((key, value));
    }
    writer.write_event(Event::Start(model)).map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("root")))
        .map_err(xml_err)?;

    let mut cell0 = BytesStart::new("mxCell");
    cell0.push_attribute(("id", "0"));
    writer.write_event(Event::Empty(cell0)).map_err(xml_err)?;
    let mut cell1 = BytesStart::new("mxCell");
    cell1.push_attribute(("id", "1"));
    cell1.push_attribute(("parent", "0"));
    writer.write_event(Event::Empty(cell1)).map_err(xml_err)?;

    for (index, node) in graph.nodes.iter().enumerate() {
        let position = layout.position(index);
        let id = format!("node{index}");
        let style = format!("{NODE_STYLE_PREFIX}{}{NODE_STYLE_SUFFIX}", node.image);

        let mut cell = BytesStart::new("mxCell");
        cell.push_attribute(("id", id.as_str()));
        cell.push_attribute(("value", node.label.as_str()));
        cell.push_attribute(("style", style.as_str()));
        cell.push_attribute(("vertex", "1"));
        cell.push_attribute(("parent", "1"));
        writer.write_event(Event::Start(cell)).map_err(xml_err)?;

        let x = (position.x.round() as i64).to_string();
        let y = (position.y.round() as i64).to_string();
        let mut geometry = BytesStart::new("mxGeometry");
        geometry.push_attribute(("x", x.as_str()));
        geometry.push_attribute(("y", y.as_str()));
        geometry.push_attribute(("width", "80"));
        geometry.push_attribute(("height", "80"));
        geometry.push_attribute(("as", "geometry"));
        writer.write_event(Event::Empty(geometry)).map_err(xml_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("mxCell")))
            .map_err(xml_err)?;
    }

    for (index, edge) in graph.edges.iter().enumerate() {
        let source = index_by_id.get(edge.from.as_str()).ok_or_else(|| {
            NetdraftError::Export(format!("edge references unknown node: {}", edge.from))
        })?;
        let target = index_by_id.get(edge.to.as_str()).ok_or_else(|| {
            NetdraftError::Export(format!("edge references unknown node: {}", edge.to))
        })?;

        let id = format!("edge{index}");
        let source_ref = format!("node{source}");
        let target_ref = format!("node{target}");
        let mut cell = BytesStart::new("mxCell");
        cell.push_attribute(("id", id.as_str()));
        cell.push_attribute(("value", ""));
        cell.push_attribute(("style", EDGE_STYLE));
        cell.push_attribute(("edge", "1"));
        cell.push_attribute(("parent", "1"));
        cell.push_attribute(("source", source_ref.as_str()));
        cell.push_attribute(("target", target_ref.as_str()));
        writer.write_event(Event::Start(cell)).map_err(xml_err)?;

        let mut geometry = BytesStart::new("mxGeometry");
        geometry.push_attribute(("width", "50"));
        geometry.push_attribute(("height", "50"));
        geometry.push_attribute(("relative", "1"));
        geometry.push_attribute(("as", "geometry"));
        writer.write_event(Event::Start(geometry)).map_err(xml_err)?;

        let mut source_point = BytesStart::new("mxPoint");
        source_point.push_attribute(("x", "400"));
        source_point.push_attribute(("y", "400"));
        source_point.push_attribute(("as", "sourcePoint"));
        writer
            .write_event(Event::Empty(source_point))
            .map_err(xml_err)?;
        let mut target_point = BytesStart::new("mxPoint");
        target_point.push_attribute(("x", "450"));
        target_point.push_attribute(("y", "350"));
        target_point.push_attribute(("as", "targetPoint"));
        writer
            .write_event(Event::Empty(target_point))
            .map_err(xml_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("mxGeometry")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("mxCell")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("root")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("mxGraphModel")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("diagram")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("mxfile")))
        .map_err(xml_err)?;

    String::from_utf8(writer.into_inner()).map_err(xml_err)
}
