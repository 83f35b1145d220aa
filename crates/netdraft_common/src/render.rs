//! Diagram renderer - SVG emission and PNG rasterization.
//!
//! The raster is produced from explicit layout output, so there is no
//! asynchronous "layout settled" wait anywhere in the export path.

use crate::error::NetdraftError;
use crate::graph::NetworkGraph;
use crate::layout::{Layout, NODE_HEIGHT, NODE_WIDTH};
use std::fmt::Write;
use tiny_skia::{Pixmap, Transform};

const BACKGROUND: &str = "#ffffff";
const NODE_FILL: &str = "#f7fafc";
const NODE_STROKE: &str = "#2d3748";
const EDGE_STROKE: &str = "#4a5568";
const TEXT_COLOR: &str = "#1a202c";
const LINE_HEIGHT: f32 = 18.0;

/// Render the diagram as a standalone SVG document.
pub fn render_svg(graph: &NetworkGraph, layout: &Layout) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" ",
            "viewBox=\"0 0 {w:.0} {h:.0}\" font-family=\"Tahoma, sans-serif\">\n",
            "  <defs>\n",
            "    <marker id=\"arrow\" markerWidth=\"8\" markerHeight=\"8\" refX=\"6\" refY=\"4\" ",
            "orient=\"auto\" markerUnits=\"strokeWidth\">\n",
            "      <path d=\"M1,1 L6,4 L1,7 z\" fill=\"{edge}\" />\n",
            "    </marker>\n",
            "  </defs>\n",
            "  <rect width=\"100%\" height=\"100%\" fill=\"{bg}\" />\n"
        ),
        w = layout.width,
        h = layout.height,
        edge = EDGE_STROKE,
        bg = BACKGROUND,
    );

    for edge in &graph.edges {
        let (Some(from_idx), Some(to_idx)) = (graph.index_of(&edge.from), graph.index_of(&edge.to))
        else {
            continue;
        };
        let a = layout.position(from_idx);
        let b = layout.position(to_idx);
        let dash = if edge.dashed {
            " stroke-dasharray=\"8 6\""
        } else {
            ""
        };
        let _ = writeln!(
            svg,
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\" marker-end=\"url(#arrow)\"{} />",
            a.x, a.y, b.x, b.y, EDGE_STROKE, dash
        );
    }

    for (index, node) in graph.nodes.iter().enumerate() {
        let p = layout.position(index);
        let left = p.x - NODE_WIDTH / 2.0;
        let top = p.y - NODE_HEIGHT / 2.0;
        let _ = writeln!(
            svg,
            "  <rect x=\"{left:.1}\" y=\"{top:.1}\" width=\"{NODE_WIDTH:.0}\" height=\"{NODE_HEIGHT:.0}\" rx=\"8\" ry=\"8\" fill=\"{NODE_FILL}\" stroke=\"{NODE_STROKE}\" stroke-width=\"2\" />"
        );

        let lines: Vec<&str> = node.label.lines().collect();
        let start_y = p.y - LINE_HEIGHT * (lines.len() as f32 - 1.0) / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let _ = writeln!(
                svg,
                "  <text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"13\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
                p.x,
                start_y + i as f32 * LINE_HEIGHT,
                TEXT_COLOR,
                escape_text(line)
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterize the diagram to PNG bytes at the given scale.
pub fn render_png(
    graph: &NetworkGraph,
    layout: &Layout,
    scale: f32,
) -> Result<Vec<u8>, NetdraftError> {
    if scale <= 0.0 {
        return Err(NetdraftError::Render(
            "scale must be greater than zero".to_string(),
        ));
    }

    let svg = render_svg(graph, layout);

    let mut options = resvg::usvg::Options::default();
    options.font_family = "Tahoma".to_string();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(&svg, &options)
        .map_err(|e| NetdraftError::Render(format!("failed to parse generated SVG: {e}")))?;

    let size = tree.size().to_int_size();
    let scaled_width = ((size.width() as f32) * scale).ceil() as u32;
    let scaled_height = ((size.height() as f32) * scale).ceil() as u32;
    if scaled_width == 0 || scaled_height == 0 {
        return Err(NetdraftError::Render(
            "scaled dimensions collapsed below 1px".to_string(),
        ));
    }

    let mut pixmap = Pixmap::new(scaled_width, scaled_height).ok_or_else(|| {
        NetdraftError::Render(format!(
            "failed to allocate {scaled_width}x{scaled_height} surface"
        ))
    })?;

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| NetdraftError::Render(format!("failed to encode PNG: {e}")))
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
