//! PDF export - a single page sized to the diagram raster's pixel bounds.

use crate::error::NetdraftError;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use std::io::{BufWriter, Cursor};

const DPI: f64 = 96.0;

fn px_to_mm(px: usize) -> f64 {
    px as f64 * 25.4 / DPI
}

/// Wrap rendered PNG bytes in a one-page PDF whose page matches the image.
pub fn wrap_png_in_pdf(png: &[u8]) -> Result<Vec<u8>, NetdraftError> {
    let decoder = PngDecoder::new(Cursor::new(png))
        .map_err(|e| NetdraftError::Export(format!("pdf: decode raster: {e}")))?;
    let image = Image::try_from(decoder)
        .map_err(|e| NetdraftError::Export(format!("pdf: import raster: {e}")))?;

    let width_mm = px_to_mm(image.image.width.0);
    let height_mm = px_to_mm(image.image.height.0);

    let (doc, page, layer) =
        PdfDocument::new("Network Diagram", Mm(width_mm as f32), Mm(height_mm as f32), "Diagram");
    let layer = doc.get_page(page).get_layer(layer);
    image.add_to_layer(
        layer,
        ImageTransform {
            dpi: Some(DPI as f32),
            ..Default::default()
        },
    );

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| NetdraftError::Export(format!("pdf: save: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::render::render_png;
    use crate::requirements::{NetworkRequirements, NetworkType};
    use crate::topology::build_topology;

    #[test]
    fn test_pdf_wraps_raster() {
        let graph = build_topology(&NetworkRequirements {
            network_type: NetworkType::Lan,
            security_level: 1,
            ..Default::default()
        });
        let layout = compute_layout(&graph);
        let png = render_png(&graph, &layout, 1.0).unwrap();
        let pdf = wrap_png_in_pdf(&png).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_rejects_garbage_input() {
        assert!(wrap_png_in_pdf(b"not a png").is_err());
    }
}
