//! Export artifacts: draw.io XML, PDF wrapper, and the tabular IP listing.

pub mod drawio;
pub mod pdf;
pub mod table;

pub use drawio::drawio_xml;
pub use pdf::wrap_png_in_pdf;
pub use table::{parse_ip_table, to_csv, to_xlsx, IpRecord};
