use std::sync::Arc;

use anyhow::{Result, anyhow};
use log::debug;
use svg::Document;
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

/// Converts a report page into a single-page PDF, rendering text with the system fonts.
pub fn svg_to_pdf(document: &Document) -> Result<Vec<u8>> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    debug!("[IO] {} font faces available for the pdf", fontdb.len());

    let mut opt = usvg::Options::default();
    opt.fontdb = Arc::new(fontdb);
    let tree = usvg::Tree::from_str(&document.to_string(), &opt)
        .map_err(|e| anyhow!("could not parse report svg: {e:?}"))?;
    let pdf = svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default());
    debug!("[IO] report converted to pdf ({} bytes)", pdf.len());
    Ok(pdf)
}
