use nestview::io::svg::SvgDrawOptions;
use nestview_client::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};

/// Configuration of the command line front end
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CliConfig {
    /// URL the nesting requests are posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Drawing options for the per-bin SVGs and the drawings in the report
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
    /// Write the report as PDF. Ignored if built without the `pdf` feature
    #[serde(default = "default_true")]
    pub pdf_report: bool,
    /// Also write the report page as SVG
    #[serde(default)]
    pub svg_report: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            svg_draw_options: SvgDrawOptions::default(),
            pdf_report: true,
            svg_report: false,
        }
    }
}
