mod layout_to_svg;
pub mod svg_util;

#[doc(inline)]
pub use layout_to_svg::{bin_group, bin_to_svg, editor_to_svg, result_to_svgs, surface_view};

#[doc(inline)]
pub use svg_util::{Color, SvgDrawOptions, SvgLayoutTheme};
