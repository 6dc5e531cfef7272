use log::debug;
use svg::Document;
use svg::node::element::{Circle, Group, Rectangle, Text, Title};

use crate::editor::ShapeEditor;
use crate::entities::{BinResult, PlacementResult};
use crate::geometry::{GeometryError, Point, ViewTransform};
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;

/// Height reserved above the container for the header line, in pixels.
const HEADER_HEIGHT: f64 = 24.0;

/// Grids denser than this are left out of the editor drawing.
pub const MAX_GRID_LINES: i64 = 1000;

/// Transform that fits a `width` × `height` container into the drawing surface, leaving room
/// for the padding and, if enabled, the header.
pub fn surface_view(
    options: &SvgDrawOptions,
    width: f64,
    height: f64,
) -> Result<ViewTransform, GeometryError> {
    let header = if options.header { HEADER_HEIGHT } else { 0.0 };
    let pad = options.padding;
    ViewTransform::fit(
        Point(pad, pad + header),
        options.surface_width - 2.0 * pad,
        options.surface_height - 2.0 * pad - header,
        width,
        height,
    )
}

/// Draws a bin and every piece placed in it.
pub fn bin_to_svg(
    bin: &BinResult,
    options: &SvgDrawOptions,
    title: &str,
) -> Result<Document, GeometryError> {
    let view = surface_view(options, bin.width, bin.height)?;
    Ok(surface(options).add(bin_group(bin, &view, options, title)))
}

/// Draws every bin of a result, one document per bin.
pub fn result_to_svgs(
    result: &PlacementResult,
    options: &SvgDrawOptions,
) -> Result<Vec<Document>, GeometryError> {
    result
        .bins
        .iter()
        .map(|bin| {
            let title = format!("bin {} of {}", bin.bin_id, result.summary.total_bins);
            bin_to_svg(bin, options, &title)
        })
        .collect()
}

/// Group drawing `bin` through `view`: container, placed pieces and labels.
pub fn bin_group(
    bin: &BinResult,
    view: &ViewTransform,
    options: &SvgDrawOptions,
    title: &str,
) -> Group {
    let theme = &options.theme;
    let stroke_width = theme.stroke_width;
    let container_rect = bin.rect();

    let header = {
        let top_left = view.to_screen(Point(container_rect.x_min, container_rect.y_min));
        let content = format!(
            "{} | width: {:.2} | height: {:.2} | efficiency: {:.2}% | pieces: {}",
            title,
            bin.width,
            bin.height,
            bin.efficiency,
            bin.placed_pieces.len()
        );
        Text::new(content)
            .set("x", top_left.0 as f32)
            .set("y", (top_left.1 - 0.4 * HEADER_HEIGHT) as f32)
            .set("font-size", 12.0)
            .set("font-family", "monospace")
            .set("fill", theme.label_color.to_string())
    };

    //draw container
    let container_group = {
        let screen_corners = container_rect.corners().map(|c| view.to_screen(c));
        Group::new()
            .set("id", format!("container_{}", bin.bin_id))
            .add(svg_util::data_to_path(
                svg_util::polygon_data(&screen_corners),
                &[
                    ("fill", &*theme.container_fill.to_string()),
                    ("stroke", &*theme.container_stroke.to_string()),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(Title::new(format!(
                "container, bin: {}, width: {:.3}, height: {:.3}",
                bin.bin_id, bin.width, bin.height
            )))
    };

    //draw placed pieces
    let pieces_group = bin.placed_pieces.iter().enumerate().fold(
        Group::new().set("id", format!("pieces_{}", bin.bin_id)),
        |group, (i, pp)| {
            let screen_points = pp.points.iter().map(|p| view.to_screen(*p)).collect::<Vec<_>>();
            let fill = theme.piece_fill(i);
            let stroke = svg_util::change_brightness(fill, 0.6);
            let mut piece_group = Group::new()
                .set("id", format!("piece_{}", pp.id))
                .add(svg_util::data_to_path(
                    svg_util::polygon_data(&screen_points),
                    &[
                        ("fill", &*fill.to_string()),
                        ("fill-opacity", &*format!("{}", theme.piece_opacity)),
                        ("stroke", &*stroke.to_string()),
                        ("stroke-width", &*format!("{stroke_width}")),
                    ],
                ))
                .add(Title::new(format!(
                    "piece: {}, original: {}, copy: {}, {}",
                    pp.id, pp.original_id, pp.copy_number, pp.d_transf
                )));
            if options.labels && !screen_points.is_empty() {
                let n = screen_points.len() as f64;
                let (sx, sy) = screen_points
                    .iter()
                    .fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
                piece_group = piece_group.add(
                    Text::new(pp.label())
                        .set("x", (sx / n) as f32)
                        .set("y", (sy / n) as f32)
                        .set("font-size", 10.0)
                        .set("font-family", "sans-serif")
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle")
                        .set("fill", theme.label_color.to_string()),
                );
            }
            group.add(piece_group)
        },
    );

    let group = Group::new().add(container_group).add(pieces_group);
    match options.header {
        true => group.add(header),
        false => group,
    }
}

/// Draws the editor canvas: drawing area, grid, and the polygon in progress.
pub fn editor_to_svg(editor: &ShapeEditor, options: &SvgDrawOptions) -> Document {
    let theme = &options.theme;
    let view = editor.view();
    let area = editor.area();
    let stroke_width = theme.stroke_width;

    let area_group = Group::new().set("id", "drawing_area").add(svg_util::data_to_path(
        svg_util::polygon_data(&area.corners().map(|c| view.to_screen(c))),
        &[
            ("fill", &*theme.container_fill.to_string()),
            ("stroke", &*theme.container_stroke.to_string()),
            ("stroke-width", &*format!("{stroke_width}")),
        ],
    ));

    let grid_group = editor.grid().and_then(|grid| {
        let size = grid.size();
        let first_x = (area.x_min / size).ceil() as i64;
        let last_x = (area.x_max / size).floor() as i64;
        let first_y = (area.y_min / size).ceil() as i64;
        let last_y = (area.y_max / size).floor() as i64;
        let n_lines = last_x
            .saturating_sub(first_x)
            .saturating_add(last_y.saturating_sub(first_y))
            .saturating_add(2);
        if n_lines > MAX_GRID_LINES {
            debug!("[SVG] grid of size {size} needs {n_lines} lines, not drawn");
            return None;
        }
        let vertical = (first_x..=last_x).map(|i| {
            let x = i as f64 * size;
            [Point(x, area.y_min), Point(x, area.y_max)]
        });
        let horizontal = (first_y..=last_y).map(|i| {
            let y = i as f64 * size;
            [Point(area.x_min, y), Point(area.x_max, y)]
        });
        Some(vertical.chain(horizontal).fold(
            Group::new()
                .set("id", "grid")
                .set("stroke", theme.grid_color.to_string())
                .set("stroke-width", 0.5 * stroke_width),
            |g, line| {
                g.add(svg_util::data_to_path(
                    svg_util::polyline_data(&line.map(|p| view.to_screen(p))),
                    &[],
                ))
            },
        ))
    });

    let screen_points = editor.screen_points();
    let shape_data = match editor.can_finish() {
        true => svg_util::polygon_data(&screen_points),
        false => svg_util::polyline_data(&screen_points),
    };
    let fill = theme.piece_fill(0);
    let shape_group = screen_points.iter().enumerate().fold(
        Group::new().set("id", "shape").add(svg_util::data_to_path(
            shape_data,
            &[
                ("fill", &*fill.to_string()),
                ("fill-opacity", "0.3"),
                ("stroke", &*svg_util::change_brightness(fill, 0.6).to_string()),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        )),
        |g, (i, p)| {
            g.add(
                Circle::new()
                    .set("cx", p.0 as f32)
                    .set("cy", p.1 as f32)
                    .set("r", 4.0)
                    .set("fill", theme.container_stroke.to_string())
                    .add(Title::new(format!("point {i}"))),
            )
        },
    );

    let doc = surface(options).add(area_group);
    let doc = match grid_group {
        Some(g) => doc.add(g),
        None => doc,
    };
    doc.add(shape_group)
}

fn surface(options: &SvgDrawOptions) -> Document {
    let (w, h) = (options.surface_width as f32, options.surface_height as f32);
    Document::new()
        .set("viewBox", (0.0_f32, 0.0_f32, w, h))
        .set("width", w)
        .set("height", h)
        .add(
            Rectangle::new()
                .set("width", w)
                .set("height", h)
                .set("fill", options.theme.background.to_string()),
        )
}
