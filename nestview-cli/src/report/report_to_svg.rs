use itertools::Itertools;
use nestview::entities::{BinResult, NestingRequest, PlacementResult};
use nestview::geometry::{GeometryError, Point, ViewTransform};
use nestview::io::svg::{Color, SvgDrawOptions, bin_group};
use svg::Document;
use svg::Node;
use svg::node::element::{Line, Rectangle, Text};

use crate::report::{AreaTotals, EfficiencyGrade, piece_tallies, recommendations};

// A4 width in points
const PAGE_WIDTH: f64 = 595.0;
const MARGIN: f64 = 40.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const LINE_HEIGHT: f64 = 14.0;
const ROW_HEIGHT: f64 = 18.0;
const DRAWING_HEIGHT: f64 = 300.0;

const PRIMARY: Color = Color(0x29, 0x80, 0xB9);
const SECONDARY: Color = Color(0x34, 0x49, 0x5E);
const ACCENT: Color = Color(0xE7, 0x4C, 0x3C);
const SUCCESS: Color = Color(0x27, 0xAE, 0x60);
const BAND: Color = Color(0xF0, 0xF0, 0xF0);
const STRIPE: Color = Color(0xF8, 0xF9, 0xFA);
const WHITE: Color = Color(0xFF, 0xFF, 0xFF);
const MUTED: Color = Color(0x80, 0x80, 0x80);

/// Renders the report of `result` as a single page: summary, configuration, key figures,
/// per-bin table and drawings, per-piece table, efficiency analysis and recommendations.
pub fn report_to_svg(
    request: &NestingRequest,
    result: &PlacementResult,
    options: &SvgDrawOptions,
    generated_at: &str,
) -> Result<Document, GeometryError> {
    let unit = request.container.unit().symbol();
    let summary = &result.summary;
    let total_ms = summary.total_execution_time.as_millis();
    let mut page = Page::default();

    page.banner("NESTING REPORT", "Placement analysis");
    page.paragraph(&[format!("Generated: {generated_at}")]);

    page.section("Summary");
    page.paragraph(&[
        format!(
            "Placement computed with the {} strategy.",
            request.strategy.label()
        ),
        format!(
            "{} pieces of {} different types were requested.",
            request.total_copies(),
            request.pieces.len()
        ),
        format!(
            "{} bin(s) used with an average efficiency of {:.2}%.",
            summary.total_bins, summary.average_efficiency
        ),
        format!("Total processing time: {total_ms} ms."),
    ]);

    page.section("Configuration");
    let rotation = &request.rotation;
    let angles = match rotation.allow_rotation() {
        true => format!("{}°", rotation.angles().iter().join(", ")),
        false => "n/a".to_string(),
    };
    page.table(
        &["Parameter", "Value"],
        &[
            vec![
                "Container dimensions".into(),
                format!(
                    "{} × {} {unit}",
                    request.container.width(),
                    request.container.height()
                ),
            ],
            vec![
                "Container area".into(),
                format!("{:.2} {unit}²", request.container.area()),
            ],
            vec!["Strategy".into(), request.strategy.label().into()],
            vec![
                "Rotation allowed".into(),
                if rotation.allow_rotation() { "Yes" } else { "No" }.into(),
            ],
            vec!["Rotation angles".into(), angles],
            vec!["Margin between pieces".into(), format!("{} {unit}", request.margin)],
            vec!["Unit".into(), request.container.unit().label().into()],
        ],
    );

    page.section("Results");
    let efficiency_color = match summary.average_efficiency >= 80.0 {
        true => SUCCESS,
        false => ACCENT,
    };
    page.metrics(&[
        (summary.total_bins.to_string(), "Bins used", PRIMARY),
        (summary.total_pieces_placed.to_string(), "Pieces placed", SUCCESS),
        (
            format!("{:.2}%", summary.average_efficiency),
            "Average efficiency",
            efficiency_color,
        ),
        (format!("{total_ms} ms"), "Execution time", SECONDARY),
    ]);

    page.section("Bins");
    let bin_rows = result
        .bins
        .iter()
        .map(|bin| {
            vec![
                format!("Bin {}", bin.bin_id),
                format!("{} × {}", bin.width, bin.height),
                bin.placed_pieces.len().to_string(),
                format!("{:.2}%", bin.efficiency),
                format!("{} ms", bin.execution_time.as_millis()),
            ]
        })
        .collect_vec();
    page.table(&["Bin", "Dimensions", "Pieces", "Efficiency", "Time"], &bin_rows);

    page.section("Bin drawings");
    for (i, bin) in result.bins.iter().enumerate() {
        if i > 0 {
            page.separator();
        }
        page.drawing(bin, options)?;
    }

    page.section("Pieces");
    let piece_rows = piece_tallies(request, result)
        .into_iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.requested.to_string(),
                t.placed.to_string(),
                format!("{:.1} × {:.1}", t.width, t.height),
                format!("{:.1}%", t.success_rate()),
            ]
        })
        .collect_vec();
    page.table(
        &["Piece", "Requested", "Placed", "Dimensions", "Placed share"],
        &piece_rows,
    );

    page.section("Efficiency analysis");
    let areas = AreaTotals::of(result);
    let bins_line = match summary.total_bins {
        1 => "• All pieces fit in a single bin".to_string(),
        n => format!("• {n} bins were needed for all pieces"),
    };
    page.paragraph(&[
        format!("Total available area: {:.2} {unit}²", areas.total),
        format!(
            "Used area: {:.2} {unit}² ({:.2}%)",
            areas.used,
            areas.used_share()
        ),
        format!(
            "Wasted area: {:.2} {unit}² ({:.2}%)",
            areas.wasted(),
            areas.wasted_share()
        ),
        String::new(),
        format!("• {}", EfficiencyGrade::of(summary.average_efficiency)),
        bins_line,
    ]);

    page.section("Recommendations");
    let advice = recommendations(request, result)
        .iter()
        .map(|r| format!("• {r}"))
        .collect_vec();
    page.paragraph(&advice);

    Ok(page.finish(generated_at))
}

/// Vertical flow of report elements.
#[derive(Default)]
struct Page {
    nodes: Vec<Box<dyn Node>>,
    y: f64,
}

impl Page {
    fn push(&mut self, node: impl Into<Box<dyn Node>>) {
        self.nodes.push(node.into());
    }

    fn banner(&mut self, title: &str, subtitle: &str) {
        self.push(rect(0.0, 0.0, PAGE_WIDTH, 85.0, PRIMARY));
        self.push(text(title, PAGE_WIDTH / 2.0, 50.0, 24.0, WHITE).set("text-anchor", "middle"));
        self.push(
            text(subtitle, PAGE_WIDTH / 2.0, 70.0, 12.0, WHITE).set("text-anchor", "middle"),
        );
        self.y = 115.0;
    }

    fn section(&mut self, title: &str) {
        self.y += 10.0;
        self.push(rect(MARGIN - 5.0, self.y - 15.0, CONTENT_WIDTH + 10.0, 22.0, BAND));
        self.push(text(title, MARGIN, self.y, 16.0, PRIMARY).set("font-weight", "bold"));
        self.y += 25.0;
    }

    fn paragraph(&mut self, lines: &[String]) {
        for line in lines {
            if !line.is_empty() {
                self.push(text(line, MARGIN, self.y, 11.0, SECONDARY));
            }
            self.y += LINE_HEIGHT;
        }
        self.y += 10.0;
    }

    /// Table with a colored header row and striped body rows, columns evenly spread.
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let col_width = CONTENT_WIDTH / headers.len().max(1) as f64;
        let cell_x = |col: usize| MARGIN + 4.0 + col as f64 * col_width;

        self.push(rect(MARGIN, self.y, CONTENT_WIDTH, ROW_HEIGHT, PRIMARY));
        for (col, header) in headers.iter().enumerate() {
            self.push(
                text(*header, cell_x(col), self.y + 12.5, 10.0, WHITE).set("font-weight", "bold"),
            );
        }
        self.y += ROW_HEIGHT;

        for (i, row) in rows.iter().enumerate() {
            if i % 2 == 0 {
                self.push(rect(MARGIN, self.y, CONTENT_WIDTH, ROW_HEIGHT, STRIPE));
            }
            for (col, cell) in row.iter().enumerate() {
                self.push(text(cell, cell_x(col), self.y + 12.5, 10.0, SECONDARY));
            }
            self.y += ROW_HEIGHT;
        }
        self.y += 20.0;
    }

    /// Row of colored boxes, each holding a value above its label.
    fn metrics(&mut self, metrics: &[(String, &str, Color)]) {
        let gap = 12.0;
        let n = metrics.len().max(1) as f64;
        let box_width = (CONTENT_WIDTH - (n - 1.0) * gap) / n;
        let box_height = 48.0;
        for (i, (value, label, color)) in metrics.iter().enumerate() {
            let x = MARGIN + i as f64 * (box_width + gap);
            let center = x + box_width / 2.0;
            self.push(rect(x, self.y, box_width, box_height, *color));
            self.push(
                text(value, center, self.y + 22.0, 16.0, WHITE)
                    .set("text-anchor", "middle")
                    .set("font-weight", "bold"),
            );
            self.push(
                text(*label, center, self.y + 40.0, 9.0, WHITE).set("text-anchor", "middle"),
            );
        }
        self.y += box_height + 20.0;
    }

    /// Title, key figures and drawing of one bin, scaled to fit the content width.
    fn drawing(&mut self, bin: &BinResult, options: &SvgDrawOptions) -> Result<(), GeometryError> {
        self.push(
            text(format!("Bin {}", bin.bin_id), MARGIN, self.y, 14.0, SECONDARY)
                .set("font-weight", "bold"),
        );
        self.y += LINE_HEIGHT + 2.0;
        self.push(text(
            format!(
                "Dimensions: {} × {} | Efficiency: {:.2}% | Pieces: {}",
                bin.width,
                bin.height,
                bin.efficiency,
                bin.placed_pieces.len()
            ),
            MARGIN,
            self.y,
            10.0,
            SECONDARY,
        ));
        self.y += 12.0;

        let view = ViewTransform::fit(
            Point(MARGIN, self.y),
            CONTENT_WIDTH,
            DRAWING_HEIGHT,
            bin.width,
            bin.height,
        )?;
        let drawing_options = SvgDrawOptions {
            header: false,
            ..options.clone()
        };
        self.push(bin_group(bin, &view, &drawing_options, ""));
        self.y += view.length_to_screen(bin.height) + 20.0;
        Ok(())
    }

    fn separator(&mut self) {
        self.push(
            Line::new()
                .set("x1", MARGIN as f32)
                .set("y1", self.y as f32)
                .set("x2", (PAGE_WIDTH - MARGIN) as f32)
                .set("y2", self.y as f32)
                .set("stroke", Color(0xC8, 0xC8, 0xC8).to_string()),
        );
        self.y += 20.0;
    }

    fn finish(mut self, generated_at: &str) -> Document {
        self.y += 10.0;
        self.push(text(
            format!("Generated by nestview, {generated_at}"),
            MARGIN,
            self.y,
            8.0,
            MUTED,
        ));
        let (w, h) = (PAGE_WIDTH as f32, (self.y + MARGIN) as f32);
        let document = Document::new()
            .set("viewBox", (0.0_f32, 0.0_f32, w, h))
            .set("width", w)
            .set("height", h)
            .add(rect(0.0, 0.0, PAGE_WIDTH, h as f64, WHITE));
        self.nodes.into_iter().fold(document, |doc, node| doc.add(node))
    }
}

fn text(content: impl Into<String>, x: f64, y: f64, size: f64, color: Color) -> Text {
    Text::new(content.into())
        .set("x", x as f32)
        .set("y", y as f32)
        .set("font-size", size as f32)
        .set("font-family", "sans-serif")
        .set("fill", color.to_string())
}

fn rect(x: f64, y: f64, width: f64, height: f64, color: Color) -> Rectangle {
    Rectangle::new()
        .set("x", x as f32)
        .set("y", y as f32)
        .set("width", width as f32)
        .set("height", height as f32)
        .set("fill", color.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nestview::entities::{PlacedPiece, Session};
    use nestview::geometry::DTransformation;

    use super::*;

    #[test]
    fn report_lists_sections_and_draws_every_piece() {
        let request = Session::sample().build_request();
        let placed_pieces = ["rectangle_1", "rectangle_1", "triangle_1"]
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let piece = request.pieces.iter().find(|p| p.id() == *id).unwrap();
                PlacedPiece::from_original(
                    piece,
                    format!("{id}_{}", i + 1),
                    i as u32 + 1,
                    DTransformation::empty(),
                )
            })
            .collect();
        let result = PlacementResult::from_bins(vec![BinResult {
            bin_id: 1,
            width: 200.0,
            height: 150.0,
            efficiency: 42.0,
            execution_time: Duration::from_millis(35),
            placed_pieces,
        }]);

        let document =
            report_to_svg(&request, &result, &SvgDrawOptions::default(), "2026-01-01").unwrap();
        let content = document.to_string();

        for title in [
            "Summary",
            "Configuration",
            "Results",
            "Bin drawings",
            "Pieces",
            "Efficiency analysis",
            "Recommendations",
        ] {
            assert!(content.contains(title), "missing section {title}");
        }
        assert_eq!(content.matches("id=\"piece_").count(), 3);
        assert!(content.contains("All pieces fit in a single bin"));
        assert!(content.contains(&EfficiencyGrade::Low.to_string()));
    }
}
