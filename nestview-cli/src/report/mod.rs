//! Placement report: figures derived from a result and the request it answers, and their
//! rendering as a printable page.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use nestview::entities::{NestingRequest, PlacementResult};

#[cfg(feature = "pdf")]
mod pdf;
mod report_to_svg;

#[cfg(feature = "pdf")]
#[doc(inline)]
pub use pdf::svg_to_pdf;

#[doc(inline)]
pub use report_to_svg::report_to_svg;

/// Qualitative reading of an average material efficiency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EfficiencyGrade {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl EfficiencyGrade {
    /// Grade of `efficiency`, in percent.
    pub fn of(efficiency: f64) -> Self {
        match efficiency {
            e if e >= 90.0 => EfficiencyGrade::Excellent,
            e if e >= 80.0 => EfficiencyGrade::Good,
            e if e >= 70.0 => EfficiencyGrade::Moderate,
            _ => EfficiencyGrade::Low,
        }
    }
}

impl Display for EfficiencyGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EfficiencyGrade::Excellent => "Excellent packing efficiency (90% or more)",
            EfficiencyGrade::Good => "Good packing efficiency (80-89%)",
            EfficiencyGrade::Moderate => "Moderate packing efficiency (70-79%)",
            EfficiencyGrade::Low => "Low packing efficiency (below 70%)",
        };
        write!(f, "{s}")
    }
}

/// Container area over all bins and the part of it covered by pieces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaTotals {
    pub total: f64,
    pub used: f64,
}

impl AreaTotals {
    pub fn of(result: &PlacementResult) -> Self {
        AreaTotals {
            total: result.total_area(),
            used: result.used_area(),
        }
    }

    pub fn wasted(&self) -> f64 {
        self.total - self.used
    }

    pub fn used_share(&self) -> f64 {
        percentage(self.used, self.total)
    }

    pub fn wasted_share(&self) -> f64 {
        percentage(self.wasted(), self.total)
    }
}

/// Requested and placed copies of one piece.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceTally {
    pub id: String,
    pub requested: u32,
    pub placed: usize,
    pub width: f64,
    pub height: f64,
}

impl PieceTally {
    /// Share of the requested copies that were placed, in percent.
    pub fn success_rate(&self) -> f64 {
        percentage(self.placed as f64, self.requested as f64)
    }
}

pub fn piece_tallies(request: &NestingRequest, result: &PlacementResult) -> Vec<PieceTally> {
    let placed = result
        .placed_pieces()
        .counts_by(|pp| pp.original_id.as_str());
    request
        .pieces
        .iter()
        .map(|piece| {
            let dims = piece.dimensions();
            PieceTally {
                id: piece.id().to_string(),
                requested: piece.quantity(),
                placed: placed.get(piece.id()).copied().unwrap_or(0),
                width: dims.width,
                height: dims.height,
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    AdjustContainer,
    TryMoreAngles,
    EnlargeContainer,
    EnableRotation,
    AddAngles,
    ReviewMargin,
    GroupSimilarPieces,
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Recommendation::AdjustContainer => {
                "Consider adjusting the container dimensions to improve efficiency"
            }
            Recommendation::TryMoreAngles => {
                "Evaluate allowing more rotation angles if they are not enabled"
            }
            Recommendation::EnlargeContainer => {
                "Check whether a larger container would reduce the number of bins needed"
            }
            Recommendation::EnableRotation => "Consider enabling piece rotation to improve packing",
            Recommendation::AddAngles => {
                "Evaluate allowing more rotation angles for greater flexibility"
            }
            Recommendation::ReviewMargin => {
                "Check that the margin between pieces is the minimum necessary"
            }
            Recommendation::GroupSimilarPieces => {
                "Consider grouping similar pieces to help the algorithm"
            }
        };
        write!(f, "{s}")
    }
}

/// Advice printed at the end of the report. The last two entries are always present.
pub fn recommendations(request: &NestingRequest, result: &PlacementResult) -> Vec<Recommendation> {
    let mut recs = vec![];
    if result.summary.average_efficiency < 80.0 {
        recs.push(Recommendation::AdjustContainer);
        recs.push(Recommendation::TryMoreAngles);
    }
    if result.summary.total_bins > 1 {
        recs.push(Recommendation::EnlargeContainer);
    }
    match request.rotation.allow_rotation() {
        false => recs.push(Recommendation::EnableRotation),
        true if request.rotation.angles().len() < 4 => recs.push(Recommendation::AddAngles),
        true => {}
    }
    recs.push(Recommendation::ReviewMargin);
    recs.push(Recommendation::GroupSimilarPieces);
    recs
}

fn percentage(part: f64, whole: f64) -> f64 {
    match whole > 0.0 {
        true => 100.0 * part / whole,
        false => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use float_cmp::approx_eq;
    use nestview::entities::{BinResult, PlacedPiece, RotationConfig, Session};
    use nestview::geometry::DTransformation;
    use test_case::test_case;

    use super::*;

    fn bin(bin_id: usize, efficiency: f64, request: &NestingRequest, copies: &[(&str, u32)]) -> BinResult {
        let placed_pieces = copies
            .iter()
            .map(|&(id, copy)| {
                let piece = request.pieces.iter().find(|p| p.id() == id).unwrap();
                PlacedPiece::from_original(
                    piece,
                    format!("{id}_{copy}"),
                    copy,
                    DTransformation::empty(),
                )
            })
            .collect();
        BinResult {
            bin_id,
            width: 200.0,
            height: 150.0,
            efficiency,
            execution_time: Duration::from_millis(20),
            placed_pieces,
        }
    }

    #[test_case(95.0, EfficiencyGrade::Excellent)]
    #[test_case(90.0, EfficiencyGrade::Excellent)]
    #[test_case(89.99, EfficiencyGrade::Good)]
    #[test_case(80.0, EfficiencyGrade::Good)]
    #[test_case(70.0, EfficiencyGrade::Moderate)]
    #[test_case(12.5, EfficiencyGrade::Low)]
    fn grades(efficiency: f64, expected: EfficiencyGrade) {
        assert_eq!(EfficiencyGrade::of(efficiency), expected);
        // printed verbatim in the svg report, where markup characters get escaped
        assert!(!expected.to_string().contains(['<', '>', '&']));
    }

    #[test]
    fn areas_follow_bin_efficiencies() {
        let request = Session::sample().build_request();
        let result = PlacementResult::from_bins(vec![
            bin(1, 50.0, &request, &[("rectangle_1", 1)]),
            bin(2, 25.0, &request, &[("rectangle_1", 2)]),
        ]);
        let totals = AreaTotals::of(&result);
        assert!(approx_eq!(f64, totals.total, 60_000.0));
        assert!(approx_eq!(f64, totals.used, 22_500.0));
        assert!(approx_eq!(f64, totals.wasted(), 37_500.0));
        assert!(approx_eq!(f64, totals.used_share(), 37.5));
        assert!(approx_eq!(f64, totals.used_share() + totals.wasted_share(), 100.0));
    }

    #[test]
    fn empty_results_have_no_share() {
        let totals = AreaTotals::of(&PlacementResult::from_bins(vec![]));
        assert_eq!((totals.used_share(), totals.wasted_share()), (0.0, 0.0));
    }

    #[test]
    fn tallies_count_placed_copies() {
        let request = Session::sample().build_request();
        let result = PlacementResult::from_bins(vec![bin(
            1,
            60.0,
            &request,
            &[("rectangle_1", 1), ("rectangle_1", 2), ("triangle_1", 1)],
        )]);
        let tallies = piece_tallies(&request, &result);
        assert_eq!(tallies.len(), request.pieces.len());

        let rect = &tallies[0];
        assert_eq!((rect.id.as_str(), rect.requested, rect.placed), ("rectangle_1", 3, 2));
        assert_eq!((rect.width, rect.height), (50.0, 30.0));
        assert!(approx_eq!(f64, rect.success_rate(), 200.0 / 3.0));
        assert_eq!(tallies[3].placed, 0);
    }

    #[test_case(92.0, 1, true, &[0, 90, 180, 270], &[]; "nothing to improve")]
    #[test_case(60.0, 1, true, &[0, 90, 180, 270], &[Recommendation::AdjustContainer, Recommendation::TryMoreAngles]; "low efficiency")]
    #[test_case(85.0, 3, true, &[0, 90, 180, 270], &[Recommendation::EnlargeContainer]; "several bins")]
    #[test_case(85.0, 1, false, &[0, 90, 180, 270], &[Recommendation::EnableRotation]; "rotation disabled")]
    #[test_case(85.0, 1, true, &[0, 180], &[Recommendation::AddAngles]; "few angles")]
    fn advice(efficiency: f64, n_bins: usize, allow: bool, angles: &[u16], expected: &[Recommendation]) {
        let mut session = Session::sample();
        session.set_rotation(RotationConfig::try_new(allow, angles.iter().copied()).unwrap());
        let request = session.build_request();
        let bins = (1..=n_bins).map(|i| bin(i, efficiency, &request, &[])).collect();
        let result = PlacementResult::from_bins(bins);

        let recs = recommendations(&request, &result);
        let (specific, always) = recs.split_at(recs.len() - 2);
        assert_eq!(specific, expected);
        assert_eq!(
            always,
            [Recommendation::ReviewMargin, Recommendation::GroupSimilarPieces]
        );
    }
}
