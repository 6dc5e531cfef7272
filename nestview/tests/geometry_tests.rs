#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use test_case::test_case;

    use nestview::geometry::{Point, ViewTransform, fit_scale, normalize, rotate_90_cw};
    use nestview::units::{self, Unit};
    use nestview::util::FPA;
    use nestview::util::assertions;

    fn sample_points() -> Vec<Point> {
        let coords = [-1234.5, -10.0, -0.001, 0.0, 0.3, 7.0, 199.99, 4321.0];
        coords
            .iter()
            .cartesian_product(coords.iter())
            .map(|(&x, &y)| Point(x, y))
            .collect()
    }

    #[test_case(Point(0.0, 0.0), 1.0; "identity")]
    #[test_case(Point(20.0, 44.0), 0.5; "shrunk")]
    #[test_case(Point(-13.7, 250.25), 3.25; "magnified")]
    #[test_case(Point(1.0, 1.0), 1e-3; "tiny scale")]
    fn view_round_trip(origin: Point, scale: f64) {
        let view = ViewTransform::try_new(origin, scale).unwrap();
        for p in sample_points() {
            assert!(assertions::view_round_trips(&view, p), "{p:?} through {view:?}");
        }
    }

    #[test_case(0.0)]
    #[test_case(-1.0)]
    #[test_case(f64::NAN)]
    #[test_case(f64::INFINITY)]
    fn invalid_scales_are_refused(scale: f64) {
        assert!(ViewTransform::try_new(Point(0.0, 0.0), scale).is_err());
    }

    #[test_case(800.0, 600.0, 200.0, 150.0, 1.0; "capped at one")]
    #[test_case(400.0, 600.0, 800.0, 150.0, 0.5; "width bound")]
    #[test_case(800.0, 100.0, 200.0, 400.0, 0.25; "height bound")]
    fn fit_scale_is_min_of_three(aw: f64, ah: f64, cw: f64, ch: f64, expected: f64) {
        assert_eq!(fit_scale(aw, ah, cw, ch).unwrap(), expected);
    }

    #[test]
    fn fitted_container_never_exceeds_viewport() {
        let sizes = [0.5, 13.0, 150.0, 200.0, 999.0, 4000.0];
        for (&aw, &ah, &cw, &ch) in sizes
            .iter()
            .cartesian_product(sizes.iter())
            .cartesian_product(sizes.iter())
            .cartesian_product(sizes.iter())
            .map(|(((a, b), c), d)| (a, b, c, d))
        {
            let s = fit_scale(aw, ah, cw, ch).unwrap();
            assert!(s <= 1.0);
            assert!(FPA(cw * s) <= FPA(aw) && FPA(ch * s) <= FPA(ah));
        }
    }

    #[test]
    fn normalization_preserves_shape() {
        let shapes = vec![
            vec![Point(100.0, 50.0), Point(140.0, 50.0), Point(120.0, 85.0)],
            vec![Point(-5.5, -3.0), Point(12.0, -8.0), Point(20.0, 4.0), Point(-1.0, 9.5)],
            vec![
                Point(310.0, 210.0),
                Point(370.0, 210.0),
                Point(370.0, 230.0),
                Point(330.0, 230.0),
                Point(330.0, 260.0),
                Point(310.0, 260.0),
            ],
        ];
        for shape in shapes {
            let normalized = normalize(&shape).unwrap();
            let min_x = normalized.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
            let min_y = normalized.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
            assert_eq!((FPA(min_x), FPA(min_y)), (FPA(0.0), FPA(0.0)));

            for ((a, b), (na, nb)) in shape
                .iter()
                .tuple_combinations()
                .zip(normalized.iter().tuple_combinations())
            {
                assert_eq!(FPA(a.distance(b)), FPA(na.distance(nb)));
            }
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let shape = vec![Point(3.0, 1.0), Point(17.5, 2.0), Point(11.0, 13.25), Point(2.0, 8.0)];
        let turned = (0..4).fold(shape.clone(), |pts, _| rotate_90_cw(&pts));
        assert!(assertions::points_approx_eq(&shape, &turned));
    }

    #[test_case(Unit::Mm, 1.0)]
    #[test_case(Unit::Cm, 10.0)]
    #[test_case(Unit::M, 1000.0)]
    #[test_case(Unit::In, 25.4)]
    fn unit_round_trip(unit: Unit, factor: f64) {
        assert_eq!(units::to_base(1.0, unit), factor);
        for v in [0.0, 0.1, 2.5, 1234.5678] {
            assert_eq!(FPA(units::from_base(units::to_base(v, unit), unit)), FPA(v));
        }
    }
}
