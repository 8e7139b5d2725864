use proptest::prelude::*;
use tileshell_motion_core::{
    format_number, linear_keyframes, sample_linear, spline_keyframes, spline_sample,
    spline_sample_nd, Keyframe, SplineOptions, StringTemplate,
};

fn close(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= 1e-9 * scale.max(1.0)
}

fn literal() -> impl Strategy<Value = String> {
    // literals must not glue onto a neighbouring token
    "[ ,)][a-zA-Z]{0,5}[( ,]"
}

fn token() -> impl Strategy<Value = (f64, &'static str)> {
    (
        -5000.0f64..5000.0,
        prop::sample::select(vec!["", "px", "deg", "%", "em", "rad"]),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn two_point_spline_is_linear(a in -1e4f64..1e4, b in -1e4f64..1e4, t in 0.0f64..=1.0) {
        let spline = spline_sample(&[a, b], t).unwrap();
        let linear = sample_linear(&[a, b], t).unwrap();
        prop_assert!(close(spline, linear, a.abs().max(b.abs())));
    }

    #[test]
    fn spline_is_clamped_at_both_ends(points in prop::collection::vec(-1e4f64..1e4, 1..16)) {
        let first = spline_sample(&points, 0.0).unwrap();
        let last = spline_sample(&points, 1.0).unwrap();
        prop_assert_eq!(first, points[0]);
        prop_assert_eq!(last, *points.last().unwrap());
    }

    #[test]
    fn spline_stays_inside_control_hull(
        points in prop::collection::vec(-1e4f64..1e4, 3..12),
        t in 0.0f64..=1.0,
    ) {
        let v = spline_sample(&points, t).unwrap();
        let lo = points.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = points.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(v >= lo - 1e-6 && v <= hi + 1e-6, "{v} outside [{lo}, {hi}]");
    }

    #[test]
    fn nd_spline_matches_per_axis(
        xs in prop::collection::vec(-100.0f64..100.0, 4..8),
        t in 0.0f64..=1.0,
    ) {
        let points: Vec<Vec<f64>> = xs.iter().map(|x| vec![*x, -x]).collect();
        let nd = spline_sample_nd(&points, t, 3).unwrap();
        let x = spline_sample(&xs, t).unwrap();
        prop_assert!(close(nd[0], x, 100.0));
        prop_assert!(close(nd[1], -x, 100.0));
    }

    #[test]
    fn template_rebuild_only_changes_numbers(
        head in "[a-zA-Z]{0,6}[( ]",
        parts in prop::collection::vec((token(), literal()), 1..5),
        replacement in prop::collection::vec(-5000.0f64..5000.0, 5),
    ) {
        let mut source = head.clone();
        for ((value, unit), lit) in &parts {
            source.push_str(&format_number(*value, 3));
            source.push_str(unit);
            source.push_str(lit);
        }

        let template = StringTemplate::parse(&source).unwrap();
        prop_assert_eq!(template.tokens.len(), parts.len());
        prop_assert_eq!(template.build(&template.values(), 3), source.clone());

        let rebuilt = template.build(&replacement, 3);
        let reparsed = StringTemplate::parse(&rebuilt).unwrap();
        prop_assert!(template.is_compatible(&reparsed));
        for (token, wanted) in reparsed.tokens.iter().zip(&replacement) {
            prop_assert!((token.value - wanted).abs() <= 6e-4);
        }
    }

    #[test]
    fn expansion_preserves_endpoints_and_ordering(
        values in prop::collection::vec(-500.0f64..500.0, 2..6),
        steps in 1usize..12,
    ) {
        let frames: Vec<Keyframe> = values.iter().map(|v| Keyframe::new().with("x", *v)).collect();
        let opts = SplineOptions::default().with_steps(steps);
        for out in [spline_keyframes(&frames, &opts), linear_keyframes(&frames, &opts)] {
            prop_assert_eq!(out.len(), (values.len() - 1) * steps + 1);
            prop_assert_eq!(out[0].number("x"), Some(values[0]));
            prop_assert_eq!(out.last().unwrap().number("x"), Some(*values.last().unwrap()));
            let offsets: Vec<f64> = out.iter().map(|f| f.offset.unwrap()).collect();
            prop_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
