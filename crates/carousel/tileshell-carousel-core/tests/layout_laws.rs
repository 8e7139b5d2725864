use proptest::prelude::*;
use tileshell_carousel_core::{
    compute_layout, Axis, Carousel, CarouselConfig, CarouselState, ChildItem, ElementId,
    GestureOutcome, OverscrollMode, PointerInput, PointerPhase,
};

fn state(n: usize, extent: f64, looped: bool, offset: f64) -> CarouselState {
    let mut s = CarouselState::new(Axis::Horizontal, looped);
    s.child_count = n;
    s.extent = extent;
    s.offset = offset;
    s
}

fn tolerance(scale: f64) -> f64 {
    1e-9 * scale.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn loop_placement_is_nearest_copy(
        n in 1usize..8,
        extent in 1.0f64..500.0,
        offset in -1e5f64..1e5,
    ) {
        let s = state(n, extent, true, offset);
        let period = s.period();
        let eps = tolerance(offset) * 10.0;
        for p in compute_layout(&s).unwrap() {
            let k = (p.position - p.natural) / period;
            prop_assert!((k - k.round()).abs() < 1e-6, "not a whole period: {k}");
            let distance = (p.position - offset).abs();
            prop_assert!(distance <= period / 2.0 + eps);
            prop_assert!(distance <= (p.position + period - offset).abs() + eps);
            prop_assert!(distance <= (p.position - period - offset).abs() + eps);
            prop_assert!((p.translate - (p.position - offset)).abs() <= eps);
        }
    }

    #[test]
    fn clamped_placement_is_linear(
        n in 1usize..8,
        extent in 1.0f64..500.0,
        offset in 0.0f64..3000.0,
    ) {
        let s = state(n, extent, false, offset);
        for p in compute_layout(&s).unwrap() {
            prop_assert_eq!(p.translate, p.index as f64 * extent - offset);
        }
    }

    #[test]
    fn drag_stays_in_bounds_and_settles_on_a_page(
        n in 1u32..6,
        extent in 50.0f64..400.0,
        moves in prop::collection::vec((-600.0f64..600.0, 1.0f64..40.0), 1..12),
    ) {
        let mut carousel = Carousel::new(CarouselConfig::default());
        carousel.set_children((0..n).map(|i| ChildItem::new(ElementId(i))).collect());
        carousel.resize(extent).unwrap();
        let max = (n - 1) as f64 * extent;

        let mut t = 0.0;
        let mut x = 0.0;
        carousel.pointer(&PointerInput::primary(PointerPhase::Down, x, 0.0, t));
        for (dx, dt) in moves {
            x += dx;
            t += dt;
            carousel.pointer(&PointerInput::primary(PointerPhase::Move, x, 0.0, t));
            let offset = carousel.offset();
            prop_assert!((0.0..=max).contains(&offset));
        }
        carousel.pointer(&PointerInput::primary(PointerPhase::Up, x, 0.0, t + 8.0));

        let target = carousel.target_offset();
        let pages = target / extent;
        prop_assert!((pages - pages.round()).abs() < 1e-9);
        prop_assert!((0.0..=max).contains(&target));

        let mut now = t;
        while carousel.tick(now) {
            now += 16.0;
        }
        prop_assert_eq!(carousel.offset(), target);
    }

    #[test]
    fn slow_release_targets_page_nearest_release_offset(
        n in 1u32..6,
        extent in 50.0f64..400.0,
        looped in any::<bool>(),
        travel in -1500.0f64..1500.0,
        jitter in -10.0f64..10.0,
    ) {
        let mut config = CarouselConfig::default();
        if looped {
            config.overscroll = OverscrollMode::Loop;
        }
        let threshold = config.gesture.min_flick_velocity;
        let mut carousel = Carousel::new(config);
        carousel.set_children((0..n).map(|i| ChildItem::new(ElementId(i))).collect());
        carousel.resize(extent).unwrap();

        // long drag, then a pause; the last 50ms move at most 0.2px/ms
        let x = 2000.0 - travel;
        carousel.pointer(&PointerInput::primary(PointerPhase::Down, 2000.0, 0.0, 0.0));
        carousel.pointer(&PointerInput::primary(PointerPhase::Move, x, 0.0, 1000.0));
        carousel.pointer(&PointerInput::primary(PointerPhase::Move, x + jitter, 0.0, 1050.0));
        let outcome =
            carousel.pointer(&PointerInput::primary(PointerPhase::Up, x + jitter, 0.0, 1050.0));
        prop_assert!((jitter / 50.0).abs() < threshold);

        let released = carousel.offset();
        let expected = state(n as usize, extent, looped, released).nearest_page_offset(released);
        prop_assert_eq!(outcome, GestureOutcome::Released { target: expected });
        prop_assert_eq!(carousel.target_offset(), expected);
    }
}
