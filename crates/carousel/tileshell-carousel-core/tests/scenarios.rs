use serde::Deserialize;

use tileshell_carousel_core::{
    Carousel, CarouselConfig, CarouselEvent, ChildItem, Component, ElementId, FlipView,
    GestureOutcome, Hub, OverscrollMode, PointerInput, PointerPhase,
};
use tileshell_motion_core::IdAllocator;
use tileshell_test_fixtures::carousels;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutCase {
    extent: f64,
    child_count: u32,
    #[serde(rename = "loop")]
    looped: bool,
    offset: f64,
    transforms: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseCase {
    extent: f64,
    child_count: u32,
    #[serde(rename = "loop")]
    looped: bool,
    pointer: Vec<PointerInput>,
    release_offset: f64,
    expect_target: f64,
}

fn carousel(extent: f64, child_count: u32, looped: bool) -> Carousel {
    let mut config = CarouselConfig::default();
    if looped {
        config.overscroll = OverscrollMode::Loop;
    }
    let mut carousel = Carousel::new(config);
    carousel.set_children((0..child_count).map(|i| ChildItem::new(ElementId(i))).collect());
    carousel.resize(extent).unwrap();
    carousel
}

fn settle(carousel: &mut Carousel) -> f64 {
    let mut now = 0.0;
    while carousel.tick(now) {
        now += 16.0;
        assert!(now < 5_000.0, "settle did not converge");
    }
    carousel.offset()
}

#[test]
fn layout_fixtures() {
    for name in ["loop-layout", "loop-wrap-left", "clamp-layout"] {
        let case: LayoutCase = carousels::load(name).unwrap();
        let mut carousel = carousel(case.extent, case.child_count, case.looped);
        carousel.set_scroll_offset(case.offset);
        let css: Vec<String> = carousel.transforms().into_iter().map(|t| t.css).collect();
        assert_eq!(css, case.transforms, "{name}");
    }
}

#[test]
fn release_fixtures() {
    for name in ["release-snap", "flick-next", "short-drag"] {
        let case: ReleaseCase = carousels::load(name).unwrap();
        let mut carousel = carousel(case.extent, case.child_count, case.looped);

        let mut outcome = GestureOutcome::Ignored;
        for input in &case.pointer {
            if input.phase == PointerPhase::Up {
                assert_eq!(carousel.offset(), case.release_offset, "{name}");
            }
            outcome = carousel.pointer(input);
        }
        assert_eq!(
            outcome,
            GestureOutcome::Released {
                target: case.expect_target
            },
            "{name}"
        );
        assert_eq!(settle(&mut carousel), case.expect_target, "{name}");
    }
}

#[test]
fn snap_to_nearest_lands_on_page_multiple() {
    let mut carousel = carousel(100.0, 3, false);
    carousel.set_scroll_offset(160.0);
    carousel.snap_to_nearest();
    assert_eq!(settle(&mut carousel), 200.0);
}

#[test]
fn settle_emits_selection_with_item_data() {
    let mut ids = IdAllocator::starting_at(100);
    let mut view = FlipView::new(CarouselConfig::default(), &mut ids);
    view.set_items(
        (0..3)
            .map(|i| ChildItem::new(ElementId(i)).with_data(serde_json::json!({ "id": format!("item-{i}") })))
            .collect(),
    );
    view.resize(320.0).unwrap();

    view.pointer(&PointerInput::primary(PointerPhase::Down, 300.0, 0.0, 0.0));
    view.pointer(&PointerInput::primary(PointerPhase::Move, 200.0, 0.0, 20.0));
    view.pointer(&PointerInput::primary(PointerPhase::Up, 150.0, 0.0, 40.0));
    let mut now = 40.0;
    while view.tick(now) {
        now += 16.0;
    }

    let events = view.drain_events();
    let selected = events.iter().find_map(|e| match e {
        CarouselEvent::ItemSelected { index, data, element } => Some((*index, data.clone(), *element)),
        _ => None,
    });
    assert_eq!(
        selected,
        Some((1, serde_json::json!({ "id": "item-1" }), ElementId(1)))
    );
}

#[test]
fn pointer_down_during_settle_continues_from_live_offset() {
    let mut carousel = carousel(200.0, 3, false);
    carousel.set_scroll_offset(20.0);
    carousel.go_to(2).unwrap();
    carousel.tick(0.0);
    carousel.tick(16.0);
    let live = carousel.offset();
    assert!(live > 20.0 && live < 400.0);

    carousel.pointer(&PointerInput::primary(PointerPhase::Down, 100.0, 0.0, 100.0));
    assert!(!carousel.tick(116.0));
    assert_eq!(carousel.offset(), live);

    carousel.pointer(&PointerInput::primary(PointerPhase::Move, 95.0, 0.0, 120.0));
    assert_eq!(carousel.offset(), live + 5.0);
}

#[test]
fn hub_parallax_moves_less_than_content() {
    let mut ids = IdAllocator::new();
    let mut hub = Hub::new(CarouselConfig::default(), &mut ids);
    hub.set_sections((0..4).map(|i| ChildItem::new(ElementId(10 + i))).collect());
    hub.carousel_mut().resize(360.0).unwrap();

    let before = hub.parallax();
    hub.carousel_mut()
        .pointer(&PointerInput::primary(PointerPhase::Down, 300.0, 0.0, 0.0));
    hub.carousel_mut()
        .pointer(&PointerInput::primary(PointerPhase::Move, 180.0, 0.0, 16.0));
    let delta = hub.carousel().offset();
    assert_eq!(delta, 120.0);

    let after = hub.parallax();
    assert!(!after.background_left_css().is_empty());
    assert!(!after.header_translate_css().is_empty());
    let background = (after.background_left - before.background_left).abs();
    let header = (after.header_translate - before.header_translate).abs();
    assert!(background > 0.0 && background < delta);
    assert!(header > 0.0 && header < delta);
}

#[test]
fn switching_to_clamp_mid_settle_lands_on_a_real_page() {
    let mut carousel = carousel(100.0, 3, true);
    // the short way round from page 0 to page 2 runs backwards in loop space
    assert_eq!(carousel.go_to(2).unwrap(), -100.0);
    carousel.tick(0.0);
    assert!(carousel.offset() < 0.0);

    assert!(carousel.apply_attribute("overscroll-mode", Some("clamp")));
    assert_eq!(carousel.offset(), 200.0);
    assert_eq!(carousel.target_offset(), 200.0);

    let landed = settle(&mut carousel);
    assert_eq!(landed, 200.0);
    assert_eq!(carousel.selected_index(), Some(2));
}

#[test]
fn switching_to_clamp_at_rest_folds_onto_a_page() {
    let mut carousel = carousel(100.0, 3, true);
    carousel.set_scroll_offset(-100.0);
    assert!(carousel.apply_attribute("overscroll-mode", Some("clamp")));
    assert_eq!(carousel.offset(), 200.0);
    assert!(!carousel.is_animating());
    assert_eq!(carousel.selected_index(), Some(2));
}
