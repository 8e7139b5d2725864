#![cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Reflect, JSON};
use tileshell_carousel_wasm::{carousel_abi_version, TileshellFlipView, TileshellHub, TileshellPivot};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn js(raw: &str) -> JsValue {
    JSON::parse(raw).unwrap()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

fn pointer(phase: &str, x: f64, t: f64) -> JsValue {
    js(&format!(r#"{{"pointerId":1,"isPrimary":true,"phase":"{phase}","x":{x},"y":0,"t":{t}}}"#))
}

fn items() -> JsValue {
    js(r#"[
        {"element":1,"data":{"id":"a"},"attributes":{"header":"all"}},
        {"element":2,"data":{"id":"b"},"attributes":{"header":"unread"}},
        {"element":3,"data":{"id":"c"},"attributes":{"header":"flagged"}}
    ]"#)
}

/// Resolver whose elements return a finished animation straight away.
fn instant_resolver() -> Function {
    Function::new_with_args(
        "id",
        "return { animate: function () { return { playState: 'finished', cancel: function () {}, finish: function () {} }; } };",
    )
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(carousel_abi_version(), 1);
}

#[wasm_bindgen_test]
fn flip_view_loop_layout() {
    let mut view = TileshellFlipView::new(js(r#"{"overscrollMode":"loop"}"#), 100).unwrap();
    view.set_items(items()).unwrap();
    view.resize(200.0).unwrap();
    view.set_scroll_offset(200.0);

    let transforms = Array::from(&view.layout().unwrap());
    let css: Vec<String> = transforms
        .iter()
        .map(|t| get(&t, "css").as_string().unwrap())
        .collect();
    assert_eq!(
        css,
        vec![
            "translate3d(-200px, 0px, 0px)",
            "translate3d(0px, 0px, 0px)",
            "translate3d(200px, 0px, 0px)",
        ]
    );
    assert_eq!(view.slot("viewport"), Some(100));
}

#[wasm_bindgen_test]
fn flip_view_drag_release_and_select() {
    let mut view = TileshellFlipView::new(JsValue::UNDEFINED, 0).unwrap();
    view.set_items(items()).unwrap();
    view.resize(200.0).unwrap();

    assert!(view.pointer(pointer("down", 500.0, 0.0)).unwrap());
    view.pointer(pointer("move", 480.0, 16.0)).unwrap();
    view.pointer(pointer("move", 440.0, 32.0)).unwrap();
    view.pointer(pointer("up", 440.0, 48.0)).unwrap();
    assert_eq!(view.target_offset(), 200.0);
    assert!(view.take_frame_request());

    let mut now = 48.0;
    while view.tick(now) {
        now += 16.0;
    }
    assert_eq!(view.offset(), 200.0);
    assert_eq!(view.selected_index(), Some(1));

    let events = Array::from(&view.drain_events().unwrap());
    let selected = events
        .iter()
        .map(|e| get(&e, "ItemSelected"))
        .find(|e| !e.is_undefined())
        .unwrap();
    assert_eq!(get(&selected, "index").as_f64(), Some(1.0));
    assert_eq!(get(&get(&selected, "data"), "id").as_string().as_deref(), Some("b"));
}

#[wasm_bindgen_test]
fn invalid_config_is_an_error() {
    assert!(TileshellFlipView::new(js(r#"{"direction":"diagonal"}"#), 0).is_err());
}

#[wasm_bindgen_test]
fn pivot_headers_and_selection() {
    let mut pivot = TileshellPivot::new(JsValue::NULL, 0).unwrap();
    pivot.set_items(items()).unwrap();
    pivot.resize(400.0).unwrap();

    let headers = Array::from(&pivot.headers().unwrap());
    assert_eq!(get(&headers.get(2), "label").as_string().as_deref(), Some("flagged"));
    assert_eq!(get(&headers.get(0), "highlighted").as_bool(), Some(true));

    pivot.select_header(2, instant_resolver()).unwrap();
    assert_eq!(pivot.highlighted_index(), Some(2));
    pivot.set_header_widths(vec![80.0, 120.0, 100.0]);
    assert_eq!(pivot.header_translate(), "-200px");
    assert!(pivot.select_header(9, instant_resolver()).is_err());
}

#[wasm_bindgen_test]
fn hub_marker_and_parallax() {
    let mut hub = TileshellHub::new(JsValue::UNDEFINED, 0).unwrap();
    hub.set_sections(items()).unwrap();
    hub.resize(300.0).unwrap();
    assert!(hub.attribute_changed("app-title", None, Some("people".into())));
    assert_eq!(hub.attribute("app-title").as_deref(), Some("people"));

    hub.animate_in(instant_resolver());
    assert_eq!(hub.attribute("animating").as_deref(), Some(""));
    assert!(!hub.poll());
    assert_eq!(hub.attribute("animating"), None);

    hub.pointer(pointer("down", 300.0, 0.0)).unwrap();
    hub.pointer(pointer("move", 200.0, 16.0)).unwrap();
    let parallax = hub.parallax().unwrap();
    assert_eq!(get(&parallax, "backgroundLeft").as_string().as_deref(), Some("-30px"));
    assert_eq!(get(&parallax, "headerTranslate").as_string().as_deref(), Some("-50px"));
    assert_eq!(get(&parallax, "headerProperty").as_string().as_deref(), Some("--translate-x"));
}

#[wasm_bindgen_test]
fn hub_scrolls_directly_and_cross_fades_sections() {
    let mut hub = TileshellHub::new(JsValue::UNDEFINED, 0).unwrap();
    hub.set_sections(items()).unwrap();
    hub.resize(300.0).unwrap();
    hub.set_scroll_offset(150.0);
    assert_eq!(hub.offset(), 150.0);

    let parallax = hub.parallax().unwrap();
    assert_eq!(get(&parallax, "backgroundLeft").as_string().as_deref(), Some("-45px"));

    let layers = Array::from(&hub.backgrounds().unwrap());
    assert_eq!(layers.length(), 3);
    let opacity: Vec<String> = layers
        .iter()
        .map(|l| get(&l, "opacity").as_string().unwrap())
        .collect();
    assert_eq!(opacity, vec!["0.5", "0.5", "0"]);
    assert_eq!(get(&layers.get(1), "section").as_f64(), Some(2.0));
    assert_eq!(get(&layers.get(1), "left").as_string().as_deref(), Some("45px"));

    assert_eq!(hub.snap_to_nearest(), 300.0);
    assert_eq!(hub.target_offset(), 300.0);
}

#[wasm_bindgen_test]
fn queued_triggers_apply_on_flush() {
    let mut pivot = TileshellPivot::new(JsValue::UNDEFINED, 0).unwrap();
    pivot.set_items(items()).unwrap();
    pivot.queue_resize(100.0);
    pivot.queue_scroll(100.0);
    assert_eq!(pivot.offset(), 0.0);

    let transforms = Array::from(&pivot.flush().unwrap());
    assert_eq!(
        get(&transforms.get(1), "css").as_string().as_deref(),
        Some("translate3d(0px, 0px, 0px)")
    );
    assert_eq!(pivot.offset(), 100.0);
    assert_eq!(pivot.selected_index(), Some(1));
}
