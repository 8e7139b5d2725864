use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use serde_json::json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use tileshell_carousel_core::{
    CarouselConfig, ChildItem, Component, FlipView, FrameRequest, FrameScheduler, GestureOutcome,
    Hub, LayoutTrigger, Pivot, PointerInput, QueuedFrames, HEADER_TRANSLATE_PROPERTY,
};
use tileshell_motion_core::IdAllocator;
use tileshell_motion_wasm::{from_js_json, jsvalue_is_undefined_or_null, to_js_json, JsAnimationHost};

/// Frame requests shared with the wrapper; JS polls them with
/// `takeFrameRequest()` and answers with `tick(now)` from
/// `requestAnimationFrame`.
struct SharedFrames(Rc<RefCell<QueuedFrames>>);

impl FrameScheduler for SharedFrames {
    fn request_frame(&mut self) -> FrameRequest {
        self.0.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.0.borrow_mut().cancel_frame(request)
    }
}

fn config_from_js(config: JsValue) -> Result<CarouselConfig, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        Ok(CarouselConfig::default())
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))
    }
}

fn items_from_js(items: &JsValue) -> Result<Vec<ChildItem>, JsError> {
    if jsvalue_is_undefined_or_null(items) {
        return Ok(Vec::new());
    }
    from_js_json(items, "items")
}

/// Component plus the frame queue it schedules on.
struct Mounted<C: Component> {
    component: C,
    frames: Rc<RefCell<QueuedFrames>>,
}

impl<C: Component> Mounted<C> {
    fn new(mut component: C) -> Self {
        let frames = Rc::new(RefCell::new(QueuedFrames::new()));
        component.mount(Box::new(SharedFrames(frames.clone())));
        Self { component, frames }
    }

    fn resize(&mut self, extent: f64) -> Result<(), JsError> {
        self.component
            .carousel_mut()
            .resize(extent)
            .map_err(|e| JsError::new(&format!("resize error: {e}")))
    }

    fn pointer(&mut self, input: JsValue) -> Result<bool, JsError> {
        let input: PointerInput =
            swb::from_value(input).map_err(|e| JsError::new(&format!("pointer error: {e}")))?;
        Ok(self.component.carousel_mut().pointer(&input) != GestureOutcome::Ignored)
    }

    fn tick(&mut self, now_ms: f64) -> bool {
        let carousel = self.component.carousel_mut();
        carousel.poll_transitions();
        carousel.tick(now_ms)
    }

    fn take_frame_request(&mut self) -> bool {
        !self.frames.borrow_mut().take().is_empty()
    }

    fn transforms(&self) -> Result<JsValue, JsError> {
        to_js_json(&self.component.carousel().transforms(), "transforms")
    }

    fn offset(&self) -> f64 {
        self.component.carousel().offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.component.carousel_mut().set_scroll_offset(offset);
    }

    fn layout(&mut self) -> Result<JsValue, JsError> {
        self.component.carousel_mut().layout();
        self.transforms()
    }

    fn snap_to_nearest(&mut self) -> f64 {
        self.component.carousel_mut().snap_to_nearest()
    }

    fn target_offset(&self) -> f64 {
        self.component.carousel().target_offset()
    }

    fn go_to(&mut self, index: u32) -> Result<f64, JsError> {
        self.component
            .carousel_mut()
            .go_to(index as usize)
            .map_err(|e| JsError::new(&format!("go_to error: {e}")))
    }

    /// Defer a trigger to the next frame; `tick` applies it before layout.
    fn queue(&mut self, trigger: LayoutTrigger) {
        self.component.carousel_mut().queue(trigger);
    }

    fn queue_items(&mut self, items: &JsValue) -> Result<(), JsError> {
        let items = items_from_js(items)?;
        self.queue(LayoutTrigger::Mutation(items));
        Ok(())
    }

    fn flush(&mut self) -> Result<JsValue, JsError> {
        self.component
            .carousel_mut()
            .flush()
            .map_err(|e| JsError::new(&format!("layout error: {e}")))?;
        self.transforms()
    }

    fn drain_events(&mut self) -> Result<JsValue, JsError> {
        to_js_json(&self.component.carousel_mut().drain_events(), "events")
    }

    fn attribute_changed(&mut self, name: &str, old: Option<String>, new: Option<String>) -> bool {
        self.component
            .on_attribute_changed(name, old.as_deref(), new.as_deref())
    }

    fn slot(&self, name: &str) -> Option<u32> {
        self.component.slot(name).map(|id| id.0)
    }

    fn selected_index(&self) -> Option<u32> {
        self.component
            .carousel()
            .selected_index()
            .map(|i| i as u32)
    }

    fn mount(&mut self) {
        self.component
            .mount(Box::new(SharedFrames(self.frames.clone())));
    }

    fn unmount(&mut self) {
        self.component.unmount();
        self.frames.borrow_mut().take();
    }
}

#[wasm_bindgen]
pub struct TileshellFlipView {
    inner: Mounted<FlipView>,
}

#[wasm_bindgen]
impl TileshellFlipView {
    /// `config` mirrors `CarouselConfig` (`{ direction, overscrollMode, gesture, parallax }`)
    /// or undefined/null for defaults. Slot ids are allocated from `first_slot_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, first_slot_id: u32) -> Result<TileshellFlipView, JsError> {
        console_error_panic_hook::set_once();
        let cfg = config_from_js(config)?;
        let mut ids = IdAllocator::starting_at(first_slot_id);
        Ok(TileshellFlipView {
            inner: Mounted::new(FlipView::new(cfg, &mut ids)),
        })
    }

    /// Replace the pages: `[{ element, data?, attributes? }]`.
    #[wasm_bindgen(js_name = setItems)]
    pub fn set_items(&mut self, items: JsValue) -> Result<(), JsError> {
        let items = items_from_js(&items)?;
        self.inner.component.set_items(items);
        Ok(())
    }

    pub fn resize(&mut self, extent: f64) -> Result<(), JsError> {
        self.inner.resize(extent)
    }

    /// Feed one pointer event `{ pointerId, isPrimary, phase, x, y, t }`.
    /// Returns whether the carousel consumed it.
    pub fn pointer(&mut self, input: JsValue) -> Result<bool, JsError> {
        self.inner.pointer(input)
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.inner.tick(now_ms)
    }

    #[wasm_bindgen(js_name = takeFrameRequest)]
    pub fn take_frame_request(&mut self) -> bool {
        self.inner.take_frame_request()
    }

    #[wasm_bindgen(js_name = setScrollOffset)]
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.inner.set_scroll_offset(offset);
    }

    pub fn offset(&self) -> f64 {
        self.inner.offset()
    }

    /// Recompute and return `[{ element, transform, css }]`.
    pub fn layout(&mut self) -> Result<JsValue, JsError> {
        self.inner.layout()
    }

    pub fn transforms(&self) -> Result<JsValue, JsError> {
        self.inner.transforms()
    }

    #[wasm_bindgen(js_name = snapToNearest)]
    pub fn snap_to_nearest(&mut self) -> f64 {
        self.inner.snap_to_nearest()
    }

    #[wasm_bindgen(js_name = targetOffset)]
    pub fn target_offset(&self) -> f64 {
        self.inner.target_offset()
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: u32) -> Result<f64, JsError> {
        self.inner.go_to(index)
    }

    /// Replace the pages on the next frame instead of right away.
    #[wasm_bindgen(js_name = queueItems)]
    pub fn queue_items(&mut self, items: JsValue) -> Result<(), JsError> {
        self.inner.queue_items(&items)
    }

    #[wasm_bindgen(js_name = queueResize)]
    pub fn queue_resize(&mut self, extent: f64) {
        self.inner.queue(LayoutTrigger::Resize(extent));
    }

    #[wasm_bindgen(js_name = queueScroll)]
    pub fn queue_scroll(&mut self, offset: f64) {
        self.inner.queue(LayoutTrigger::Scroll(offset));
    }

    /// Apply queued triggers now and return the transforms.
    pub fn flush(&mut self) -> Result<JsValue, JsError> {
        self.inner.flush()
    }

    pub fn next(&mut self) -> f64 {
        self.inner.component.next()
    }

    pub fn previous(&mut self) -> f64 {
        self.inner.component.previous()
    }

    #[wasm_bindgen(js_name = selectedIndex)]
    pub fn selected_index(&self) -> Option<u32> {
        self.inner.selected_index()
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        self.inner.drain_events()
    }

    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&mut self, name: &str, old: Option<String>, new: Option<String>) -> bool {
        self.inner.attribute_changed(name, old, new)
    }

    pub fn slot(&self, name: &str) -> Option<u32> {
        self.inner.slot(name)
    }

    pub fn mount(&mut self) {
        self.inner.mount();
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}

#[wasm_bindgen]
pub struct TileshellPivot {
    inner: Mounted<Pivot>,
}

#[wasm_bindgen]
impl TileshellPivot {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, first_slot_id: u32) -> Result<TileshellPivot, JsError> {
        console_error_panic_hook::set_once();
        let cfg = config_from_js(config)?;
        let mut ids = IdAllocator::starting_at(first_slot_id);
        Ok(TileshellPivot {
            inner: Mounted::new(Pivot::new(cfg, &mut ids)),
        })
    }

    /// Replace the items; each item's `attributes.header` labels its strip entry.
    #[wasm_bindgen(js_name = setItems)]
    pub fn set_items(&mut self, items: JsValue) -> Result<(), JsError> {
        let items = items_from_js(&items)?;
        self.inner.component.set_items(items);
        Ok(())
    }

    pub fn resize(&mut self, extent: f64) -> Result<(), JsError> {
        self.inner.resize(extent)
    }

    pub fn pointer(&mut self, input: JsValue) -> Result<bool, JsError> {
        self.inner.pointer(input)
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.inner.tick(now_ms)
    }

    #[wasm_bindgen(js_name = takeFrameRequest)]
    pub fn take_frame_request(&mut self) -> bool {
        self.inner.take_frame_request()
    }

    pub fn transforms(&self) -> Result<JsValue, JsError> {
        self.inner.transforms()
    }

    #[wasm_bindgen(js_name = setScrollOffset)]
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.inner.set_scroll_offset(offset);
    }

    pub fn offset(&self) -> f64 {
        self.inner.offset()
    }

    pub fn layout(&mut self) -> Result<JsValue, JsError> {
        self.inner.layout()
    }

    #[wasm_bindgen(js_name = snapToNearest)]
    pub fn snap_to_nearest(&mut self) -> f64 {
        self.inner.snap_to_nearest()
    }

    #[wasm_bindgen(js_name = targetOffset)]
    pub fn target_offset(&self) -> f64 {
        self.inner.target_offset()
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: u32) -> Result<f64, JsError> {
        self.inner.go_to(index)
    }

    #[wasm_bindgen(js_name = selectedIndex)]
    pub fn selected_index(&self) -> Option<u32> {
        self.inner.selected_index()
    }

    #[wasm_bindgen(js_name = queueResize)]
    pub fn queue_resize(&mut self, extent: f64) {
        self.inner.queue(LayoutTrigger::Resize(extent));
    }

    #[wasm_bindgen(js_name = queueScroll)]
    pub fn queue_scroll(&mut self, offset: f64) {
        self.inner.queue(LayoutTrigger::Scroll(offset));
    }

    pub fn flush(&mut self) -> Result<JsValue, JsError> {
        self.inner.flush()
    }

    /// `[{ index, label, highlighted }]`.
    pub fn headers(&self) -> Result<JsValue, JsError> {
        to_js_json(&self.inner.component.headers(), "headers")
    }

    #[wasm_bindgen(js_name = setHeaderWidths)]
    pub fn set_header_widths(&mut self, widths: Vec<f64>) {
        self.inner.component.set_header_widths(widths);
    }

    /// CSS length for the header strip's `--translate-x`.
    #[wasm_bindgen(js_name = headerTranslate)]
    pub fn header_translate(&self) -> String {
        self.inner.component.header_translate_css()
    }

    #[wasm_bindgen(js_name = highlightedIndex)]
    pub fn highlighted_index(&self) -> Option<u32> {
        self.inner.component.highlighted_index().map(|i| i as u32)
    }

    /// Activate header `index`; `resolve(id)` maps item ids to elements for
    /// the page-enter animation.
    #[wasm_bindgen(js_name = selectHeader)]
    pub fn select_header(&mut self, index: u32, resolve: Function) -> Result<(), JsError> {
        let mut host = JsAnimationHost::new(resolve);
        self.inner
            .component
            .select_header(index as usize, &mut host)
            .map_err(|e| JsError::new(&format!("select_header error: {e}")))
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        self.inner.drain_events()
    }

    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&mut self, name: &str, old: Option<String>, new: Option<String>) -> bool {
        self.inner.attribute_changed(name, old, new)
    }

    pub fn slot(&self, name: &str) -> Option<u32> {
        self.inner.slot(name)
    }

    pub fn mount(&mut self) {
        self.inner.mount();
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}

#[wasm_bindgen]
pub struct TileshellHub {
    inner: Mounted<Hub>,
}

#[wasm_bindgen]
impl TileshellHub {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, first_slot_id: u32) -> Result<TileshellHub, JsError> {
        console_error_panic_hook::set_once();
        let cfg = config_from_js(config)?;
        let mut ids = IdAllocator::starting_at(first_slot_id);
        Ok(TileshellHub {
            inner: Mounted::new(Hub::new(cfg, &mut ids)),
        })
    }

    #[wasm_bindgen(js_name = setSections)]
    pub fn set_sections(&mut self, sections: JsValue) -> Result<(), JsError> {
        let sections = items_from_js(&sections)?;
        self.inner.component.set_sections(sections);
        Ok(())
    }

    pub fn resize(&mut self, extent: f64) -> Result<(), JsError> {
        self.inner.resize(extent)
    }

    pub fn pointer(&mut self, input: JsValue) -> Result<bool, JsError> {
        self.inner.pointer(input)
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.inner.tick(now_ms)
    }

    #[wasm_bindgen(js_name = takeFrameRequest)]
    pub fn take_frame_request(&mut self) -> bool {
        self.inner.take_frame_request()
    }

    pub fn transforms(&self) -> Result<JsValue, JsError> {
        self.inner.transforms()
    }

    #[wasm_bindgen(js_name = setScrollOffset)]
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.inner.set_scroll_offset(offset);
    }

    pub fn offset(&self) -> f64 {
        self.inner.offset()
    }

    pub fn layout(&mut self) -> Result<JsValue, JsError> {
        self.inner.layout()
    }

    #[wasm_bindgen(js_name = snapToNearest)]
    pub fn snap_to_nearest(&mut self) -> f64 {
        self.inner.snap_to_nearest()
    }

    #[wasm_bindgen(js_name = targetOffset)]
    pub fn target_offset(&self) -> f64 {
        self.inner.target_offset()
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: u32) -> Result<f64, JsError> {
        self.inner.go_to(index)
    }

    #[wasm_bindgen(js_name = selectedIndex)]
    pub fn selected_index(&self) -> Option<u32> {
        self.inner.selected_index()
    }

    #[wasm_bindgen(js_name = queueSections)]
    pub fn queue_sections(&mut self, sections: JsValue) -> Result<(), JsError> {
        self.inner.queue_items(&sections)
    }

    #[wasm_bindgen(js_name = queueResize)]
    pub fn queue_resize(&mut self, extent: f64) {
        self.inner.queue(LayoutTrigger::Resize(extent));
    }

    #[wasm_bindgen(js_name = queueScroll)]
    pub fn queue_scroll(&mut self, offset: f64) {
        self.inner.queue(LayoutTrigger::Scroll(offset));
    }

    pub fn flush(&mut self) -> Result<JsValue, JsError> {
        self.inner.flush()
    }

    /// `{ backgroundLeft, headerTranslate, headerProperty }` as CSS strings.
    pub fn parallax(&self) -> Result<JsValue, JsError> {
        let frame = self.inner.component.parallax();
        to_js_json(
            &json!({
                "backgroundLeft": frame.background_left_css(),
                "headerTranslate": frame.header_translate_css(),
                "headerProperty": HEADER_TRANSLATE_PROPERTY,
            }),
            "parallax",
        )
    }

    /// One layer per section: `[{ index, section, left, opacity }]` with
    /// `left` and `opacity` as CSS strings.
    pub fn backgrounds(&self) -> Result<JsValue, JsError> {
        let layers: Vec<_> = self
            .inner
            .component
            .backgrounds()
            .iter()
            .map(|layer| {
                json!({
                    "index": layer.index,
                    "section": layer.section.0,
                    "left": layer.left_css(),
                    "opacity": layer.opacity_css(),
                })
            })
            .collect();
        to_js_json(&layers, "backgrounds")
    }

    #[wasm_bindgen(js_name = animateIn)]
    pub fn animate_in(&mut self, resolve: Function) {
        let mut host = JsAnimationHost::new(resolve);
        self.inner.component.animate_in(&mut host);
    }

    /// Returns whether the enter transition is still running.
    pub fn poll(&mut self) -> bool {
        self.inner.component.poll()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.component.attribute(name)
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        self.inner.drain_events()
    }

    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&mut self, name: &str, old: Option<String>, new: Option<String>) -> bool {
        self.inner.attribute_changed(name, old, new)
    }

    pub fn slot(&self, name: &str) -> Option<u32> {
        self.inner.slot(name)
    }

    pub fn mount(&mut self) {
        self.inner.mount();
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}

/// Numeric ABI version for compatibility checks at init. Named apart from
/// the motion module's `abi_version`, which this module re-exports.
#[wasm_bindgen(js_name = carouselAbiVersion)]
pub fn carousel_abi_version() -> u32 {
    1
}
