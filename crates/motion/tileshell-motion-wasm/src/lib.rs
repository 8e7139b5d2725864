use js_sys::{Function, Reflect, JSON};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use tileshell_motion_core::{
    animate, infer_spline_options, linear_keyframes, spline_keyframes, validate_offsets,
    AnimationHandle, AnimationHost, AnimationOptions, AnimationPreset, AnimationSet,
    AnimationTiming, Easing, ElementId, Keyframe, SplineOptions, TransitionDirection,
};

pub fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Read a JS value through its JSON form. Keyframes carry arbitrary property
/// names, so they go through `JSON.stringify` rather than a typed binding.
pub fn from_js_json<T: DeserializeOwned>(value: &JsValue, what: &str) -> Result<T, JsError> {
    let s = JSON::stringify(value)
        .map_err(|e| JsError::new(&format!("{what} stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new(&format!("{what}: stringify produced non-string")))?;
    serde_json::from_str(&s).map_err(|e| JsError::new(&format!("{what} parse error: {e}")))
}

/// Plain JS object/array for a serializable value.
pub fn to_js_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    let s = serde_json::to_string(value)
        .map_err(|e| JsError::new(&format!("{what} serialize error: {e}")))?;
    JSON::parse(&s).map_err(|e| JsError::new(&format!("{what} parse error: {:?}", e)))
}

fn keyframes_from_js(keyframes: &JsValue) -> Result<Vec<Keyframe>, JsError> {
    if jsvalue_is_undefined_or_null(keyframes) {
        return Ok(Vec::new());
    }
    let frames: Vec<Keyframe> = from_js_json(keyframes, "keyframes")?;
    validate_offsets(&frames).map_err(|e| JsError::new(&format!("keyframes error: {e}")))?;
    Ok(frames)
}

fn spline_options_from_js(options: &JsValue) -> Result<SplineOptions, JsError> {
    let options: SplineOptions = if jsvalue_is_undefined_or_null(options) {
        SplineOptions::default()
    } else {
        swb::from_value(options.clone())
            .map_err(|e| JsError::new(&format!("spline options error: {e}")))?
    };
    options
        .validate()
        .map_err(|e| JsError::new(&format!("spline options error: {e}")))?;
    Ok(options)
}

/// Expand keyframes along a clamped B-spline. `options` is optional; property
/// lists it leaves out are inferred from the keyframes.
#[wasm_bindgen(js_name = splineKeyframes)]
pub fn spline_keyframes_js(keyframes: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    console_error_panic_hook::set_once();
    let frames = keyframes_from_js(&keyframes)?;
    let base = spline_options_from_js(&options)?;
    let resolved = infer_spline_options(&frames, &base);
    to_js_json(&spline_keyframes(&frames, &resolved), "keyframes")
}

/// Same sampling as `splineKeyframes` with straight-line interpolation.
#[wasm_bindgen(js_name = linearKeyframes)]
pub fn linear_keyframes_js(keyframes: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    console_error_panic_hook::set_once();
    let frames = keyframes_from_js(&keyframes)?;
    let base = spline_options_from_js(&options)?;
    let resolved = infer_spline_options(&frames, &base);
    to_js_json(&linear_keyframes(&frames, &resolved), "keyframes")
}

/// Evaluate a named easing curve (`"easeInOutCubic"`, ...) at `t`.
#[wasm_bindgen]
pub fn ease(name: &str, t: f64) -> Result<f64, JsError> {
    let easing = Easing::from_name(name).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(easing.apply(t))
}

/// CSS timing function for a named curve, if it has one.
#[wasm_bindgen(js_name = easingCss)]
pub fn easing_css(name: &str) -> Option<String> {
    Easing::from_name(name)
        .ok()
        .and_then(|e| e.css())
        .map(str::to_string)
}

#[wasm_bindgen]
pub fn perspective() -> String {
    tileshell_motion_core::perspective().to_string()
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

/// A JS `Animation` returned by `Element.animate`. Elements without
/// `animate` yield a detached handle that reports finished immediately.
#[derive(Clone, Debug)]
pub struct JsAnimation {
    animation: Option<JsValue>,
}

impl JsAnimation {
    pub fn detached() -> Self {
        Self { animation: None }
    }

    pub fn as_js(&self) -> JsValue {
        self.animation.clone().unwrap_or(JsValue::NULL)
    }

    fn call(&self, method: &str) {
        let Some(animation) = &self.animation else {
            return;
        };
        if let Ok(f) = Reflect::get(animation, &JsValue::from_str(method)) {
            if let Some(f) = f.dyn_ref::<Function>() {
                let _ = f.call0(animation);
            }
        }
    }
}

impl AnimationHandle for JsAnimation {
    fn is_finished(&self) -> bool {
        let Some(animation) = &self.animation else {
            return true;
        };
        // canceled animations go back to "idle"
        match Reflect::get(animation, &JsValue::from_str("playState"))
            .ok()
            .and_then(|v| v.as_string())
        {
            Some(state) => state == "finished" || state == "idle",
            None => true,
        }
    }

    fn cancel(&mut self) {
        self.call("cancel");
    }

    fn finish(&mut self) {
        self.call("finish");
    }
}

/// Host that maps element ids to DOM nodes with a JS callback
/// (`resolve(id: number) -> Element | null`) and plays frames with
/// `Element.animate`.
pub struct JsAnimationHost {
    resolve: Function,
}

impl JsAnimationHost {
    pub fn new(resolve: Function) -> Self {
        Self { resolve }
    }

    fn element(&self, target: ElementId) -> Option<JsValue> {
        let el = self
            .resolve
            .call1(&JsValue::UNDEFINED, &JsValue::from(target.0))
            .ok()?;
        if jsvalue_is_undefined_or_null(&el) {
            None
        } else {
            Some(el)
        }
    }

    fn try_play(
        &self,
        target: ElementId,
        frames: &[Keyframe],
        timing: &AnimationTiming,
    ) -> Result<JsAnimation, JsError> {
        let Some(el) = self.element(target) else {
            return Ok(JsAnimation::detached());
        };
        let animate = Reflect::get(&el, &JsValue::from_str("animate"))
            .map_err(|e| JsError::new(&format!("animate lookup error: {:?}", e)))?;
        let Some(animate) = animate.dyn_ref::<Function>() else {
            return Ok(JsAnimation::detached());
        };
        let frames = to_js_json(frames, "keyframes")?;
        let timing = to_js_json(timing, "timing")?;
        let animation = animate
            .call2(&el, &frames, &timing)
            .map_err(|e| JsError::new(&format!("animate error: {:?}", e)))?;
        Ok(JsAnimation {
            animation: Some(animation),
        })
    }
}

impl AnimationHost for JsAnimationHost {
    type Handle = JsAnimation;

    fn play(&mut self, target: ElementId, frames: &[Keyframe], timing: &AnimationTiming) -> JsAnimation {
        self.try_play(target, frames, timing)
            .unwrap_or_else(|_| JsAnimation::detached())
    }
}

fn direction(forward: bool) -> TransitionDirection {
    if forward {
        TransitionDirection::Forward
    } else {
        TransitionDirection::Back
    }
}

#[wasm_bindgen]
pub struct TileshellMotion {
    host: JsAnimationHost,
}

#[wasm_bindgen]
impl TileshellMotion {
    /// `resolve(id)` returns the element for an id handed out by the page.
    #[wasm_bindgen(constructor)]
    pub fn new(resolve: Function) -> TileshellMotion {
        console_error_panic_hook::set_once();
        TileshellMotion {
            host: JsAnimationHost::new(resolve),
        }
    }

    /// Play keyframes on an element. `options` holds the usual
    /// `Element.animate` timing plus `spline: true | { ...options }`.
    /// Returns the JS Animation, or null when the element cannot animate.
    #[wasm_bindgen]
    pub fn animate(&mut self, target: u32, keyframes: JsValue, options: JsValue) -> Result<JsValue, JsError> {
        let frames = keyframes_from_js(&keyframes)?;
        let options: AnimationOptions = if jsvalue_is_undefined_or_null(&options) {
            AnimationOptions::default()
        } else {
            from_js_json(&options, "animation options")?
        };
        if let Some(spline) = options.spline.resolve() {
            spline
                .validate()
                .map_err(|e| JsError::new(&format!("animation options error: {e}")))?;
        }
        let handle = animate(&mut self.host, ElementId(target), &frames, &options);
        Ok(handle.as_js())
    }

    #[wasm_bindgen(js_name = pageIn)]
    pub fn page_in(&mut self, target: u32, forward: bool) -> JsValue {
        self.play(AnimationSet::page_in(direction(forward)), target)
    }

    #[wasm_bindgen(js_name = pageOut)]
    pub fn page_out(&mut self, target: u32, forward: bool) -> JsValue {
        self.play(AnimationSet::page_out(direction(forward)), target)
    }

    #[wasm_bindgen(js_name = turnstileIn)]
    pub fn turnstile_in(&mut self, target: u32, forward: bool) -> JsValue {
        self.play(AnimationSet::turnstile_in(direction(forward)), target)
    }

    #[wasm_bindgen(js_name = turnstileOut)]
    pub fn turnstile_out(&mut self, target: u32, forward: bool) -> JsValue {
        self.play(AnimationSet::turnstile_out(direction(forward)), target)
    }

    #[wasm_bindgen]
    pub fn fade(&mut self, target: u32, visible: bool) -> JsValue {
        self.play(AnimationSet::fade(visible), target)
    }
}

impl TileshellMotion {
    fn play(&mut self, preset: AnimationPreset, target: u32) -> JsValue {
        preset.play(&mut self.host, ElementId(target)).handle().as_js()
    }
}
