//! wasm-bindgen interface for the LensHUD overlay core.
//!
//! JS hosts construct a [`LensHud`], wire their surface/touch callbacks to
//! its methods, and hand it a camera object plus trace callbacks for the
//! device and display seams. Values cross the boundary through
//! serde-wasm-bindgen; exceptions thrown by the camera object are mapped
//! into the core's recoverable errors.

use js_sys::{Function, Object, Reflect};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use lenshud_core::{
    CameraDevice, CameraOverlay, Config, DeviceProvider, GestureEvent, OverlayError, TouchSample,
    TraceSurface, ZoomCapability,
};

/// Bumped when the exported surface changes shape.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Trace display backed by two JS callbacks: `set_text(text)` and
/// `rendered_height() -> number`.
struct JsTraceSurface {
    set_text: Function,
    rendered_height: Function,
}

impl TraceSurface for JsTraceSurface {
    fn set_text(&mut self, text: &str) {
        let _ = self
            .set_text
            .call1(&JsValue::UNDEFINED, &JsValue::from_str(text));
    }

    fn rendered_height(&self) -> u32 {
        self.rendered_height
            .call0(&JsValue::UNDEFINED)
            .ok()
            .and_then(|v| v.as_f64())
            .map(|h| h.max(0.0) as u32)
            .unwrap_or(0)
    }
}

/// Camera seam over a plain JS object exposing `zoomCapability()`,
/// `getZoom()`, `setZoom(z)`, `setPreviewSize(w, h)`, `bindSurface()`,
/// `startPreview()`, and `stopPreview()`. Methods are invoked with the
/// object itself as `this`.
struct JsCameraDevice {
    obj: Object,
}

impl JsCameraDevice {
    fn call(&self, name: &str, args: &[JsValue]) -> Result<JsValue, String> {
        let f = Reflect::get(&self.obj, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
            .ok_or_else(|| format!("camera object has no {name}()"))?;
        let this: &JsValue = self.obj.as_ref();
        let result = match args {
            [] => f.call0(this),
            [a] => f.call1(this, a),
            [a, b] => f.call2(this, a, b),
            _ => f.call3(this, &args[0], &args[1], &args[2]),
        };
        result.map_err(|e| format!("{name} threw: {e:?}"))
    }
}

impl CameraDevice for JsCameraDevice {
    fn zoom_capability(&self) -> ZoomCapability {
        self.call("zoomCapability", &[])
            .ok()
            .and_then(|v| swb::from_value(v).ok())
            .unwrap_or_default()
    }

    fn zoom(&self) -> i32 {
        self.call("getZoom", &[])
            .ok()
            .and_then(|v| v.as_f64())
            .map(|z| z as i32)
            .unwrap_or(0)
    }

    fn set_zoom(&mut self, zoom: i32) -> Result<(), OverlayError> {
        self.call("setZoom", &[JsValue::from_f64(zoom as f64)])
            .map(|_| ())
            .map_err(|reason| OverlayError::ZoomRejected {
                requested: zoom,
                reason,
            })
    }

    fn set_preview_size(&mut self, width: u32, height: u32) {
        let _ = self.call(
            "setPreviewSize",
            &[JsValue::from_f64(width as f64), JsValue::from_f64(height as f64)],
        );
    }

    fn bind_surface(&mut self) -> Result<(), OverlayError> {
        self.call("bindSurface", &[])
            .map(|_| ())
            .map_err(OverlayError::SurfaceBindingFailed)
    }

    fn start_preview(&mut self) {
        let _ = self.call("startPreview", &[]);
    }

    fn stop_preview(&mut self) {
        let _ = self.call("stopPreview", &[]);
    }
}

/// One-shot provider handing the JS camera object to the coordinator.
/// `null`/`undefined` models an absent or busy platform camera.
struct JsCameraProvider {
    camera: JsValue,
}

impl DeviceProvider for JsCameraProvider {
    fn acquire(&mut self) -> Result<Box<dyn CameraDevice>, OverlayError> {
        if jsvalue_is_undefined_or_null(&self.camera) {
            return Err(OverlayError::DeviceUnavailable(
                "no camera object supplied".into(),
            ));
        }
        Ok(Box::new(JsCameraDevice {
            obj: Object::from(self.camera.clone()),
        }))
    }
}

#[wasm_bindgen]
pub struct LensHud {
    core: CameraOverlay,
}

#[wasm_bindgen]
impl LensHud {
    /// Create the overlay. Pass a JSON config object or undefined/null for
    /// defaults. Example:
    ///   new LensHud({ reference_scale: 1080, trace_height_ceiling: 2400 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<LensHud, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(LensHud {
            core: CameraOverlay::new(cfg),
        })
    }

    /// Convenience constructor deriving the config from the screen size.
    #[wasm_bindgen(js_name = for_screen)]
    pub fn for_screen(width: u32, height: u32) -> LensHud {
        console_error_panic_hook::set_once();
        LensHud {
            core: CameraOverlay::new(Config::for_screen(width, height)),
        }
    }

    /// Wire the diagnostic display. `set_text(text)` replaces the overlay
    /// text; `rendered_height()` reports the current text height in pixels.
    #[wasm_bindgen(js_name = attach_trace)]
    pub fn attach_trace(&mut self, set_text: Function, rendered_height: Function) {
        self.core.attach_trace_surface(Box::new(JsTraceSurface {
            set_text,
            rendered_height,
        }));
    }

    /// Surface creation: acquires the supplied camera object. Pass
    /// null/undefined to model an unavailable camera.
    #[wasm_bindgen(js_name = surface_created)]
    pub fn surface_created(&mut self, camera: JsValue) {
        let mut provider = JsCameraProvider { camera };
        self.core.on_surface_created(&mut provider);
    }

    #[wasm_bindgen(js_name = surface_changed)]
    pub fn surface_changed(&mut self, width: u32, height: u32) {
        self.core.on_surface_changed(width, height);
    }

    #[wasm_bindgen(js_name = surface_destroyed)]
    pub fn surface_destroyed(&mut self) {
        self.core.on_surface_destroyed();
    }

    /// Feed one touch sample (a JSON object matching `TouchSample`).
    /// Returns the gesture event as a JS value.
    #[wasm_bindgen(js_name = on_touch)]
    pub fn on_touch(&mut self, sample: JsValue) -> Result<JsValue, JsError> {
        let sample: TouchSample = swb::from_value(sample)
            .map_err(|e| JsError::new(&format!("touch sample error: {e}")))?;
        let event: GestureEvent = self.core.on_touch(&sample);
        swb::to_value(&event).map_err(|e| JsError::new(&format!("event encode error: {e}")))
    }

    /// Host-detected long press; returns false when discarded because a
    /// pinch is in progress.
    #[wasm_bindgen(js_name = long_press)]
    pub fn long_press(&mut self) -> bool {
        self.core.on_long_press()
    }

    #[wasm_bindgen(js_name = apply_zoom_delta)]
    pub fn apply_zoom_delta(&mut self, delta: i32) {
        self.core.apply_zoom_delta(delta);
    }

    #[wasm_bindgen(js_name = is_pinching)]
    pub fn is_pinching(&self) -> bool {
        self.core.is_pinching()
    }

    /// Currently displayed trace text, most recent line first. Mostly for
    /// debugging hosts.
    #[wasm_bindgen(js_name = trace_text)]
    pub fn trace_text(&self) -> String {
        self.core.trace_text().to_string()
    }
}
