//! LensHUD core (host-agnostic)
//!
//! Turns a raw stream of multi-point touch samples into pinch gesture events
//! with a bounded zoom-step delta, and manages a camera device across the
//! surface create/resize/destroy transitions so the hardware is never driven
//! in an invalid state. This crate defines the data contracts, the trait
//! seams for the camera and the trace display, and the [`CameraOverlay`]
//! facade; adapters (web/wasm) wire host callbacks to the facade's entry
//! points.

pub mod config;
pub mod device;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod overlay;
pub mod session;
pub mod touch;
pub mod trace;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use device::{CameraDevice, DeviceProvider, ZoomCapability};
pub use error::OverlayError;
pub use gesture::{GestureEvent, GesturePhase, PinchRecognizer};
pub use overlay::CameraOverlay;
pub use session::{SessionCoordinator, SessionPhase};
pub use touch::{TouchAction, TouchPoint, TouchSample};
pub use trace::{TraceSink, TraceSurface};
