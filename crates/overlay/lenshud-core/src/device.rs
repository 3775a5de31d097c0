//! Camera-device seam.
//!
//! The session coordinator owns at most one boxed device at a time; adapters
//! implement both traits against the real platform camera and tests use
//! hand-rolled mocks. Releasing a device is dropping it — implementations
//! free native resources in `Drop`.

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Zoom range reported by the device at acquisition time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ZoomCapability {
    pub supported: bool,
    pub min: i32,
    pub max: i32,
}

/// Host camera handle. The implementation is expected to know its own
/// drawable surface; `bind_surface` attaches the preview output to it.
pub trait CameraDevice {
    fn zoom_capability(&self) -> ZoomCapability;
    fn zoom(&self) -> i32;
    fn set_zoom(&mut self, zoom: i32) -> Result<(), OverlayError>;
    fn set_preview_size(&mut self, width: u32, height: u32);
    fn bind_surface(&mut self) -> Result<(), OverlayError>;
    fn start_preview(&mut self);
    fn stop_preview(&mut self);
}

/// Acquires the platform camera. Called once per surface creation.
pub trait DeviceProvider {
    fn acquire(&mut self) -> Result<Box<dyn CameraDevice>, OverlayError>;
}
