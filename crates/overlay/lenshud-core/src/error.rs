//! Error taxonomy for the overlay core.
//!
//! All three variants are recovered locally: the facade traces them and the
//! session stays in a valid phase. None of them crosses the host boundary as
//! a failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    /// No physical camera is accessible, or another process holds it.
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
    /// The platform rejected the preview target.
    #[error("preview surface rejected: {0}")]
    SurfaceBindingFailed(String),
    /// The device refused a zoom value.
    #[error("zoom {requested} rejected: {reason}")]
    ZoomRejected { requested: i32, reason: String },
}
