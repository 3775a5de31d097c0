//! Core configuration for lenshud-core.

use serde::{Deserialize, Serialize};

/// Values captured once at overlay startup.
/// Keep this minimal; hosts normally build it with [`Config::for_screen`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shorter screen dimension in pixels; scales pinch spacing into a zoom
    /// factor. Zero disables the factor (zero-guard in the recognizer).
    pub reference_scale: f32,
    /// Largest zoom-step change a single pinch update may request.
    pub max_zoom_step: i32,
    /// Rendered-height ceiling for the trace area; reaching it flushes the
    /// accumulated trace text.
    pub trace_height_ceiling: u32,
}

impl Config {
    /// Derive the config from the host's screen size the way the overlay is
    /// normally started: reference scale from the shorter side, trace
    /// ceiling from the full height.
    pub fn for_screen(width: u32, height: u32) -> Self {
        Self {
            reference_scale: width.min(height) as f32,
            trace_height_ceiling: height,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_scale: 0.0,
            max_zoom_step: 5,
            trace_height_ceiling: 0,
        }
    }
}
