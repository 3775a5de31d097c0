//! Device-session coordinator.
//!
//! State machine over Unbound → Bound → Previewing guarding the two calls
//! the platform punishes: stopping a preview that is not running and using a
//! released handle. All operations trace through the sink and recover
//! locally; invariant violations assert in debug builds and no-op in
//! release builds.

use crate::device::{CameraDevice, DeviceProvider, ZoomCapability};
use crate::geometry::clamp_i32;
use crate::trace::TraceSink;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SessionPhase {
    #[default]
    Unbound,
    Bound,
    Previewing,
}

/// Sole owner of the camera handle. No other component may hold or mutate
/// the device.
#[derive(Default)]
pub struct SessionCoordinator {
    phase: SessionPhase,
    device: Option<Box<dyn CameraDevice>>,
    capability: ZoomCapability,
    surface_size: Option<(u32, u32)>,
}

impl SessionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn zoom_capability(&self) -> ZoomCapability {
        self.capability
    }

    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface_size
    }

    pub fn current_zoom(&self) -> Option<i32> {
        self.device.as_ref().map(|d| d.zoom())
    }

    /// Acquire the camera for a freshly created surface. Acquisition
    /// failure leaves the session `Unbound`; acquiring while already bound
    /// is a logic error.
    pub fn on_surface_created(&mut self, provider: &mut dyn DeviceProvider, trace: &mut TraceSink) {
        if self.device.is_some() {
            debug_assert!(false, "surface created while a device is already bound");
            trace.append("surface created ignored: device already bound");
            return;
        }
        match provider.acquire() {
            Ok(device) => {
                self.capability = device.zoom_capability();
                self.device = Some(device);
                self.phase = SessionPhase::Bound;
                trace.append("camera acquired");
            }
            Err(e) => {
                log::warn!("camera acquisition failed: {e}");
                trace.append(&e.to_string());
            }
        }
    }

    /// Reconfigure the preview for a new surface size. Idempotent re-entry:
    /// a running preview is stopped before the output is rebound.
    pub fn on_surface_changed(&mut self, width: u32, height: u32, trace: &mut TraceSink) {
        let Some(device) = self.device.as_mut() else {
            trace.append("surface changed ignored: no device");
            return;
        };
        if self.phase == SessionPhase::Previewing {
            // stop_preview is only legal while the preview runs.
            device.stop_preview();
            self.phase = SessionPhase::Bound;
        }
        device.set_preview_size(width, height);
        self.surface_size = Some((width, height));
        if let Err(e) = device.bind_surface() {
            log::warn!("surface binding failed: {e}");
            trace.append(&e.to_string());
            return;
        }
        device.start_preview();
        self.phase = SessionPhase::Previewing;
        trace.append(&format!("preview {width}x{height}"));
    }

    /// Tear the session down. Safe from any phase and idempotent: the
    /// preview is stopped only if running and the handle is released by
    /// dropping it.
    pub fn on_surface_destroyed(&mut self, trace: &mut TraceSink) {
        if let Some(mut device) = self.device.take() {
            if self.phase == SessionPhase::Previewing {
                device.stop_preview();
            }
            drop(device);
            trace.append("camera released");
        }
        self.phase = SessionPhase::Unbound;
        self.capability = ZoomCapability::default();
        self.surface_size = None;
    }

    /// Apply a zoom-step change, clamped against the capability-reported
    /// range. Best effort: rejection is traced and the zoom left unchanged.
    pub fn apply_zoom_delta(&mut self, delta: i32, trace: &mut TraceSink) {
        if self.phase != SessionPhase::Previewing {
            trace.append("zoom ignored: not previewing");
            return;
        }
        if !self.capability.supported {
            trace.append("zoom ignored: unsupported");
            return;
        }
        let Some(device) = self.device.as_mut() else {
            debug_assert!(false, "previewing without a device");
            return;
        };
        let target = clamp_i32(device.zoom() + delta, self.capability.min, self.capability.max);
        match device.set_zoom(target) {
            Ok(()) => trace.append(&format!("zoom {target}")),
            Err(e) => {
                log::warn!("zoom change rejected: {e}");
                trace.append(&e.to_string());
            }
        }
    }
}
