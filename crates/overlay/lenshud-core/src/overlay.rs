//! Overlay facade.
//!
//! Owns the recognizer, the session coordinator, and the trace sink, and
//! exposes the entry points the host wires its callbacks to. The host never
//! touches the parts directly; everything observable goes through the trace
//! sink.

use std::fmt::Write as _;

use crate::config::Config;
use crate::device::DeviceProvider;
use crate::geometry::clamp_i32;
use crate::gesture::{GestureEvent, PinchRecognizer};
use crate::session::{SessionCoordinator, SessionPhase};
use crate::touch::{TouchAction, TouchSample};
use crate::trace::{TraceSink, TraceSurface};

pub struct CameraOverlay {
    cfg: Config,
    recognizer: PinchRecognizer,
    session: SessionCoordinator,
    trace: TraceSink,
}

impl CameraOverlay {
    pub fn new(cfg: Config) -> Self {
        Self {
            recognizer: PinchRecognizer::new(cfg.reference_scale, cfg.max_zoom_step),
            session: SessionCoordinator::new(),
            trace: TraceSink::new(cfg.trace_height_ceiling),
            cfg,
        }
    }

    /// Attach the diagnostic display; without one the sink stays inert.
    pub fn attach_trace_surface(&mut self, surface: Box<dyn TraceSurface>) {
        self.trace.attach(surface);
    }

    // Surface lifecycle ----------------------------------------------------

    pub fn on_surface_created(&mut self, provider: &mut dyn DeviceProvider) {
        self.session.on_surface_created(provider, &mut self.trace);
    }

    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.session.on_surface_changed(width, height, &mut self.trace);
    }

    pub fn on_surface_destroyed(&mut self) {
        self.session.on_surface_destroyed(&mut self.trace);
    }

    // Touch ----------------------------------------------------------------

    /// Feed one touch sample: dump it to the trace, classify it, and forward
    /// any pinch delta to the device session.
    pub fn on_touch(&mut self, sample: &TouchSample) -> GestureEvent {
        self.dump_sample(sample);
        let event = self.recognizer.process(sample);
        if let GestureEvent::PinchUpdate { delta } = event {
            self.trace.append(&delta.to_string());
            self.session.apply_zoom_delta(delta, &mut self.trace);
        }
        event
    }

    /// Host-detected long press. Discarded while a pinch is in progress so
    /// the two-finger gesture never doubles as a press; otherwise traced and
    /// accepted.
    pub fn on_long_press(&mut self) -> bool {
        if self.recognizer.is_pinching() {
            return false;
        }
        self.trace.append("long press");
        true
    }

    /// Apply a zoom-step change directly. The delta is bounded to the
    /// configured step range before the session clamps the resulting zoom
    /// against the device capability.
    pub fn apply_zoom_delta(&mut self, delta: i32) {
        let bounded = clamp_i32(delta, -self.cfg.max_zoom_step, self.cfg.max_zoom_step);
        self.session.apply_zoom_delta(bounded, &mut self.trace);
    }

    // Queries ---------------------------------------------------------------

    pub fn is_pinching(&self) -> bool {
        self.recognizer.is_pinching()
    }

    pub fn session_phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.session.surface_size()
    }

    /// Currently displayed trace text, most recent line first.
    pub fn trace_text(&self) -> &str {
        self.trace.shown()
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// `ACTION_<NAME> (<pointer id>) [ p<id>=<x>,<y> … ]`; the id in
    /// parentheses is the pointer the transition refers to and is printed
    /// only for pointer-down/up.
    fn dump_sample(&mut self, sample: &TouchSample) {
        let mut line = String::new();
        let _ = write!(line, "ACTION_{}", sample.action.name());
        if matches!(
            sample.action,
            TouchAction::PointerDown | TouchAction::PointerUp
        ) {
            if let Some(p) = sample.changed_point() {
                let _ = write!(line, " ({})", p.id);
            }
        }
        line.push_str(" [");
        for p in &sample.points {
            let _ = write!(line, " p{}={},{}", p.id, p.x as i32, p.y as i32);
        }
        line.push_str(" ]");
        self.trace.append(&line);
    }
}
