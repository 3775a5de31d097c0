//! Pinch gesture recognizer.
//!
//! Consumes the raw touch stream and classifies it into
//! Idle / SinglePointer / Pinching, emitting pinch events carrying a bounded
//! zoom-step delta. All transitions are total: malformed samples degrade to
//! a defensive `PinchEnd` instead of failing.

use serde::{Deserialize, Serialize};

use crate::geometry::{clamp_f32, spacing};
use crate::touch::{TouchAction, TouchSample};

/// Classifier phase. The baseline spacing is recorded exactly while
/// `Pinching`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GesturePhase {
    Idle,
    SinglePointer,
    Pinching,
}

/// Events produced by [`PinchRecognizer::process`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Sample consumed without pinch significance.
    None,
    PinchStart,
    /// Requested zoom-step change, within `[-max_step, max_step]`.
    PinchUpdate { delta: i32 },
    PinchEnd,
}

pub struct PinchRecognizer {
    phase: GesturePhase,
    baseline_spacing: Option<f32>,
    /// Active pointer ids in insertion order; at most two are tracked.
    active: Vec<u32>,
    reference_scale: f32,
    max_step: i32,
}

impl PinchRecognizer {
    pub fn new(reference_scale: f32, max_step: i32) -> Self {
        Self {
            phase: GesturePhase::Idle,
            baseline_spacing: None,
            active: Vec::with_capacity(2),
            reference_scale,
            max_step,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_pinching(&self) -> bool {
        self.phase == GesturePhase::Pinching
    }

    /// Active pointer ids in insertion order.
    pub fn active_pointers(&self) -> &[u32] {
        &self.active
    }

    /// Classify one sample and advance the state machine.
    pub fn process(&mut self, sample: &TouchSample) -> GestureEvent {
        self.sync_active(sample);
        match sample.action {
            TouchAction::Down => {
                // A fresh primary touch starts a new gesture; an in-flight
                // pinch is closed out first so start/end stay paired.
                self.leave_pinch(GesturePhase::SinglePointer)
            }
            TouchAction::PointerDown => self.on_pointer_down(sample),
            TouchAction::Move => self.on_move(sample),
            TouchAction::PointerUp => match sample.pointers_after() {
                0 => self.leave_pinch(GesturePhase::Idle),
                1 => self.leave_pinch(GesturePhase::SinglePointer),
                // Two or more fingers remain (third-pointer release); the
                // pinch continues against the existing baseline.
                _ => GestureEvent::None,
            },
            TouchAction::Up | TouchAction::Cancel => self.leave_pinch(GesturePhase::Idle),
            TouchAction::Outside => GestureEvent::None,
        }
    }

    fn on_pointer_down(&mut self, sample: &TouchSample) -> GestureEvent {
        if self.phase == GesturePhase::Pinching {
            // Third pointer: keep the existing baseline, multi-pinch is out
            // of scope.
            return GestureEvent::None;
        }
        match (sample.points.first(), sample.points.get(1)) {
            (Some(a), Some(b)) => {
                self.baseline_spacing = Some(spacing(a, b));
                self.phase = GesturePhase::Pinching;
                GestureEvent::PinchStart
            }
            _ => {
                // Pointer-down reporting a single point: host glitch, treat
                // it as the first touch.
                self.phase = GesturePhase::SinglePointer;
                GestureEvent::None
            }
        }
    }

    fn on_move(&mut self, sample: &TouchSample) -> GestureEvent {
        if self.phase != GesturePhase::Pinching {
            if !sample.points.is_empty() {
                self.phase = GesturePhase::SinglePointer;
            }
            return GestureEvent::None;
        }
        match (sample.points.first(), sample.points.get(1)) {
            (Some(a), Some(b)) => GestureEvent::PinchUpdate {
                delta: self.step_for_spacing(spacing(a, b)),
            },
            // Fewer than two pointers delivered mid-pinch: end the gesture
            // instead of failing.
            _ => self.leave_pinch(GesturePhase::SinglePointer),
        }
    }

    /// Map the current finger spacing to a zoom-step delta relative to the
    /// pinch baseline, scaled by the shorter screen dimension.
    fn step_for_spacing(&self, current: f32) -> i32 {
        let baseline = self.baseline_spacing.unwrap_or(current);
        let raw = if self.reference_scale == 0.0 {
            0.0
        } else {
            (current - baseline) / self.reference_scale
        };
        (self.max_step as f32 * clamp_f32(raw, -1.0, 1.0)).round() as i32
    }

    fn leave_pinch(&mut self, next: GesturePhase) -> GestureEvent {
        let was_pinching = self.phase == GesturePhase::Pinching;
        self.phase = next;
        self.baseline_spacing = None;
        if was_pinching {
            GestureEvent::PinchEnd
        } else {
            GestureEvent::None
        }
    }

    /// Keep the insertion-ordered active pointer list in step with the
    /// sample. Only the first two pointers are tracked.
    fn sync_active(&mut self, sample: &TouchSample) {
        match sample.action {
            TouchAction::Down => {
                self.active.clear();
                if let Some(p) = sample.points.first() {
                    self.active.push(p.id);
                }
            }
            TouchAction::PointerDown => {
                for p in &sample.points {
                    if self.active.len() >= 2 {
                        break;
                    }
                    if !self.active.contains(&p.id) {
                        self.active.push(p.id);
                    }
                }
            }
            TouchAction::PointerUp => {
                let leaving = sample.changed_point().map(|p| p.id);
                self.active.retain(|id| Some(*id) != leaving);
                for (i, p) in sample.points.iter().enumerate() {
                    if self.active.len() >= 2 {
                        break;
                    }
                    if i == sample.action_index || self.active.contains(&p.id) {
                        continue;
                    }
                    self.active.push(p.id);
                }
            }
            TouchAction::Up | TouchAction::Cancel => self.active.clear(),
            TouchAction::Move | TouchAction::Outside => {}
        }
    }
}
