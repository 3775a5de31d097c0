//! Input contracts for the overlay core.
//!
//! Adapters translate host touch events into [`TouchSample`]s and pass them
//! to `CameraOverlay::on_touch()`. `points` keeps the host's pointer index
//! order; ids are stable while a pointer stays down and may be reused once
//! it is released.

use serde::{Deserialize, Serialize};

/// One active pointer at the sampled instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// Kind of touch transition the sample reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TouchAction {
    Down,
    Up,
    Move,
    Cancel,
    Outside,
    PointerDown,
    PointerUp,
}

impl TouchAction {
    /// Display name used by trace dumps.
    pub fn name(self) -> &'static str {
        match self {
            TouchAction::Down => "DOWN",
            TouchAction::Up => "UP",
            TouchAction::Move => "MOVE",
            TouchAction::Cancel => "CANCEL",
            TouchAction::Outside => "OUTSIDE",
            TouchAction::PointerDown => "POINTER_DOWN",
            TouchAction::PointerUp => "POINTER_UP",
        }
    }
}

/// All pointers captured at one instant plus the transition that produced
/// the sample.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TouchSample {
    pub action: TouchAction,
    /// Index into `points` of the pointer a `PointerDown`/`PointerUp`
    /// refers to.
    #[serde(default)]
    pub action_index: usize,
    #[serde(default)]
    pub points: Vec<TouchPoint>,
}

impl TouchSample {
    /// The pointer a `PointerDown`/`PointerUp` acts on, when present.
    pub fn changed_point(&self) -> Option<&TouchPoint> {
        self.points.get(self.action_index)
    }

    /// Number of pointers still active once this sample is applied.
    pub fn pointers_after(&self) -> usize {
        match self.action {
            TouchAction::Up | TouchAction::Cancel => 0,
            TouchAction::PointerUp => self.points.len().saturating_sub(1),
            _ => self.points.len(),
        }
    }
}
