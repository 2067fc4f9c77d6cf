//! Input model: tools, the gesture state machine, and what each event produces.
//!
//! `Tool` and `ToolState` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture being tracked between pointer-down and
//! pointer-up (or pointer-leave, which finalizes the same way). Transitions
//! return [`Effect`]s; the engine applies them to the raster layers and the
//! history, so this module never touches pixels.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::color::Color;
use crate::doc::{Rect, StrokeEntry};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand pen (default).
    #[default]
    Pen,
    /// Rectangular region marker.
    #[serde(alias = "select")]
    Selector,
}

/// Persistent tool settings, owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Color,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A pen stroke is being drawn.
    Drawing {
        /// Points so far, seeded with the pointer-down position.
        path: Vec<Point>,
        /// Color captured at pointer-down.
        color: Color,
    },
    /// A region is being dragged out.
    Selecting {
        /// Where the drag started.
        anchor: Point,
        /// Rectangle from the anchor to the latest pointer position; `None` until the first move.
        current: Option<Rect>,
        /// Color captured at pointer-down.
        color: Color,
    },
}

/// Side effects requested by a gesture transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Paint one stroke segment onto the base layer right away.
    PaintSegment { from: Point, to: Point, color: Color },
    /// The in-progress selection rectangle changed; the overlay must be redrawn.
    SelectionChanged,
    /// Commit a finished stroke to history.
    CommitStroke(StrokeEntry),
    /// Commit a finished region to history; the engine snapshots the base layer under it.
    CommitSelection { area: Rect, color: Color },
}

/// Tracks one gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct GestureRecorder {
    state: InputState,
}

impl GestureRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, InputState::Idle)
    }

    /// The uncommitted selection rectangle and its color, if one is being dragged.
    #[must_use]
    pub fn pending_selection(&self) -> Option<(Rect, Color)> {
        match &self.state {
            InputState::Selecting { current: Some(rect), color, .. } => Some((*rect, *color)),
            _ => None,
        }
    }

    /// Start a gesture. A gesture still active from a lost pointer-up is finalized first.
    pub fn pointer_down(&mut self, tools: ToolState, at: Point) -> Vec<Effect> {
        let mut effects = self.pointer_up();
        match tools.tool {
            Tool::Pen => {
                self.state = InputState::Drawing { path: vec![at], color: tools.color };
                effects.push(Effect::PaintSegment { from: at, to: at, color: tools.color });
            }
            Tool::Selector => {
                self.state = InputState::Selecting { anchor: at, current: None, color: tools.color };
            }
        }
        effects
    }

    /// Extend the active gesture. Ignored while idle.
    pub fn pointer_move(&mut self, at: Point) -> Vec<Effect> {
        match &mut self.state {
            InputState::Idle => Vec::new(),
            InputState::Drawing { path, color } => {
                let from = path.last().copied().unwrap_or(at);
                path.push(at);
                vec![Effect::PaintSegment { from, to: at, color: *color }]
            }
            InputState::Selecting { anchor, current, .. } => {
                *current = Some(Rect::from_corners(*anchor, at));
                vec![Effect::SelectionChanged]
            }
        }
    }

    /// Finalize the active gesture. Pointer-leave is routed here too.
    pub fn pointer_up(&mut self) -> Vec<Effect> {
        match std::mem::take(&mut self.state) {
            InputState::Idle => Vec::new(),
            InputState::Drawing { path, color } => {
                if path.is_empty() {
                    Vec::new()
                } else {
                    vec![Effect::CommitStroke(StrokeEntry { points: path, color })]
                }
            }
            InputState::Selecting { current: Some(area), color, .. } => {
                vec![Effect::CommitSelection { area, color }, Effect::SelectionChanged]
            }
            InputState::Selecting { current: None, .. } => Vec::new(),
        }
    }

    /// Drop the active gesture without committing anything.
    ///
    /// Returns `true` if an uncommitted selection rectangle was discarded.
    pub fn cancel(&mut self) -> bool {
        let had_rect = self.pending_selection().is_some();
        self.state = InputState::Idle;
        had_rect
    }
}
