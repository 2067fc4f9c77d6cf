//! Gesture scripts: a JSON list of tool changes and pointer events replayed
//! against an [`EngineCore`].

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::camera::{DisplayBounds, Point};
use canvas::color::Color;
use canvas::engine::{Action, EngineCore};
use canvas::input::Tool;
use serde::Deserialize;

/// A parsed gesture script.
///
/// ```json
/// { "bounds": { "left": 0, "top": 0, "width": 576, "height": 540 },
///   "steps": [
///     { "op": "color", "color": "red" },
///     { "op": "down", "x": 10, "y": 10 },
///     { "op": "move", "x": 10, "y": 50 },
///     { "op": "up" } ] }
/// ```
///
/// `bounds` is the displayed canvas box that pointer coordinates are given
/// in. When omitted, pointer coordinates are canvas pixels.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub bounds: Option<DisplayBounds>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Tool { tool: Tool },
    Color { color: Color },
    Down {
        x: f64,
        y: f64,
        /// Per-event bounds, overriding the script-level box.
        #[serde(default)]
        bounds: Option<DisplayBounds>,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        bounds: Option<DisplayBounds>,
    },
    Up,
    Leave,
    Undo,
    Clear,
}

/// What a script run did to the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub committed: usize,
    pub reverted: usize,
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, unknown ops, or bad colors.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Feed every step to `core` in order.
    pub fn run(&self, core: &mut EngineCore) -> RunSummary {
        let mut summary = RunSummary::default();
        for (i, step) in self.steps.iter().enumerate() {
            let actions = self.apply(core, step);
            for action in &actions {
                match action {
                    Action::EntryCommitted { .. } => summary.committed += 1,
                    Action::HistoryReverted { .. } => summary.reverted += 1,
                    Action::RenderNeeded => {}
                }
            }
            tracing::debug!(step = i, ?step, actions = actions.len(), "script step");
            summary.steps += 1;
        }
        summary
    }

    fn apply(&self, core: &mut EngineCore, step: &Step) -> Vec<Action> {
        match step {
            Step::Tool { tool } => core.set_tool(*tool),
            Step::Color { color } => {
                core.set_color(*color);
                Vec::new()
            }
            Step::Down { x, y, bounds } => {
                let bounds = self.bounds_for(core, *bounds);
                core.on_pointer_down(Point::new(*x, *y), bounds)
            }
            Step::Move { x, y, bounds } => {
                let bounds = self.bounds_for(core, *bounds);
                core.on_pointer_move(Point::new(*x, *y), bounds)
            }
            Step::Up => core.on_pointer_up(),
            Step::Leave => core.on_pointer_leave(),
            Step::Undo => core.undo(),
            Step::Clear => core.clear_all(),
        }
    }

    fn bounds_for(&self, core: &EngineCore, step: Option<DisplayBounds>) -> DisplayBounds {
        step.or(self.bounds).unwrap_or_else(|| {
            let (w, h) = core.dimensions();
            DisplayBounds::identity(w, h)
        })
    }
}
