use image::RgbaImage;

use crate::background;
use crate::camera::{DisplayBounds, Point};
use crate::color::Color;
use crate::config::CanvasConfig;
use crate::doc::{DrawingHistory, HistoryEntry, SelectionEntry};
use crate::error::CanvasError;
use crate::input::{Effect, GestureRecorder, InputState, Tool, ToolState};
use crate::layers::{self, Layers};
use crate::raster;
use crate::stage::{LoadOutcome, LoadTicket, StageCatalog, StageStatus};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A gesture was committed at this history index.
    EntryCommitted { index: usize },
    /// History shrank through undo or clear; `len` is the new length.
    HistoryReverted { len: usize },
    /// Layer pixels changed; the host should repaint.
    RenderNeeded,
}

/// Drawing canvas controller.
///
/// Owns tool state, the gesture recorder, the drawing history, the stage
/// background and both raster layers. Hosts feed it pointer events and load
/// results; it never performs I/O itself.
pub struct EngineCore {
    config: CanvasConfig,
    catalog: StageCatalog,
    tools: ToolState,
    recorder: GestureRecorder,
    history: DrawingHistory,
    layers: Layers,
    background: Option<RgbaImage>,
    stage: usize,
    status: StageStatus,
    generation: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            catalog: StageCatalog::from_config(&config),
            config,
            tools: ToolState::default(),
            recorder: GestureRecorder::new(),
            history: DrawingHistory::new(),
            layers: Layers::new(),
            background: None,
            stage: 0,
            status: StageStatus::Loading,
            generation: 0,
        }
    }

    // --- Stage lifecycle ---

    /// Switch to `stage` and return the load request the host must fulfil.
    ///
    /// Any earlier outstanding ticket becomes stale. Past the last stage the
    /// engine enters the completion state, drops its surfaces, and returns `None`.
    pub fn set_stage(&mut self, stage: usize) -> Option<LoadTicket> {
        if self.recorder.cancel() {
            self.redraw_overlay();
        }
        self.generation += 1;
        self.stage = stage;

        match self.catalog.resource_path(stage) {
            Some(path) => {
                self.status = StageStatus::Loading;
                Some(LoadTicket { stage, generation: self.generation, path })
            }
            None => {
                tracing::info!(stage, "all stages complete");
                self.status = StageStatus::Complete;
                self.drop_canvas();
                None
            }
        }
    }

    /// Advance one stage. No-op once complete.
    pub fn next_stage(&mut self) -> Option<LoadTicket> {
        if self.catalog.is_complete(self.stage) {
            return None;
        }
        self.set_stage(self.stage + 1)
    }

    /// Go back one stage. No-op at the first stage.
    pub fn previous_stage(&mut self) -> Option<LoadTicket> {
        if self.stage == 0 {
            return None;
        }
        self.set_stage(self.stage - 1)
    }

    /// Deliver the result of a background load.
    ///
    /// Stale tickets (superseded by a later [`set_stage`](Self::set_stage), or
    /// for a stage that already settled) change nothing. A fresh success
    /// installs the background, resizes both layers, and empties the history;
    /// the tool state is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ImageLoadFailure`] when a fresh ticket's load
    /// failed. The stage is then [`StageStatus::Failed`] and stays that way.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<RgbaImage, CanvasError>,
    ) -> Result<LoadOutcome, CanvasError> {
        if ticket.generation != self.generation || self.status != StageStatus::Loading {
            tracing::debug!(
                stage = ticket.stage,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale background load"
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(image) => {
                let (width, height) = image.dimensions();
                self.recorder.cancel();
                self.history.clear();
                self.layers.reset(&image);
                self.background = Some(image);
                self.status = StageStatus::Ready;
                tracing::info!(stage = ticket.stage, width, height, "stage background ready");
                Ok(LoadOutcome::Applied { width, height })
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(stage = ticket.stage, error = %reason, "stage background failed to load");
                self.drop_canvas();
                self.status = StageStatus::Failed { reason: reason.clone() };
                Err(CanvasError::ImageLoadFailure { stage: ticket.stage, reason })
            }
        }
    }

    /// Decode `bytes` and deliver them as the result for `ticket`.
    ///
    /// # Errors
    ///
    /// See [`complete_load`](Self::complete_load).
    pub fn complete_load_bytes(&mut self, ticket: &LoadTicket, bytes: &[u8]) -> Result<LoadOutcome, CanvasError> {
        self.complete_load(ticket, background::decode(bytes))
    }

    // --- Tool / color ---

    /// Change the active tool.
    ///
    /// Leaving the pen mid-stroke commits the stroke. Leaving the selector
    /// drops any uncommitted rectangle and redraws the overlay.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if tool == self.tools.tool {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if matches!(self.recorder.state(), InputState::Drawing { .. }) {
            let effects = self.recorder.pointer_up();
            self.apply(effects, &mut actions);
        } else {
            self.recorder.cancel();
        }
        if self.tools.tool == Tool::Selector {
            self.redraw_overlay();
            push_render(&mut actions);
        }
        self.tools.tool = tool;
        actions
    }

    /// Change the color used by the next gesture.
    pub fn set_color(&mut self, color: Color) {
        self.tools.color = color;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, client: Point, bounds: DisplayBounds) -> Vec<Action> {
        let Some(at) = self.map_pointer(client, bounds) else {
            return Vec::new();
        };
        let effects = self.recorder.pointer_down(self.tools, at);
        self.run(effects)
    }

    pub fn on_pointer_move(&mut self, client: Point, bounds: DisplayBounds) -> Vec<Action> {
        let Some(at) = self.map_pointer(client, bounds) else {
            return Vec::new();
        };
        let effects = self.recorder.pointer_move(at);
        self.run(effects)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let effects = self.recorder.pointer_up();
        self.run(effects)
    }

    /// Pointer left the canvas: finalize the gesture exactly like pointer-up.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- History ---

    /// Remove the newest history entry and rebuild both layers from what remains.
    ///
    /// Any gesture in progress is dropped first. No-op unless the stage is ready.
    pub fn undo(&mut self) -> Vec<Action> {
        if self.status != StageStatus::Ready {
            return Vec::new();
        }
        let dropped_rect = self.recorder.cancel();
        if self.history.undo().is_none() {
            tracing::debug!(stage = self.stage, "undo with empty history");
            if dropped_rect {
                self.redraw_overlay();
                return vec![Action::RenderNeeded];
            }
            return Vec::new();
        }
        let Some(background) = self.background.as_ref() else {
            return Vec::new();
        };
        self.layers.rebuild_base(background, self.history.entries(), self.config.stroke_width);
        self.layers.redraw_overlay(self.history.entries(), None, self.config.outline_width);
        vec![Action::HistoryReverted { len: self.history.len() }, Action::RenderNeeded]
    }

    /// Empty the history and show the bare background. No-op unless the stage is ready.
    pub fn clear_all(&mut self) -> Vec<Action> {
        if self.status != StageStatus::Ready {
            return Vec::new();
        }
        self.recorder.cancel();
        self.history.clear();
        let Some(background) = self.background.as_ref() else {
            return Vec::new();
        };
        self.layers.reset(background);
        vec![Action::HistoryReverted { len: 0 }, Action::RenderNeeded]
    }

    // --- Export ---

    /// The flattened canvas: base with overlay on top, at intrinsic size.
    ///
    /// Before any background is ready this is a transparent raster at the
    /// configured fallback size.
    #[must_use]
    pub fn export_image(&self) -> RgbaImage {
        if self.layers.is_empty() {
            tracing::debug!(
                width = self.config.fallback_width,
                height = self.config.fallback_height,
                "export before background ready; using blank fallback"
            );
            return raster::blank(self.config.fallback_width, self.config.fallback_height);
        }
        self.layers.flatten()
    }

    /// [`export_image`](Self::export_image) encoded as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Encode`] if encoding fails.
    pub fn export_png(&self) -> Result<Vec<u8>, CanvasError> {
        layers::encode_png(&self.export_image())
    }

    /// [`export_image`](Self::export_image) as a `data:image/png;base64,` URI.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Encode`] if encoding fails.
    pub fn export_data_uri(&self) -> Result<String, CanvasError> {
        layers::png_data_uri(&self.export_image())
    }

    // --- Queries ---

    #[must_use]
    pub fn tool_state(&self) -> ToolState {
        self.tools
    }

    #[must_use]
    pub fn stage(&self) -> usize {
        self.stage
    }

    #[must_use]
    pub fn status(&self) -> &StageStatus {
        &self.status
    }

    #[must_use]
    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &DrawingHistory {
        &self.history
    }

    /// Committed selections with their snapshots, oldest first.
    pub fn selections(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.history.selections()
    }

    /// Intrinsic canvas size; `(0, 0)` while no background is installed.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.layers.dimensions()
    }

    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.recorder.is_active()
    }

    // --- Internals ---

    fn map_pointer(&self, client: Point, bounds: DisplayBounds) -> Option<Point> {
        if self.status != StageStatus::Ready || self.layers.is_empty() {
            return None;
        }
        let (w, h) = self.layers.dimensions();
        Some(bounds.to_canvas(client, w, h))
    }

    fn run(&mut self, effects: Vec<Effect>) -> Vec<Action> {
        let mut actions = Vec::new();
        self.apply(effects, &mut actions);
        actions
    }

    fn apply(&mut self, effects: Vec<Effect>, actions: &mut Vec<Action>) {
        for effect in effects {
            match effect {
                Effect::PaintSegment { from, to, color } => {
                    self.layers.paint_segment(from, to, self.config.stroke_width, color);
                    push_render(actions);
                }
                Effect::SelectionChanged => {
                    self.redraw_overlay();
                    push_render(actions);
                }
                Effect::CommitStroke(stroke) => {
                    let index = self.history.commit(HistoryEntry::Stroke(stroke));
                    actions.push(Action::EntryCommitted { index });
                }
                Effect::CommitSelection { area, color } => {
                    let snapshot = self.layers.snapshot(&area);
                    let index = self.history.commit(HistoryEntry::Selection(SelectionEntry { area, color, snapshot }));
                    actions.push(Action::EntryCommitted { index });
                }
            }
        }
    }

    fn redraw_overlay(&mut self) {
        self.layers.redraw_overlay(
            self.history.entries(),
            self.recorder.pending_selection(),
            self.config.outline_width,
        );
    }

    fn drop_canvas(&mut self) {
        self.recorder.cancel();
        self.history.clear();
        self.background = None;
        self.layers.release();
    }
}

fn push_render(actions: &mut Vec<Action>) {
    if !actions.contains(&Action::RenderNeeded) {
        actions.push(Action::RenderNeeded);
    }
}
