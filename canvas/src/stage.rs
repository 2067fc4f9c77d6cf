//! Stage catalog and guarded background loads.
//!
//! A session walks through a fixed number of chart stages. Each stage's
//! background is fetched by the host and handed back to the engine later, so
//! every request carries a [`LoadTicket`] stamped with the generation it was
//! issued under. A result whose generation no longer matches the engine's is
//! stale and gets discarded.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

use crate::config::CanvasConfig;

/// Maps stage indices to image resource paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCatalog {
    image_root: String,
    count: usize,
}

impl StageCatalog {
    #[must_use]
    pub fn new(image_root: impl Into<String>, count: usize) -> Self {
        let image_root = image_root.into().trim_end_matches('/').to_owned();
        Self { image_root, count }
    }

    #[must_use]
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.image_root.clone(), config.stage_count)
    }

    /// Number of stages before the session is complete.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Resource path for `stage` (0-based), `{root}/{stage + 1}.png`.
    ///
    /// `None` once `stage` is past the last stage.
    #[must_use]
    pub fn resource_path(&self, stage: usize) -> Option<String> {
        (stage < self.count).then(|| format!("{}/{}.png", self.image_root, stage + 1))
    }

    /// Whether `stage` is the completion state that follows the last stage.
    #[must_use]
    pub fn is_complete(&self, stage: usize) -> bool {
        stage >= self.count
    }
}

/// A background load request issued by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// Stage the image is for.
    pub stage: usize,
    /// Guard token; must match the engine's current generation when the result arrives.
    pub generation: u64,
    /// Resource the host should fetch.
    pub path: String,
}

/// Where the current stage is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    /// Background requested, not yet delivered.
    Loading,
    /// Background installed; drawing is enabled.
    Ready,
    /// Background failed to load. Terminal for this stage.
    Failed { reason: String },
    /// Past the last stage; no canvas.
    Complete,
}

/// What happened to a delivered load result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The background was installed and the canvas reset.
    Applied { width: u32, height: u32 },
    /// The ticket was superseded by a later stage change; nothing changed.
    Stale,
}
