//! Drawing canvas engine for the chart-marking exercise.
//!
//! Each stage shows one background chart. The user draws freehand pen strokes
//! and drags out rectangular regions over it; every finished gesture is
//! committed to an append-only history. The visible canvas is two stacked
//! raster layers (strokes on the base, region outlines on the overlay) that
//! can always be rebuilt by replaying that history over the background.
//!
//! The crate does no I/O of its own. Hosts feed [`engine::EngineCore`] pointer
//! events and background load results, and react to the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Canvas controller, [`engine::EngineCore`] |
//! | [`input`] | Tools and the gesture state machine |
//! | [`doc`] | History entries, rectangles, and the drawing history |
//! | [`camera`] | Client-to-canvas coordinate mapping |
//! | [`layers`] | Base/overlay surfaces and PNG export |
//! | [`replay`] | Deterministic rebuild of both layers from history |
//! | [`raster`] | Pixel primitives (segments, outlines, snapshots) |
//! | [`stage`] | Stage catalog, load tickets, and load status |
//! | [`background`] | Image decoding and letterbox preparation |
//! | [`color`] | RGBA colors and the palette |
//! | [`config`] | Environment-driven settings |
//! | [`consts`] | Shared defaults (stroke width, fallback size, etc.) |
//! | [`error`] | [`error::CanvasError`] |

pub mod background;
pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod input;
pub mod layers;
pub mod raster;
pub mod replay;
pub mod stage;
