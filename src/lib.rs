//! View transform engine for a pixel-accurate image viewer.
//!
//! Maps a bitmap of any size and pixel aspect onto a resizable viewport
//! under several framing policies (fit, fill, free pan/zoom, multi-strip
//! panels), with integer zoom, pivot-anchored zoom steps, eased transitions
//! and auto-scrolling. Nothing here touches pixels or windows; the engine
//! only produces [`Area`] transforms for a renderer to use.

pub mod animation;
pub mod area;
pub mod config;
pub mod cursor_pan;
pub mod engine;
pub mod error;
pub mod panel;
pub mod scroll;
pub mod view_state;
pub mod zoom;

pub use area::{Area, ScreenRect};
pub use config::{AppConfig, ViewSettings};
pub use cursor_pan::{Corner, PanSpeed};
pub use engine::{ViewActions, ViewEngine};
pub use error::ConfigError;
pub use panel::Panel;
pub use scroll::{SCROLL_SPEED_PRESETS, ScrollDirection};
pub use view_state::{Document, ScrollState, ViewMode, ViewState, Viewport};
