//! Decorative backdrop for icy_ui applications: a pattern image tiled over a
//! 2x2 grid whose visible window drifts diagonally and loops.
//!
//! [`TiledScroller`] owns the animation, [`OffsetBinder`] lets application
//! state drive its offset. Frames are delivered through a [`FrameScheduler`],
//! normally a [`FrameClock`] fed from `window::frames()`.

pub mod error;
pub use error::*;

pub mod scroll;
pub use scroll::*;

pub mod activation;
pub use activation::*;

pub mod ticker;
pub use ticker::*;

pub mod pattern;
pub use pattern::*;

pub mod scroller;
pub use scroller::*;

pub mod binder;
pub use binder::*;

pub mod settings;
pub use settings::*;

pub mod widget;
pub use widget::*;
