use serde::{Deserialize, Serialize};

use crate::{BackdropError, BackdropResult};

/// Number of sections (rows) in the tile grid.
pub const GRID_SECTIONS: usize = 2;

/// Number of items (columns) per section.
pub const GRID_ITEMS_PER_SECTION: usize = 2;

/// Default divider: the window travels 1/1000 of the content per tick.
pub const DEFAULT_DIVIDER: f64 = 1000.0;

/// Scroll position of the visible window inside the tile grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const ZERO: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Advance speed. Larger values scroll slower.
///
/// Always positive and finite, which keeps `content / divider` well defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Divider(f64);

impl Divider {
    pub fn new(value: f64) -> BackdropResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(BackdropError::InvalidDivider { value })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self(DEFAULT_DIVIDER)
    }
}

impl TryFrom<f64> for Divider {
    type Error = BackdropError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Divider::new(value)
    }
}

impl From<Divider> for f64 {
    fn from(divider: Divider) -> Self {
        divider.0
    }
}

/// Visible size of the backdrop. Every cell of the grid has exactly this size,
/// so the scrollable content is twice as large on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    pub visible_width: f64,
    pub visible_height: f64,
}

impl TileGeometry {
    pub fn new(visible_width: f64, visible_height: f64) -> Self {
        Self { visible_width, visible_height }
    }

    pub fn content_width(&self) -> f64 {
        self.visible_width * GRID_ITEMS_PER_SECTION as f64
    }

    pub fn content_height(&self) -> f64 {
        self.visible_height * GRID_SECTIONS as f64
    }

    /// Largest x offset that still advances; the comparison is inclusive.
    pub fn wrap_threshold_x(&self) -> f64 {
        self.content_width() - self.visible_width
    }

    pub fn wrap_threshold_y(&self) -> f64 {
        self.content_height() - self.visible_height
    }

    /// Per-tick step for the given divider.
    pub fn step(&self, divider: Divider) -> ScrollOffset {
        ScrollOffset::new(self.content_width() / divider.get(), self.content_height() / divider.get())
    }

    /// Cell rectangles `(x, y, width, height)` relative to the widget origin,
    /// shifted by `offset`. Sections are rows, items are columns.
    pub fn cell_rects(&self, offset: ScrollOffset) -> [(f64, f64, f64, f64); GRID_SECTIONS * GRID_ITEMS_PER_SECTION] {
        let mut rects = [(0.0, 0.0, 0.0, 0.0); GRID_SECTIONS * GRID_ITEMS_PER_SECTION];
        for section in 0..GRID_SECTIONS {
            for item in 0..GRID_ITEMS_PER_SECTION {
                rects[section * GRID_ITEMS_PER_SECTION + item] = (
                    item as f64 * self.visible_width - offset.x,
                    section as f64 * self.visible_height - offset.y,
                    self.visible_width,
                    self.visible_height,
                );
            }
        }
        rects
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing to do yet, the backdrop has not been laid out.
    Idle,
    /// The offset moved and should be applied to the visible window.
    Advanced(ScrollOffset),
    /// A threshold was exceeded and the offset snapped back to the origin.
    Wrapped,
}

/// Moves `offset` one step along the diagonal or wraps it back to zero.
///
/// The advance only happens while both axes are at or below their threshold.
/// Once either exceeds it, both axes reset to exactly 0 in the same tick; the
/// reset value is applied by the next advancing tick.
pub fn advance(offset: &mut ScrollOffset, geometry: &TileGeometry, divider: Divider) -> TickOutcome {
    if offset.x <= geometry.wrap_threshold_x() && offset.y <= geometry.wrap_threshold_y() {
        let step = geometry.step(divider);
        offset.x += step.x;
        offset.y += step.y;
        TickOutcome::Advanced(*offset)
    } else {
        *offset = ScrollOffset::ZERO;
        TickOutcome::Wrapped
    }
}
