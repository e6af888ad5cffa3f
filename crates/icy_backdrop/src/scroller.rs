use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    advance, ActivationDates, Clock, Divider, FrameScheduler, PatternImage, ScrollOffset, SubscriptionHandle, SystemClock, TickOutcome, TileGeometry,
    format_date,
};

/// Why a scroller has no grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InactiveReason {
    /// Activation dates were configured and `today` is not one of them.
    OutsideActivationDates { today: String },
}

/// The constructed 2x2 tile grid.
#[derive(Debug, Clone)]
pub struct TileGrid {
    pattern: Option<PatternImage>,
}

impl TileGrid {
    /// `None` renders empty cells.
    pub fn pattern(&self) -> Option<&PatternImage> {
        self.pattern.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum Backdrop {
    Active(TileGrid),
    Inactive(InactiveReason),
}

impl Backdrop {
    pub fn is_active(&self) -> bool {
        matches!(self, Backdrop::Active(_))
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        match self {
            Backdrop::Active(grid) => Some(grid),
            Backdrop::Inactive(_) => None,
        }
    }
}

/// Scroll state shared between the scroller, its frame callback and its widget.
#[derive(Debug, Default)]
pub struct ScrollState {
    pub offset: ScrollOffset,
    /// Set by the widget during layout.
    pub geometry: Option<TileGeometry>,
    pub ticks: u64,
    pub wraps: u64,
    /// Receives every internally computed offset (two-way binding).
    mirror: Option<Arc<RwLock<ScrollOffset>>>,
}

pub type SharedScrollState = Arc<RwLock<ScrollState>>;

/// Performs one tick on shared state. The state lock is released before the
/// mirror is written.
pub(crate) fn tick_state(state: &SharedScrollState, divider: Divider) -> TickOutcome {
    let (outcome, mirror) = {
        let mut state = state.write();
        let Some(geometry) = state.geometry else {
            return TickOutcome::Idle;
        };
        let outcome = advance(&mut state.offset, &geometry, divider);
        state.ticks += 1;
        if outcome == TickOutcome::Wrapped {
            state.wraps += 1;
            log::trace!("backdrop wrapped after {} ticks", state.ticks);
        }
        (outcome, state.mirror.clone().map(|m| (m, state.offset)))
    };
    if let Some((mirror, offset)) = mirror {
        *mirror.write() = offset;
    }
    outcome
}

/// A pattern image tiled over a 2x2 grid whose visible window drifts
/// diagonally, one step per frame, and snaps back to the origin at the end.
pub struct TiledScroller {
    backdrop: Backdrop,
    divider: Divider,
    state: SharedScrollState,
    subscriptions: Vec<(Arc<dyn FrameScheduler>, SubscriptionHandle)>,
}

impl TiledScroller {
    pub fn new(pattern: Option<PatternImage>, divider: Divider, dates: ActivationDates) -> Self {
        Self::with_clock(pattern, divider, dates, &SystemClock)
    }

    pub fn with_clock(pattern: Option<PatternImage>, divider: Divider, dates: ActivationDates, clock: &dyn Clock) -> Self {
        let today = clock.today();
        let backdrop = if dates.is_active_on(today) {
            Backdrop::Active(TileGrid { pattern })
        } else {
            let today = format_date(today);
            log::debug!("backdrop inactive: {} not in {} activation date(s)", today, dates.len());
            Backdrop::Inactive(InactiveReason::OutsideActivationDates { today })
        };

        Self {
            backdrop,
            divider,
            state: Arc::new(RwLock::new(ScrollState::default())),
            subscriptions: Vec::new(),
        }
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn is_active(&self) -> bool {
        self.backdrop.is_active()
    }

    pub fn divider(&self) -> Divider {
        self.divider
    }

    /// Subscribes the advance step on `scheduler`.
    ///
    /// Returns whether the scroller is running afterwards. An inactive scroller
    /// never starts; a running one ignores further calls.
    pub fn start(&mut self, scheduler: Arc<dyn FrameScheduler>) -> bool {
        if !self.is_active() {
            log::debug!("start ignored, backdrop is inactive");
            return false;
        }
        if self.is_running() {
            log::debug!("start ignored, backdrop already running");
            return true;
        }

        let state = self.state.clone();
        let divider = self.divider;
        let handle = scheduler.subscribe(Box::new(move |_now| {
            tick_state(&state, divider);
        }));
        log::debug!("backdrop started (subscription {})", handle.id());
        self.subscriptions.push((scheduler, handle));
        true
    }

    /// Detaches from every scheduler. Further frames leave the offset untouched.
    pub fn stop(&mut self) {
        for (scheduler, handle) in self.subscriptions.drain(..) {
            if !scheduler.unsubscribe(handle) {
                log::warn!("subscription {} was already gone", handle.id());
            }
        }
    }

    pub fn is_running(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Runs one advance step directly, bypassing any scheduler.
    pub fn tick(&self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Idle;
        }
        tick_state(&self.state, self.divider)
    }

    pub fn offset(&self) -> ScrollOffset {
        self.state.read().offset
    }

    pub fn set_offset(&self, offset: ScrollOffset) {
        self.state.write().offset = offset;
    }

    pub fn geometry(&self) -> Option<TileGeometry> {
        self.state.read().geometry
    }

    /// Records the visible size; normally done by the widget on every layout.
    pub fn set_viewport_size(&self, width: f64, height: f64) {
        self.state.write().geometry = Some(TileGeometry::new(width, height));
    }

    pub fn ticks(&self) -> u64 {
        self.state.read().ticks
    }

    pub fn wraps(&self) -> u64 {
        self.state.read().wraps
    }

    pub fn shared_state(&self) -> SharedScrollState {
        self.state.clone()
    }

    pub(crate) fn set_mirror(&self, mirror: Option<Arc<RwLock<ScrollOffset>>>) {
        self.state.write().mirror = mirror;
    }
}

impl Drop for TiledScroller {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TiledScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiledScroller")
            .field("backdrop", &self.backdrop)
            .field("divider", &self.divider)
            .field("offset", &self.offset())
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::FixedClock;

    fn clock(y: i32, m: u32, d: u32) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn idle_until_laid_out() {
        let scroller = TiledScroller::new(None, Divider::default(), ActivationDates::default());
        assert_eq!(scroller.tick(), TickOutcome::Idle);
        assert_eq!(scroller.ticks(), 0);
    }

    #[test]
    fn inactive_scroller_reports_today() {
        let scroller = TiledScroller::with_clock(None, Divider::default(), ActivationDates::new(["2024/01/01"]), &clock(2024, 1, 2));
        match scroller.backdrop() {
            Backdrop::Inactive(InactiveReason::OutsideActivationDates { today }) => assert_eq!(today, "2024/01/02"),
            Backdrop::Active(_) => panic!("backdrop should be inactive"),
        }
    }

    #[test]
    fn inactive_scroller_never_ticks() {
        let scroller = TiledScroller::with_clock(None, Divider::default(), ActivationDates::new(["2024/01/01"]), &clock(2024, 1, 2));
        scroller.set_viewport_size(100.0, 100.0);
        assert_eq!(scroller.tick(), TickOutcome::Idle);
        assert_eq!(scroller.offset(), ScrollOffset::ZERO);
    }

    #[test]
    fn counts_wraps() {
        let scroller = TiledScroller::new(None, Divider::new(2.0).unwrap(), ActivationDates::default());
        scroller.set_viewport_size(10.0, 10.0);
        // step is 10 on both axes: 0 -> 10 -> 20 -> wrap
        assert_eq!(scroller.tick(), TickOutcome::Advanced(ScrollOffset::new(10.0, 10.0)));
        assert_eq!(scroller.tick(), TickOutcome::Advanced(ScrollOffset::new(20.0, 20.0)));
        assert_eq!(scroller.tick(), TickOutcome::Wrapped);
        assert_eq!(scroller.wraps(), 1);
        assert_eq!(scroller.ticks(), 3);
    }
}
