//! Declarative-UI adapter around [`TiledScroller`].
//!
//! The embedding application owns an [`OffsetBinding`]. Each refresh pass
//! ([`OffsetBinder::refresh`]) copies the bound value into the scroller, so an
//! application write overrides the trajectory from the next tick on. Whether
//! the scroller's own movement flows back into the binding is decided by
//! [`BindingMode`].

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{ActivationDates, Divider, FrameScheduler, PatternImage, ScrollOffset, TiledScroller};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BindingMode {
    /// Binding → scroller only. The binding keeps whatever the application wrote last.
    #[default]
    OneWay,
    /// Additionally every tick writes the scroller offset back into the binding.
    TwoWay,
}

/// Externally owned offset. Clones refer to the same value.
#[derive(Debug, Clone, Default)]
pub struct OffsetBinding(Arc<RwLock<ScrollOffset>>);

impl OffsetBinding {
    pub fn new(offset: ScrollOffset) -> Self {
        Self(Arc::new(RwLock::new(offset)))
    }

    pub fn get(&self) -> ScrollOffset {
        *self.0.read()
    }

    pub fn set(&self, offset: ScrollOffset) {
        *self.0.write() = offset;
    }
}

pub struct OffsetBinder {
    scroller: TiledScroller,
    binding: OffsetBinding,
    mode: BindingMode,
}

impl OffsetBinder {
    pub fn new(pattern: Option<PatternImage>, divider: Divider, dates: ActivationDates, binding: OffsetBinding) -> Self {
        Self::from_scroller(TiledScroller::new(pattern, divider, dates), binding)
    }

    pub fn from_scroller(scroller: TiledScroller, binding: OffsetBinding) -> Self {
        Self {
            scroller,
            binding,
            mode: BindingMode::OneWay,
        }
    }

    pub fn with_mode(mut self, mode: BindingMode) -> Self {
        self.set_mode(mode);
        self
    }

    pub fn set_mode(&mut self, mode: BindingMode) {
        self.mode = mode;
        match mode {
            BindingMode::OneWay => self.scroller.set_mirror(None),
            BindingMode::TwoWay => self.scroller.set_mirror(Some(self.binding.0.clone())),
        }
    }

    pub fn mode(&self) -> BindingMode {
        self.mode
    }

    /// One refresh pass: the bound offset replaces the scroller offset.
    pub fn refresh(&self) {
        let offset = self.binding.get();
        self.scroller.set_offset(offset);
    }

    pub fn start(&mut self, scheduler: Arc<dyn FrameScheduler>) -> bool {
        self.scroller.start(scheduler)
    }

    pub fn stop(&mut self) {
        self.scroller.stop();
    }

    pub fn binding(&self) -> &OffsetBinding {
        &self.binding
    }

    pub fn scroller(&self) -> &TiledScroller {
        &self.scroller
    }
}

impl std::fmt::Debug for OffsetBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffsetBinder")
            .field("scroller", &self.scroller)
            .field("binding", &self.binding.get())
            .field("mode", &self.mode)
            .finish()
    }
}
