use std::sync::Arc;
use std::time::Instant;

use icy_backdrop::{BackdropSettings, BindingMode, FrameClock, OffsetBinder, OffsetBinding, ScrollOffset};
use icy_ui::widget::{button, container, row, text};
use icy_ui::{window, Alignment, Element, Length, Subscription};

use crate::DEFAULT_TITLE;

/// Distance the nudge button moves the window on both axes.
const NUDGE_STEP: f64 = 50.0;

#[derive(Debug, Clone)]
pub enum Message {
    Frame(Instant),
    Reset,
    Nudge,
    ToggleRunning,
}

pub struct BackdropPlayer {
    binder: OffsetBinder,
    binding: OffsetBinding,
    frames: Arc<FrameClock>,
}

impl BackdropPlayer {
    pub fn new(settings: &BackdropSettings) -> Self {
        let binding = OffsetBinding::default();
        let mut binder = settings.build_binder(binding.clone());
        let frames = Arc::new(FrameClock::new());

        if !binder.start(frames.clone()) {
            log::info!("Backdrop is not active today, showing an empty window");
        }

        Self { binder, binding, frames }
    }

    pub fn title(&self) -> String {
        DEFAULT_TITLE.clone()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Frame(now) => {
                self.frames.fire(now);
                return;
            }
            Message::Reset => self.binding.set(ScrollOffset::ZERO),
            Message::Nudge => {
                let offset = match self.binder.mode() {
                    BindingMode::TwoWay => self.binding.get(),
                    BindingMode::OneWay => self.binder.scroller().offset(),
                };
                self.binding.set(ScrollOffset::new(offset.x + NUDGE_STEP, offset.y + NUDGE_STEP));
            }
            Message::ToggleRunning => {
                if self.binder.scroller().is_running() {
                    self.binder.stop();
                } else {
                    self.binder.start(self.frames.clone());
                }
            }
        }
        // Application state changed: this is the refresh pass for the binder.
        self.binder.refresh();
    }

    pub fn view(&self) -> Element<'_, Message> {
        let offset = self.binder.scroller().offset();
        let running = self.binder.scroller().is_running();

        let controls = row![
            button(text("Reset")).on_press(Message::Reset),
            button(text("Nudge")).on_press(Message::Nudge),
            button(text(if running { "Pause" } else { "Play" })).on_press(Message::ToggleRunning),
            text(format!("{:.1} / {:.1}", offset.x, offset.y)),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        icy_ui::widget::stack![
            self.binder.view(),
            container(controls).padding(12).width(Length::Fill).height(Length::Fill).align_y(icy_ui::Bottom),
        ]
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.frames.is_active() {
            window::frames().map(Message::Frame)
        } else {
            Subscription::none()
        }
    }
}
