//! Backdrop Widget
//!
//! Draws the four cells of the tile grid, each the size of the widget, shifted
//! by the current scroll offset and clipped to the widget bounds. The widget
//! reports its laid out size back into the shared scroll state, which is what
//! the advance step uses as the visible size.

use icy_ui::advanced::image::Renderer as _;
use icy_ui::advanced::widget::tree::{self, Tree};
use icy_ui::advanced::Renderer as _;
use icy_ui::advanced::{layout, renderer, widget};
use icy_ui::widget::image;
use icy_ui::{Element, Length, Rectangle, Size, Theme};

use crate::{OffsetBinder, SharedScrollState, TileGeometry, TiledScroller};

pub struct TiledBackdrop {
    /// `None` for an inactive scroller: takes up space, draws nothing.
    state: Option<SharedScrollState>,
    pattern: Option<image::Handle>,
    width: Length,
    height: Length,
}

impl TiledBackdrop {
    pub fn new(scroller: &TiledScroller) -> Self {
        let (state, pattern) = match scroller.backdrop().grid() {
            Some(grid) => (Some(scroller.shared_state()), grid.pattern().map(|p| p.handle().clone())),
            None => (None, None),
        };
        Self {
            state,
            pattern,
            width: Length::Fill,
            height: Length::Fill,
        }
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }
}

impl<Message> widget::Widget<Message, Theme, icy_ui::Renderer> for TiledBackdrop {
    fn size(&self) -> Size<Length> {
        Size::new(self.width, self.height)
    }

    fn layout(&mut self, _tree: &mut Tree, _renderer: &icy_ui::Renderer, limits: &layout::Limits) -> layout::Node {
        let size = limits.resolve(self.width, self.height, Size::ZERO);
        if let Some(state) = &self.state {
            state.write().geometry = Some(TileGeometry::new(size.width as f64, size.height as f64));
        }
        layout::Node::new(size)
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut icy_ui::Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: layout::Layout<'_>,
        _cursor: icy_ui::mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let (Some(state), Some(handle)) = (&self.state, &self.pattern) else {
            return;
        };

        let (offset, geometry) = {
            let state = state.read();
            (state.offset, state.geometry)
        };
        let Some(geometry) = geometry else {
            return;
        };

        let bounds = layout.bounds();
        renderer.with_layer(bounds, |renderer| {
            for (x, y, width, height) in geometry.cell_rects(offset) {
                let cell = Rectangle {
                    x: bounds.x + x as f32,
                    y: bounds.y + y as f32,
                    width: width as f32,
                    height: height as f32,
                };
                if !cell.intersects(&bounds) {
                    continue;
                }

                let image = icy_ui::advanced::image::Image::<image::Handle> {
                    handle: handle.clone(),
                    filter_method: icy_ui::advanced::image::FilterMethod::Linear,
                    rotation: icy_ui::Radians(0.0),
                    opacity: 1.0,
                    snap: true,
                    border_radius: icy_ui::border::Radius::default(),
                };
                renderer.draw_image(image, cell, bounds);
            }
        });
    }

    fn children(&self) -> Vec<Tree> {
        Vec::new()
    }

    fn diff(&self, _tree: &mut Tree) {}

    fn tag(&self) -> tree::Tag {
        tree::Tag::stateless()
    }

    fn state(&self) -> tree::State {
        tree::State::None
    }
}

impl<'a, Message> From<TiledBackdrop> for Element<'a, Message>
where
    Message: 'a,
{
    fn from(widget: TiledBackdrop) -> Self {
        Element::new(widget)
    }
}

impl TiledScroller {
    /// Full-size backdrop element for this scroller.
    pub fn view<'a, Message: 'a>(&self) -> Element<'a, Message> {
        TiledBackdrop::new(self).into()
    }
}

impl OffsetBinder {
    pub fn view<'a, Message: 'a>(&self) -> Element<'a, Message> {
        self.scroller().view()
    }
}
