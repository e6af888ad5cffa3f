use std::path::Path;

use icy_ui::widget::image;

use crate::{BackdropError, BackdropResult};

/// The image shown in every cell of the grid. Cloning shares the pixel data.
#[derive(Debug, Clone)]
pub struct PatternImage {
    handle: image::Handle,
    width: u32,
    height: u32,
}

impl PatternImage {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, rgba),
            width,
            height,
        }
    }

    /// Decodes any format supported by the `image` crate.
    pub fn from_path(path: impl AsRef<Path>) -> BackdropResult<Self> {
        let path = path.as_ref();
        let decoded = ::image::open(path).map_err(|source| BackdropError::DecodeImage {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("loaded pattern {} ({}x{})", path.display(), width, height);
        Ok(Self::from_rgba(width, height, rgba.into_raw()))
    }

    pub fn handle(&self) -> &image::Handle {
        &self.handle
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
