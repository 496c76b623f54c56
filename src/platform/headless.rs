//! Headless backend
//!
//! Implements every platform trait without a window: textures are counted
//! handles, frames are counted and traced, banners go to the log. Used by
//! the terminal shell and by tests.

use std::collections::HashMap;
use std::path::PathBuf;

use super::{Banner, Canvas, Rect, TextureId, TextureProvider};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    /// When set, `load` requires `<dir>/<name>.png` to exist
    asset_dir: Option<PathBuf>,
    textures: HashMap<TextureId, String>,
    next_texture: u32,
    frames: u64,
    copies_this_frame: usize,
    last_banner: Option<String>,
}

impl HeadlessBackend {
    pub fn new(asset_dir: Option<PathBuf>) -> Self {
        Self {
            asset_dir,
            ..Default::default()
        }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Textures loaded and not yet released
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn last_banner(&self) -> Option<&str> {
        self.last_banner.as_deref()
    }
}

impl TextureProvider for HeadlessBackend {
    fn load(&mut self, name: &str) -> Result<TextureId> {
        if let Some(dir) = &self.asset_dir {
            let path = dir.join(format!("{name}.png"));
            if !path.is_file() {
                return Err(Error::TextureLoad {
                    name: name.to_string(),
                    reason: format!("{} not found", path.display()),
                });
            }
        }
        self.next_texture += 1;
        let id = TextureId(self.next_texture);
        self.textures.insert(id, name.to_string());
        log::debug!("Loaded texture {name} as {id:?}");
        Ok(id)
    }

    fn release(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_none() {
            log::warn!("Released unknown texture {texture:?}");
        }
    }
}

impl Canvas for HeadlessBackend {
    fn clear(&mut self) -> Result<()> {
        self.copies_this_frame = 0;
        Ok(())
    }

    fn copy(&mut self, texture: TextureId, _dst: Option<Rect>) -> Result<()> {
        if !self.textures.contains_key(&texture) {
            return Err(Error::Render(format!("texture {texture:?} is not loaded")));
        }
        self.copies_this_frame += 1;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        log::trace!(
            "frame {} presented ({} copies)",
            self.frames,
            self.copies_this_frame
        );
        Ok(())
    }
}

impl Banner for HeadlessBackend {
    fn draw_title(&mut self, text: &str, point_size: u32) -> Result<()> {
        if point_size == 0 {
            return Err(Error::Banner {
                text: text.to_string(),
                reason: "point size must be positive".into(),
            });
        }
        log::info!("[{point_size}pt] {text}");
        self.last_banner = Some(text.to_string());
        Ok(())
    }
}
