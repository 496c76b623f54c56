//! Platform abstraction layer
//!
//! The simulation never talks to a window system directly. It sees:
//! - `Canvas`: clear / copy / present on some render surface
//! - `TextureProvider`: named assets resolved to opaque handles
//! - `Banner`: full-screen text messages (title, game over, score)
//! - `Event`: discriminated platform input

pub mod headless;

pub use headless::HeadlessBackend;

use crate::error::Result;

/// Opaque handle to a drawable owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Destination rectangle in screen space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Platform input, already translated out of the backend's own types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Window closed / user asked to exit
    Quit,
    /// Primary pointer press (mouse button down, tap)
    Press,
    /// Primary pointer release
    Release,
    /// Pointer moved
    Motion { x: i32, y: i32 },
    /// Window focus/resize/expose
    Window,
    /// Keyboard input (ignored by the game)
    Key(char),
    Other,
}

/// Render surface
pub trait Canvas {
    fn clear(&mut self) -> Result<()>;

    /// Copy a texture; `None` stretches it over the whole surface
    fn copy(&mut self, texture: TextureId, dst: Option<Rect>) -> Result<()>;

    /// Copy a texture mirrored top-to-bottom
    fn copy_flipped(&mut self, texture: TextureId, dst: Rect) -> Result<()> {
        self.copy(texture, Some(dst))
    }

    fn present(&mut self) -> Result<()>;
}

/// Source of named textures
pub trait TextureProvider {
    fn load(&mut self, name: &str) -> Result<TextureId>;
    fn release(&mut self, texture: TextureId);
}

/// Full-screen text banner
pub trait Banner {
    fn draw_title(&mut self, text: &str, point_size: u32) -> Result<()>;
}
