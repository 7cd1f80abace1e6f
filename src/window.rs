//! Window configuration, runtime window controls, and mouse tracking.

use std::{
    collections::HashSet,
    ops::{BitOr, BitOrAssign},
};

use anyhow::Context as _;
use winit::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    window::{Fullscreen, Window, WindowAttributes, WindowLevel},
};

/// Style flags applied when the window is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowFlags(u32);

impl WindowFlags {
    pub const NONE: WindowFlags = WindowFlags(0);
    pub const RESIZABLE: WindowFlags = WindowFlags(1 << 0);
    pub const UNDECORATED: WindowFlags = WindowFlags(1 << 1);
    pub const TRANSPARENT: WindowFlags = WindowFlags(1 << 2);
    pub const TOPMOST: WindowFlags = WindowFlags(1 << 3);
    pub const FULLSCREEN: WindowFlags = WindowFlags(1 << 4);
    pub const MAXIMIZED: WindowFlags = WindowFlags(1 << 5);
    pub const HIDDEN: WindowFlags = WindowFlags(1 << 6);
    pub const VSYNC: WindowFlags = WindowFlags(1 << 7);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: WindowFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: WindowFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: WindowFlags) {
        self.0 &= !other.0;
    }
}

impl BitOr for WindowFlags {
    type Output = WindowFlags;

    fn bitor(self, rhs: WindowFlags) -> WindowFlags {
        WindowFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for WindowFlags {
    fn bitor_assign(&mut self, rhs: WindowFlags) {
        self.0 |= rhs.0;
    }
}

/// Settings for the main window.
///
/// ```
/// use rlx::window::{WindowConfig, WindowFlags};
///
/// let config = WindowConfig::default()
///     .with_size(1280, 720)
///     .with_title("demo")
///     .add_flag(WindowFlags::RESIZABLE | WindowFlags::VSYNC);
/// assert!(config.flags.contains(WindowFlags::VSYNC));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub flags: WindowFlags,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "rlx".to_string(),
            flags: WindowFlags::NONE,
        }
    }
}

impl WindowConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn add_flag(mut self, flag: WindowFlags) -> Self {
        self.flags |= flag;
        self
    }

    pub fn clear_flags(mut self) -> Self {
        self.flags = WindowFlags::NONE;
        self
    }

    pub fn vsync(&self) -> bool {
        self.flags.contains(WindowFlags::VSYNC)
    }

    pub fn attributes(&self) -> WindowAttributes {
        let flags = self.flags;
        let mut attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(flags.contains(WindowFlags::RESIZABLE))
            .with_decorations(!flags.contains(WindowFlags::UNDECORATED))
            .with_transparent(flags.contains(WindowFlags::TRANSPARENT))
            .with_maximized(flags.contains(WindowFlags::MAXIMIZED))
            .with_visible(!flags.contains(WindowFlags::HIDDEN));
        if flags.contains(WindowFlags::TOPMOST) {
            attributes = attributes.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if flags.contains(WindowFlags::FULLSCREEN) {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        attributes
    }
}

impl From<&WindowConfig> for WindowAttributes {
    fn from(config: &WindowConfig) -> Self {
        config.attributes()
    }
}

/// Runtime controls for a live window.
pub trait WindowControls {
    fn set_top_most(&self, top_most: bool);
    /// Let mouse input pass through to whatever is behind the window.
    fn set_click_through(&self, click_through: bool) -> anyhow::Result<()>;
    fn toggle_fullscreen(&self);
    fn maximize(&self);
    fn minimize(&self);
    fn restore(&self);
    fn focus(&self);
    fn set_title(&self, title: &str);
    fn set_size(&self, width: u32, height: u32);
    fn set_position(&self, x: i32, y: i32);
    /// Outer position, or `None` where the platform can't report it.
    fn position(&self) -> Option<PhysicalPosition<i32>>;
    fn size(&self) -> PhysicalSize<u32>;
}

impl WindowControls for Window {
    fn set_top_most(&self, top_most: bool) {
        self.set_window_level(if top_most {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        });
    }

    fn set_click_through(&self, click_through: bool) -> anyhow::Result<()> {
        self.set_cursor_hittest(!click_through)
            .context("click-through is not supported on this platform")
    }

    fn toggle_fullscreen(&self) {
        if self.fullscreen().is_some() {
            self.set_fullscreen(None);
        } else {
            self.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }

    fn maximize(&self) {
        self.set_maximized(true);
    }

    fn minimize(&self) {
        self.set_minimized(true);
    }

    fn restore(&self) {
        self.set_minimized(false);
        self.set_maximized(false);
    }

    fn focus(&self) {
        self.focus_window();
    }

    fn set_title(&self, title: &str) {
        Window::set_title(self, title);
    }

    fn set_size(&self, width: u32, height: u32) {
        // The platform may apply the size later and report it through a Resized event.
        let _ = self.request_inner_size(PhysicalSize::new(width, height));
    }

    fn set_position(&self, x: i32, y: i32) {
        self.set_outer_position(PhysicalPosition::new(x, y));
    }

    fn position(&self) -> Option<PhysicalPosition<i32>> {
        self.outer_position().ok()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.inner_size()
    }
}

/// Last known cursor position and mouse button state.
///
/// Every button is tracked on its own. Besides the held set, the buttons that
/// went down or up since the last [`MouseState::end_frame`] are kept, which the
/// application calls after each frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MouseState {
    /// Cursor position relative to the window's client area.
    pub position: PhysicalPosition<f64>,
    pub inside: bool,
    held: HashSet<MouseButton>,
    pressed: HashSet<MouseButton>,
    released: HashSet<MouseButton>,
}

impl MouseState {
    /// Feed a window event. Returns `true` if the event was a mouse event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.move_to(*position),
            WindowEvent::CursorEntered { .. } => self.inside = true,
            WindowEvent::CursorLeft { .. } => self.inside = false,
            WindowEvent::MouseInput { state, button, .. } => self.button(*button, *state),
            _ => return false,
        }
        true
    }

    pub fn move_to(&mut self, position: PhysicalPosition<f64>) {
        self.position = position;
        self.inside = true;
    }

    pub fn button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.held.insert(button) {
                    self.pressed.insert(button);
                }
            }
            ElementState::Released => {
                if self.held.remove(&button) {
                    self.released.insert(button);
                }
            }
        }
    }

    /// Whether `button` is held right now.
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// Whether `button` went down during the current frame.
    pub fn was_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Whether `button` went up during the current frame.
    pub fn was_released(&self, button: MouseButton) -> bool {
        self.released.contains(&button)
    }

    /// Forget this frame's presses and releases. Held buttons stay held.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    /// Cursor position in desktop coordinates, given the window's outer position.
    pub fn global_position(&self, window_origin: PhysicalPosition<i32>) -> PhysicalPosition<f64> {
        PhysicalPosition::new(
            window_origin.x as f64 + self.position.x,
            window_origin.y as f64 + self.position.y,
        )
    }
}
