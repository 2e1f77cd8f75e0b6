//! Windowing collaborator
//!
//! The lifecycle controller never talks to a windowing library directly. It
//! drives a [`WindowSystem`], which owns the process-wide windowing state and
//! every native window created through it. Windows are addressed by
//! [`WindowId`], a versioned key: once a window is destroyed its id is stale
//! forever and every operation on it is a no-op.

mod glfw_system;
mod scripted;

pub use glfw_system::GlfwWindowSystem;
pub use scripted::{ScriptedWindowSystem, WindowCall, WindowScript};

use thiserror::Error;

slotmap::new_key_type! {
    /// Opaque identifier of a native window
    pub struct WindowId;
}

/// Creation hints applied to the next window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHint {
    /// Do not create an implicit graphics API context for the window
    ClientApiNone,
    /// Whether the window can be resized by the user
    Resizable(bool),
}

/// Window system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowSystemError {
    /// The underlying windowing library could not be initialized
    #[error("windowing library initialization failed: {0}")]
    InitializationFailed(String),
}

/// Contract between the lifecycle controller and a windowing library
///
/// # Thread Safety
/// Windowing libraries generally require all calls on the main thread, so the
/// trait carries no `Send` bound.
pub trait WindowSystem {
    /// Initialize the process-wide windowing state
    ///
    /// # Errors
    ///
    /// [`WindowSystemError::InitializationFailed`] when the library cannot start.
    fn initialize(&mut self) -> Result<(), WindowSystemError>;

    /// Whether [`initialize`](Self::initialize) succeeded and
    /// [`terminate`](Self::terminate) has not been called since
    fn is_initialized(&self) -> bool;

    /// Set a creation hint for subsequently created windows
    fn window_hint(&mut self, hint: WindowHint);

    /// Create a window, returning `None` on failure or when not initialized
    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<WindowId>;

    /// Process pending OS events
    fn poll_events(&mut self);

    /// Whether a close was requested for the window
    ///
    /// Unknown or destroyed windows always report `true`.
    fn should_close(&self, window: WindowId) -> bool;

    /// Destroy a window. Unknown or already destroyed ids are ignored.
    fn destroy_window(&mut self, window: WindowId);

    /// Release the process-wide windowing state and any window still alive.
    /// Does nothing when not initialized.
    fn terminate(&mut self);

    /// Vulkan instance extensions needed to present to windows of this system
    fn required_instance_extensions(&self) -> Option<Vec<String>>;
}

impl<W: WindowSystem + ?Sized> WindowSystem for &mut W {
    fn initialize(&mut self) -> Result<(), WindowSystemError> {
        (**self).initialize()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn window_hint(&mut self, hint: WindowHint) {
        (**self).window_hint(hint);
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<WindowId> {
        (**self).create_window(width, height, title)
    }

    fn poll_events(&mut self) {
        (**self).poll_events();
    }

    fn should_close(&self, window: WindowId) -> bool {
        (**self).should_close(window)
    }

    fn destroy_window(&mut self, window: WindowId) {
        (**self).destroy_window(window);
    }

    fn terminate(&mut self) {
        (**self).terminate();
    }

    fn required_instance_extensions(&self) -> Option<Vec<String>> {
        (**self).required_instance_extensions()
    }
}
