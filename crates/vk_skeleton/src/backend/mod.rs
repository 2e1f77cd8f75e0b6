//! Graphics backend extension point
//!
//! The lifecycle controller calls into a [`GraphicsBackend`] once the window
//! exists (`init_vulkan`), once per run-loop iteration, and once during
//! cleanup. The skeleton ships only [`NullBackend`]; a Vulkan backend replaces
//! it without touching the controller.

use thiserror::Error;

use crate::platform::WindowId;

/// Graphics backend errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend setup failed
    #[error("backend setup failed: {0}")]
    Setup(String),

    /// A frame could not be produced
    #[error("frame failed: {0}")]
    Frame(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// What a backend needs to know about the window it renders to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    /// Window to present to
    pub window: WindowId,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Instance extensions the window system requires for presentation
    pub required_extensions: Vec<String>,
}

/// Graphics backend plugged into the lifecycle controller
pub trait GraphicsBackend {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Set up the backend for `target`
    ///
    /// Called exactly once, after the window is created and before the run loop.
    ///
    /// # Errors
    ///
    /// Any error aborts startup; the window is still cleaned up.
    fn initialize(&mut self, target: &BackendTarget) -> BackendResult<()>;

    /// Produce one frame. Called once per run-loop iteration.
    ///
    /// # Errors
    ///
    /// Any error ends the run loop; cleanup still runs.
    fn frame(&mut self) -> BackendResult<()> {
        Ok(())
    }

    /// Release backend resources. Called during cleanup, before the window is
    /// destroyed, and only if [`initialize`](Self::initialize) succeeded.
    fn shutdown(&mut self) {}
}

/// Backend that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl GraphicsBackend for NullBackend {
    fn name(&self) -> &str {
        "null"
    }

    fn initialize(&mut self, target: &BackendTarget) -> BackendResult<()> {
        log::debug!(
            "Null backend attached to {}x{} window",
            target.width,
            target.height
        );
        Ok(())
    }
}

/// Backend whose setup is a closure
pub struct FnBackend<F> {
    name: String,
    init: F,
}

impl<F> FnBackend<F>
where
    F: FnMut(&BackendTarget) -> BackendResult<()>,
{
    /// Wrap `init` as a backend called `name`
    pub fn new(name: impl Into<String>, init: F) -> Self {
        Self {
            name: name.into(),
            init,
        }
    }
}

impl<F> GraphicsBackend for FnBackend<F>
where
    F: FnMut(&BackendTarget) -> BackendResult<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, target: &BackendTarget) -> BackendResult<()> {
        (self.init)(target)
    }
}

impl<B: GraphicsBackend + ?Sized> GraphicsBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initialize(&mut self, target: &BackendTarget) -> BackendResult<()> {
        (**self).initialize(target)
    }

    fn frame(&mut self) -> BackendResult<()> {
        (**self).frame()
    }

    fn shutdown(&mut self) {
        (**self).shutdown();
    }
}

impl<B: GraphicsBackend + ?Sized> GraphicsBackend for &mut B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initialize(&mut self, target: &BackendTarget) -> BackendResult<()> {
        (**self).initialize(target)
    }

    fn frame(&mut self) -> BackendResult<()> {
        (**self).frame()
    }

    fn shutdown(&mut self) {
        (**self).shutdown();
    }
}
