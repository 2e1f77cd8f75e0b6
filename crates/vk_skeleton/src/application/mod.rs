//! Application lifecycle controller
//!
//! [`Application::run`] sequences the four lifecycle steps in strict order:
//!
//! 1. `init_window` - initialize the window system and create the window
//! 2. `init_vulkan` - hand the window to the graphics backend
//! 3. `main_loop` - poll events until a close request arrives
//! 4. `cleanup` - shut the backend down, destroy the window, terminate the window system
//!
//! Cleanup runs exactly once on every path out of `run` once the window
//! system is up, including backend failures and unwinding (through `Drop`).

use thiserror::Error;

use crate::backend::{BackendError, BackendTarget, GraphicsBackend};
use crate::core::config::WindowConfig;
use crate::platform::{WindowHint, WindowId, WindowSystem, WindowSystemError};

/// Lifecycle states of an [`Application`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing acquired yet
    Uninitialized,
    /// Window system initialized and window created
    WindowReady,
    /// Graphics backend attached to the window
    BackendReady,
    /// Inside the run loop
    Running,
    /// Releasing resources
    Cleanup,
    /// Everything released; the application cannot run again
    Terminated,
}

/// Startup failures
///
/// Every variant is fatal and never retried. The message names the step that
/// failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitializationError {
    /// Window configuration rejected before anything was acquired
    #[error("invalid window configuration: {0}")]
    InvalidConfig(String),

    /// The windowing library could not be initialized
    #[error("failed to initialize windowing system: {0}")]
    WindowSystem(#[source] WindowSystemError),

    /// The window could not be created
    #[error("failed to create {width}x{height} window \"{title}\"")]
    WindowCreation {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested title
        title: String,
    },

    /// The graphics backend could not be set up
    #[error("graphics backend '{backend}' initialization failed: {source}")]
    Backend {
        /// Backend name
        backend: String,
        /// Backend error
        #[source]
        source: BackendError,
    },
}

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Startup failed
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// The backend failed inside the run loop
    #[error("run loop aborted: {0}")]
    Frame(#[source] BackendError),

    /// `run` was called on an application that already ran
    #[error("application already terminated")]
    AlreadyTerminated,
}

/// Lifecycle controller owning one window
pub struct Application<W: WindowSystem, B: GraphicsBackend> {
    window_system: W,
    backend: B,
    config: WindowConfig,
    window: Option<WindowId>,
    state: LifecycleState,
    window_system_live: bool,
    backend_live: bool,
    frames: u64,
}

impl<W: WindowSystem, B: GraphicsBackend> Application<W, B> {
    /// Create an application that will open a window described by `config`
    pub fn new(window_system: W, backend: B, config: WindowConfig) -> Self {
        Self {
            window_system,
            backend,
            config,
            window: None,
            state: LifecycleState::Uninitialized,
            window_system_live: false,
            backend_live: false,
            frames: 0,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// The live window, if any
    pub const fn window(&self) -> Option<WindowId> {
        self.window
    }

    /// Window configuration
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// The window system collaborator
    pub const fn window_system(&self) -> &W {
        &self.window_system
    }

    /// The graphics backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Run-loop iterations that did not observe a close request
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run the whole lifecycle
    ///
    /// Returns once the window was asked to close and every resource is
    /// released.
    ///
    /// # Errors
    ///
    /// - [`AppError::Initialization`] if a startup step fails
    /// - [`AppError::Frame`] if the backend fails inside the run loop
    /// - [`AppError::AlreadyTerminated`] if called a second time
    pub fn run(&mut self) -> Result<(), AppError> {
        if self.state != LifecycleState::Uninitialized {
            return Err(AppError::AlreadyTerminated);
        }

        log::info!("Starting \"{}\"", self.config.title);

        let result = self.start().and_then(|()| self.main_loop());
        self.cleanup();

        match &result {
            Ok(()) => log::info!("\"{}\" closed after {} frames", self.config.title, self.frames),
            Err(e) => log::error!("\"{}\" stopped: {e}", self.config.title),
        }
        result
    }

    fn start(&mut self) -> Result<(), AppError> {
        self.init_window()?;
        self.init_vulkan()?;
        Ok(())
    }

    fn init_window(&mut self) -> Result<(), InitializationError> {
        self.config
            .validate()
            .map_err(InitializationError::InvalidConfig)?;

        self.window_system
            .initialize()
            .map_err(InitializationError::WindowSystem)?;
        self.window_system_live = true;

        self.window_system.window_hint(WindowHint::ClientApiNone);
        self.window_system
            .window_hint(WindowHint::Resizable(self.config.resizable));

        let WindowConfig {
            title,
            width,
            height,
            ..
        } = &self.config;

        let window = self
            .window_system
            .create_window(*width, *height, title)
            .ok_or_else(|| InitializationError::WindowCreation {
                width: *width,
                height: *height,
                title: title.clone(),
            })?;

        self.window = Some(window);
        self.transition(LifecycleState::WindowReady);
        Ok(())
    }

    fn init_vulkan(&mut self) -> Result<(), InitializationError> {
        let Some(window) = self.window else {
            return Ok(());
        };

        let target = BackendTarget {
            window,
            width: self.config.width,
            height: self.config.height,
            required_extensions: self
                .window_system
                .required_instance_extensions()
                .unwrap_or_default(),
        };

        self.backend
            .initialize(&target)
            .map_err(|source| InitializationError::Backend {
                backend: self.backend.name().to_string(),
                source,
            })?;
        self.backend_live = true;

        log::debug!("Backend '{}' ready", self.backend.name());
        self.transition(LifecycleState::BackendReady);
        Ok(())
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        let Some(window) = self.window else {
            return Ok(());
        };
        self.transition(LifecycleState::Running);

        loop {
            self.window_system.poll_events();
            if self.window_system.should_close(window) {
                log::debug!("Close requested");
                return Ok(());
            }

            self.backend.frame().map_err(AppError::Frame)?;
            self.frames += 1;
        }
    }

    /// Release the backend, the window and the window system
    ///
    /// Safe to call any number of times: only the first call releases
    /// anything. Afterwards the application is [`LifecycleState::Terminated`].
    pub fn cleanup(&mut self) {
        if self.state == LifecycleState::Terminated {
            return;
        }
        self.transition(LifecycleState::Cleanup);

        if std::mem::take(&mut self.backend_live) {
            self.backend.shutdown();
        }

        if let Some(window) = self.window.take() {
            self.window_system.destroy_window(window);
        }

        if std::mem::take(&mut self.window_system_live) {
            self.window_system.terminate();
        }

        self.transition(LifecycleState::Terminated);
    }

    fn transition(&mut self, next: LifecycleState) {
        log::debug!("Lifecycle: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl<W: WindowSystem, B: GraphicsBackend> Drop for Application<W, B> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
