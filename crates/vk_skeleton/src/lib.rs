//! # VK Skeleton
//!
//! Window lifecycle skeleton for a Vulkan renderer.
//!
//! ## Features
//!
//! - **Lifecycle Controller**: strict `init_window` → `init_vulkan` → `main_loop` → `cleanup` sequencing
//! - **Windowing Collaborator**: GLFW-backed window system behind the [`platform::WindowSystem`] trait
//! - **Backend Extension Point**: graphics backends plug in through [`backend::GraphicsBackend`]
//! - **Deterministic Testing**: [`platform::ScriptedWindowSystem`] records every collaborator call
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vk_skeleton::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut app = Application::new(GlfwWindowSystem::new(), NullBackend, config.window);
//!     app.run()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod platform;
pub mod backend;

mod application;

pub use application::{AppError, Application, InitializationError, LifecycleState};

/// Common imports for skeleton users
pub mod prelude {
    pub use crate::{
        AppError, Application, InitializationError, LifecycleState,
        backend::{BackendError, BackendTarget, FnBackend, GraphicsBackend, NullBackend},
        config::{Config, ConfigError},
        core::config::{ApplicationConfig, LoggingConfig, WindowConfig},
        platform::{GlfwWindowSystem, ScriptedWindowSystem, WindowHint, WindowId, WindowSystem},
    };
}
