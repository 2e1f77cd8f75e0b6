//! GLFW-based window system
//!
//! Holds the GLFW library handle as explicit state: `None` until
//! [`initialize`](WindowSystem::initialize), and `None` again after
//! [`terminate`](WindowSystem::terminate). Windows live in a slot map keyed by
//! [`WindowId`], so a destroyed window's id can never alias a new one.

use slotmap::SlotMap;

use super::{WindowHint, WindowId, WindowSystem, WindowSystemError};

struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// GLFW window system
#[derive(Default)]
pub struct GlfwWindowSystem {
    glfw: Option<glfw::Glfw>,
    windows: SlotMap<WindowId, GlfwWindow>,
}

impl GlfwWindowSystem {
    /// Create an uninitialized window system
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of windows currently alive
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn to_glfw_hint(hint: WindowHint) -> glfw::WindowHint {
        match hint {
            WindowHint::ClientApiNone => glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi),
            WindowHint::Resizable(resizable) => glfw::WindowHint::Resizable(resizable),
        }
    }
}

impl WindowSystem for GlfwWindowSystem {
    fn initialize(&mut self) -> Result<(), WindowSystemError> {
        if self.glfw.is_some() {
            log::warn!("GLFW already initialized");
            return Ok(());
        }

        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowSystemError::InitializationFailed(format!("{e:?}")))?;

        log::debug!("GLFW initialized");
        self.glfw = Some(glfw);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.glfw.is_some()
    }

    fn window_hint(&mut self, hint: WindowHint) {
        match self.glfw.as_mut() {
            Some(glfw) => glfw.window_hint(Self::to_glfw_hint(hint)),
            None => log::warn!("Ignoring window hint {hint:?}: GLFW not initialized"),
        }
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<WindowId> {
        let Some(glfw) = self.glfw.as_mut() else {
            log::warn!("Cannot create window: GLFW not initialized");
            return None;
        };

        let (mut window, events) =
            glfw.create_window(width, height, title, glfw::WindowMode::Windowed)?;
        window.set_close_polling(true);

        let id = self.windows.insert(GlfwWindow { window, events });
        log::debug!("Created GLFW window {id:?} ({width}x{height}, \"{title}\")");
        Some(id)
    }

    fn poll_events(&mut self) {
        let Some(glfw) = self.glfw.as_mut() else {
            return;
        };
        glfw.poll_events();

        for (id, entry) in &self.windows {
            for (_, event) in glfw::flush_messages(&entry.events) {
                log::trace!("Window {id:?} event: {event:?}");
            }
        }
    }

    fn should_close(&self, window: WindowId) -> bool {
        self.windows
            .get(window)
            .map_or(true, |entry| entry.window.should_close())
    }

    fn destroy_window(&mut self, window: WindowId) {
        // Dropping the PWindow destroys the native window
        if self.windows.remove(window).is_some() {
            log::debug!("Destroyed GLFW window {window:?}");
        } else {
            log::debug!("Window {window:?} already destroyed");
        }
    }

    fn terminate(&mut self) {
        if self.glfw.is_none() {
            log::debug!("GLFW not initialized, nothing to terminate");
            return;
        }

        // Windows must go before the library handle they belong to
        self.windows.clear();
        self.glfw = None;
        log::debug!("GLFW terminated");
    }

    fn required_instance_extensions(&self) -> Option<Vec<String>> {
        self.glfw.as_ref()?.get_required_instance_extensions()
    }
}

impl Drop for GlfwWindowSystem {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // None of these touch the GLFW library, so they run without a display.

    #[test]
    fn test_uninitialized_state() {
        let system = GlfwWindowSystem::new();

        assert!(!system.is_initialized());
        assert_eq!(system.window_count(), 0);
        assert!(system.required_instance_extensions().is_none());
    }

    #[test]
    fn test_create_window_requires_initialization() {
        let mut system = GlfwWindowSystem::new();
        system.window_hint(WindowHint::ClientApiNone);

        assert!(system.create_window(800, 600, "Ch00BaseCode").is_none());
        assert_eq!(system.window_count(), 0);
    }

    #[test]
    fn test_unknown_window_reports_close() {
        let system = GlfwWindowSystem::new();
        assert!(system.should_close(WindowId::default()));
    }

    #[test]
    fn test_teardown_without_initialization_is_noop() {
        let mut system = GlfwWindowSystem::new();
        system.poll_events();
        system.destroy_window(WindowId::default());
        system.terminate();
        system.terminate();

        assert!(!system.is_initialized());
    }

    #[test]
    fn test_hint_translation() {
        assert!(matches!(
            GlfwWindowSystem::to_glfw_hint(WindowHint::ClientApiNone),
            glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi)
        ));
        assert!(matches!(
            GlfwWindowSystem::to_glfw_hint(WindowHint::Resizable(false)),
            glfw::WindowHint::Resizable(false)
        ));
    }
}
