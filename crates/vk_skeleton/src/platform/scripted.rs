//! Scripted window system
//!
//! An in-memory [`WindowSystem`] that never touches the OS. It follows a
//! [`WindowScript`] (which steps fail, when a close request arrives) and
//! records every call in order, so lifecycle behavior can be asserted without
//! a display.

use std::cell::RefCell;

use slotmap::SlotMap;

use super::{WindowHint, WindowId, WindowSystem, WindowSystemError};

/// A call made on a [`ScriptedWindowSystem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCall {
    /// `initialize`
    Initialize,
    /// `window_hint`
    WindowHint(WindowHint),
    /// `create_window`
    CreateWindow {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested title
        title: String,
    },
    /// `poll_events`
    PollEvents,
    /// `should_close`, with the answer given
    ShouldClose(bool),
    /// `destroy_window`
    DestroyWindow,
    /// `terminate`
    Terminate,
}

/// Behavior of a [`ScriptedWindowSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowScript {
    /// Make `initialize` fail
    pub fail_initialize: bool,
    /// Make `create_window` return `None`
    pub fail_create_window: bool,
    /// Raise a close request on every window once this many polls happened.
    /// `None` never closes.
    pub close_after_polls: Option<usize>,
}

impl WindowScript {
    /// Everything succeeds and the close request arrives with the first poll
    pub const fn new() -> Self {
        Self {
            fail_initialize: false,
            fail_create_window: false,
            close_after_polls: Some(1),
        }
    }

    /// Fail windowing initialization
    #[must_use]
    pub const fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    /// Fail window creation
    #[must_use]
    pub const fn failing_window_creation(mut self) -> Self {
        self.fail_create_window = true;
        self
    }

    /// Raise the close request after `polls` polls
    #[must_use]
    pub const fn close_after_polls(mut self, polls: usize) -> Self {
        self.close_after_polls = Some(polls);
        self
    }

    /// Never raise a close request on its own
    #[must_use]
    pub const fn never_close(mut self) -> Self {
        self.close_after_polls = None;
        self
    }
}

impl Default for WindowScript {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct ScriptedWindow {
    close_requested: bool,
}

/// Deterministic window system for tests
#[derive(Debug, Default)]
pub struct ScriptedWindowSystem {
    script: WindowScript,
    initialized: bool,
    windows: SlotMap<WindowId, ScriptedWindow>,
    polls: usize,
    calls: RefCell<Vec<WindowCall>>,
    init_cycles: usize,
    ignored_destroys: usize,
    ignored_terminates: usize,
}

impl ScriptedWindowSystem {
    /// Create a window system following `script`
    pub fn new(script: WindowScript) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<WindowCall> {
        self.calls.borrow().clone()
    }

    /// How many times `call` was received
    pub fn call_count(&self, call: &WindowCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Number of `poll_events` calls received
    pub fn poll_count(&self) -> usize {
        self.call_count(&WindowCall::PollEvents)
    }

    /// Number of `create_window` calls received
    pub fn create_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, WindowCall::CreateWindow { .. }))
            .count()
    }

    fn record(&self, call: WindowCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Number of completed `initialize` calls
    pub const fn init_cycles(&self) -> usize {
        self.init_cycles
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// `destroy_window` calls that referred to no live window
    pub const fn ignored_destroys(&self) -> usize {
        self.ignored_destroys
    }

    /// `terminate` calls made while not initialized
    pub const fn ignored_terminates(&self) -> usize {
        self.ignored_terminates
    }

    /// Raise a close request on a window, as the user clicking its close button
    pub fn request_close(&mut self, window: WindowId) {
        if let Some(entry) = self.windows.get_mut(window) {
            entry.close_requested = true;
        }
    }

    /// Replace the script, e.g. to fail the next cycle
    pub fn set_script(&mut self, script: WindowScript) {
        self.script = script;
    }
}

impl WindowSystem for ScriptedWindowSystem {
    fn initialize(&mut self) -> Result<(), WindowSystemError> {
        self.record(WindowCall::Initialize);

        if self.script.fail_initialize {
            return Err(WindowSystemError::InitializationFailed(
                "scripted initialization failure".to_string(),
            ));
        }

        self.initialized = true;
        self.polls = 0;
        self.init_cycles += 1;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn window_hint(&mut self, hint: WindowHint) {
        self.record(WindowCall::WindowHint(hint));
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<WindowId> {
        self.record(WindowCall::CreateWindow {
            width,
            height,
            title: title.to_string(),
        });

        if !self.initialized || self.script.fail_create_window {
            return None;
        }

        Some(self.windows.insert(ScriptedWindow {
            close_requested: false,
        }))
    }

    fn poll_events(&mut self) {
        self.record(WindowCall::PollEvents);
        self.polls += 1;

        if self.script.close_after_polls.is_some_and(|n| self.polls >= n) {
            for (_, window) in &mut self.windows {
                window.close_requested = true;
            }
        }
    }

    fn should_close(&self, window: WindowId) -> bool {
        let close = self
            .windows
            .get(window)
            .map_or(true, |entry| entry.close_requested);
        self.record(WindowCall::ShouldClose(close));
        close
    }

    fn destroy_window(&mut self, window: WindowId) {
        self.record(WindowCall::DestroyWindow);
        if self.windows.remove(window).is_none() {
            self.ignored_destroys += 1;
        }
    }

    fn terminate(&mut self) {
        self.record(WindowCall::Terminate);
        if !self.initialized {
            self.ignored_terminates += 1;
            return;
        }

        self.windows.clear();
        self.initialized = false;
    }

    fn required_instance_extensions(&self) -> Option<Vec<String>> {
        self.initialized.then(|| vec!["VK_KHR_surface".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut system = ScriptedWindowSystem::new(WindowScript::new());
        system.initialize().unwrap();
        system.window_hint(WindowHint::ClientApiNone);
        let window = system.create_window(800, 600, "Ch00BaseCode").unwrap();
        system.poll_events();
        assert!(system.should_close(window));
        system.destroy_window(window);
        system.terminate();

        assert_eq!(
            system.calls(),
            vec![
                WindowCall::Initialize,
                WindowCall::WindowHint(WindowHint::ClientApiNone),
                WindowCall::CreateWindow {
                    width: 800,
                    height: 600,
                    title: "Ch00BaseCode".to_string(),
                },
                WindowCall::PollEvents,
                WindowCall::ShouldClose(true),
                WindowCall::DestroyWindow,
                WindowCall::Terminate,
            ]
        );
    }

    #[test]
    fn test_close_after_polls() {
        let mut system = ScriptedWindowSystem::new(WindowScript::new().close_after_polls(3));
        system.initialize().unwrap();
        let window = system.create_window(1, 1, "t").unwrap();

        system.poll_events();
        system.poll_events();
        assert!(!system.should_close(window));
        system.poll_events();
        assert!(system.should_close(window));
    }

    #[test]
    fn test_manual_close_request() {
        let mut system = ScriptedWindowSystem::new(WindowScript::new().never_close());
        system.initialize().unwrap();
        let window = system.create_window(1, 1, "t").unwrap();

        system.poll_events();
        assert!(!system.should_close(window));
        system.request_close(window);
        assert!(system.should_close(window));
    }

    #[test]
    fn test_scripted_failures() {
        let mut system = ScriptedWindowSystem::new(WindowScript::new().failing_initialize());
        assert!(system.initialize().is_err());
        assert!(!system.is_initialized());
        assert_eq!(system.init_cycles(), 0);

        let mut system = ScriptedWindowSystem::new(WindowScript::new().failing_window_creation());
        system.initialize().unwrap();
        assert!(system.create_window(1, 1, "t").is_none());
        assert_eq!(system.window_count(), 0);
    }

    #[test]
    fn test_create_window_requires_initialization() {
        let mut system = ScriptedWindowSystem::new(WindowScript::new());
        assert!(system.create_window(1, 1, "t").is_none());
    }

    #[test]
    fn test_destroyed_window_is_stale() {
        let mut system = ScriptedWindowSystem::new(WindowScript::new().never_close());
        system.initialize().unwrap();
        let first = system.create_window(1, 1, "t").unwrap();
        system.destroy_window(first);
        let second = system.create_window(1, 1, "t").unwrap();

        assert_ne!(first, second);
        assert!(system.should_close(first));
        assert!(!system.should_close(second));

        system.destroy_window(first);
        assert_eq!(system.ignored_destroys(), 1);
        assert_eq!(system.window_count(), 1);
    }

    #[test]
    fn test_repeated_init_terminate_cycles() {
        let mut system = ScriptedWindowSystem::new(WindowScript::new());

        for _ in 0..3 {
            system.initialize().unwrap();
            assert!(system.required_instance_extensions().is_some());
            system.create_window(1, 1, "t").unwrap();
            system.terminate();
            assert!(!system.is_initialized());
            assert_eq!(system.window_count(), 0);
        }

        system.terminate();
        assert_eq!(system.init_cycles(), 3);
        assert_eq!(system.ignored_terminates(), 1);
        assert!(system.required_instance_extensions().is_none());
    }
}
