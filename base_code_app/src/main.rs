//! Base code chapter: open an 800x600 window and keep it alive until closed
//!
//! No rendering happens yet; the graphics backend is the no-op [`NullBackend`].

use vk_skeleton::foundation::logging;
use vk_skeleton::prelude::*;

fn main() {
    let config = ApplicationConfig::default();
    logging::init(&config.logging);

    log::info!("Starting base code application");

    let mut app = Application::new(GlfwWindowSystem::new(), NullBackend, config.window);
    if let Err(e) = app.run() {
        log::error!("Application error: {e}");
        eprintln!("Application error: {e}");
        drop(app);
        std::process::exit(1);
    }
}
