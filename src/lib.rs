//! formwork
//!
//! Composable terminal forms. The engine lives in the workspace crates; this
//! crate is the demo application that exercises it end to end.

pub mod demo;
pub mod settings;

pub use demo::{Demo, Services, Status};
pub use settings::{load_settings, Settings};

use formwork_core::prelude::*;

/// Run the connection demo until it finishes or is cancelled.
///
/// Returns the last rendered view so the caller can print it once the
/// terminal is restored.
pub fn run(settings: &Settings) -> Result<String> {
    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the UI owns stdout)
    formwork_core::logging::init()?;

    let mut demo = Demo::new(settings, Services::default());
    let result = formwork_tui::run(&mut demo);

    match &result {
        Ok(_) => info!("formwork demo exiting: {:?}", demo.status()),
        Err(e) if e.is_fatal() => error!("Fatal error: {:?}", e),
        Err(e) => error!("Application error: {:?}", e),
    }
    result
}
