//! CLI logic for the Vista model viewer.
//!
//! Reads a model, applies the requested visibility, and writes the projected
//! view.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};

use vista::{ViewBuilder, VistaError, session::Action};

/// Run the Vista CLI application
///
/// Without `--show` or `--request` every element is shown. Otherwise the
/// request file's ids come first, followed by the `--show` ids, and the
/// whole list is handled as one `setVisibleElements` request.
///
/// # Errors
///
/// Returns `VistaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Malformed request files
/// - Export errors
pub fn run(args: &Args) -> Result<(), VistaError> {
    info!(
        input_path = args.input,
        shown = args.show.len();
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let format = args.format.unwrap_or(app_config.output().format());

    let source = fs::read_to_string(&args.input)?;

    let builder = ViewBuilder::new(app_config);
    let model = builder.parse(&source)?;
    let mut session = builder.session();

    let submission = match requested_ids(args)? {
        Some(ids) => {
            let action = Action::set_visible_elements(ids);
            builder.apply(&mut session, &model, &action)
        }
        None => builder.submit(&session, &model),
    };

    let output = builder.render(&submission, format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path.as_str(); "View exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Collect the ids to show, or `None` when no visibility was requested.
fn requested_ids(args: &Args) -> Result<Option<Vec<String>>, VistaError> {
    if args.request.is_none() && args.show.is_empty() {
        return Ok(None);
    }

    let mut ids = Vec::new();
    if let Some(path) = &args.request {
        let text = fs::read_to_string(path)?;
        let Action::SetVisibleElements {
            visible_element_ids,
        } = Action::from_toml(&text)?;
        debug!(path = path.as_str(), ids = visible_element_ids.len(); "Loaded request file");
        ids.extend(visible_element_ids);
    }
    ids.extend(args.show.iter().cloned());

    Ok(Some(ids))
}
