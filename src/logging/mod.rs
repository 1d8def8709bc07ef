//! Logging for the dataset preparation pipeline:
//! bracketed formatting and dual file + stdout output.

mod formatter;
mod setup;

pub use setup::setup_logging;
