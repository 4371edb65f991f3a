//! Layered configuration: a TOML profile picked by build mode, overridable
//! on the command line.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
