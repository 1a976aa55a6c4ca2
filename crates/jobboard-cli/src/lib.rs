//! JobBoard command-line client.
//!
//! Each subcommand is a view: it resolves its route through the session
//! router, calls the resource clients, and renders the result.

pub mod app;
pub mod cli;
pub mod logging;
pub mod views;

pub use app::App;
pub use cli::{Cli, Command};
