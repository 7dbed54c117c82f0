//! Terminal client for the AnalytiCore text-analysis service.
//!
//! The library exposes the HTTP wrapper, the poller, and the presentation
//! layers; `main.rs` wires them to clap subcommands and the TUI.

pub mod api;
pub mod display;
pub mod formatting;
pub mod models;
pub mod poller;
pub mod tui;
