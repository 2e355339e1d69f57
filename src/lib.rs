//! Microagents GUI Library
//!
//! Native egui viewer for the microagents loaded into an agent conversation.
//! The main binary is in `src/main.rs`.

pub mod client;
pub mod config;
pub mod error;
pub mod i18n;
pub mod query;
/// Domain and application state
///
/// Microagents, agent run-state, row expansion and host window state.
pub mod state;
/// egui rendering
///
/// The microagents modal, the host window layout and shared widgets.
pub mod ui;
