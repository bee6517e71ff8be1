//! # Connect Four
//!
//! A two-player Connect Four engine on a configurable grid, with a terminal UI
//! built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, seats and players, game session
//! - [`ui`] — Terminal UI: board view and key handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
