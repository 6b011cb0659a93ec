//! Library crate for crud-console.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST client and wire types (`api`)
//! - Application state, views and the update loop (`app`)
//! - Command line configuration (`config`)
//! - Error and result types (`error`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `crud-console` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{ApiError, Result};
