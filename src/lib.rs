//! Feedline - a terminal client for social timelines
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod controller;
pub mod error;
pub mod models;
pub mod render;
pub mod startup;
pub mod traits;
pub mod ui;
