//! # homedash
//!
//! Composition root of the terminal dashboard.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the catalog, event bus, state container and services
//! - Inject the mock weather provider and the inert preference store
//! - Parse terminal commands and render dashboard frames
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod command;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod render;
