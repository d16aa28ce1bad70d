//! # homedash-app
//!
//! Application layer — the state container, derived view selectors and
//! **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `WeatherProvider` — current weather for a city
//!   - `KeyValueStore` — optional preference persistence
//!   - `EventPublisher` — fan-out of state events
//! - Own the **application state** (`AppStore`): selected room, per-device
//!   overrides, temperature unit, theme
//! - Provide **selectors**: pure functions deriving what views display
//! - Provide **services**: weather refresh and preference sync
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod selectors;
pub mod services;
pub mod state;
