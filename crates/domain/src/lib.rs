//! # homedash-domain
//!
//! Pure domain model for the homedash smart-home dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (appliances with a category and a default state)
//! - Define **Rooms** (named groupings of devices)
//! - Define the **Catalog** (the fixed, validated set of rooms and devices)
//! - Define **Preferences** (temperature unit, theme)
//! - Define **Weather** and **Energy** value objects
//! - Define **Events** (state-change records)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod clock;

pub mod catalog;
pub mod device;
pub mod energy;
pub mod event;
pub mod preferences;
pub mod room;
pub mod weather;
