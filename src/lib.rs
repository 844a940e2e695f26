//! Skycast Library
//!
//! Aggregates a provider's current-conditions reading and 3-hour forecast feed
//! into a rolling hourly view and a 5-day morning/day/evening/night view.

pub mod cli;
pub mod data;
pub mod forecast;
pub mod render;
