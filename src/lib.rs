//! HomeSentry node control core.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. Sensor drivers fall back to injectable simulation values on
//! non-target builds, so the whole crate runs on the host.

#![deny(unused_must_use)]

pub mod app;
pub mod auth;
pub mod config;
pub mod events;
pub mod fsm;

pub mod error;

pub mod adapters;
pub mod drivers;
pub mod sensors;
