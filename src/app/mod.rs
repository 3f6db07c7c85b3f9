//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the HomeSentry node:
//! alarm FSM orchestration, PIN authentication, motion evaluation, and
//! environmental sampling cadence. All interaction with hardware and the
//! message bus happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
