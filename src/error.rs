#![allow(dead_code)] // UnknownCommand is reserved for the bus decode adapter

//! Unified error types for the HomeSentry control core.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! tick loop's error handling uniform. All variants are `Copy` so they can
//! be passed through the FSM and service without allocation. None of these
//! are fatal: every error is handled locally by the caller branching on it.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Keypad / command input was rejected.
    Input(InputError),
    /// A sensor could not be read or returned out-of-range data.
    Sensor(SensorError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Rejections of inbound keypad digits and commands.
///
/// Note that a wrong-but-well-formed PIN is *not* an error — it drives the
/// failed-attempt path inside the state machine. Only malformed or
/// out-of-place input lands here, and none of it advances the attempt
/// counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Digit value outside 0–9. Buffer and state unchanged.
    InvalidDigit(u8),
    /// Digit submitted when the entry buffer already holds a full PIN.
    BufferFull,
    /// Digit submitted while no authentication window is open.
    DigitNotAccepted,
    /// A forwarded command was not recognized by the decode adapter.
    UnknownCommand,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDigit(d) => write!(f, "digit {d} outside 0-9"),
            Self::BufferFull => write!(f, "PIN buffer full"),
            Self::DigitNotAccepted => write!(f, "no auth window open"),
            Self::UnknownCommand => write!(f, "unknown command"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Reading is outside the physically plausible range.
    OutOfRange,
    /// Sensor has not produced a first reading yet.
    NotReady,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::NotReady => write!(f, "sensor not ready"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
