//! In-progress authentication attempt.
//!
//! Created when the machine enters `AuthCountdown`, discarded on exit.
//! Holds the entered-digit buffer, the absolute deadline tick, and the
//! failed-attempt count carried across repeated window entries within one
//! arming cycle. No threading of its own — the FSM drives it synchronously.

use heapless::Vec;

use crate::config::PIN_LENGTH;
use crate::error::{InputError, Result};

/// State of one open authentication window.
#[derive(Debug, Clone)]
pub struct AuthCountdown {
    /// Entered digits, 0..PIN_LENGTH.
    digits: Vec<u8, PIN_LENGTH>,
    /// Absolute tick at which the window expires.
    deadline_tick: u64,
    /// Wrong full-length submissions so far in this arming cycle.
    failed_attempts: u8,
}

impl AuthCountdown {
    /// Open a window expiring at `deadline_tick`, carrying the
    /// failed-attempt count from earlier windows in the same arming cycle
    /// (0 on a fresh cycle).
    pub fn open(deadline_tick: u64, carried_attempts: u8) -> Self {
        Self {
            digits: Vec::new(),
            deadline_tick,
            failed_attempts: carried_attempts,
        }
    }

    /// Append one keypad digit.
    ///
    /// Rejects values outside 0–9 and appends past a full buffer; neither
    /// rejection touches existing digits or the attempt counter.
    pub fn submit_digit(&mut self, digit: u8) -> Result<()> {
        if digit > 9 {
            return Err(InputError::InvalidDigit(digit).into());
        }
        self.digits
            .push(digit)
            .map_err(|_| InputError::BufferFull)?;
        Ok(())
    }

    /// Whether the buffer holds a complete PIN.
    pub fn is_full(&self) -> bool {
        self.digits.len() == PIN_LENGTH
    }

    /// The digits entered so far.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Discard entered digits (after a wrong full-length submission).
    pub fn clear_digits(&mut self) {
        self.digits.clear();
    }

    /// Record one wrong full-length submission; returns the new count.
    pub fn record_failure(&mut self) -> u8 {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.failed_attempts
    }

    /// Wrong submissions so far in this arming cycle.
    pub fn failed_attempts(&self) -> u8 {
        self.failed_attempts
    }

    /// Whether the window deadline has passed at `now_tick`.
    pub fn is_elapsed(&self, now_tick: u64) -> bool {
        now_tick >= self.deadline_tick
    }
}
