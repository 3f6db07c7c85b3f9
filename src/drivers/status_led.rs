//! RGB status LED driver.
//!
//! Tracks the last commanded colour. On the target board the three
//! channels drive PWM outputs; on the host the state is in-memory only.

pub struct StatusLed {
    current: (u8, u8, u8),
}

impl StatusLed {
    pub fn new() -> Self {
        Self { current: (0, 0, 0) }
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) {
        self.current = (r, g, b);
    }

    pub fn off(&mut self) {
        self.set_colour(0, 0, 0);
    }

    pub fn current_colour(&self) -> (u8, u8, u8) {
        self.current
    }
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}
