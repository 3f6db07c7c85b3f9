//! Fuzz target: the PIN entry surface.
//!
//! Feeds arbitrary byte streams to an open authentication countdown and the
//! user registry and verifies that PIN handling never panics and only
//! reports a match when the buffered digits genuinely equal a stored PIN.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - `submit_digit` rejects everything above 9 and never grows the buffer
//!   past the PIN length
//! - `find_by_pin` matches ONLY the exact default PINs
//!
//! cargo fuzz run fuzz_pin_entry

#![no_main]

use libfuzzer_sys::fuzz_target;

use homesentry::auth::{AuthCountdown, UserRegistry};
use homesentry::config::{SystemConfig, PIN_LENGTH};

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig::default();
    let registry = UserRegistry::from_config(&config);
    let mut auth = AuthCountdown::open(1_000, 0);

    for &byte in data {
        let _ = auth.submit_digit(byte);
        assert!(auth.digits().len() <= PIN_LENGTH);

        if auth.is_full() {
            let matched = registry.find_by_pin(auth.digits());
            if let Some(user) = matched {
                let pin: [u8; PIN_LENGTH] = auth.digits().try_into().unwrap();
                assert!(
                    pin == [7, 4, 1, 8] || pin == [0, 1, 2, 3],
                    "matched '{user}' on a PIN that is not provisioned"
                );
            }
            auth.clear_digits();
            let _ = auth.record_failure();
        }
    }
});
