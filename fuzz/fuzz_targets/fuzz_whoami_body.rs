//! Fuzz target: whoami response parsing.
//!
//! Identity responses come from another service; a broken body must be
//! rejected, never panic, and never yield an empty user id.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(user) = relay_client::parse_identity(data) {
        assert!(!user.as_str().is_empty());
    }
});
