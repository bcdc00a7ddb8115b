//! Fuzz target: forwarded-body construction for every POST route.
//!
//! Arbitrary bytes are parsed as an inbound JSON body. Whatever parses must
//! either build a body carrying the injected `user_id` or fail cleanly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::{catalogue, forward::forward_body, UserId};

fuzz_target!(|data: &[u8]| {
    let Ok(inbound) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(user) = UserId::new("fuzz-user") else {
        return;
    };
    for route in catalogue::ROUTES.iter().filter(|r| r.has_body()) {
        if let Ok(body) = forward_body(route, &user, Some(&inbound)) {
            assert_eq!(body.get("user_id").and_then(|v| v.as_str()), Some("fuzz-user"));
        }
    }
});
