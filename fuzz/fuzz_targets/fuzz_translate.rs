//! Fuzz target: upstream response translation.
//!
//! The first two bytes pick the status, the rest is the body. 403 and 404
//! must never leak the upstream body.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::{translate, Translation, UpstreamResponse};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let status = u16::from_be_bytes([data[0], data[1]]) % 600;
    let translation = translate(UpstreamResponse::new(status, &data[2..]));
    match status {
        403 | 404 => assert!(matches!(translation, Translation::Error(_))),
        _ => assert_eq!(translation.status(), status),
    }
});
