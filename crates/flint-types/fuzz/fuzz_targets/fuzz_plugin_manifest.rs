#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Manifests come from third-party plugin directories; parsing must never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = serde_json::from_str::<flint_types::Plugin>(s);
    }
});
