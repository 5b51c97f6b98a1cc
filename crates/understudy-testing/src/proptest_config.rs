//! Proptest settings for the session-level property suites.
//!
//! Each case builds a fresh [`Session`](understudy_engine::Session) and
//! replays up to a few dozen calls, so the default case count is lower than
//! proptest's own. `PROPTEST_CASES` overrides it (e.g. `5000` for a nightly
//! run).

use proptest::prelude::*;

/// Cases per property when `PROPTEST_CASES` is unset.
pub const DEFAULT_SESSION_CASES: u32 = 128;

pub fn session_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SESSION_CASES);

    ProptestConfig {
        cases,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    }
}
