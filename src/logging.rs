// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MONEYDASH_LOG";

/// Installs the stderr subscriber. `MONEYDASH_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose {
        "moneydash=debug"
    } else {
        "moneydash=warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // ignore a second init from tests or embedding callers
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
