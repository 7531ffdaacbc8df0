// SPDX-License-Identifier: MIT
//! Tracing subscriber setup for hosts that don't bring their own.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `filter` is an EnvFilter string ("info", "debug,plotcap=trace"); `format`
/// selects "pretty" (compact human-readable output) or "json" (structured,
/// for log aggregators). Fails if a global subscriber is already installed —
/// embedding applications that configure their own tracing simply skip this.
pub fn init_tracing(filter: &str, format: &str) -> Result<()> {
    let env_filter = EnvFilter::new(filter);
    let result = match format {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .compact()
            .try_init(),
    };
    result.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_once_then_refuses() {
        assert!(init_tracing("info", "pretty").is_ok());
        assert!(init_tracing("debug", "json").is_err());
    }
}
