//! Build-time client configuration.
//!
//! The WASM bundle has no process environment at runtime, so settings are
//! baked in when the crate is compiled (`FOODSHARE_API_BASE=... trunk build`).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "https://food-donation-platform-qlmd.onrender.com/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Remote REST API root, without a trailing slash.
    pub api_base: String,
}

impl ClientConfig {
    /// Read `FOODSHARE_API_BASE` as captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_api_base(option_env!("FOODSHARE_API_BASE"))
    }

    fn from_api_base(raw: Option<&str>) -> Self {
        let api_base = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_owned();
        Self { api_base }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_api_base(None)
    }
}
