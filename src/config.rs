/// Application-level constants
pub const APP_NAME: &str = "cdss-risk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable that overrides the log filter.
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Log filter used when `RUST_LOG` is unset or invalid.
/// Debug builds show the per-step posterior diagnostics.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "cdss_risk_lib=debug,warn"
    } else {
        "cdss_risk_lib=info,warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name() {
        assert_eq!(APP_NAME, "cdss-risk");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_filter_targets_this_crate() {
        assert!(default_log_filter().starts_with("cdss_risk_lib="));
    }
}
