//! Shared test utilities for integration tests
//!
//! Environment isolation for configuration tests and a small builder for
//! configurations that point at a fake API server.

use colab::config::ColabConfig;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes every test that reads or writes process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "COLAB_ENV",
    "COLAB_API__BASE_URL",
    "COLAB_EXPORT__SCALE",
    "COLAB_EXPORT__MARGIN_MM",
    "COLAB_LOGGING__LEVEL",
];

/// Environment variable state to restore after test
struct EnvState(Vec<(&'static str, Option<String>)>);

impl EnvState {
    fn capture() -> Self {
        Self(
            ISOLATED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        )
    }

    fn restore(self) {
        for (name, value) in self.0 {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with `XDG_CONFIG_HOME` and `HOME` inside `test_dir` and every
/// `COLAB_*` override cleared. The original environment is restored afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let config_home = test_dir.path().join("xdg");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&home).unwrap();

    for name in ISOLATED_VARS {
        std::env::remove_var(name);
    }
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    env_state.restore();

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Configuration aimed at `base_url`, exporting into `output_dir`.
pub fn config_for(base_url: &str, output_dir: &Path) -> ColabConfig {
    let mut config = ColabConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.request_timeout_secs = 10;
    config.export.output_dir = output_dir.to_path_buf();
    config.logging.color = false;
    config
}
