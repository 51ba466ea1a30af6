use std::path::Path;

use anyhow::{Context as _, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use settings_search_api::{CallerId, SharedExecutor};

/// Environment prefix recognised by [`SearchSettings::load`], e.g.
/// `SETTINGS_SEARCH_WORKER_THREADS=4`.
const ENV_PREFIX: &str = "SETTINGS_SEARCH";

/// Tunable configuration for the search feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Package name the feature treats as its own when checking callers.
    pub package: String,
    /// External callers allowed to open the search page, as
    /// `package/component` specs.
    pub allowed_callers: Vec<String>,
    /// Worker threads backing the shared executor.
    pub worker_threads: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            package: "com.settings".into(),
            allowed_callers: Vec::new(),
            worker_threads: SharedExecutor::DEFAULT_WORKERS,
        }
    }
}

impl SearchSettings {
    /// Load settings by layering an optional file and environment variables
    /// (highest precedence) over the defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let sources = builder
            .build()
            .context("failed to assemble search settings sources")?;
        sources
            .try_deserialize()
            .context("failed to deserialize search settings")
    }

    /// The allowlist parsed into caller identities; malformed specs are
    /// skipped rather than failing the load.
    #[must_use]
    pub fn allowed_caller_ids(&self) -> Vec<CallerId> {
        self.allowed_callers
            .iter()
            .filter_map(|spec| CallerId::parse(spec))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::io::Write as _;
    use std::sync::Mutex;

    use super::*;

    // Serializes the tests that read or mutate SETTINGS_SEARCH_* variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_apply_without_any_sources() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let settings = SearchSettings::load(None).expect("load defaults");
        assert_eq!(settings, SearchSettings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create settings file");
        writeln!(
            file,
            "package = \"org.example.settings\"\n\
             allowed_callers = [\"com.vendor.app/SearchEntry\", \"broken-spec\"]\n\
             worker_threads = 4"
        )
        .expect("write settings file");

        let settings = SearchSettings::load(Some(file.path())).expect("load from file");
        assert_eq!(settings.package, "org.example.settings");
        assert_eq!(settings.worker_threads, 4);
        assert_eq!(
            settings.allowed_caller_ids(),
            vec![CallerId::new("com.vendor.app", "SearchEntry")]
        );
    }

    #[test]
    fn environment_overrides_file_values() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create settings file");
        writeln!(
            file,
            "package = \"org.example.settings\"\nworker_threads = 4"
        )
        .expect("write settings file");

        // SAFETY: Adjusting the override variable for the duration of this
        // test; the env lock keeps other settings tests from observing it.
        unsafe {
            env::set_var("SETTINGS_SEARCH_WORKER_THREADS", "9");
        }
        let loaded = SearchSettings::load(Some(file.path()));
        unsafe {
            env::remove_var("SETTINGS_SEARCH_WORKER_THREADS");
        }

        let settings = loaded.expect("load with env override");
        assert_eq!(settings.worker_threads, 9);
        assert_eq!(settings.package, "org.example.settings");
    }

    #[test]
    fn partial_files_keep_defaults_for_the_rest() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create settings file");
        writeln!(file, "worker_threads = 8").expect("write settings file");

        let settings = SearchSettings::load(Some(file.path())).expect("load from file");
        assert_eq!(settings.worker_threads, 8);
        assert_eq!(settings.package, SearchSettings::default().package);
        assert!(settings.allowed_callers.is_empty());
    }
}
