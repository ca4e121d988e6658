use std::path::{Path, PathBuf};

/// What to do when the historical CSV cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFallback {
    /// Log a warning and impute from generated rows.
    Synthetic,
    /// Refuse to predict.
    Fail,
}

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub data_dir: PathBuf,
    pub history_fallback: HistoryFallback,
    pub verbose: bool,
    pub server_port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            history_fallback: HistoryFallback::Synthetic,
            verbose: false,
            server_port: 5000,
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl PredictorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("CONGESTION_DATA_DIR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let strict = parse_bool(lookup("CONGESTION_STRICT_HISTORY").as_deref(), false);
        let history_fallback = if strict {
            HistoryFallback::Fail
        } else {
            HistoryFallback::Synthetic
        };

        let verbose = parse_bool(lookup("CONGESTION_VERBOSE").as_deref(), false);

        let server_port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(defaults.server_port);

        let allowed_origins = lookup("CONGESTION_ALLOWED_ORIGINS")
            .map(|value| split_origins(&value))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.allowed_origins);

        Self {
            data_dir,
            history_fallback,
            verbose,
            server_port,
            allowed_origins,
        }
    }

    pub fn set_data_dir(&mut self, dir: impl AsRef<Path>) {
        self.data_dir = dir.as_ref().to_path_buf();
    }

    pub fn set_strict(&mut self, strict: bool) {
        if strict {
            self.history_fallback = HistoryFallback::Fail;
        }
    }

    /// Default log filter for `env_logger`; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}
