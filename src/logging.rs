use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const DEFAULT_LOG_FILTER: &str = "warn,pipellm=info";

// Keeps the non-blocking file writer alive for the rest of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Settings {
    format: LogFormat,
    file: Option<PathBuf>,
}

impl Settings {
    fn from_env(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        let format = match get_var("PIPELLM_LOG_FORMAT")
            .as_deref()
            .map(str::trim)
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let file = get_var("PIPELLM_LOG_FILE")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { format, file }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn file_writer(path: &Path) -> std::io::Result<(BoxMakeWriter, WorkerGuard)> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| std::ffi::OsStr::new("pipellm.log"));

    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(writer), guard))
}

fn install(format: LogFormat, writer: BoxMakeWriter) {
    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .try_init(),
    };
    let _ = result;
}

/// Initializes tracing. Logs go to stderr, or to a daily-rolling file when
/// `PIPELLM_LOG_FILE` is set; stdout is reserved for the model reply.
/// `PIPELLM_LOG_FORMAT` selects `pretty` (default) or `json`; `RUST_LOG`
/// overrides the default filter.
pub fn init() {
    let settings = Settings::from_env(|key| env::var(key).ok());

    match settings.file {
        Some(path) => match file_writer(&path) {
            Ok((writer, guard)) => {
                install(settings.format, writer);
                let _ = FILE_GUARD.set(guard);
            }
            Err(err) => {
                eprintln!(
                    "pipellm: failed to open PIPELLM_LOG_FILE at '{}': {}; using stderr instead",
                    path.display(),
                    err
                );
                install(settings.format, BoxMakeWriter::new(std::io::stderr));
            }
        },
        None => install(settings.format, BoxMakeWriter::new(std::io::stderr)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::{LogFormat, Settings};

    fn settings_from_pairs(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Settings::from_env(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_pretty_stderr() {
        let settings = settings_from_pairs(&[]);
        assert_eq!(settings.format, LogFormat::Pretty);
        assert_eq!(settings.file, None);
    }

    #[test]
    fn accepts_json_format() {
        assert_eq!(
            settings_from_pairs(&[("PIPELLM_LOG_FORMAT", " JSON ")]).format,
            LogFormat::Json
        );
    }

    #[test]
    fn unknown_format_falls_back_to_pretty() {
        assert_eq!(
            settings_from_pairs(&[("PIPELLM_LOG_FORMAT", "xml")]).format,
            LogFormat::Pretty
        );
    }

    #[test]
    fn blank_log_file_is_ignored() {
        assert_eq!(settings_from_pairs(&[("PIPELLM_LOG_FILE", "  ")]).file, None);
    }

    #[test]
    fn explicit_log_file_is_preserved() {
        assert_eq!(
            settings_from_pairs(&[("PIPELLM_LOG_FILE", "logs/pipellm.log")]).file,
            Some(PathBuf::from("logs/pipellm.log"))
        );
    }
}
