/// The common module holds the small helpers shared by the scrapers and the logging setup.
use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

/// Removes duplicates while keeping the first occurrence of each element in place.
pub fn uniq<T: Clone + Eq + Hash>(xs: Vec<T>) -> Vec<T> {
    let mut rv = Vec::new();
    let mut seen = HashSet::new();
    for x in xs {
        if seen.insert(x.clone()) {
            rv.push(x);
        }
    }
    rv
}

static LOGGING_INITIALIZED: Mutex<Option<HashSet<Option<String>>>> = Mutex::new(None);

/// Installs the global tracing subscriber. `output` is either `stderr` or `file`; the log file is
/// written to the platform state directory. Calling this twice for the same logger is a no-op.
pub fn initialize_logging(logger_name: Option<&str>, output: &str) -> anyhow::Result<()> {
    {
        let mut initialized = LOGGING_INITIALIZED.lock().map_err(|_| anyhow::anyhow!("Logging state poisoned"))?;
        let initialized = initialized.get_or_insert_with(HashSet::new);
        if !initialized.insert(logger_name.map(|s| s.to_string())) {
            return Ok(());
        }
    }

    let log_despite_testing = std::env::var("LOG_TEST").is_ok();
    let is_testing = std::env::var("CARGO_TEST").is_ok();
    if is_testing && !log_despite_testing {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match output {
        "stderr" => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(!log_despite_testing)
                .with_line_number(log_despite_testing)
                .with_file(log_despite_testing)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "file" => {
            let proj_dirs = ProjectDirs::from("", "", "lyricwiki")
                .ok_or_else(|| anyhow::anyhow!("Failed to get project directories"))?;
            let log_dir = proj_dirs.state_dir().unwrap_or(proj_dirs.cache_dir());
            fs::create_dir_all(log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .max_log_files(10)
                .filename_prefix("lyricwiki")
                .filename_suffix("log")
                .build(log_dir)?;

            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        other => anyhow::bail!("Unknown log output {other}: expected stderr or file"),
    }

    Ok(())
}
