use crate::config::{LoggingConfig, Section};
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

use file_rotate::{
    compression::Compression,
    suffix::AppendCount,
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// `None` means "off". Unknown strings fall back to INFO.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" | "" => None,
        _ => Some(LevelFilter::INFO),
    }
}

// -------- rotating file writer --------

#[derive(Clone)]
struct RotatingWriter(Arc<Mutex<FileRotate<AppendCount>>>);

impl<'a> MakeWriter<'a> for RotatingWriter {
    type Writer = RotatingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingHandle(self.0.clone())
    }
}

struct RotatingHandle(Arc<Mutex<FileRotate<AppendCount>>>);

impl Write for RotatingHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .flush()
    }
}

/// Relative log paths live under the home directory.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn open_rotating_writer(path: &Path, section: &Section) -> std::io::Result<RotatingWriter> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);

    let rotate = FileRotate::new(
        path,
        AppendCount::new(backups),
        ContentLimit::BytesSurpassed(max_bytes as usize),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(RotatingWriter(Arc::new(Mutex::new(rotate))))
}

// -------- filters --------

/// Console filter: the default section's level for everything, overridden per target.
fn console_targets(cfg: &LoggingConfig) -> Targets {
    let default_level = cfg
        .get(DEFAULT_SECTION)
        .and_then(|s| parse_level(&s.console_level))
        .unwrap_or(LevelFilter::OFF);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(
            Targets::new().with_default(default_level),
            |targets, (name, section)| {
                let level = parse_level(&section.console_level).unwrap_or(LevelFilter::OFF);
                targets.with_target(name.clone(), level)
            },
        )
}

/// File filter for one section. The default file excludes targets that have a file of their own.
fn file_targets(cfg: &LoggingConfig, name: &str, section: &Section) -> Targets {
    let level = parse_level(&section.file_level).unwrap_or(LevelFilter::OFF);

    if name != DEFAULT_SECTION {
        return Targets::new()
            .with_default(LevelFilter::OFF)
            .with_target(name.to_string(), level);
    }

    cfg.iter()
        .filter(|(other, s)| other.as_str() != DEFAULT_SECTION && !s.file.trim().is_empty())
        .fold(Targets::new().with_default(level), |targets, (other, _)| {
            targets.with_target(other.clone(), LevelFilter::OFF)
        })
}

fn file_layers(cfg: &LoggingConfig, base_dir: &Path) -> Vec<BoxedLayer> {
    let mut layers = Vec::new();
    for (name, section) in cfg {
        if section.file.trim().is_empty() {
            continue;
        }
        let path = resolve_log_path(&section.file, base_dir);
        match open_rotating_writer(&path, section) {
            Ok(writer) => layers.push(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .with_writer(writer)
                    .with_filter(file_targets(cfg, name, section))
                    .boxed(),
            ),
            Err(e) => eprintln!(
                "Failed to open log file '{}' for section '{}': {}",
                path.display(),
                name,
                e
            ),
        }
    }
    layers
}

/// Install the global subscriber.
///
/// `base_dir` (normally `server.home_dir`) anchors relative log file paths.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // sqlx and sea-orm log through `log`
    let _ = tracing_log::LogTracer::init();

    let ansi = atty::is(atty::Stream::Stdout);
    let mut layers: Vec<BoxedLayer> = vec![fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(cfg))
        .boxed()];
    layers.extend(file_layers(cfg, base_dir));

    let _ = Registry::default().with(layers).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    fn section(console: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console.into(),
            file: file.into(),
            file_level: file_level.into(),
            max_backups: Some(2),
            max_size_mb: Some(1),
        }
    }

    #[test]
    fn level_parsing() {
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level(" Warn "), Some(LevelFilter::WARN));
        assert_eq!(parse_level("off"), None);
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("loud"), Some(LevelFilter::INFO));
    }

    #[test]
    fn console_filter_applies_per_target_overrides() {
        let mut cfg = default_logging_config();
        cfg.insert("sqlx".into(), section("warn", "", ""));

        let targets = console_targets(&cfg);
        assert!(targets.would_enable("recipes::domain", &tracing::Level::INFO));
        assert!(!targets.would_enable("recipes::domain", &tracing::Level::DEBUG));
        assert!(!targets.would_enable("sqlx::query", &tracing::Level::INFO));
        assert!(targets.would_enable("sqlx::query", &tracing::Level::WARN));
    }

    #[test]
    fn default_file_skips_targets_with_own_file() {
        let mut cfg = default_logging_config();
        cfg.insert("recipes".into(), section("info", "logs/recipes.log", "debug"));

        let default = file_targets(&cfg, DEFAULT_SECTION, &cfg[DEFAULT_SECTION]);
        assert!(default.would_enable("foodgram_server", &tracing::Level::DEBUG));
        assert!(!default.would_enable("recipes::api", &tracing::Level::ERROR));

        let own = file_targets(&cfg, "recipes", &cfg["recipes"]);
        assert!(own.would_enable("recipes::api", &tracing::Level::DEBUG));
        assert!(!own.would_enable("foodgram_server", &tracing::Level::ERROR));
    }

    #[test]
    fn relative_log_paths_resolve_under_base_dir() {
        let tmp = tempdir().unwrap();
        let resolved = resolve_log_path("logs/test.log", tmp.path());
        assert!(resolved.starts_with(tmp.path()));
        assert!(resolved.ends_with("logs/test.log"));

        let absolute = tmp.path().join("abs.log");
        assert_eq!(
            resolve_log_path(&absolute.to_string_lossy(), Path::new("/elsewhere")),
            absolute
        );
    }

    #[test]
    fn rotating_writer_creates_parent_dirs() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested/dir/app.log");

        let writer = open_rotating_writer(&path, &section("info", "x", "debug"));
        assert!(writer.is_ok());
        assert!(path.parent().unwrap().exists());
    }
}
