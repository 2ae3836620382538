use std::path::PathBuf;
use std::sync::Once;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the computed filter.
pub const LOG_ENV_VAR: &str = "LLM_NOTES_LOG";

// Global initialization guard
static INIT: Once = Once::new();

/// Application component identifier
pub enum Component {
    NativeHost,
}

impl Component {
    /// Used as the log file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::NativeHost => "llm-notes-host",
        }
    }

    /// Tracing targets that belong to this component.
    pub fn targets(&self) -> &'static [&'static str] {
        match self {
            Component::NativeHost => &["llm_notes_host", "notes_engine", "utils"],
        }
    }
}

/// Configuration for logging initialization
pub struct LogConfig {
    /// Component name for log identification
    pub component: Component,
    /// Directory where log files will be stored
    pub log_dir: PathBuf,
    /// Maximum log level
    pub max_level: Level,
    /// Whether to also log to stderr. Stdout is never used, it may carry
    /// protocol frames.
    pub log_to_console: bool,
    /// Optional custom env filter string
    pub env_filter: Option<String>,
    /// List of dependency crates to silence
    pub silent_deps: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            component: Component::NativeHost,
            log_dir: default_log_dir(),
            max_level: Level::INFO,
            log_to_console: false,
            env_filter: std::env::var(LOG_ENV_VAR).ok(),
            silent_deps: Vec::new(),
        }
    }
}

/// `<tmp>/llm-notes/logs`
pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("llm-notes").join("logs")
}

/// Initialize logging for the application
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut result = Ok(());

    INIT.call_once(|| {
        result = initialize_logging_internal(config);
    });

    result
}

fn initialize_logging_internal(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.log_dir)?;

    // `RollingFileAppender::new` panics when the file can't be opened
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(format!("{}.log", config.component.as_str()))
        .build(&config.log_dir)?;

    let mut layers = Vec::new();
    let file_layer = fmt::Layer::new()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_target(true);

    if config.log_to_console {
        let stderr_layer = fmt::Layer::new()
            .with_ansi(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact();

        layers.push(stderr_layer.with_filter(build_filter(&config)?).boxed());
    }

    layers.push(file_layer.with_filter(build_filter(&config)?).boxed());

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(())
}

fn build_filter(config: &LogConfig) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    let mut filter = if let Some(filter_str) = &config.env_filter {
        EnvFilter::try_new(filter_str)?
    } else {
        let mut filter = EnvFilter::try_new(Level::WARN.to_string())?;
        for target in config.component.targets() {
            filter = filter.add_directive(format!("{}={}", target, config.max_level).parse()?);
        }
        filter
    };

    // Apply silencing for noisy dependencies
    for dep in &config.silent_deps {
        filter = filter.add_directive(format!("{}=error", dep).parse()?);
    }

    Ok(filter)
}
