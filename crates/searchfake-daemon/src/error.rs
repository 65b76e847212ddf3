//! Error types for the `searchfake` binary.

/// Top-level error for the `searchfake` binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: searchfake_server::ConfigError,
    },

    /// The server could not be started.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: searchfake_server::ServerError,
    },

    /// The seed file could not be read or parsed.
    #[error("seed error: {message}")]
    Seed {
        /// Description of the seeding failure.
        message: String,
    },

    /// Waiting for the shutdown signal failed.
    #[error("signal error: {source}")]
    Signal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },
}
