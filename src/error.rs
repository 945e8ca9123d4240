//! Application-level error type.
//!
//! Every fallible operation in the pipeline surfaces an [`AppError`] carrying
//! the process exit code and a human-readable message. Exit codes:
//!
//! - `2` — input/configuration problems (missing directories, bad JSON, bad flags)
//! - `3` — insufficient data (a fit was requested with too few points)
//! - `4` — numeric/model failures (singular normal equations, non-finite output)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input/configuration problem (exit code 2).
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Insufficient data for a requested fit (exit code 3).
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Numeric/model failure (exit code 4).
    pub fn numeric(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
