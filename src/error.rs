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

/// A configuration value rejected at a mutator boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Lerp weight outside `[0, 1]` (or NaN).
    LerpWeightOutOfRange(f64),
    OrderTooLarge { order: usize, max: usize },
    /// Point spacing must be finite and positive.
    InvalidPointSpacing(f64),
    InvalidGraphStep(f64),
    InvalidPointRadius(f64),
    /// Camera follow rate must be within `(0, 1]`.
    InvalidFollowRate(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LerpWeightOutOfRange(w) => {
                write!(f, "Lerp weight must be within [0, 1], got {w}.")
            }
            ConfigError::OrderTooLarge { order, max } => {
                write!(f, "Polynomial order {order} exceeds the maximum of {max}.")
            }
            ConfigError::InvalidPointSpacing(v) => {
                write!(f, "Point spacing must be a positive number, got {v}.")
            }
            ConfigError::InvalidGraphStep(v) => {
                write!(f, "Graph step must be a positive number, got {v}.")
            }
            ConfigError::InvalidPointRadius(v) => {
                write!(f, "Point radius must be a non-negative number, got {v}.")
            }
            ConfigError::InvalidFollowRate(v) => {
                write!(f, "Camera follow rate must be within (0, 1], got {v}.")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(2, err.to_string())
    }
}
