//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`]: failures of the numerical core (solver, fitters, orchestrator).
//!   Per-model failures are non-fatal; the orchestrator records them and moves on.
//! - [`AppError`]: what the binary reports, carrying the process exit code.

/// Errors raised by the fitting core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// No samples at all; nothing can be fit.
    #[error("No data points to approximate")]
    EmptyInput,

    /// `x` and `y` have different lengths.
    #[error("x and y must have the same length (x: {x}, y: {y})")]
    LengthMismatch { x: usize, y: usize },

    /// A sample is NaN or infinite.
    #[error("Sample {index} is not a finite number")]
    NonFiniteInput { index: usize },

    /// The linear system is not square or the right-hand side has the wrong length.
    #[error("Linear system dimensions do not match (matrix {rows}x{cols}, rhs {rhs})")]
    DimensionMismatch { rows: usize, cols: usize, rhs: usize },

    /// The normal-equation matrix is not invertible within tolerance.
    #[error("Normal-equation matrix is singular; the x values may be collinear or repeated [n: {n}]")]
    SingularMatrix { n: usize },

    /// Fewer distinct x values than coefficients to estimate.
    #[error("Only {distinct} distinct x values for {k} coefficients")]
    Underdetermined { distinct: usize, k: usize },

    /// Too few samples remain after dropping points outside the model's domain.
    #[error("Only {valid} samples inside the model domain, need at least {required}")]
    InsufficientValidSamples { valid: usize, required: usize },

    /// A coefficient list does not match the model kind.
    #[error("Model needs {expected} coefficients, got {got}")]
    CoefficientCount { expected: usize, got: usize },

    /// The fitted coefficients overflowed or are otherwise not finite.
    #[error("Fitted coefficients are not finite")]
    NonFiniteCoefficients,
}

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

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::EmptyInput => 3,
            _ => 2,
        };
        AppError::new(exit_code, err.to_string())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_maps_to_no_model_exit_code() {
        let err: AppError = FitError::EmptyInput.into();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "No data points to approximate");
    }

    #[test]
    fn input_errors_map_to_usage_exit_code() {
        let err: AppError = FitError::LengthMismatch { x: 3, y: 2 }.into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("x: 3, y: 2"));
    }
}
