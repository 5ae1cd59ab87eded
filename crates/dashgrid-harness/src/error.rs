use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] dashgrid::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("layout invariants violated: {overlaps} overlapping pairs, {out_of_bounds} widgets out of bounds")]
    InvariantViolation {
        overlaps: usize,
        out_of_bounds: usize,
    },
}

impl HarnessError {
    /// Process exit code: 2 for invariant violations, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvariantViolation { .. } => 2,
            _ => 1,
        }
    }

    pub(crate) fn engine(error: impl Into<dashgrid::Error>) -> Self {
        Self::Engine(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::HarnessError;

    #[test]
    fn invariant_violation_exits_with_two() {
        let error = HarnessError::InvariantViolation {
            overlaps: 1,
            out_of_bounds: 0,
        };
        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().contains("1 overlapping pairs"));
    }

    #[test]
    fn engine_errors_exit_with_one() {
        let error = HarnessError::engine(dashgrid::LayoutError::NotFound {
            id: dashgrid::WidgetId::MIN,
        });
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "widget not found: widget-1");
    }
}
