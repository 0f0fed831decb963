use std::error::Error;
use std::fmt;

/// Failures raised while fitting a selector model.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Rows in the feature matrix vs. entries in the label vector.
    LengthMismatch { rows: usize, labels: usize },
    /// The label vector holds a single class (value reported).
    SingleClass(i32),
    /// A label other than 0 or 1 was passed to a binary model.
    InvalidLabel(i32),
    EmptyInput,
    UnknownFeature(String),
    /// Columns (or scores) vs. feature names.
    FeatureCountMismatch { columns: usize, names: usize },
    /// The underlying learner rejected its input or hyper-parameters.
    ModelFit { model: &'static str, message: String },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::LengthMismatch { rows, labels } => write!(
                f,
                "Feature matrix has {} rows but {} labels were given",
                rows, labels
            ),
            SelectionError::SingleClass(class) => write!(
                f,
                "Labels contain a single class ({}); two classes are required",
                class
            ),
            SelectionError::InvalidLabel(label) => {
                write!(f, "Invalid label {}; expected 0 (control) or 1 (case)", label)
            }
            SelectionError::EmptyInput => write!(f, "Feature matrix has no samples or no features"),
            SelectionError::UnknownFeature(name) => write!(f, "Unknown feature '{}'", name),
            SelectionError::FeatureCountMismatch { columns, names } => write!(
                f,
                "Expected one feature name per column: {} columns but {} names",
                columns, names
            ),
            SelectionError::ModelFit { model, message } => {
                write!(f, "{} fit failed: {}", model, message)
            }
        }
    }
}

impl Error for SelectionError {}

/// Validate a (features, labels) pair for a binary classifier.
pub(crate) fn check_binary_input(
    rows: usize,
    cols: usize,
    y: &[i32],
) -> Result<(), SelectionError> {
    if rows == 0 || cols == 0 {
        return Err(SelectionError::EmptyInput);
    }
    if rows != y.len() {
        return Err(SelectionError::LengthMismatch {
            rows,
            labels: y.len(),
        });
    }
    if let Some(&bad) = y.iter().find(|&&l| l != 0 && l != 1) {
        return Err(SelectionError::InvalidLabel(bad));
    }
    if y.iter().all(|&l| l == y[0]) {
        return Err(SelectionError::SingleClass(y[0]));
    }
    Ok(())
}
