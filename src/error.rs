use std::error::Error as StdError;
use std::fmt;
use std::result::Result as StdResult;

use arff::Error as ArffError;
use serde_json::Error as JsonError;

pub type Result<T> = StdResult<T, Error>;

/// Boxed failure raised by a `Classifier` implementation
pub type ModelFailure = Box<dyn StdError + Send + Sync>;

#[derive(Debug)]
pub enum Error {
    /// fold count is zero or exceeds the number of rows
    InvalidFoldCount { k: usize, rows: usize },
    /// two things that must line up (rows, predictions, label spaces) do not
    ShapeMismatch { expected: usize, found: usize },
    /// a fold builder was asked for more folds than it has groups
    TooFewGroups { k: usize, groups: usize },
    /// a fold refers to a row the data set does not have
    RowOutOfRange { row: usize, rows: usize },
    UnknownLabel(String),
    EmptyFold,
    /// a fold procedure yielded no folds at all
    NoFolds,
    NoEvaluation,
    ModelError(ModelFailure),
    JsonError(JsonError),
    ArffError(ArffError),
}

impl Error {
    /// Wrap an arbitrary model failure
    pub fn model<E: Into<ModelFailure>>(e: E) -> Self {
        Error::ModelError(e.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidFoldCount { k, rows } => {
                write!(f, "cannot split {} rows into {} folds", rows, k)
            }
            Error::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {}, found {}", expected, found)
            }
            Error::TooFewGroups { k, groups } => {
                write!(f, "cannot build {} folds from {} groups", k, groups)
            }
            Error::RowOutOfRange { row, rows } => {
                write!(f, "fold refers to row {} but there are only {} rows", row, rows)
            }
            Error::UnknownLabel(l) => write!(f, "label {} is not in the class label set", l),
            Error::EmptyFold => write!(f, "fold has an empty training or test set"),
            Error::NoFolds => write!(f, "fold procedure yielded no folds"),
            Error::NoEvaluation => write!(f, "no confusion matrix has been computed yet"),
            Error::ModelError(e) => write!(f, "model failure: {}", e),
            Error::JsonError(e) => write!(f, "json error: {}", e),
            Error::ArffError(e) => write!(f, "arff error: {:?}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ModelError(e) => Some(e.as_ref()),
            Error::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Self {
        Error::JsonError(e)
    }
}

impl From<ArffError> for Error {
    fn from(e: ArffError) -> Self {
        Error::ArffError(e)
    }
}
