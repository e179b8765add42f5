//! Cross-validated evaluation of classifiers.
//!
//! Rows are shuffled into folds ([`procedures`]), a [`Classifier`] is fit and
//! scored on every fold, and the per-fold confusion matrices are averaged
//! ([`confusion`]). Nested cross-validation tunes and prunes the model inside
//! each outer training split before scoring it on the held-out rows. Accuracy,
//! recall, precision and F1 are derived from the averaged matrix ([`metrics`]).
//!
//! ```
//! # use treeval::prelude::*;
//! # use treeval::baseline::NaiveBayesClassifier;
//! # use ndarray::{arr1, arr2};
//! let x = arr2(&[
//!     [0.0], [0.2], [0.1], [0.4], [0.3], [0.5],
//!     [5.0], [5.2], [5.1], [5.4], [5.3], [5.5],
//! ]);
//! let y = arr1(&[1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2]);
//!
//! let mut eval = Evaluation::new(EvaluationConfig::with_folds(3).seed(1));
//! let mut model = NaiveBayesClassifier::new();
//! eval.unnested_cross_validation(&mut model, x.view(), y.view(), 3).unwrap();
//!
//! assert!(eval.accuracy_from_confusion().unwrap() > 0.9);
//! ```

extern crate arff;
#[macro_use]
extern crate log;
extern crate ndarray;
extern crate num_traits;
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod baseline;
pub mod config;
pub mod confusion;
mod dataset;
mod error;
pub mod measure_accumulator;
pub mod metrics;
mod model;
pub mod procedures;
mod validation;

pub use config::EvaluationConfig;
pub use confusion::{confusion_matrix, ClassLabels, ConfusionAccumulator, ConfusionMatrix};
pub use dataset::{select_rows, Dataset};
pub use error::{Error, ModelFailure, Result};
pub use measure_accumulator::{ErrorRate, MeasureAccumulator, PredictiveAccuracy};
pub use metrics::{ClassScores, ClassificationReport};
pub use model::Classifier;
pub use validation::Evaluation;

pub mod prelude {
    pub use super::Classifier;
    pub use super::EvaluationConfig;
    pub use super::Evaluation;
    pub use super::MeasureAccumulator;
    pub use super::procedures::Procedure;
}
