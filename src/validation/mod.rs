//! Cross-validated evaluation of classifiers.
//!
//! An [`Evaluation`] owns the fold-shuffling random source and the confusion
//! matrix of the most recent cross-validation run. The metric accessors read
//! from that stored matrix.

mod cross_validation;
mod hyperparam_tuning;
mod nested;

#[cfg(test)]
mod mock;

use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::rngs::StdRng;

use crate::config::EvaluationConfig;
use crate::confusion::{confusion_matrix, ClassLabels, ConfusionAccumulator, ConfusionMatrix};
use crate::error::{Error, Result};
use crate::measure_accumulator::{ErrorRate, MeasureAccumulator, PredictiveAccuracy};
use crate::metrics::ClassificationReport;
use crate::model::Classifier;
use crate::procedures::{self, Fold, IndexPartition};

#[derive(Debug)]
pub struct Evaluation<L> {
    config: EvaluationConfig,
    rng: StdRng,
    matrix: Option<ConfusionMatrix<L>>,
}

impl<L> Evaluation<L>
where
    L: Ord + Clone + fmt::Debug,
{
    pub fn new(config: EvaluationConfig) -> Self {
        let rng = config.rng();
        Evaluation {
            config,
            rng,
            matrix: None,
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Confusion matrix of the last completed cross-validation run
    pub fn matrix(&self) -> Option<&ConfusionMatrix<L>> {
        self.matrix.as_ref()
    }

    /// Randomly partition `0..rows` into `k` groups, advancing the evaluation's random source
    pub fn k_split(&mut self, k: usize, rows: usize) -> Result<IndexPartition> {
        procedures::k_split(k, rows, &mut self.rng)
    }

    /// Accuracy of `model` on a labelled test set
    pub fn evaluate<M>(
        &self,
        x_test: ArrayView2<f64>,
        y_test: ArrayView1<L>,
        model: &M,
    ) -> Result<f64>
    where
        M: Classifier<L> + ?Sized,
    {
        let y_pred = predict_aligned(model, x_test, y_test.len())?;
        let mut accuracy = PredictiveAccuracy::new();
        accuracy.update(y_test.iter(), y_pred.iter());
        Ok(accuracy.result())
    }

    /// Fraction of predictions that disagree with the actual labels
    pub fn validation_error(&self, y_pred: ArrayView1<L>, y_actual: ArrayView1<L>) -> Result<f64> {
        if y_pred.len() != y_actual.len() {
            return Err(Error::ShapeMismatch {
                expected: y_actual.len(),
                found: y_pred.len(),
            });
        }
        let mut error = ErrorRate::new();
        error.update(y_actual.iter(), y_pred.iter());
        Ok(error.result())
    }

    /// Overall accuracy of the stored matrix; 0 if it is all zeros
    pub fn accuracy_from_confusion(&self) -> Result<f64> {
        Ok(self.stored()?.accuracy())
    }

    pub fn recall(&self) -> Result<Vec<Option<f64>>> {
        Ok(self.stored()?.recall())
    }

    pub fn precision(&self) -> Result<Vec<Option<f64>>> {
        Ok(self.stored()?.precision())
    }

    pub fn f1(&self) -> Result<Vec<Option<f64>>> {
        Ok(self.stored()?.f1())
    }

    pub fn report(&self) -> Result<ClassificationReport<L>> {
        Ok(ClassificationReport::from_confusion(self.stored()?))
    }

    fn stored(&self) -> Result<&ConfusionMatrix<L>> {
        self.matrix.as_ref().ok_or(Error::NoEvaluation)
    }
}

impl<L> Default for Evaluation<L>
where
    L: Ord + Clone + fmt::Debug,
{
    fn default() -> Self {
        Evaluation::new(EvaluationConfig::default())
    }
}

/// Predict and insist on one label per row
fn predict_aligned<L, M>(model: &M, x: ArrayView2<f64>, rows: usize) -> Result<Array1<L>>
where
    M: Classifier<L> + ?Sized,
{
    let y_pred = model.predict(x)?;
    if y_pred.len() != rows {
        return Err(Error::ShapeMismatch {
            expected: rows,
            found: y_pred.len(),
        });
    }
    Ok(y_pred)
}

fn check_rows<L>(x: ArrayView2<f64>, y: ArrayView1<L>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(Error::ShapeMismatch {
            expected: x.nrows(),
            found: y.len(),
        });
    }
    Ok(())
}

/// Both sides of the fold must be non-empty and refer to rows below `rows`
fn check_fold(fold: &Fold, rows: usize) -> Result<()> {
    if fold.trainset.is_empty() || fold.testset.is_empty() {
        return Err(Error::EmptyFold);
    }
    match fold.trainset.iter().chain(&fold.testset).find(|&&i| i >= rows) {
        Some(&row) => Err(Error::RowOutOfRange { row, rows }),
        None => Ok(()),
    }
}

/// Actual and predicted labels of one held-out fold
type FoldOutcome<L> = (Array1<L>, Array1<L>);

/// Average the per-fold confusion matrices over one label space shared by all folds.
///
/// The label space is every label in `y` plus every label predicted in any fold.
fn average_outcomes<L>(y: ArrayView1<L>, outcomes: &[FoldOutcome<L>]) -> Result<ConfusionMatrix<L>>
where
    L: Ord + Clone + fmt::Debug,
{
    let labels = ClassLabels::from_observed(
        y.iter()
            .chain(outcomes.iter().flat_map(|(_, pred)| pred.iter())),
    );

    let mut sum = ConfusionAccumulator::new();
    for (actual, pred) in outcomes {
        sum.add(confusion_matrix(actual.view(), pred.view(), Some(&labels))?)?;
    }

    sum.average().ok_or(Error::NoFolds)
}
