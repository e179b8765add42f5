use std::fmt;

use ndarray::{ArrayView1, ArrayView2};

use crate::confusion::ConfusionMatrix;
use crate::dataset::select_rows;
use crate::error::{Error, Result};
use crate::model::Classifier;
use crate::procedures::find_folds;

use super::{average_outcomes, check_rows, predict_aligned, Evaluation};

impl<L> Evaluation<L>
where
    L: Ord + Clone + fmt::Debug,
{
    /// Nested k-fold cross-validation.
    ///
    /// Each of the `k` outer groups is held out once. The remaining `k - 1`
    /// groups are rotated into inner train/validation folds to tune and prune the
    /// model; the tuned model is then scored on the held-out group. Outer test
    /// rows never reach `fit` or `prune`. Requires `k >= 3`, so every inner
    /// fold has rows to train on.
    ///
    /// The averaged matrix is stored for the metric accessors.
    pub fn nested_cross_validation<M>(
        &mut self,
        model: &mut M,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
        k: usize,
    ) -> Result<&ConfusionMatrix<L>>
    where
        M: Classifier<L> + ?Sized,
    {
        check_rows(x, y)?;
        let rows = x.nrows();
        if k < 3 {
            return Err(Error::InvalidFoldCount { k, rows });
        }

        info!("nested {}-fold cross-validation over {} rows", k, rows);

        let split = self.k_split(k, rows)?;

        let mut outcomes = Vec::with_capacity(k);
        for (i, test_ids) in split.groups().iter().enumerate() {
            let inner = find_folds(k - 1, &split.without(i))?;
            let tuned = self.cross_validation_hyperparam_tuning(&mut *model, x, y, &inner)?;

            let (x_test, y_test) = select_rows(x, y, test_ids);
            let y_pred = predict_aligned(&*tuned, x_test.view(), y_test.len())?;

            debug!(
                "outer fold {}: tested tuned model on {} held-out rows",
                i,
                test_ids.len()
            );

            outcomes.push((y_test, y_pred));
        }

        let matrix = average_outcomes(y, &outcomes)?;
        info!("nested cross-validated accuracy: {:.4}", matrix.accuracy());

        Ok(&*self.matrix.insert(matrix))
    }

    /// [`nested_cross_validation`](Self::nested_cross_validation) with the
    /// configured number of outer folds
    pub fn nested_cross_validate<M>(
        &mut self,
        model: &mut M,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
    ) -> Result<&ConfusionMatrix<L>>
    where
        M: Classifier<L> + ?Sized,
    {
        let k = self.config.folds;
        self.nested_cross_validation(model, x, y, k)
    }
}
