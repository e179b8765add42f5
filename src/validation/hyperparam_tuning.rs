use std::fmt;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::dataset::select_rows;
use crate::error::{Error, Result};
use crate::model::Classifier;
use crate::procedures::{Fold, Procedure};

use super::{check_fold, check_rows, Evaluation};

impl<L> Evaluation<L>
where
    L: Ord + Clone + fmt::Debug,
{
    /// Select the fold whose pruned model validates best and return the model
    /// refit and re-pruned on that fold.
    ///
    /// Each fold's test rows act as its validation set. Ties go to the earliest
    /// fold. The returned model is trained on the winning fold's training rows
    /// only.
    pub fn cross_validation_hyperparam_tuning<M, P>(
        &self,
        mut model: M,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
        folds: &P,
    ) -> Result<M>
    where
        M: Classifier<L>,
        P: Procedure + ?Sized,
    {
        check_rows(x, y)?;

        let mut best: Option<(usize, f64, &Fold)> = None;
        for (j, fold) in folds.iter().enumerate() {
            let (x_val, y_val) = self.fit_and_prune(&mut model, x, y, fold)?;
            let accuracy = self.evaluate(x_val.view(), y_val.view(), &model)?;
            debug!("inner fold {}: validation accuracy {:.4}", j, accuracy);

            if best.map_or(true, |(_, top, _)| accuracy > top) {
                best = Some((j, accuracy, fold));
            }
        }

        let (j, accuracy, fold) = best.ok_or(Error::NoFolds)?;
        debug!("selected inner fold {} (validation accuracy {:.4})", j, accuracy);

        self.fit_and_prune(&mut model, x, y, fold)?;
        Ok(model)
    }

    /// Fit on the fold's training rows and prune against its test rows.
    ///
    /// Returns the validation rows.
    fn fit_and_prune<M>(
        &self,
        model: &mut M,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
        fold: &Fold,
    ) -> Result<(Array2<f64>, Array1<L>)>
    where
        M: Classifier<L>,
    {
        check_fold(fold, x.nrows())?;

        let (x_train, y_train) = select_rows(x, y, &fold.trainset);
        let (x_val, y_val) = select_rows(x, y, &fold.testset);

        model.fit(x_train.view(), y_train.view())?;
        model.prune(x_train.view(), y_train.view(), x_val.view(), y_val.view())?;
        Ok((x_val, y_val))
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::{Event, Recorder};
    use super::*;
    use crate::config::EvaluationConfig;
    use crate::procedures::{find_folds, FoldSet};

    fn folds() -> FoldSet {
        find_folds(3, &[vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap()
    }

    #[test]
    fn refits_on_the_best_fold() {
        let (x, y) = Recorder::dataset(&[1, 2, 1, 2, 1, 2]);
        let eval = Evaluation::new(EvaluationConfig::default());
        // only validation on row 3 yields correct predictions
        let model = Recorder {
            good_row: Some(3),
            ..Default::default()
        };

        let tuned = eval
            .cross_validation_hyperparam_tuning(model, x.view(), y.view(), &folds())
            .unwrap();

        assert_eq!(tuned.val, vec![2, 3]);
        // three (fit, prune, predict) rounds, then the refit without a prediction
        let events = tuned.events();
        assert_eq!(events.len(), 11);
        assert!(matches!(events[8], Event::Predict(_)));
        assert_eq!(events[9], Event::Fit(vec![0, 1, 4, 5]));
        assert_eq!(
            events[10],
            Event::Prune {
                train: vec![0, 1, 4, 5],
                val: vec![2, 3]
            }
        );
    }

    #[test]
    fn ties_go_to_the_first_fold() {
        let (x, y) = Recorder::dataset(&[1, 2, 1, 2, 1, 2]);
        let eval = Evaluation::new(EvaluationConfig::default());

        let tuned = eval
            .cross_validation_hyperparam_tuning(Recorder::default(), x.view(), y.view(), &folds())
            .unwrap();

        assert_eq!(tuned.val, vec![0, 1]);
    }

    #[test]
    fn works_through_a_borrowed_model() {
        let (x, y) = Recorder::dataset(&[1, 2, 1, 2, 1, 2]);
        let eval = Evaluation::new(EvaluationConfig::default());
        let mut model = Recorder {
            good_row: Some(5),
            ..Default::default()
        };

        eval.cross_validation_hyperparam_tuning(&mut model, x.view(), y.view(), &folds())
            .unwrap();
        assert_eq!(model.val, vec![4, 5]);
    }

    #[test]
    fn no_folds() {
        let (x, y) = Recorder::dataset(&[1, 2]);
        let eval = Evaluation::new(EvaluationConfig::default());
        let empty = FoldSet::from(Vec::new());

        assert!(matches!(
            eval.cross_validation_hyperparam_tuning(Recorder::default(), x.view(), y.view(), &empty),
            Err(Error::NoFolds)
        ));
    }
}
