use std::fmt;

use ndarray::{ArrayView1, ArrayView2};

use crate::confusion::ConfusionMatrix;
use crate::dataset::select_rows;
use crate::error::{Error, Result};
use crate::model::Classifier;
use crate::procedures::{find_folds, Procedure};

use super::{average_outcomes, check_fold, check_rows, predict_aligned, Evaluation};

impl<L> Evaluation<L>
where
    L: Ord + Clone + fmt::Debug,
{
    /// Fit on each fold's training rows, predict its test rows, and average the
    /// resulting confusion matrices over the folds.
    ///
    /// The same model is refit on every fold.
    pub fn cross_validation<M, P>(
        &self,
        model: &mut M,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
        folds: &P,
    ) -> Result<ConfusionMatrix<L>>
    where
        M: Classifier<L> + ?Sized,
        P: Procedure + ?Sized,
    {
        check_rows(x, y)?;

        let mut outcomes = Vec::new();
        for (i, fold) in folds.iter().enumerate() {
            check_fold(fold, x.nrows())?;

            let (x_train, y_train) = select_rows(x, y, &fold.trainset);
            let (x_test, y_test) = select_rows(x, y, &fold.testset);

            model.fit(x_train.view(), y_train.view())?;
            let y_pred = predict_aligned(&*model, x_test.view(), y_test.len())?;

            debug!(
                "fold {}: trained on {} rows, tested on {} rows",
                i,
                fold.trainset.len(),
                fold.testset.len()
            );

            outcomes.push((y_test, y_pred));
        }

        average_outcomes(y, &outcomes)
    }

    /// Plain k-fold cross-validation over a fresh random partition.
    ///
    /// The averaged matrix is stored for the metric accessors.
    pub fn unnested_cross_validation<M>(
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
        if k < 2 {
            return Err(Error::InvalidFoldCount { k, rows });
        }

        info!("{}-fold cross-validation over {} rows", k, rows);

        let split = self.k_split(k, rows)?;
        let folds = find_folds(k, split.groups())?;
        let matrix = self.cross_validation(model, x, y, &folds)?;

        info!("cross-validated accuracy: {:.4}", matrix.accuracy());

        Ok(&*self.matrix.insert(matrix))
    }

    /// [`unnested_cross_validation`](Self::unnested_cross_validation) with the
    /// configured number of folds
    pub fn cross_validate<M>(
        &mut self,
        model: &mut M,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
    ) -> Result<&ConfusionMatrix<L>>
    where
        M: Classifier<L> + ?Sized,
    {
        let k = self.config.folds;
        self.unnested_cross_validation(model, x, y, k)
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::{Event, Recorder};
    use super::*;
    use crate::config::EvaluationConfig;
    use crate::confusion::{confusion_matrix, ClassLabels};
    use crate::procedures::{Fold, FoldSet};
    use ndarray::arr2;

    fn labels() -> Vec<u32> {
        vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1]
    }

    #[test]
    fn perfect_model_gives_diagonal_average() {
        let (x, y) = Recorder::dataset(&labels());
        let mut eval = Evaluation::new(EvaluationConfig::with_folds(5).seed(11));
        let mut model = Recorder::default();

        let matrix = eval
            .unnested_cross_validation(&mut model, x.view(), y.view(), 5)
            .unwrap()
            .clone();

        // 10 rows over 5 folds: two test rows per fold
        assert_eq!(
            matrix.counts(),
            arr2(&[[0.8, 0.0, 0.0], [0.0, 0.6, 0.0], [0.0, 0.0, 0.6]])
        );
        assert_eq!(eval.accuracy_from_confusion().unwrap(), 1.0);
        assert_eq!(eval.matrix(), Some(&matrix));
    }

    #[test]
    fn every_row_is_tested_exactly_once() {
        let (x, y) = Recorder::dataset(&labels());
        let mut eval = Evaluation::new(EvaluationConfig::with_folds(4).seed(5));
        let mut model = Recorder::default();
        eval.unnested_cross_validation(&mut model, x.view(), y.view(), 4)
            .unwrap();

        let mut tested: Vec<usize> = Vec::new();
        let events = model.events();
        assert_eq!(events.len(), 8);
        for pair in events.chunks(2) {
            match (&pair[0], &pair[1]) {
                (Event::Fit(train), Event::Predict(test)) => {
                    assert!(train.iter().all(|i| !test.contains(i)));
                    assert_eq!(train.len() + test.len(), 10);
                    tested.extend(test);
                }
                other => panic!("unexpected events {:?}", other),
            }
        }
        tested.sort();
        assert_eq!(tested, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn average_times_folds_is_sum_of_fold_matrices() {
        let (x, y) = Recorder::dataset(&labels());
        let eval = Evaluation::new(EvaluationConfig::default());
        // validated against row 0 only: every prediction is shifted by one
        let mut model = Recorder {
            good_row: Some(0),
            ..Default::default()
        };

        let folds = FoldSet::from(vec![
            Fold {
                trainset: vec![0, 1, 2, 3, 4],
                testset: vec![5, 6, 7, 8, 9],
            },
            Fold {
                trainset: vec![5, 6, 7, 8, 9],
                testset: vec![0, 1, 2],
            },
        ]);

        let average = eval
            .cross_validation(&mut model, x.view(), y.view(), &folds)
            .unwrap();

        let all = ClassLabels::from_observed(&[1, 2, 3, 4]);
        let mut expected = ConfusionMatrix::zeros(all.clone());
        for fold in folds.folds() {
            let (_, y_test) = select_rows(x.view(), y.view(), &fold.testset);
            let shifted = y_test.mapv(|l| l + 1);
            let m = confusion_matrix(y_test.view(), shifted.view(), Some(&all)).unwrap();
            expected.accumulate(&m).unwrap();
        }

        assert_eq!(average.labels(), &all);
        assert_eq!(
            average.counts().mapv(|v| (v * 2.0).round()),
            expected.counts()
        );
        assert_eq!(average.accuracy(), 0.0);
    }

    #[test]
    fn too_few_folds() {
        let (x, y) = Recorder::dataset(&labels());
        let mut eval = Evaluation::new(EvaluationConfig::default());
        let mut model = Recorder::default();

        assert!(matches!(
            eval.unnested_cross_validation(&mut model, x.view(), y.view(), 1),
            Err(Error::InvalidFoldCount { k: 1, rows: 10 })
        ));
        assert!(matches!(
            eval.unnested_cross_validation(&mut model, x.view(), y.view(), 11),
            Err(Error::InvalidFoldCount { k: 11, rows: 10 })
        ));
        assert!(eval.matrix().is_none());
    }

    #[test]
    fn configured_fold_count() {
        let (x, y) = Recorder::dataset(&labels());
        let mut eval = Evaluation::new(EvaluationConfig::with_folds(5).seed(2));
        let mut model = Recorder::default();

        eval.cross_validate(&mut model, x.view(), y.view()).unwrap();
        assert_eq!(model.events().len(), 10);

        let mut eval = Evaluation::new(EvaluationConfig::with_folds(11));
        assert!(matches!(
            eval.cross_validate(&mut model, x.view(), y.view()),
            Err(Error::InvalidFoldCount { k: 11, rows: 10 })
        ));
    }

    #[test]
    fn model_failure_aborts_the_run() {
        let (x, y) = Recorder::dataset(&labels());
        let mut eval = Evaluation::new(EvaluationConfig::default());
        let mut model = Recorder {
            fail_fit: true,
            ..Default::default()
        };

        assert!(matches!(
            eval.unnested_cross_validation(&mut model, x.view(), y.view(), 3),
            Err(Error::ModelError(_))
        ));
        assert!(eval.matrix().is_none());
    }

    #[test]
    fn empty_test_fold_is_rejected() {
        let (x, y) = Recorder::dataset(&labels());
        let eval = Evaluation::new(EvaluationConfig::default());
        let mut model = Recorder::default();
        let folds = FoldSet::from(vec![Fold {
            trainset: vec![0, 1],
            testset: vec![],
        }]);

        assert!(matches!(
            eval.cross_validation(&mut model, x.view(), y.view(), &folds),
            Err(Error::EmptyFold)
        ));
    }

    #[test]
    fn fold_rows_beyond_the_data_are_rejected() {
        let (x, y) = Recorder::dataset(&[1, 2, 1, 2]);
        let eval = Evaluation::new(EvaluationConfig::default());
        let mut model = Recorder::default();
        let folds = FoldSet::from_json(
            r#"[
                {"type": "TRAIN", "rowid": 0, "fold": 0},
                {"type": "TEST",  "rowid": 9, "fold": 0}
            ]"#,
        )
        .unwrap();

        assert!(matches!(
            eval.cross_validation(&mut model, x.view(), y.view(), &folds),
            Err(Error::RowOutOfRange { row: 9, rows: 4 })
        ));
        assert!(model.events().is_empty());
    }

    #[test]
    fn empty_procedure_is_rejected() {
        let (x, y) = Recorder::dataset(&labels());
        let eval = Evaluation::new(EvaluationConfig::default());
        let mut model = Recorder::default();

        assert!(matches!(
            eval.cross_validation(&mut model, x.view(), y.view(), &FoldSet::from(Vec::new())),
            Err(Error::NoFolds)
        ));
    }
}
