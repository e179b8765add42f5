//! Measure accumulators are streaming summaries of classifier performance, fed one
//! (known, predicted) label pair at a time.

use std::marker::PhantomData;

/// Trait implemented by performance measures
pub trait MeasureAccumulator<T> {
    /// initialize new measure
    fn new() -> Self;

    /// update with one prediction
    fn update_one(&mut self, known: &T, pred: &T);

    /// get resulting performance
    fn result(&self) -> f64;

    /// update with multiple predictions
    fn update<'a, I, J>(&mut self, known: I, predicted: J)
    where
        I: IntoIterator<Item = &'a T>,
        J: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for (k, p) in known.into_iter().zip(predicted) {
            self.update_one(k, p)
        }
    }
}

/// Classification Accuracy: relative amount of correctly classified labels
#[derive(Debug)]
pub struct PredictiveAccuracy<T> {
    n_correct: usize,
    n_wrong: usize,
    _t: PhantomData<T>,
}

impl<T> PredictiveAccuracy<T> {
    pub fn n_seen(&self) -> usize {
        self.n_correct + self.n_wrong
    }
}

impl<T> MeasureAccumulator<T> for PredictiveAccuracy<T>
where
    T: PartialEq,
{
    fn new() -> Self {
        PredictiveAccuracy {
            n_correct: 0,
            n_wrong: 0,
            _t: PhantomData,
        }
    }

    fn update_one(&mut self, known: &T, pred: &T) {
        if known == pred {
            self.n_correct += 1;
        } else {
            self.n_wrong += 1;
        }
    }

    /// 0 when nothing was seen
    fn result(&self) -> f64 {
        match self.n_seen() {
            0 => 0.0,
            n => self.n_correct as f64 / n as f64,
        }
    }
}

/// Error Rate: relative amount of misclassified labels
#[derive(Debug)]
pub struct ErrorRate<T>(PredictiveAccuracy<T>);

impl<T> MeasureAccumulator<T> for ErrorRate<T>
where
    T: PartialEq,
{
    fn new() -> Self {
        ErrorRate(PredictiveAccuracy::new())
    }

    fn update_one(&mut self, known: &T, pred: &T) {
        self.0.update_one(known, pred)
    }

    fn result(&self) -> f64 {
        match self.0.n_seen() {
            0 => 0.0,
            n => self.0.n_wrong as f64 / n as f64,
        }
    }
}

#[test]
fn accuracy_and_error_rate() {
    let known = [1, 1, 2, 2];
    let pred = [1, 2, 2, 2];

    let mut acc = PredictiveAccuracy::new();
    acc.update(&known, &pred);
    assert_eq!(acc.result(), 0.75);

    let mut err = ErrorRate::new();
    err.update(&known, &pred);
    assert_eq!(err.result(), 0.25);
}

#[test]
fn empty_measures_are_zero() {
    let acc: PredictiveAccuracy<u8> = MeasureAccumulator::new();
    let err: ErrorRate<u8> = MeasureAccumulator::new();
    assert_eq!(acc.result(), 0.0);
    assert_eq!(err.result(), 0.0);
}
