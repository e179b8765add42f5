use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::f64;
use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{Error, Result};
use crate::measure_accumulator::{MeasureAccumulator, PredictiveAccuracy};
use crate::model::Classifier;

/// variance floor, so constant features do not produce infinite densities
const MIN_VARIANCE: f64 = 1e-9;

/// Gaussian naive Bayes over real-valued features.
///
/// Pruning drops features greedily while accuracy on the validation rows does
/// not decrease.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier<C>
where
    C: Ord,
{
    class_distributions: BTreeMap<C, FeatureDistribution>,
    active: Vec<bool>,
    n_samples: usize,
}

#[derive(Debug, Clone)]
struct FeatureDistribution {
    distributions: Vec<UniformNormalDistribution>,
    n: usize,
}

#[derive(Copy, Clone)]
struct UniformNormalDistribution {
    sum: f64,
    sqsum: f64,
    n: usize,
}

impl<C: Ord> NaiveBayesClassifier<C> {
    pub fn new() -> Self {
        NaiveBayesClassifier {
            class_distributions: BTreeMap::new(),
            active: Vec::new(),
            n_samples: 0,
        }
    }

    /// Which features take part in prediction
    pub fn active_features(&self) -> &[bool] {
        &self.active
    }

    fn predict_one(&self, x: ArrayView1<f64>) -> Option<&C> {
        self.class_distributions
            .iter()
            .map(|(c, dists)| {
                let mut lnprob = (dists.n as f64 / self.n_samples as f64).ln();
                for ((&xi, dist), &on) in x
                    .iter()
                    .zip(dists.distributions.iter())
                    .zip(self.active.iter())
                {
                    if on {
                        lnprob += dist.lnprob(xi);
                    }
                }
                (c, lnprob)
            })
            .max_by(|(_, lnp1), (_, lnp2)| lnp1.partial_cmp(lnp2).unwrap_or(Ordering::Equal))
            .map(|(c, _)| c)
    }
}

impl<C: Ord> Default for NaiveBayesClassifier<C> {
    fn default() -> Self {
        NaiveBayesClassifier::new()
    }
}

impl<C> NaiveBayesClassifier<C>
where
    C: Ord + Clone,
{
    fn accuracy_on(&self, x: ArrayView2<f64>, y: ArrayView1<C>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        let mut accuracy = PredictiveAccuracy::new();
        accuracy.update(y.iter(), y_pred.iter());
        Ok(accuracy.result())
    }
}

impl<C> Classifier<C> for NaiveBayesClassifier<C>
where
    C: Ord + Clone,
{
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<C>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(Error::ShapeMismatch {
                expected: x.nrows(),
                found: y.len(),
            });
        }

        self.class_distributions.clear();
        self.active = vec![true; x.ncols()];
        self.n_samples = y.len();

        for (row, label) in x.outer_iter().zip(y.iter()) {
            let class = self
                .class_distributions
                .entry(label.clone())
                .or_insert_with(|| FeatureDistribution::new(row.len()));

            class.n += 1;
            for (dist, &xi) in class.distributions.iter_mut().zip(row.iter()) {
                dist.update(xi);
            }
        }

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<C>> {
        if self.class_distributions.is_empty() {
            return Err(Error::model("naive Bayes classifier has not been fitted"));
        }
        if x.ncols() != self.active.len() {
            return Err(Error::ShapeMismatch {
                expected: self.active.len(),
                found: x.ncols(),
            });
        }

        x.outer_iter()
            .map(|row| {
                self.predict_one(row)
                    .cloned()
                    .ok_or_else(|| Error::model("no class scored"))
            })
            .collect()
    }

    fn prune(
        &mut self,
        _x_train: ArrayView2<f64>,
        _y_train: ArrayView1<C>,
        x_val: ArrayView2<f64>,
        y_val: ArrayView1<C>,
    ) -> Result<()> {
        let mut best = self.accuracy_on(x_val, y_val)?;

        while self.active.iter().filter(|&&on| on).count() > 1 {
            let mut drop = None;
            for f in 0..self.active.len() {
                if !self.active[f] {
                    continue;
                }
                self.active[f] = false;
                let accuracy = self.accuracy_on(x_val, y_val)?;
                self.active[f] = true;

                if accuracy >= best {
                    best = accuracy;
                    drop = Some(f);
                }
            }

            match drop {
                Some(f) => {
                    trace!("pruned feature {} (validation accuracy {:.4})", f, best);
                    self.active[f] = false;
                }
                None => break,
            }
        }

        Ok(())
    }
}

impl FeatureDistribution {
    fn new(n_features: usize) -> Self {
        FeatureDistribution {
            distributions: vec![UniformNormalDistribution::new(); n_features],
            n: 0,
        }
    }
}

impl UniformNormalDistribution {
    fn new() -> Self {
        UniformNormalDistribution {
            sum: 0.0,
            sqsum: 0.0,
            n: 0,
        }
    }

    fn update(&mut self, x: f64) {
        self.sum += x;
        self.sqsum += x * x;
        self.n += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.n as f64
    }

    fn variance(&self) -> f64 {
        if self.n < 2 {
            return MIN_VARIANCE;
        }
        let v = (self.sqsum - (self.sum * self.sum) / self.n as f64) / (self.n as f64 - 1.0);
        v.max(MIN_VARIANCE)
    }

    fn lnprob(&self, x: f64) -> f64 {
        let v = self.variance();
        let xm = x - self.mean();

        0.5 * ((1.0 / (2.0 * f64::consts::PI * v)).ln() - (xm * xm) / v)
    }
}

impl fmt::Debug for UniformNormalDistribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "N{{{}; {}}}", self.mean(), self.variance())
    }
}
