//! Confusion matrices: cross-tabulation of actual against predicted class labels.
//!
//! Rows are indexed by the actual class and columns by the predicted class. The
//! mapping from label to row/column goes through an explicit [`ClassLabels`]
//! dictionary, so labels need not be contiguous integers.

use std::fmt;

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Sorted set of distinct class labels; a label's position is its matrix index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLabels<L> {
    labels: Vec<L>,
}

impl<L> ClassLabels<L>
where
    L: Ord + Clone,
{
    /// Collect the distinct labels of any number of label sequences
    pub fn from_observed<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a L>,
        L: 'a,
    {
        let mut labels: Vec<L> = labels.into_iter().cloned().collect();
        labels.sort();
        labels.dedup();
        ClassLabels { labels }
    }

    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.binary_search(label).ok()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[L] {
        &self.labels
    }
}

/// Square table of counts indexed by (actual, predicted).
///
/// Entries start as integral counts and become real-valued once averaged over folds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix<L> {
    labels: ClassLabels<L>,
    counts: Array2<f64>,
}

/// Tabulate `y_pred` against `y_actual`.
///
/// Without explicit `class_labels` the label space is the sorted union of both
/// inputs. A label missing from a supplied label space is an `UnknownLabel` error.
pub fn confusion_matrix<L>(
    y_actual: ArrayView1<L>,
    y_pred: ArrayView1<L>,
    class_labels: Option<&ClassLabels<L>>,
) -> Result<ConfusionMatrix<L>>
where
    L: Ord + Clone + fmt::Debug,
{
    if y_actual.len() != y_pred.len() {
        return Err(Error::ShapeMismatch {
            expected: y_actual.len(),
            found: y_pred.len(),
        });
    }

    let labels = match class_labels {
        Some(l) => l.clone(),
        None => ClassLabels::from_observed(y_actual.iter().chain(y_pred.iter())),
    };

    let n = labels.len();
    let mut counts = Array2::zeros((n, n));

    for (actual, pred) in y_actual.iter().zip(y_pred.iter()) {
        let row = lookup(&labels, actual)?;
        let col = lookup(&labels, pred)?;
        counts[[row, col]] += 1.0;
    }

    Ok(ConfusionMatrix { labels, counts })
}

fn lookup<L: Ord + Clone + fmt::Debug>(labels: &ClassLabels<L>, label: &L) -> Result<usize> {
    labels
        .index_of(label)
        .ok_or_else(|| Error::UnknownLabel(format!("{:?}", label)))
}

impl<L> ConfusionMatrix<L>
where
    L: Ord + Clone + fmt::Debug,
{
    /// All-zero matrix over the given label space
    pub fn zeros(labels: ClassLabels<L>) -> Self {
        let n = labels.len();
        ConfusionMatrix {
            labels,
            counts: Array2::zeros((n, n)),
        }
    }

    pub fn labels(&self) -> &ClassLabels<L> {
        &self.labels
    }

    pub fn counts(&self) -> ArrayView2<f64> {
        self.counts.view()
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Entry for an (actual, predicted) label pair
    pub fn get(&self, actual: &L, predicted: &L) -> Option<f64> {
        let row = self.labels.index_of(actual)?;
        let col = self.labels.index_of(predicted)?;
        Some(self.counts[[row, col]])
    }

    pub fn total(&self) -> f64 {
        self.counts.sum()
    }

    pub fn trace(&self) -> f64 {
        self.counts.diag().sum()
    }

    /// Element-wise addition of a matrix over the same label space.
    pub fn accumulate(&mut self, other: &ConfusionMatrix<L>) -> Result<()> {
        if self.n_classes() != other.n_classes() {
            return Err(Error::ShapeMismatch {
                expected: self.n_classes(),
                found: other.n_classes(),
            });
        }
        if let Some(l) = other
            .labels
            .as_slice()
            .iter()
            .find(|l| self.labels.index_of(l).is_none())
        {
            return Err(Error::UnknownLabel(format!("{:?}", l)));
        }

        self.counts += &other.counts;
        Ok(())
    }

    /// Every entry divided by `n`
    pub fn averaged(&self, n: usize) -> Self {
        ConfusionMatrix {
            labels: self.labels.clone(),
            counts: &self.counts / n as f64,
        }
    }
}

impl<L: fmt::Display> fmt::Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for l in &self.labels.labels {
            write!(f, " {:>8}", l)?;
        }
        writeln!(f)?;

        for (l, row) in self.labels.labels.iter().zip(self.counts.rows()) {
            write!(f, "{:>8}", l)?;
            for v in row {
                write!(f, " {:>8.2}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Running sum of per-fold confusion matrices.
///
/// The sum takes its shape from the first matrix added.
#[derive(Debug, Clone)]
pub struct ConfusionAccumulator<L> {
    sum: Option<ConfusionMatrix<L>>,
    n: usize,
}

impl<L> ConfusionAccumulator<L>
where
    L: Ord + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        ConfusionAccumulator { sum: None, n: 0 }
    }

    pub fn add(&mut self, matrix: ConfusionMatrix<L>) -> Result<()> {
        match self.sum {
            Some(ref mut sum) => sum.accumulate(&matrix)?,
            None => self.sum = Some(matrix),
        }
        self.n += 1;
        Ok(())
    }

    pub fn n_folds(&self) -> usize {
        self.n
    }

    pub fn sum(&self) -> Option<&ConfusionMatrix<L>> {
        self.sum.as_ref()
    }

    /// Fold-averaged matrix, or `None` if nothing was added
    pub fn average(&self) -> Option<ConfusionMatrix<L>> {
        self.sum.as_ref().map(|s| s.averaged(self.n))
    }
}

impl<L> Default for ConfusionAccumulator<L>
where
    L: Ord + Clone + fmt::Debug,
{
    fn default() -> Self {
        ConfusionAccumulator::new()
    }
}
