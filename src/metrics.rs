//! Classification metrics derived from a confusion matrix.
//!
//! Per-class scores are `None` where they are undefined: recall for a class that
//! never occurs, precision for a class that is never predicted, and F1 when
//! either input is undefined or both are zero.

use std::fmt;

use ndarray::Axis;

use crate::confusion::ConfusionMatrix;

impl<L> ConfusionMatrix<L>
where
    L: Ord + Clone + fmt::Debug,
{
    /// Fraction of entries on the diagonal; 0 for an all-zero matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.trace() / total
        } else {
            0.0
        }
    }

    /// True positives over actual-class totals (row sums)
    pub fn recall(&self) -> Vec<Option<f64>> {
        ratios(self, Axis(1))
    }

    /// True positives over predicted-class totals (column sums)
    pub fn precision(&self) -> Vec<Option<f64>> {
        ratios(self, Axis(0))
    }

    pub fn f1(&self) -> Vec<Option<f64>> {
        self.precision()
            .into_iter()
            .zip(self.recall())
            .map(|(p, r)| match (p, r) {
                (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
                _ => None,
            })
            .collect()
    }

    /// Number of actual occurrences of each class
    pub fn support(&self) -> Vec<f64> {
        self.counts().sum_axis(Axis(1)).to_vec()
    }
}

fn ratios<L>(m: &ConfusionMatrix<L>, axis: Axis) -> Vec<Option<f64>>
where
    L: Ord + Clone + fmt::Debug,
{
    let counts = m.counts();
    counts
        .diag()
        .iter()
        .zip(counts.sum_axis(axis).iter())
        .map(|(&tp, &total)| if total > 0.0 { Some(tp / total) } else { None })
        .collect()
}

/// Scores of a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScores<L> {
    pub label: L,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
    pub support: f64,
}

/// Summary of a confusion matrix, suitable for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport<L> {
    pub accuracy: f64,
    pub classes: Vec<ClassScores<L>>,
}

impl<L> ClassificationReport<L>
where
    L: Ord + Clone + fmt::Debug,
{
    pub fn from_confusion(m: &ConfusionMatrix<L>) -> Self {
        let precision = m.precision();
        let recall = m.recall();
        let f1 = m.f1();
        let support = m.support();

        let classes = m
            .labels()
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, label)| ClassScores {
                label: label.clone(),
                precision: precision[i],
                recall: recall[i],
                f1: f1[i],
                support: support[i],
            })
            .collect();

        ClassificationReport {
            accuracy: m.accuracy(),
            classes,
        }
    }

    /// Unweighted mean F1 over classes where it is defined
    pub fn macro_f1(&self) -> Option<f64> {
        let defined: Vec<f64> = self.classes.iter().filter_map(|c| c.f1).collect();
        if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<f64>() / defined.len() as f64)
        }
    }
}

impl<L: fmt::Display> fmt::Display for ClassificationReport<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn cell(v: Option<f64>) -> String {
            v.map_or_else(|| "-".to_owned(), |v| format!("{:.3}", v))
        }

        writeln!(
            f,
            "{:>8} {:>9} {:>9} {:>9} {:>9}",
            "class", "precision", "recall", "f1", "support"
        )?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>8} {:>9} {:>9} {:>9} {:>9.1}",
                c.label,
                cell(c.precision),
                cell(c.recall),
                cell(c.f1),
                c.support
            )?;
        }
        writeln!(f, "accuracy: {:.3}", self.accuracy)
    }
}
