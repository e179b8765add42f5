//! Validation procedures: partitioning rows and arranging them into folds

mod fold_builder;
mod frozen_sets;
mod splitter;

use std::ops::Index;

pub use self::fold_builder::find_folds;
pub use self::frozen_sets::{FoldAssignment, TrainTest};
pub use self::splitter::{k_split, IndexPartition};

/// Validation procedures support iteration over cross-validation folds
pub trait Procedure {
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Fold> + 'a>;

    fn n_folds(&self) -> usize {
        self.iter().count()
    }
}

/// A single cross-validation fold, consisting of a training set and a testing set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fold {
    pub trainset: Vec<usize>,
    pub testset: Vec<usize>,
}

impl Fold {
    pub fn new() -> Self {
        Fold {
            trainset: Vec::new(),
            testset: Vec::new(),
        }
    }
}

impl Default for Fold {
    fn default() -> Self {
        Fold::new()
    }
}

/// An ordered list of folds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldSet {
    pub(crate) folds: Vec<Fold>,
}

impl FoldSet {
    pub fn len(&self) -> usize {
        self.folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }

    pub fn folds(&self) -> &[Fold] {
        &self.folds
    }
}

impl From<Vec<Fold>> for FoldSet {
    fn from(folds: Vec<Fold>) -> Self {
        FoldSet { folds }
    }
}

impl Index<usize> for FoldSet {
    type Output = Fold;

    fn index(&self, i: usize) -> &Fold {
        &self.folds[i]
    }
}

impl Procedure for FoldSet {
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Fold> + 'a> {
        Box::new(self.folds.iter())
    }

    fn n_folds(&self) -> usize {
        self.folds.len()
    }
}
