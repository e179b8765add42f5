//! Folds fixed ahead of time by a table of row assignments.

use std::collections::BTreeMap;

use crate::error::Result;

use super::{Fold, FoldSet};

/// Role of a row within one fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainTest {
    #[serde(rename = "TRAIN")]
    Train,

    #[serde(rename = "TEST")]
    Test,
}

/// One row of an assignment table: row `rowid` belongs to the `purpose` set
/// of fold `fold` in repetition `repeat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldAssignment {
    #[serde(rename = "type")]
    pub purpose: TrainTest,

    pub rowid: usize,

    #[serde(default)]
    pub repeat: usize,

    pub fold: usize,
}

impl FoldSet {
    /// Collect folds from an assignment table, ordered by repeat then fold.
    ///
    /// Rows keep the order in which they appear in the table.
    pub fn from_assignments<I>(items: I) -> Self
    where
        I: IntoIterator<Item = FoldAssignment>,
    {
        let mut folds: BTreeMap<(usize, usize), Fold> = BTreeMap::new();

        for item in items {
            let fold = folds
                .entry((item.repeat, item.fold))
                .or_insert_with(Fold::new);
            match item.purpose {
                TrainTest::Train => fold.trainset.push(item.rowid),
                TrainTest::Test => fold.testset.push(item.rowid),
            }
        }

        FoldSet {
            folds: folds.into_iter().map(|(_, f)| f).collect(),
        }
    }

    /// Parse a JSON array of assignments
    pub fn from_json(raw: &str) -> Result<Self> {
        let items: Vec<FoldAssignment> = serde_json::from_str(raw)?;
        Ok(FoldSet::from_assignments(items))
    }
}

#[test]
fn assignments_group_by_fold() {
    let raw = r#"[
        {"type": "TRAIN", "rowid": 0, "fold": 1},
        {"type": "TEST",  "rowid": 1, "fold": 1},
        {"type": "TEST",  "rowid": 0, "fold": 0},
        {"type": "TRAIN", "rowid": 1, "fold": 0},
        {"type": "TRAIN", "rowid": 2, "fold": 0, "repeat": 0}
    ]"#;

    let folds = FoldSet::from_json(raw).unwrap();

    assert_eq!(folds.len(), 2);
    assert_eq!(folds[0].trainset, vec![1, 2]);
    assert_eq!(folds[0].testset, vec![0]);
    assert_eq!(folds[1].trainset, vec![0]);
    assert_eq!(folds[1].testset, vec![1]);
}

#[test]
fn bad_purpose_is_rejected() {
    let raw = r#"[{"type": "VALID", "rowid": 0, "fold": 0}]"#;
    assert!(FoldSet::from_json(raw).is_err());
}
