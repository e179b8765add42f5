//! Random partitioning of row indices into folds.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// `k` disjoint groups of row indices covering `0..rows`.
///
/// Group sizes differ by at most one; when `rows` is not divisible by `k` the
/// first `rows % k` groups hold the extra element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPartition {
    pub(crate) groups: Vec<Vec<usize>>,
}

impl IndexPartition {
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups except the one at `held_out`, in their original order.
    pub fn without(&self, held_out: usize) -> Vec<Vec<usize>> {
        self.groups
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != held_out)
            .map(|(_, g)| g.clone())
            .collect()
    }

    pub fn into_groups(self) -> Vec<Vec<usize>> {
        self.groups
    }
}

/// Shuffle `0..rows` and cut the permutation into `k` contiguous chunks.
///
/// Fails with `InvalidFoldCount` unless `1 <= k <= rows`.
pub fn k_split<R: Rng + ?Sized>(k: usize, rows: usize, rng: &mut R) -> Result<IndexPartition> {
    if k == 0 || k > rows {
        return Err(Error::InvalidFoldCount { k, rows });
    }

    let mut ids: Vec<usize> = (0..rows).collect();
    ids.shuffle(rng);

    let base = rows / k;
    let extra = rows % k;

    let mut groups = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let size = if i < extra { base + 1 } else { base };
        groups.push(ids[start..start + size].to_vec());
        start += size;
    }

    trace!(
        "split {} rows into {} groups of sizes {:?}",
        rows,
        k,
        groups.iter().map(Vec::len).collect::<Vec<_>>()
    );

    Ok(IndexPartition { groups })
}
