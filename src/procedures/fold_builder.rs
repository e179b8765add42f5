use super::{Fold, FoldSet};
use crate::error::{Error, Result};

/// Rotate through the first `k` groups, holding out one group per fold.
///
/// The training set of fold `i` is the concatenation of groups `0..k` without
/// group `i`, in group order. Groups past index `k` are ignored. Fails if
/// fewer than `k` groups are supplied.
pub fn find_folds(k: usize, groups: &[Vec<usize>]) -> Result<FoldSet> {
    if k > groups.len() {
        return Err(Error::TooFewGroups {
            k,
            groups: groups.len(),
        });
    }

    let groups = &groups[..k];
    let folds = (0..k)
        .map(|i| {
            let trainset = groups
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, g)| g.iter().cloned())
                .collect();

            Fold {
                trainset,
                testset: groups[i].clone(),
            }
        })
        .collect();

    Ok(FoldSet { folds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedures::Procedure;
    use std::collections::HashSet;

    fn groups() -> Vec<Vec<usize>> {
        vec![vec![4, 0], vec![2, 7], vec![1, 5], vec![3, 6]]
    }

    #[test]
    fn one_fold_per_group() {
        let folds = find_folds(4, &groups()).unwrap();
        assert_eq!(folds.len(), 4);

        assert_eq!(folds[0].testset, vec![4, 0]);
        assert_eq!(folds[0].trainset, vec![2, 7, 1, 5, 3, 6]);
        assert_eq!(folds[2].testset, vec![1, 5]);
        assert_eq!(folds[2].trainset, vec![4, 0, 2, 7, 3, 6]);
    }

    #[test]
    fn train_and_test_are_disjoint_and_complete() {
        let g = groups();
        for k in 1..=g.len() {
            let expected: HashSet<usize> = g[..k].iter().flatten().cloned().collect();
            let folds = find_folds(k, &g).unwrap();
            assert_eq!(folds.iter().count(), k);

            for fold in folds.iter() {
                let train: HashSet<_> = fold.trainset.iter().cloned().collect();
                let test: HashSet<_> = fold.testset.iter().cloned().collect();
                assert!(train.is_disjoint(&test));

                let all: HashSet<_> = train.union(&test).cloned().collect();
                assert_eq!(all, expected);
            }
        }
    }

    #[test]
    fn fewer_folds_ignore_trailing_groups() {
        let folds = find_folds(2, &groups()).unwrap();
        assert_eq!(folds[0].trainset, vec![2, 7]);
        assert_eq!(folds[1].trainset, vec![4, 0]);
    }

    #[test]
    fn too_many_folds() {
        assert!(matches!(
            find_folds(5, &groups()),
            Err(Error::TooFewGroups { k: 5, groups: 4 })
        ));
        assert_eq!(find_folds(0, &groups()).unwrap().len(), 0);
    }
}
