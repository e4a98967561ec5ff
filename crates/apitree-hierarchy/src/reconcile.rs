use std::collections::BTreeSet;

/// Outcome of matching a new keyed sequence against the previous key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff<K> {
    /// Keys new in this frame, in `next` order.
    pub enter: Vec<K>,
    /// Keys present in both frames, in `next` order.
    pub update: Vec<K>,
    /// Keys that disappeared, in key order.
    pub exit: Vec<K>,
}

impl<K> Default for Diff<K> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        }
    }
}

/// Match `next` against `previous` by key. Duplicate keys in `next` are
/// counted once.
pub fn reconcile<K: Ord + Copy>(previous: &BTreeSet<K>, next: &[K]) -> Diff<K> {
    let mut diff = Diff::default();
    let mut seen = BTreeSet::new();

    for key in next {
        if !seen.insert(*key) {
            continue;
        }
        if previous.contains(key) {
            diff.update.push(*key);
        } else {
            diff.enter.push(*key);
        }
    }

    diff.exit = previous.difference(&seen).copied().collect();
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_way_split() {
        let previous: BTreeSet<u32> = [1, 2, 3, 4].into_iter().collect();
        let diff = reconcile(&previous, &[5, 3, 1, 6]);

        assert_eq!(diff.enter, vec![5, 6]);
        assert_eq!(diff.update, vec![3, 1]);
        assert_eq!(diff.exit, vec![2, 4]);
    }

    #[test]
    fn test_first_frame_enters_everything() {
        let diff = reconcile(&BTreeSet::new(), &[3, 1, 2]);

        assert_eq!(diff.enter, vec![3, 1, 2]);
        assert!(diff.update.is_empty());
        assert!(diff.exit.is_empty());
    }

    #[test]
    fn test_duplicates_counted_once() {
        let previous: BTreeSet<u32> = [1].into_iter().collect();
        let diff = reconcile(&previous, &[1, 2, 1, 2]);

        assert_eq!(diff.enter, vec![2]);
        assert_eq!(diff.update, vec![1]);
        assert!(diff.exit.is_empty());
    }
}
