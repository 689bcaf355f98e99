use std::cmp::{max, min};
use std::ops::{Range, RangeInclusive};

pub(crate) trait WrappingRange<T> {
    /// Check if an element is included in a range that may wrap around, for
    /// example `Fr-Mo` or `Nov-Feb`.
    fn wrapping_contains(&self, elt: &T) -> bool;
}

impl<T: PartialOrd> WrappingRange<T> for RangeInclusive<T> {
    fn wrapping_contains(&self, elt: &T) -> bool {
        if self.start() <= self.end() {
            self.contains(elt)
        } else {
            self.start() <= elt || elt <= self.end()
        }
    }
}

pub(crate) fn range_intersection<T: Ord>(range_1: Range<T>, range_2: Range<T>) -> Option<Range<T>> {
    let result = max(range_1.start, range_2.start)..min(range_1.end, range_2.end);

    if result.start < result.end {
        Some(result)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wrapping() {
        assert!((2..=5).wrapping_contains(&3));
        assert!(!(2..=5).wrapping_contains(&6));
        assert!((5..=2).wrapping_contains(&6));
        assert!((5..=2).wrapping_contains(&1));
        assert!(!(5..=2).wrapping_contains(&3));
        assert!((4..=4).wrapping_contains(&4));
    }

    #[test]
    fn intersection() {
        assert_eq!(range_intersection(0..10, 5..15), Some(5..10));
        assert_eq!(range_intersection(0..5, 5..15), None);
    }
}
