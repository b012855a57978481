//! Comparison, search, sort and text rendering for `SharedVec`.
//!
//! Every operation here looks through the handle at the pointed-to value,
//! except the identity searches (`find`, `find_handle`, `contains_ptr`) which
//! compare addresses. Empty slots:
//! - equal each other and nothing else;
//! - order after every occupied slot, in comparisons and in every sort;
//! - never match a value search and are never handed to a predicate.

use crate::shared_vec::SharedVec;
use crate::slot::Slot;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::rc::Rc;

impl<T> SharedVec<T> {
    /// Position of the first slot whose address is `ptr`. A null `ptr`
    /// finds the first empty slot.
    pub fn find(&self, ptr: *const T) -> Option<usize> {
        self.as_slice().iter().position(|s| s.as_ptr() == ptr)
    }

    /// Position of the first slot sharing `handle`'s allocation.
    pub fn find_handle(&self, handle: &Rc<T>) -> Option<usize> {
        self.find(Rc::as_ptr(handle))
    }

    pub fn contains_ptr(&self, ptr: *const T) -> bool {
        self.find(ptr).is_some()
    }

    /// Position of the first occupied slot whose value equals `value`.
    pub fn find_value(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.find_if_value(|v| v == value)
    }

    /// Like `find_value`, comparing against the value behind `slot`. An empty
    /// `slot` matches nothing.
    pub fn find_value_of(&self, slot: &Slot<T>) -> Option<usize>
    where
        T: PartialEq,
    {
        slot.get().and_then(|value| self.find_value(value))
    }

    pub fn contains_value(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find_value(value).is_some()
    }

    /// Position of the first occupied slot whose value satisfies `pred`.
    pub fn find_if_value<P>(&self, mut pred: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice()
            .iter()
            .position(|s| s.get().is_some_and(&mut pred))
    }

    /// Stable ascending sort by `T: Ord` with empty slots last.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Stable sort of the occupied slots by `compare`; empty slots always go
    /// last whatever `compare` returns.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice()
            .sort_by(|a, b| a.cmp_null_last(b, &mut compare));
    }

    /// Stable sort by a key extracted from each value; empty slots last.
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.sort_by(|a, b| f(a).cmp(&f(b)));
    }
}

/// Sort `v` in place; same as `v.sort()`.
pub fn sort<T: Ord>(v: &mut SharedVec<T>) {
    v.sort();
}

impl<T: PartialEq> PartialEq for SharedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SharedVec<T> {}

impl<T: PartialOrd> PartialOrd for SharedVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SharedVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SharedVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// `[ a b NULL c ]`: each slot followed by one space, inside brackets.
impl<T: fmt::Display> fmt::Display for SharedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for slot in self.as_slice() {
            write!(f, "{slot} ")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ints(vals: &[Option<i32>]) -> SharedVec<i32> {
        vals.iter()
            .map(|v| v.map_or_else(Slot::empty, Slot::new))
            .collect()
    }

    /// Invariant: a container equals itself and equals a value-equal copy
    /// built from different allocations.
    #[test]
    fn equality_is_by_value() {
        let a = ints(&[Some(1), Some(2), Some(3)]);
        let b = ints(&[Some(1), Some(2), Some(3)]);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_ne!(a[0].as_ptr(), b[0].as_ptr());
        assert_eq!(SharedVec::<i32>::new(), SharedVec::new());
    }

    /// Invariant: different lengths never compare equal.
    #[test]
    fn size_mismatch_is_unequal() {
        let a = ints(&[Some(1), Some(2), Some(3)]);
        let b = ints(&[Some(1), Some(2), Some(3), Some(4)]);
        assert_ne!(a, b);
        assert_ne!(SharedVec::<i32>::with_len(1).unwrap(), SharedVec::new());
    }

    /// Invariant: empty equals empty at the same index, never a value.
    #[test]
    fn empty_slots_in_equality() {
        assert_eq!(ints(&[None, Some(1)]), ints(&[None, Some(1)]));
        assert_ne!(ints(&[None, Some(1)]), ints(&[Some(0), Some(1)]));
    }

    /// Invariant: ordering is lexicographic by value, a strict prefix is less,
    /// and an empty slot is greater than any value.
    #[test]
    fn lexicographic_ordering() {
        let a = ints(&[Some(1), Some(2), Some(3)]);
        let b = ints(&[Some(1), Some(2), Some(3), Some(4)]);
        assert!(a < b);
        assert!(b > a);
        assert!(!(a < a.clone()));
        assert!(ints(&[Some(1), Some(9)]) < ints(&[Some(2)]));
        assert!(ints(&[Some(5)]) < ints(&[None]));
        assert_eq!(ints(&[None]).cmp(&ints(&[None])), Ordering::Equal);
        let e = SharedVec::<i32>::new();
        assert!(!(e < SharedVec::new()) && !(e > SharedVec::new()));
    }

    /// Invariant: `find` matches by address, not by value; null finds the
    /// first empty slot.
    #[test]
    fn find_by_identity() {
        let v = ints(&[Some(1), Some(2), Some(3), Some(4), Some(5), None]);
        let p3 = v[2].as_ptr();
        assert_eq!(v.find(p3), Some(2));
        let other = 3;
        assert_eq!(v.find(&other), None);
        assert_eq!(v.find(core::ptr::null()), Some(5));
        assert!(v.contains_ptr(p3));

        let h = v[1].handle().cloned().unwrap();
        assert_eq!(v.find_handle(&h), Some(1));
        assert_eq!(v.find_handle(&Rc::new(2)), None);

        let no_empty = ints(&[Some(1)]);
        assert_eq!(no_empty.find(core::ptr::null()), None);
    }

    /// Invariant: `find_value` matches by equality and never matches empty.
    #[test]
    fn find_by_value() {
        let v = ints(&[Some(1), Some(2), Some(3), Some(4), Some(5), None]);
        assert_eq!(v.find_value(&3), Some(2));
        assert_eq!(v.find_value(&6), None);
        assert!(v.contains_value(&5));
        assert_eq!(v.find_value_of(&Slot::new(3)), Some(2));
        assert_eq!(v.find_value_of(&Slot::empty()), None);
    }

    /// Invariant: `find_if_value` skips empty slots without calling `pred`.
    #[test]
    fn find_by_predicate_skips_empty() {
        let v = ints(&[Some(1), Some(2), None, Some(3), Some(4), Some(5), Some(6)]);
        let calls = Cell::new(0);
        let hit = v.find_if_value(|x| {
            calls.set(calls.get() + 1);
            x % 5 == 0
        });
        assert_eq!(hit, Some(5));
        assert_eq!(calls.get(), 5);
        assert_eq!(v.find_if_value(|x| x % 8 == 0), None);
        let none: SharedVec<i32> = SharedVec::with_len(3).unwrap();
        assert_eq!(none.find_if_value(|_| panic!("called on empty slot")), None);
    }

    /// Invariant: sort orders values ascending and moves empty slots last.
    #[test]
    fn sort_null_last() {
        let mut v = ints(&[Some(2), Some(5), Some(3), Some(1), Some(4)]);
        v.sort();
        assert_eq!(v.to_string(), "[ 1 2 3 4 5 ]");

        let mut v = ints(&[None, Some(2), Some(5), Some(3), Some(1), Some(4)]);
        sort(&mut v);
        assert_eq!(v.to_string(), "[ 1 2 3 4 5 NULL ]");
    }

    /// Invariant: sort moves handles, never values, and is stable for equal
    /// keys.
    #[test]
    fn sort_is_stable_and_moves_handles() {
        let mut v: SharedVec<(i32, char)> = SharedVec::from_values([
            (3, 'a'),
            (1, 'b'),
            (3, 'c'),
            (1, 'd'),
        ]);
        let pa = v[0].as_ptr();
        v.sort_by_key(|&(n, _)| n);
        let order: Vec<char> = v.as_slice().iter().map(|s| s.get().unwrap().1).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c']);
        assert_eq!(v.find(pa), Some(2));
    }

    /// Invariant: empty slots go last even with a reversed comparator.
    #[test]
    fn sort_by_keeps_null_last() {
        let mut v = ints(&[Some(1), None, Some(3), None, Some(2)]);
        v.sort_by(|a, b| b.cmp(a));
        assert_eq!(v.to_string(), "[ 3 2 1 NULL NULL ]");
    }

    /// Invariant: rendering brackets each token with single spaces.
    #[test]
    fn display_format() {
        assert_eq!(SharedVec::<i32>::new().to_string(), "[ ]");
        assert_eq!(ints(&[Some(1), Some(2), Some(3), None]).to_string(), "[ 1 2 3 NULL ]");
        assert_eq!(format!("{:?}", ints(&[Some(1), None])), "[1, NULL]");
    }

    /// Invariant: equal containers hash equally.
    #[test]
    fn hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;
        let h = |v: &SharedVec<i32>| {
            let mut s = DefaultHasher::new();
            v.hash(&mut s);
            s.finish()
        };
        assert_eq!(h(&ints(&[Some(1), None])), h(&ints(&[Some(1), None])));
    }
}
