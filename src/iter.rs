//! Iterators over `SharedVec`.

use crate::shared_vec::SharedVec;
use crate::slot::Slot;
use core::iter::FusedIterator;

/// Iterator over slots, yielding `&Slot<T>`.
pub struct Iter<'a, T> {
    it: core::slice::Iter<'a, Slot<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Slot<T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            it: self.it.clone(),
        }
    }
}

/// Iterator over mutable slots.
pub struct IterMut<'a, T> {
    it: core::slice::IterMut<'a, Slot<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut Slot<T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Iterator over pointed-to values; `None` for empty slots.
pub struct Values<'a, T> {
    it: core::slice::Iter<'a, Slot<T>>,
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = Option<&'a T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(Slot::get)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> DoubleEndedIterator for Values<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back().map(Slot::get)
    }
}

impl<T> ExactSizeIterator for Values<'_, T> {}
impl<T> FusedIterator for Values<'_, T> {}

/// Owning iterator, yielding each `Slot<T>`.
pub struct IntoIter<T> {
    it: std::vec::IntoIter<Slot<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = Slot<T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> SharedVec<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.as_slice().iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            it: self.as_mut_slice().iter_mut(),
        }
    }

    /// Values behind each slot, in order.
    pub fn values(&self) -> Values<'_, T> {
        Values {
            it: self.as_slice().iter(),
        }
    }
}

impl<T> IntoIterator for SharedVec<T> {
    type Item = Slot<T>;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            it: self.into_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SharedVec<T> {
    type Item = &'a Slot<T>;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SharedVec<T> {
    type Item = &'a mut Slot<T>;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn sample() -> SharedVec<i32> {
        [Slot::new(1), Slot::new(2), Slot::empty(), Slot::new(3)].into()
    }

    /// Invariant: `iter` yields every slot in order, empty ones included,
    /// exposing both the handle and the raw address.
    #[test]
    fn iter_yields_slots_in_order() {
        let v = sample();
        assert_eq!(v.iter().len(), 4);
        let rendered: Vec<String> = v.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, ["1", "2", "NULL", "3"]);
        let ptrs: Vec<*const i32> = (&v).into_iter().map(Slot::as_ptr).collect();
        assert_eq!(ptrs[0], v[0].as_ptr());
        assert!(ptrs[2].is_null());
        assert_eq!(v.iter().filter(|s| s.handle().is_some()).count(), 3);
    }

    /// Invariant: reverse iteration visits slots back to front.
    #[test]
    fn reverse_iteration() {
        let v = sample();
        let vals: Vec<Option<i32>> = v.values().rev().map(|x| x.copied()).collect();
        assert_eq!(vals, vec![Some(3), None, Some(2), Some(1)]);
        assert!(v.iter().next_back().unwrap().ptr_eq(&v[3]));
    }

    /// Invariant: `iter_mut` allows rewriting slots in place.
    #[test]
    fn iter_mut_rewrites() {
        let mut v = sample();
        for slot in v.iter_mut() {
            if slot.is_empty() {
                *slot = Slot::new(0);
            }
        }
        for slot in &mut v {
            if let Some(x) = slot.get_mut() {
                *x *= 10;
            }
        }
        assert_eq!(v.to_string(), "[ 10 20 0 30 ]");
    }

    /// Invariant: consuming iteration hands out the handles without dropping
    /// their values while the slots are still held.
    #[test]
    fn into_iter_moves_slots() {
        let rc = Rc::new(5);
        let v: SharedVec<i32> = [Slot::share(&rc), Slot::empty()].into();
        let slots: Vec<Slot<i32>> = v.into_iter().collect();
        assert_eq!(slots.len(), 2);
        assert_eq!(Rc::strong_count(&rc), 2);
        drop(slots);
        assert_eq!(Rc::strong_count(&rc), 1);
    }
}
