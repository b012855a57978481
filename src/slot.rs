//! Slot: one position of a `SharedVec`, either empty or holding a shared
//! `Rc<T>` handle.
//!
//! Ownership enters a slot through one of three named paths so intent stays
//! visible at the call site:
//! - `Slot::adopt(Box<T>)`: hand over an existing allocation.
//! - `Slot::copy_in(&T)`: clone a value into a fresh allocation.
//! - `Slot::new(T)`: move a value into a fresh allocation.
//!
//! `Slot::from(Rc<T>)` and `Slot::share(&Rc<T>)` alias an allocation that is
//! already shared; the pointee is dropped when its last handle, inside or
//! outside any container, goes away.
//!
//! Comparison treats the empty slot as a value of its own: it equals only
//! another empty slot and orders after every occupied slot.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ptr;
use std::rc::Rc;

pub struct Slot<T> {
    rc: Option<Rc<T>>,
}

impl<T> Slot<T> {
    /// A slot holding nothing.
    pub const fn empty() -> Self {
        Self { rc: None }
    }

    /// Move `value` into a new shared allocation.
    pub fn new(value: T) -> Self {
        Self {
            rc: Some(Rc::new(value)),
        }
    }

    /// Take ownership of an existing allocation. The value is moved into
    /// reference-counted storage; it is not cloned.
    pub fn adopt(boxed: Box<T>) -> Self {
        Self {
            rc: Some(Rc::from(boxed)),
        }
    }

    /// Allocate a clone of `value`.
    pub fn copy_in(value: &T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone())
    }

    /// Another handle to the allocation behind `rc`.
    pub fn share(rc: &Rc<T>) -> Self {
        Self {
            rc: Some(Rc::clone(rc)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rc.is_none()
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.rc.is_some()
    }

    /// Borrow the pointed-to value.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.rc.as_deref()
    }

    /// Mutable access, only when this slot is the sole owner of its value.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.rc.as_mut().and_then(Rc::get_mut)
    }

    /// Borrow the shared handle.
    #[inline]
    pub fn handle(&self) -> Option<&Rc<T>> {
        self.rc.as_ref()
    }

    pub fn into_handle(self) -> Option<Rc<T>> {
        self.rc
    }

    /// Address of the pointed-to value, null when empty. Used for identity
    /// comparisons only.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.rc.as_ref().map_or(ptr::null(), Rc::as_ptr)
    }

    /// True if both slots refer to the same allocation, or both are empty.
    #[inline]
    pub fn ptr_eq(&self, other: &Slot<T>) -> bool {
        self.as_ptr() == other.as_ptr()
    }

    /// Number of strong handles to the pointed-to value; 0 when empty.
    pub fn strong_count(&self) -> usize {
        self.rc.as_ref().map_or(0, Rc::strong_count)
    }

    /// Leave this slot empty and return what it held.
    pub fn take(&mut self) -> Slot<T> {
        Slot {
            rc: self.rc.take(),
        }
    }

    /// Store `other` here and return the previous contents.
    pub fn replace(&mut self, other: Slot<T>) -> Slot<T> {
        core::mem::replace(self, other)
    }

    /// Compare two slots with `f`, placing empty slots after occupied ones.
    pub(crate) fn cmp_null_last<F>(&self, other: &Slot<T>, f: &mut F) -> Ordering
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => f(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl<T> Clone for Slot<T> {
    /// Shares the handle; the pointee is not cloned.
    fn clone(&self) -> Self {
        Self {
            rc: self.rc.clone(),
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Rc<T>> for Slot<T> {
    fn from(rc: Rc<T>) -> Self {
        Self { rc: Some(rc) }
    }
}

impl<T> From<Box<T>> for Slot<T> {
    fn from(boxed: Box<T>) -> Self {
        Self::adopt(boxed)
    }
}

impl<T> From<Option<Rc<T>>> for Slot<T> {
    fn from(rc: Option<Rc<T>>) -> Self {
        Self { rc }
    }
}

impl<T> From<Slot<T>> for Option<Rc<T>> {
    fn from(slot: Slot<T>) -> Self {
        slot.rc
    }
}

impl<T: PartialEq> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Slot<T> {}

impl<T: PartialOrd> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => a.partial_cmp(b),
            (Some(_), None) => Some(Ordering::Less),
            (None, Some(_)) => Some(Ordering::Greater),
            (None, None) => Some(Ordering::Equal),
        }
    }
}

impl<T: Ord> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_null_last(other, &mut |a: &T, b: &T| a.cmp(b))
    }
}

impl<T: Hash> Hash for Slot<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(v) => fmt::Debug::fmt(v, f),
            None => f.write_str("NULL"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("NULL"),
        }
    }
}
