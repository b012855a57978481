//! SharedVec: storage, lifecycle, element access and structural mutation.
//!
//! Positions are plain indices. Caller errors (indexing past the end,
//! inserting past `len`) panic the same way they do on `Vec`; `at`, `at_mut`, `replace_at` and the counted
//! constructors are the checked surface and return `Error` instead.

use crate::error::{Error, Result};
use crate::slot::Slot;
use core::ops::{Bound, Index, IndexMut, RangeBounds};
use std::rc::Rc;

pub struct SharedVec<T> {
    slots: Vec<Slot<T>>,
}

impl<T> SharedVec<T> {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// `len` empty slots.
    pub fn with_len(len: usize) -> Result<Self> {
        Self::from_elem(len, Slot::empty())
    }

    /// `len` slots that all share `fill`: one allocation, `len` handles.
    pub fn from_elem(len: usize, fill: Slot<T>) -> Result<Self> {
        Self::check_len(len)?;
        Ok(Self {
            slots: vec![fill; len],
        })
    }

    /// Adopt each allocation into its own slot.
    pub fn from_boxes<I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = Box<T>>,
    {
        boxes.into_iter().map(Slot::adopt).collect()
    }

    /// Move each value into its own allocation.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(Slot::new).collect()
    }

    /// Largest number of slots the backing storage can address.
    pub const fn max_len() -> usize {
        isize::MAX as usize / core::mem::size_of::<Slot<T>>()
    }

    fn check_len(requested: usize) -> Result<()> {
        let max = Self::max_len();
        if requested > max {
            return Err(Error::CapacityOverflow { requested, max });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.slots.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Clone every pointed-to value into a fresh allocation. Unlike `clone`,
    /// the result shares nothing with `self`.
    pub fn deep_clone(&self) -> Self
    where
        T: Clone,
    {
        self.slots
            .iter()
            .map(|s| s.get().map_or_else(Slot::empty, Slot::copy_in))
            .collect()
    }

    /// Replace the contents with `len` slots sharing `fill`.
    pub fn assign(&mut self, len: usize, fill: Slot<T>) -> Result<()> {
        Self::check_len(len)?;
        self.slots.clear();
        self.slots.resize(len, fill);
        debug_assert_eq!(self.slots.len(), len);
        Ok(())
    }

    /// Replace the contents with the given slots, in order.
    pub fn assign_iter<I>(&mut self, slots: I)
    where
        I: IntoIterator<Item = Slot<T>>,
    {
        self.slots.clear();
        self.slots.extend(slots);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub fn reserve_exact(&mut self, additional: usize) {
        self.slots.reserve_exact(additional);
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.slots
            .try_reserve(additional)
            .map_err(|_| Error::CapacityOverflow {
                requested: self.slots.len().saturating_add(additional),
                max: Self::max_len(),
            })
    }

    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
    }

    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.slots.shrink_to(min_capacity);
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&Slot<T>> {
        self.check_index(index)?;
        Ok(&self.slots[index])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Slot<T>> {
        self.check_index(index)?;
        Ok(&mut self.slots[index])
    }

    /// Store `slot` at `index`, releasing the handle that was there, and
    /// return the stored slot. Out of range leaves `self` untouched.
    pub fn replace_at(&mut self, index: usize, slot: Slot<T>) -> Result<&Slot<T>> {
        self.check_index(index)?;
        let target = &mut self.slots[index];
        drop(target.replace(slot));
        Ok(&*target)
    }

    pub fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot<T>> {
        self.slots.get_mut(index)
    }

    /// Value at `index`; `None` if out of range or the slot is empty.
    pub fn value(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Slot::get)
    }

    pub fn front(&self) -> Option<&Slot<T>> {
        self.slots.first()
    }

    pub fn front_mut(&mut self) -> Option<&mut Slot<T>> {
        self.slots.first_mut()
    }

    pub fn back(&self) -> Option<&Slot<T>> {
        self.slots.last()
    }

    pub fn back_mut(&mut self) -> Option<&mut Slot<T>> {
        self.slots.last_mut()
    }

    pub fn as_slice(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Slots may be rewritten or reordered in place; the length is fixed.
    pub fn as_mut_slice(&mut self) -> &mut [Slot<T>] {
        &mut self.slots
    }

    pub fn into_vec(self) -> Vec<Slot<T>> {
        self.slots
    }

    pub fn push_back(&mut self, slot: Slot<T>) {
        self.slots.push(slot);
    }

    /// Append a slot that takes over `boxed`.
    pub fn push_adopt(&mut self, boxed: Box<T>) {
        self.slots.push(Slot::adopt(boxed));
    }

    /// Append a slot holding a clone of `value`.
    pub fn push_copy(&mut self, value: &T)
    where
        T: Clone,
    {
        self.slots.push(Slot::copy_in(value));
    }

    /// Allocate `value`, append it, and return the stored element.
    pub fn emplace_back(&mut self, value: T) -> &T {
        self.slots.push(Slot::new(value));
        self.slots
            .last()
            .and_then(Slot::get)
            .expect("slot must be occupied immediately after emplace")
    }

    /// Allocate `value` and insert it before `index`; returns `index`.
    pub fn emplace(&mut self, index: usize, value: T) -> usize {
        self.insert(index, Slot::new(value))
    }

    pub fn pop_back(&mut self) -> Option<Slot<T>> {
        self.slots.pop()
    }

    /// Insert before `index`, shifting the tail right. Returns the position
    /// of the inserted slot.
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, slot: Slot<T>) -> usize {
        self.slots.insert(index, slot);
        index
    }

    /// Insert `count` slots sharing `fill` before `index`. Returns `index`.
    ///
    /// Panics if `index > len`.
    pub fn insert_n(&mut self, index: usize, count: usize, fill: Slot<T>) -> Result<usize> {
        Self::check_len(self.slots.len().saturating_add(count))?;
        drop(
            self.slots
                .splice(index..index, core::iter::repeat(fill).take(count)),
        );
        debug_assert!(self.slots.len() <= Self::max_len());
        Ok(index)
    }

    /// Insert every slot of `slots`, keeping their order, before `index`.
    /// Returns `index`.
    ///
    /// Panics if `index > len`.
    pub fn insert_iter<I>(&mut self, index: usize, slots: I) -> usize
    where
        I: IntoIterator<Item = Slot<T>>,
    {
        drop(self.slots.splice(index..index, slots));
        index
    }

    /// Remove the slot at `index`. Returns the position of the element that
    /// followed it, which is `len` if the last slot was removed.
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.slots.remove(index));
        index
    }

    /// Remove a range of slots. Returns the position of the element that
    /// followed the range.
    ///
    /// Panics if the range is out of bounds.
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        drop(self.slots.drain(range));
        start
    }

    /// Shrink by dropping trailing slots or grow with empty slots.
    pub fn resize(&mut self, len: usize) {
        self.slots.resize_with(len, Slot::empty);
    }

    /// Shrink by dropping trailing slots or grow with slots sharing `fill`.
    pub fn resize_fill(&mut self, len: usize, fill: Slot<T>) {
        self.slots.resize(len, fill);
    }

    pub fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    /// Drop every slot; capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Exchange storage with `other`. No reference counts change.
    pub fn swap(&mut self, other: &mut SharedVec<T>) {
        core::mem::swap(&mut self.slots, &mut other.slots);
    }
}

/// Exchange the storage of two containers.
pub fn swap<T>(a: &mut SharedVec<T>, b: &mut SharedVec<T>) {
    a.swap(b);
}

impl<T> Default for SharedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SharedVec<T> {
    /// Duplicates handles; every occupied slot of the copy shares its value
    /// with the slot at the same index in `self`.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.slots.clone_from(&source.slots);
    }
}

impl<T> Index<usize> for SharedVec<T> {
    type Output = Slot<T>;

    #[inline]
    fn index(&self, index: usize) -> &Slot<T> {
        &self.slots[index]
    }
}

impl<T> IndexMut<usize> for SharedVec<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Slot<T> {
        &mut self.slots[index]
    }
}

impl<T> From<Vec<Slot<T>>> for SharedVec<T> {
    fn from(slots: Vec<Slot<T>>) -> Self {
        Self { slots }
    }
}

impl<T, const N: usize> From<[Slot<T>; N]> for SharedVec<T> {
    fn from(slots: [Slot<T>; N]) -> Self {
        Self {
            slots: Vec::from(slots),
        }
    }
}

impl<T> From<SharedVec<T>> for Vec<Slot<T>> {
    fn from(v: SharedVec<T>) -> Self {
        v.slots
    }
}

impl<T> FromIterator<Slot<T>> for SharedVec<T> {
    fn from_iter<I: IntoIterator<Item = Slot<T>>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl<T> FromIterator<Rc<T>> for SharedVec<T> {
    fn from_iter<I: IntoIterator<Item = Rc<T>>>(iter: I) -> Self {
        iter.into_iter().map(Slot::from).collect()
    }
}

impl<T> Extend<Slot<T>> for SharedVec<T> {
    fn extend<I: IntoIterator<Item = Slot<T>>>(&mut self, iter: I) {
        self.slots.extend(iter);
    }
}

impl<T> Extend<Rc<T>> for SharedVec<T> {
    fn extend<I: IntoIterator<Item = Rc<T>>>(&mut self, iter: I) {
        self.slots.extend(iter.into_iter().map(Slot::from));
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for SharedVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}
