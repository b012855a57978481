//! shared-handle-vec: a contiguous, indexable sequence whose elements are
//! owned through `Rc` handles, so the same object can sit in several
//! containers (or in outside hands) and is dropped when its last handle goes.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: `Vec`-like ergonomics for heap objects with shared ownership,
//!   without manual lifetime tracking and without double-ownership bugs.
//! - Layers:
//!   - Slot<T>: one position; either empty or an `Rc<T>`. Owns the rules for
//!     adoption, identity and null-aware comparison.
//!   - SharedVec<T>: a `Vec<Slot<T>>` with checked and unchecked access,
//!     structural mutation, capacity control.
//!   - search: equality/ordering, identity/value/predicate find, stable
//!     null-last sort and the `[ a b NULL ]` text form, all expressed on top
//!     of the slot rules.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` through `Rc` (no atomics).
//! - Contiguous storage; amortized O(1) append; O(n) insert/erase.
//! - Cloning the container clones handles, never values (`deep_clone` does
//!   the latter).
//! - No internal locking: mutating a shared value needs either uniqueness
//!   (`Slot::get_mut`) or interior mutability inside `T`.
//!
//! Ownership entry points
//! - adopt: `Slot::adopt(Box<T>)`, `SharedVec::push_adopt`, `from_boxes`.
//! - copy in: `Slot::copy_in(&T)`, `SharedVec::push_copy`.
//! - construct in place: `Slot::new(T)`, `SharedVec::emplace_back`,
//!   `SharedVec::emplace`, `from_values`.
//! - alias: `Slot::share(&Rc<T>)`, `Slot::from(Rc<T>)`, and the fill
//!   operations `from_elem`, `assign`, `insert_n`, `resize_fill`, which
//!   store one handle many times.
//!
//! Empty slots
//! - Equal only to empty slots; order after every occupied slot.
//! - `sort`/`sort_by`/`sort_by_key` keep them last regardless of comparator.
//! - Never matched by value search, never passed to predicates; identity
//!   search with a null pointer finds them.
//! - Rendered as `NULL`.
//!
//! Errors
//! - `Error::OutOfRange` from `at`, `at_mut`, `replace_at`.
//! - `Error::CapacityOverflow` from counted constructors and fills.
//! - Everything else that `Vec` treats as a caller bug (indexing past the
//!   end, inserting past `len`) panics the same way.

mod error;
mod iter;
mod search;
mod shared_vec;
mod shared_vec_proptest;
mod slot;

// Public surface
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, IterMut, Values};
pub use search::sort;
pub use shared_vec::{swap, SharedVec};
pub use slot::Slot;
