#![cfg(test)]

// Property tests for SharedVec kept inside the crate, next to the unit tests,
// driving the container and a plain-`Vec` model with the same operations.

use crate::error::Error;
use crate::shared_vec::SharedVec;
use crate::slot::Slot;
use core::cmp::Ordering;
use proptest::prelude::*;
use std::rc::Rc;

// Pool-indexed operations: indices shrink toward the first pool entries and
// positions are reduced modulo the current length at execution time.
#[derive(Clone, Debug)]
enum Op {
    PushShared(usize),
    PushNew(i32),
    PushEmpty,
    Pop,
    Insert(usize, usize),
    InsertN(usize, usize, usize),
    Erase(usize),
    EraseRange(usize, usize),
    Resize(usize),
    ResizeFill(usize, usize),
    ReplaceAt(usize, usize),
    Sort,
    Clear,
    FindValue(i32),
    FindShared(usize),
}

type Model = Vec<Option<Rc<i32>>>;

fn arb_scenario() -> impl Strategy<Value = (Vec<i32>, Vec<Op>)> {
    proptest::collection::vec(-5i32..5, 1..=6).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            idx.clone().prop_map(Op::PushShared),
            (-5i32..5).prop_map(Op::PushNew),
            Just(Op::PushEmpty),
            Just(Op::Pop),
            (0usize..16, idx.clone()).prop_map(|(p, i)| Op::Insert(p, i)),
            (0usize..16, 0usize..4, idx.clone()).prop_map(|(p, n, i)| Op::InsertN(p, n, i)),
            (0usize..16).prop_map(Op::Erase),
            (0usize..16, 0usize..16).prop_map(|(a, b)| Op::EraseRange(a, b)),
            (0usize..12).prop_map(Op::Resize),
            (0usize..12, idx.clone()).prop_map(|(n, i)| Op::ResizeFill(n, i)),
            (0usize..16, idx.clone()).prop_map(|(p, i)| Op::ReplaceAt(p, i)),
            Just(Op::Sort),
            Just(Op::Clear),
            (-5i32..5).prop_map(Op::FindValue),
            idx.prop_map(Op::FindShared),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn model_cmp(a: &Option<Rc<i32>>, b: &Option<Rc<i32>>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn model_ptr(s: &Option<Rc<i32>>) -> *const i32 {
    s.as_ref().map_or(core::ptr::null(), Rc::as_ptr)
}

// Property: state-machine equivalence against a plain `Vec<Option<Rc<_>>>`.
// Invariants exercised across random operation sequences:
// - Slot identities (addresses) match the model position by position.
// - `len`/`is_empty` parity; `is_empty` iff `len == 0`.
// - Checked replacement fails exactly when the model index is out of range.
// - Sort is stable, null-last, and moves handles rather than values.
// - `find`/`find_value` agree with the model's first match.
// - Reference counts of pool values equal 1 (the pool) + model + sut holders.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool_vals, ops) in arb_scenario()) {
        let pool: Vec<Rc<i32>> = pool_vals.into_iter().map(Rc::new).collect();
        let mut sut: SharedVec<i32> = SharedVec::new();
        let mut model: Model = Vec::new();

        for op in ops {
            match op {
                Op::PushShared(i) => {
                    sut.push_back(Slot::share(&pool[i]));
                    model.push(Some(Rc::clone(&pool[i])));
                }
                Op::PushNew(v) => {
                    let p = core::ptr::from_ref(sut.emplace_back(v));
                    prop_assert_eq!(sut.back().map(Slot::as_ptr), Some(p));
                    let rc = sut.back().and_then(Slot::handle).cloned();
                    model.push(rc);
                }
                Op::PushEmpty => {
                    sut.push_back(Slot::empty());
                    model.push(None);
                }
                Op::Pop => {
                    let got = sut.pop_back().map(|s| s.as_ptr());
                    let want = model.pop().map(|s| model_ptr(&s));
                    prop_assert_eq!(got, want);
                }
                Op::Insert(p, i) => {
                    let at = p % (model.len() + 1);
                    prop_assert_eq!(sut.insert(at, Slot::share(&pool[i])), at);
                    model.insert(at, Some(Rc::clone(&pool[i])));
                }
                Op::InsertN(p, n, i) => {
                    let at = p % (model.len() + 1);
                    prop_assert_eq!(sut.insert_n(at, n, Slot::share(&pool[i])), Ok(at));
                    drop(model.splice(at..at, core::iter::repeat(Some(Rc::clone(&pool[i]))).take(n)));
                }
                Op::Erase(p) => {
                    if !model.is_empty() {
                        let at = p % model.len();
                        prop_assert_eq!(sut.erase(at), at);
                        model.remove(at);
                    }
                }
                Op::EraseRange(a, b) => {
                    let len = model.len();
                    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                    let (lo, hi) = (lo.min(len), hi.min(len));
                    prop_assert_eq!(sut.erase_range(lo..hi), lo);
                    drop(model.drain(lo..hi));
                }
                Op::Resize(n) => {
                    sut.resize(n);
                    model.resize(n, None);
                }
                Op::ResizeFill(n, i) => {
                    sut.resize_fill(n, Slot::share(&pool[i]));
                    model.resize(n, Some(Rc::clone(&pool[i])));
                }
                Op::ReplaceAt(p, i) => {
                    let res = sut.replace_at(p, Slot::share(&pool[i])).map(Slot::as_ptr);
                    if p < model.len() {
                        prop_assert_eq!(res, Ok(Rc::as_ptr(&pool[i])));
                        model[p] = Some(Rc::clone(&pool[i]));
                    } else {
                        prop_assert_eq!(res, Err(Error::OutOfRange { index: p, len: model.len() }));
                    }
                }
                Op::Sort => {
                    sut.sort();
                    model.sort_by(model_cmp);
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
                Op::FindValue(v) => {
                    let want = model.iter().position(|s| s.as_deref() == Some(&v));
                    prop_assert_eq!(sut.find_value(&v), want);
                }
                Op::FindShared(i) => {
                    let p = Rc::as_ptr(&pool[i]);
                    let want = model.iter().position(|s| model_ptr(s) == p);
                    prop_assert_eq!(sut.find(p), want);
                    prop_assert_eq!(sut.find_handle(&pool[i]), want);
                }
            }

            // Post-conditions after each op
            // 1) Identity parity, position by position
            let got: Vec<*const i32> = sut.iter().map(Slot::as_ptr).collect();
            let want: Vec<*const i32> = model.iter().map(model_ptr).collect();
            prop_assert_eq!(got, want);
            // 2) Size parity
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), sut.len() == 0);
            // 3) Pool refcounts: pool + model + sut
            for rc in &pool {
                let p = Rc::as_ptr(rc);
                let in_model = model.iter().filter(|s| model_ptr(s) == p).count();
                let in_sut = sut.iter().filter(|s| s.as_ptr() == p).count();
                prop_assert_eq!(in_model, in_sut);
                prop_assert_eq!(Rc::strong_count(rc), 1 + in_model + in_sut);
            }
        }
    }
}

// Property: sorting yields a null-last ascending sequence that is a
// permutation of the input handles, and equal values keep their order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_sort_null_last_stable(vals in proptest::collection::vec(proptest::option::of(0i32..4), 0..40)) {
        let mut v: SharedVec<i32> = vals
            .iter()
            .map(|x| x.map_or_else(Slot::empty, Slot::new))
            .collect();
        let mut before: Vec<(*const i32, Option<i32>)> =
            v.iter().map(|s| (s.as_ptr(), s.get().copied())).collect();
        v.sort();

        let after: Vec<(*const i32, Option<i32>)> =
            v.iter().map(|s| (s.as_ptr(), s.get().copied())).collect();
        before.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        // Empty slots all share the null address, so identity comparison is
        // exact for occupied slots and trivially equal for empty ones.
        prop_assert_eq!(after, before);

        let first_empty = v.iter().position(Slot::is_empty).unwrap_or(v.len());
        prop_assert!(v.iter().skip(first_empty).all(Slot::is_empty));
    }
}

// Property: container equality and ordering agree with the same relations
// computed on `Option<i32>` sequences where `None` is greater than any value.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_compare_matches_model(
        a in proptest::collection::vec(proptest::option::of(0i32..3), 0..6),
        b in proptest::collection::vec(proptest::option::of(0i32..3), 0..6),
    ) {
        let build = |xs: &[Option<i32>]| -> SharedVec<i32> {
            xs.iter().map(|x| x.map_or_else(Slot::empty, Slot::new)).collect()
        };
        // Map None to a key above every value so Vec's ordering matches.
        let key = |xs: &[Option<i32>]| -> Vec<(bool, i32)> {
            xs.iter().map(|x| (x.is_none(), x.unwrap_or(0))).collect()
        };
        let (va, vb) = (build(a.as_slice()), build(b.as_slice()));
        prop_assert_eq!(va == vb, a == b);
        prop_assert_eq!(va.cmp(&vb), key(a.as_slice()).cmp(&key(b.as_slice())));
        prop_assert_eq!(va.partial_cmp(&vb), Some(va.cmp(&vb)));
    }
}
