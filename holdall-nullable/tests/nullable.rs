use holdall_core::ContainerError;
use holdall_nullable::convert::into_value;
use holdall_nullable::Nullable;
use proptest::prelude::*;
use rstest::{fixture, rstest};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// Counts how many times values sharing the same counter were dropped.
#[derive(Debug)]
struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[fixture]
fn drops() -> Rc<Cell<usize>> {
    Rc::new(Cell::new(0))
}

fn create(found: bool) -> Nullable<String> {
    if found {
        Nullable::new("Godzilla".to_string())
    } else {
        Nullable::empty()
    }
}

#[test]
fn empty_has_no_value() {
    let empty: Nullable<String> = Nullable::empty();
    assert!(!empty.has_value());
    assert!(matches!(empty.value(), Err(ContainerError::EmptyAccess { type_name: "String" })));
    assert!(!Nullable::<u8>::default().has_value());
}

#[rstest]
#[case(true, "Godzilla")]
#[case(false, "empty")]
fn factory_result_or_fallback(#[case] found: bool, #[case] expected: &str) {
    let created = create(found);
    assert_eq!(created.value_or("empty".to_string()), expected);
    assert_eq!(created.has_value(), found);
}

#[test]
fn value_or_leaves_an_empty_container_alone() {
    let empty: Nullable<i32> = Nullable::empty();
    assert_eq!(empty.value_or(7), 7);
    assert_eq!(empty.value_or_else(|| 8), 8);
    assert!(!empty.has_value());
}

#[test]
fn value_mut_writes_through() {
    let mut n = Nullable::new(vec![22, 22, 22]);
    n.value_mut().unwrap().push(1);
    assert_eq!(n.value().unwrap(), &vec![22, 22, 22, 1]);

    let mut empty: Nullable<Vec<i32>> = Nullable::empty();
    assert_eq!(empty.value_mut().unwrap_err().kind(), "EmptyAccess");
}

#[test]
fn holds_a_mutable_reference() {
    let mut target = "Godzilla".to_string();
    {
        let mut by_ref: Nullable<&mut String> = Nullable::new(&mut target);
        **by_ref.value_mut().unwrap() = "Mothra".to_string();
    }
    assert_eq!(target, "Mothra");

    let empty: Nullable<&mut String> = Nullable::empty();
    let message = empty.value().unwrap_err().to_string();
    assert!(message.contains("no `&mut String` value"), "unexpected message: {}", message);
}

#[rstest]
fn reset_is_idempotent(drops: Rc<Cell<usize>>) {
    let mut n = Nullable::new(DropCounter(drops.clone()));
    n.reset();
    assert!(!n.has_value());
    assert_eq!(drops.get(), 1);

    n.reset();
    assert!(!n.has_value());
    assert_eq!(drops.get(), 1);
}

#[rstest]
fn dropping_the_container_destroys_the_value_once(drops: Rc<Cell<usize>>) {
    {
        let _n = Nullable::new(DropCounter(drops.clone()));
        let _empty: Nullable<DropCounter> = Nullable::empty();
    }
    assert_eq!(drops.get(), 1);
}

#[rstest]
fn emplace_replaces_the_previous_value(drops: Rc<Cell<usize>>) {
    let mut n = Nullable::new(DropCounter(drops.clone()));
    n.emplace(DropCounter(drops.clone()));
    assert!(n.has_value());
    assert_eq!(drops.get(), 1);

    drop(n);
    assert_eq!(drops.get(), 2);
}

#[test]
fn emplace_with_builds_in_place() {
    let ints: BTreeSet<i32> = [4, 7, 1, 41].into_iter().collect();
    let mut n = Nullable::new(vec![22; 3]);
    let built = n.emplace_with(|| ints.iter().copied().collect());
    assert_eq!(built, &vec![1, 4, 7, 41]);
}

#[rstest]
fn failed_construction_leaves_it_empty(drops: Rc<Cell<usize>>) {
    let mut n = Nullable::new(DropCounter(drops.clone()));

    let result = n.try_emplace(|| Err::<DropCounter, _>(anyhow::anyhow!("no memory left")));

    let error = result.unwrap_err();
    assert_eq!(error.kind(), "ConstructionFailure");
    assert!(error.to_string().contains("no memory left"));
    assert!(!n.has_value());
    assert_eq!(drops.get(), 1);
}

#[test]
fn successful_try_emplace_is_present() {
    let mut n: Nullable<u16> = Nullable::empty();
    let value = n.try_emplace(|| "42".parse::<u16>()).unwrap();
    *value += 1;
    assert_eq!(n.value().unwrap(), &43);

    let error = n.try_emplace(|| "forty-two".parse::<u16>()).unwrap_err();
    assert!(matches!(error, ContainerError::ConstructionFailure { type_name: "u16", .. }));
    assert!(!n.has_value());
}

#[rstest]
fn panicking_constructor_leaves_it_empty(drops: Rc<Cell<usize>>) {
    let mut n = Nullable::new(DropCounter(drops.clone()));

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        n.emplace_with(|| panic!("constructor blew up"));
    }));

    assert!(outcome.is_err());
    assert!(!n.has_value());
    assert_eq!(drops.get(), 1);
}

#[test]
fn take_moves_out_and_empties() {
    let mut n = Nullable::new("abc".to_string());
    assert_eq!(n.take().as_deref(), Some("abc"));
    assert!(!n.has_value());
    assert_eq!(n.take(), None);

    assert_eq!(n.replace("x".to_string()), None);
    assert_eq!(n.replace("y".to_string()).as_deref(), Some("x"));
    assert_eq!(n.into_value_or("z".to_string()), "y");
}

#[test]
fn clone_is_deep() {
    let original = Nullable::new(vec![1, 2, 3]);
    let mut copy = original.clone();
    copy.value_mut().unwrap().push(4);

    assert_eq!(original.value().unwrap().len(), 3);
    assert_eq!(copy.value().unwrap().len(), 4);
    assert_eq!(Nullable::<i32>::empty().clone(), Nullable::empty());
}

#[test]
fn unchecked_access_on_a_present_value() {
    let mut n = Nullable::new(5);
    unsafe {
        *n.get_unchecked_mut() += 1;
        assert_eq!(*n.get_unchecked(), 6);
    }
}

#[test]
fn conversions() {
    let from_some: Nullable<i32> = Some(3).into();
    let from_none: Nullable<i32> = None.into();
    assert_eq!(from_some, Nullable::new(3));
    assert_eq!(Option::<i32>::from(from_none), None);

    assert_eq!(into_value(Nullable::new('c')).unwrap(), 'c');
    let error = into_value(Nullable::<char>::empty()).unwrap_err();
    assert!(error.to_string().contains("char"));

    let last: Nullable<i32> = (1..=4).collect();
    assert_eq!(last, Nullable::new(4));
    assert_eq!(format!("{:?}", last), "Nullable(4)");
    assert_eq!(format!("{:?}", Nullable::<i32>::empty()), "Nullable(empty)");
}

proptest! {
    #[test]
    fn present_values_read_back(v in any::<i64>()) {
        let n = Nullable::new(v);
        prop_assert!(n.has_value());
        prop_assert_eq!(*n.value().unwrap(), v);
        prop_assert_eq!(n.value_or(v.wrapping_add(1)), v);
    }

    #[test]
    fn strings_read_back(v in ".*") {
        let n = Nullable::new(v.clone());
        prop_assert_eq!(n.value().unwrap(), &v);
    }
}
