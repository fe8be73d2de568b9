use collection_pipes::ops::{
    back, back_inserter, category, filter, front, mutate, popped_front, pushed_back, sorted,
    sub_range, taken, to_vec,
};
use collection_pipes::{Mutable, Operand, Owned, ValueCategory};

fn category_of<O: Operand>(_: &O) -> ValueCategory {
    O::CATEGORY
}

#[test]
fn every_operand_kind_has_a_static_category() {
    let mut v = vec![1, 2, 3];
    assert_eq!(vec![1] | category(), ValueCategory::Temporary);
    assert_eq!(&v | category(), ValueCategory::Shared);
    assert_eq!(&mut v | category(), ValueCategory::Exclusive);
    assert_eq!(&mut v | mutate() | category(), ValueCategory::Wrapped);
    assert_eq!(category_of(&Owned(0_u8)), ValueCategory::Temporary);
    assert_eq!(category_of(&Mutable::new(&mut v)), ValueCategory::Wrapped);
}

#[test]
fn views_carry_the_category_of_their_source() {
    let mut v = vec![1, 2, 3];
    assert_eq!(&v | sub_range(1) | category(), ValueCategory::Shared);
    assert_eq!(&v | filter(|x: &i32| *x > 1) | category(), ValueCategory::Shared);
    assert_eq!(&mut v | sub_range(1) | category(), ValueCategory::Exclusive);
    assert_eq!(
        &mut v | mutate() | filter(|x: &i32| *x > 1) | category(),
        ValueCategory::Exclusive
    );
}

#[test]
fn shared_operands_are_never_modified() {
    let v = vec![3, 1, 2];
    let sorted_copy = &v | sorted();
    assert_eq!(sorted_copy, vec![1, 2, 3]);
    assert_eq!(v, vec![3, 1, 2]);
}

#[test]
fn exclusive_references_copy_for_edits_unless_wrapped() {
    let mut v = vec![3, 1, 2];
    let copy = &mut v | sorted();
    assert_eq!(copy, vec![1, 2, 3]);
    assert_eq!(v, vec![3, 1, 2]);

    let _ = &mut v | mutate() | sorted();
    assert_eq!(v, vec![1, 2, 3]);
}

#[test]
fn exclusive_references_prefer_reference_returning_access() {
    let mut v = vec![1, 2, 3];
    let last: &mut i32 = &mut v | back();
    *last = 30;
    assert_eq!(v, vec![1, 2, 30]);
}

#[test]
fn temporaries_hand_back_owned_values() {
    let first: String = vec![String::from("x"), String::from("y")] | front();
    assert_eq!(first, "x");

    let kept: Vec<i32> = vec![1, 2, 3] | filter(|x: &i32| *x != 2);
    assert_eq!(kept, vec![1, 3]);

    let edited = vec![1, 2] | pushed_back(3) | popped_front();
    assert_eq!(edited, vec![2, 3]);
}

#[test]
fn wrapped_operands_unlock_insertion_and_moves() {
    let mut v = vec![1];
    (&mut v | mutate() | back_inserter()).extend(2..=3);
    assert_eq!(&v | to_vec(), vec![1, 2, 3]);

    let moved = &mut v | mutate() | taken();
    assert_eq!(moved, vec![1, 2, 3]);
    assert!(v.is_empty());
}
