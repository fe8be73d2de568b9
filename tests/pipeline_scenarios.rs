use std::collections::{BTreeSet, LinkedList, VecDeque};

use collection_pipes::ops::{
    at, back, contains, filled, filter, find, for_each, front, middle, mutate, pushed_back,
    reversed, rotated, size, sorted, sub_range, to_display, to_vec, tokenized, transformed,
};
use collection_pipes::pipe;

#[test]
fn sort_filter_materialize() {
    let v = vec![4, 3, 4, 5, 6, 7];
    let out = &v | sorted() | filter(|x: &i32| *x >= 5) | to_vec();
    assert_eq!(out, vec![5, 6, 7]);
}

#[test]
fn filter_view_materializes_matching_elements_in_order() {
    let c = vec![1, 2, 3, 4, 5, 6, 7];
    assert_eq!(&c | filter(|x: &i32| *x > 3) | to_vec(), vec![4, 5, 6, 7]);
}

#[test]
fn rotation_is_left_rotation() {
    let v = vec![4, 3, 4, 5, 6, 7];
    assert_eq!(&v | rotated(3), vec![5, 6, 7, 4, 3, 4]);
}

#[test]
fn display_of_a_vector() {
    assert_eq!(vec![1, 2, 3] | to_display(), "[1, 2, 3]");
}

#[test]
fn for_each_returns_a_modified_copy() {
    let v = vec![1, 2, 3];
    let doubled = &v | for_each(|x: &mut i32| *x *= 2);
    assert_eq!(doubled, vec![2, 4, 6]);
    assert_eq!(v, vec![1, 2, 3]);
}

#[test]
fn mutate_then_fill_a_window() {
    let mut v = vec![0, 0, 0, 0, 0];
    let _ = &mut v | mutate() | sub_range(1) | filled(1);
    assert_eq!(v, vec![0, 1, 1, 1, 1]);
}

#[test]
fn tokenizing_text() {
    assert_eq!("123454321" | tokenized("43"), vec!["12", "5", "21"]);
    assert_eq!(("11131" | tokenized("13")).len(), 0);
    assert_eq!(("11131" | tokenized("1")).len(), 1);
}

#[test]
fn the_same_stages_work_across_containers() {
    let d: VecDeque<i32> = VecDeque::from([3, 1, 2]);
    let l: LinkedList<i32> = LinkedList::from([3, 1, 2]);
    let s: BTreeSet<i32> = BTreeSet::from([3, 1, 2]);

    assert_eq!(&d | sorted() | to_vec(), vec![1, 2, 3]);
    assert_eq!(&l | reversed() | to_vec(), vec![2, 1, 3]);
    assert_eq!(&s | to_vec(), vec![1, 2, 3]);

    assert_eq!(*(&d | middle()), 1);
    assert_eq!(*(&l | at(2)), 2);
    assert_eq!(*(&s | back()), 3);
    assert!(&s | contains(2));
}

#[test]
fn chains_mix_named_operations_and_functions() {
    let words = vec!["delta", "alpha", "charlie", "bravo"];
    let lengths = &words
        | sorted()
        | pipe(|w: Vec<&str>| w.into_iter().map(str::len).collect::<Vec<_>>())
        | transformed(|n: &usize| n * 10);
    assert_eq!(lengths, vec![50, 50, 70, 50]);
}

#[test]
fn exclusive_borrow_edits_through_accessors() {
    let mut v = vec![1, 2, 3];
    *(&mut v | front()) = 100;
    if let Some(x) = &mut v | find(3) {
        *x = 300;
    }
    let _ = &mut v | mutate() | pushed_back(4);
    assert_eq!(v, vec![100, 2, 300, 4]);
    assert_eq!(&v | size(), 4);
}
