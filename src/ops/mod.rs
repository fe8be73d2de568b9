//! The operation catalogue.
//!
//! Every function here builds a stage for the `|` operator. Stages are grouped by how they
//! resolve the operand's category:
//!
//! | family | stage type | operand handling |
//! |---|---|---|
//! | [access](access) | `Tag` | references in, references out; temporaries give up an owned element |
//! | [views](view) | `Tag` | views over borrows, eager results for temporaries |
//! | [queries](query), [materialization](collect), [text](text) | `Query` | read-only, owned result |
//! | [edits](edit) | `Edit` | copy-and-edit, or in place through `Mutable` and mutable views |
//! | [scalars](scalar) | `Tag` | single values: bounds, intervals, math functions |
//!
//! ```
//! use collection_pipes::ops::{filter, sorted, to_vec};
//!
//! let v = vec![4, 3, 4, 5, 6, 7];
//! let big = &v | sorted() | filter(|x: &i32| *x >= 5) | to_vec();
//! assert_eq!(big, vec![5, 6, 7]);
//! ```

pub mod access;
pub mod collect;
pub mod edit;
pub mod query;
pub mod scalar;
pub mod text;
pub mod view;

pub use access::{at, back, find, find_if, front, middle, taken};
pub use collect::{collect_into, to_btree_set, to_deque, to_list, to_set, to_vec};
pub use edit::{
    deduped, erased_all, erased_all_if, erased_first, erased_first_if, erased_last,
    erased_last_if, filled, for_each, next_permutation, nth_element, partitioned, popped_back,
    popped_front, prev_permutation, pushed_back, pushed_front, replaced, replaced_if, reversed,
    rotated, sorted, sorted_by, sorted_by_key, stable_partitioned,
};
pub use query::{
    all_of, all_of_equal, any_of, any_of_equal, binary_search, contains, count, count_if, equal,
    find_index, find_index_if, fold, includes, is_empty, is_sorted, lower_bound, max_value,
    mean_value, min_value, minmax_value, none_of, none_of_equal, size, sum, to_display,
    transformed, upper_bound,
};
pub use scalar::{
    abs, acos, asin, atan, ceil, clamp, cos, cosh, exp, exp2, floor, is_any_of, ln, log10, pow,
    reinterval, reinterval_clamped, round, sin, sinh, sqrt, tan, tanh, trunc,
};
pub use text::{
    replaced_substring, to_lower, to_upper, tokenized, trimmed, trimmed_end, trimmed_start,
};
pub use view::{
    back_inserter, category, filter, front_inserter, mutate, sub_range, sub_range_len,
};
