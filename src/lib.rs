//! `collection-pipes` lets you write collection transformations left to right:
//! `value | operation | operation | ...`.
//!
//! Which implementation runs is decided at compile time by the *category* of the value flowing
//! into each stage:
//!
//! - a **temporary** (`vec![..] | stage`): the stage consumes it and returns owned data; nothing
//!   that borrows from the temporary can be produced,
//! - a **shared borrow** (`&v | stage`): read-only implementations, copies for edits,
//! - an **exclusive borrow** (`&mut v | stage`): reference-returning implementations where they
//!   exist (`front`, `find`, `filter`, `sub_range`, ...),
//! - an explicit **[`Mutable`]** wrapper (`&mut v | mutate() | stage`): edits apply to `v` in
//!   place and the chain continues on the wrapper.
//!
//! A stage with no implementation for an operand's category does not compile.
//!
//! ## Quick example
//!
//! ```
//! use collection_pipes::ops::{filter, sorted, to_vec};
//!
//! let v = vec![4, 3, 4, 5, 6, 7];
//! let out = &v | sorted() | filter(|x: &i32| *x >= 5) | to_vec();
//! assert_eq!(out, vec![5, 6, 7]);
//! // `v` was only read.
//! assert_eq!(v, vec![4, 3, 4, 5, 6, 7]);
//! ```
//!
//! ## Views
//!
//! `filter` and `sub_range` over a borrow return non-owning views ([`views`]) that can be piped
//! further. Over an exclusive borrow or a `Mutable`, the views write through to the source:
//!
//! ```
//! use collection_pipes::ops::{filled, filter, mutate, sub_range};
//!
//! let mut v = vec![0, 0, 0, 0];
//! let _ = &mut v | mutate() | sub_range(1) | filled(1);
//! assert_eq!(v, vec![0, 1, 1, 1]);
//!
//! for x in &mut v | filter(|x: &i32| *x == 1) {
//!     *x = 2;
//! }
//! assert_eq!(v, vec![0, 2, 2, 2]);
//! ```
//!
//! ## Plain functions
//!
//! [`pipe`] and [`pipe_with`] put any function into the same chain:
//!
//! ```
//! use collection_pipes::{pipe, pipe_with};
//! use collection_pipes::ops::sorted;
//!
//! fn total(v: Vec<u32>) -> u32 {
//!     v.iter().sum()
//! }
//!
//! let t = vec![3_u32, 1, 2] | sorted() | pipe(total);
//! assert_eq!(t, 6);
//! let scaled = t | pipe_with(|x: u32, k: u32| x * k, 10);
//! assert_eq!(scaled, 60);
//! ```
//!
//! ## Preconditions
//!
//! Empty-operand access, out-of-range offsets and similar misuse are reported through
//! [`contract`]. See that module for the enforcement policy and observers.
//!
//! ## Modules
//!
//! - [`ops`]: every named operation
//! - [`pipeline`]: stage types and the resolver traits for custom operations
//! - [`views`]: filter and sub-range views
//! - [`capability`]: the container traits operations are written against
//! - [`numeric`]: the primitive arithmetic types the numeric stages accept
//! - [`contract`]: precondition enforcement and reporting
//! - [`error`]: [`ContractViolation`]

pub mod capability;
pub mod category;
pub mod contract;
pub mod error;
pub mod mutable;
pub mod numeric;
pub mod ops;
pub mod pipeline;
pub mod views;

pub use capability::{
    Clear, ContiguousMut, Sequence, SequenceMut, SequenceStorage, SetStorage, SortInPlace,
};
pub use category::{Operand, Owned, ValueCategory};
pub use error::ContractViolation;
pub use mutable::{InsertPosition, Inserter, Mutable};
pub use numeric::{Arithmetic, Real};
pub use pipeline::{pipe, pipe_with, Edit, Pipe, PipeWith, Query, Tag};
