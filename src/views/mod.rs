//! Non-owning views produced by the `filter` and `sub_range` stages.
//!
//! Views borrow their source, so the borrow checker guarantees the source outlives them and is
//! not reallocated while they exist. Both kinds implement [`Sequence`](crate::Sequence) and can
//! be piped further: into queries, into more views, or (for the mutable kinds) into edits.

mod filter;
mod sub_range;

pub use filter::{CursorState, Element, FilterCursor, FilterIter, FilterView, FilterViewMut};
pub use sub_range::{SubRange, SubRangeMut};
