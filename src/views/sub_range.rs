use std::cmp::Ordering;
use std::fmt;
use std::iter::{Skip, Take};
use std::ops::{Index, IndexMut, Range};

use crate::capability::{ContiguousMut, Sequence, SequenceMut, SortInPlace};
use crate::category::{Operand, ValueCategory};
use crate::contract;
use crate::error::ContractViolation;

/// `[front, back)` offsets into the source. Only ever shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    front: usize,
    back: usize,
}

impl Window {
    fn new(source_len: usize, offset: usize, len: Option<usize>) -> Self {
        let offset = if contract::check(offset <= source_len, || {
            ContractViolation::OffsetOutOfRange {
                operation: "SubRange::new",
                offset,
                len: source_len,
            }
        }) {
            offset
        } else {
            source_len
        };

        let available = source_len - offset;
        let len = match len {
            None => available,
            Some(requested) => {
                if contract::check(requested <= available, || {
                    ContractViolation::OffsetOutOfRange {
                        operation: "SubRange::new",
                        offset: offset.saturating_add(requested),
                        len: source_len,
                    }
                }) {
                    requested
                } else {
                    available
                }
            }
        };

        Self {
            front: offset,
            back: offset + len,
        }
    }

    fn len(&self) -> usize {
        self.back - self.front
    }

    fn pop_front(&mut self) -> bool {
        if self.front == self.back {
            return false;
        }
        self.front += 1;
        true
    }

    fn pop_back(&mut self) -> bool {
        if self.front == self.back {
            return false;
        }
        self.back -= 1;
        true
    }

    fn erase(&mut self, index: usize) -> bool {
        contract::check(index == 0, || ContractViolation::EraseNotAtFront {
            operation: "SubRange::erase",
            start: index,
        }) && self.pop_front()
    }

    fn erase_range(&mut self, range: Range<usize>) {
        if !contract::check(range.start == 0, || ContractViolation::EraseNotAtFront {
            operation: "SubRange::erase_range",
            start: range.start,
        }) {
            return;
        }

        let len = self.len();
        let end = if contract::check(range.end <= len, || ContractViolation::OffsetOutOfRange {
            operation: "SubRange::erase_range",
            offset: range.end,
            len,
        }) {
            range.end
        } else {
            len
        };
        self.front += end;
    }

    fn resize(&mut self, requested: usize) {
        let len = self.len();
        if contract::check(requested <= len, || ContractViolation::GrowSubRange {
            operation: "SubRange::resize",
            len,
            requested,
        }) {
            self.back = self.front + requested;
        }
    }

    fn narrow(self, offset: usize) -> Self {
        let inner = Window::new(self.len(), offset, None);
        Self {
            front: self.front + inner.front,
            back: self.back,
        }
    }

    fn slot(&self, index: usize, operation: &'static str) -> usize {
        let len = self.len();
        if index < len {
            self.front + index
        } else {
            contract::fail(ContractViolation::IndexOutOfRange {
                operation,
                index,
                len,
            })
        }
    }

    fn get(&self, index: usize) -> Option<usize> {
        (index < self.len()).then_some(self.front + index)
    }
}

/// Read-only window `[offset, offset + len)` over a borrowed sequence.
///
/// Trimming moves the window edges inward and never touches the source. Growing is not
/// supported: [`resize`](Self::resize) only shrinks.
///
/// Element access on an empty window returns `None`, and trimming an empty window returns
/// `false`. Indexing with `[]` outside the window is fatal.
pub struct SubRange<'a, C: ?Sized> {
    source: &'a C,
    window: Window,
}

impl<C: ?Sized> Clone for SubRange<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for SubRange<'_, C> {}

impl<'a, C: Sequence + ?Sized> SubRange<'a, C> {
    /// Window from `offset` to the end of `source`.
    ///
    /// An offset past the end is a precondition violation; the fallback is an empty window at the
    /// end.
    pub fn new(source: &'a C, offset: usize) -> Self {
        Self {
            window: Window::new(source.len(), offset, None),
            source,
        }
    }

    /// Window of `len` elements starting at `offset`. Clamped to the source on violation.
    pub fn with_len(source: &'a C, offset: usize, len: usize) -> Self {
        Self {
            window: Window::new(source.len(), offset, Some(len)),
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }

    /// Offset of the window's first element in the source.
    pub fn offset(&self) -> usize {
        self.window.front
    }

    pub fn source(&self) -> &'a C {
        self.source
    }

    pub fn front(&self) -> Option<&'a C::Item> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&'a C::Item> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    pub fn get(&self, index: usize) -> Option<&'a C::Item> {
        self.window.get(index).and_then(|slot| self.source.at(slot))
    }

    pub fn iter(&self) -> Take<Skip<C::Iter<'a>>> {
        self.source
            .iter()
            .skip(self.window.front)
            .take(self.window.len())
    }

    /// Drop the first element. Returns `false` on an empty window.
    pub fn pop_front(&mut self) -> bool {
        self.window.pop_front()
    }

    /// Drop the last element. Returns `false` on an empty window.
    pub fn pop_back(&mut self) -> bool {
        self.window.pop_back()
    }

    /// Erase the element at window offset `index`, which must be 0.
    pub fn erase(&mut self, index: usize) -> bool {
        self.window.erase(index)
    }

    /// Erase a prefix of the window. `range` must start at 0.
    pub fn erase_range(&mut self, range: Range<usize>) {
        self.window.erase_range(range)
    }

    /// Keep the first `len` elements. Growing is a precondition violation and leaves the window
    /// unchanged.
    pub fn resize(&mut self, len: usize) {
        self.window.resize(len)
    }

    /// Sub-range of this sub-range, starting `offset` elements in.
    pub fn narrow(self, offset: usize) -> Self {
        Self {
            source: self.source,
            window: self.window.narrow(offset),
        }
    }
}

impl<'a, C: Sequence + ?Sized> Sequence for SubRange<'a, C> {
    type Item = C::Item;
    type Iter<'s>
        = Take<Skip<C::Iter<'s>>>
    where
        Self: 's;

    fn iter(&self) -> Self::Iter<'_> {
        C::iter(self.source)
            .skip(self.window.front)
            .take(self.window.len())
    }

    fn len(&self) -> usize {
        self.window.len()
    }

    fn front(&self) -> Option<&C::Item> {
        SubRange::front(self)
    }

    fn back(&self) -> Option<&C::Item> {
        SubRange::back(self)
    }

    fn at(&self, index: usize) -> Option<&C::Item> {
        SubRange::get(self, index)
    }
}

impl<C: Sequence + ?Sized> Index<usize> for SubRange<'_, C> {
    type Output = C::Item;

    fn index(&self, index: usize) -> &C::Item {
        let slot = self.window.slot(index, "SubRange::index");
        match self.source.at(slot) {
            Some(item) => item,
            None => contract::fail(ContractViolation::IndexOutOfRange {
                operation: "SubRange::index",
                index,
                len: self.window.len(),
            }),
        }
    }
}

impl<'a, C: Sequence + ?Sized> IntoIterator for SubRange<'a, C> {
    type Item = &'a C::Item;
    type IntoIter = Take<Skip<C::Iter<'a>>>;

    fn into_iter(self) -> Self::IntoIter {
        SubRange::iter(&self)
    }
}

impl<C: ?Sized> Operand for SubRange<'_, C> {
    const CATEGORY: ValueCategory = ValueCategory::Shared;
}

impl<C: ?Sized> fmt::Debug for SubRange<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubRange")
            .field("front", &self.window.front)
            .field("back", &self.window.back)
            .finish_non_exhaustive()
    }
}

/// Writable window over an exclusively borrowed sequence.
///
/// Same trimming rules as [`SubRange`]; element writes go straight to the source.
pub struct SubRangeMut<'a, C: ?Sized> {
    source: &'a mut C,
    window: Window,
}

impl<'a, C: SequenceMut + ?Sized> SubRangeMut<'a, C> {
    pub fn new(source: &'a mut C, offset: usize) -> Self {
        Self {
            window: Window::new(source.len(), offset, None),
            source,
        }
    }

    pub fn with_len(source: &'a mut C, offset: usize, len: usize) -> Self {
        Self {
            window: Window::new(source.len(), offset, Some(len)),
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }

    pub fn offset(&self) -> usize {
        self.window.front
    }

    pub fn front(&self) -> Option<&C::Item> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&C::Item> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    pub fn get(&self, index: usize) -> Option<&C::Item> {
        self.window.get(index).and_then(|slot| self.source.at(slot))
    }

    pub fn front_mut(&mut self) -> Option<&mut C::Item> {
        self.get_mut(0)
    }

    pub fn back_mut(&mut self) -> Option<&mut C::Item> {
        let last = self.len().checked_sub(1)?;
        self.get_mut(last)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut C::Item> {
        let slot = self.window.get(index)?;
        self.source.at_mut(slot)
    }

    pub fn iter(&self) -> Take<Skip<C::Iter<'_>>> {
        C::iter(&*self.source)
            .skip(self.window.front)
            .take(self.window.len())
    }

    pub fn iter_mut(&mut self) -> Take<Skip<C::IterMut<'_>>> {
        C::iter_mut(&mut *self.source)
            .skip(self.window.front)
            .take(self.window.len())
    }

    pub fn pop_front(&mut self) -> bool {
        self.window.pop_front()
    }

    pub fn pop_back(&mut self) -> bool {
        self.window.pop_back()
    }

    pub fn erase(&mut self, index: usize) -> bool {
        self.window.erase(index)
    }

    pub fn erase_range(&mut self, range: Range<usize>) {
        self.window.erase_range(range)
    }

    pub fn resize(&mut self, len: usize) {
        self.window.resize(len)
    }

    pub fn narrow(self, offset: usize) -> Self {
        Self {
            window: self.window.narrow(offset),
            source: self.source,
        }
    }

    /// Read-only window over the same elements.
    pub fn as_sub_range(&self) -> SubRange<'_, C> {
        SubRange {
            source: &*self.source,
            window: self.window,
        }
    }
}

impl<'a, C: SequenceMut + ?Sized> Sequence for SubRangeMut<'a, C> {
    type Item = C::Item;
    type Iter<'s>
        = Take<Skip<C::Iter<'s>>>
    where
        Self: 's;

    fn iter(&self) -> Self::Iter<'_> {
        SubRangeMut::iter(self)
    }

    fn len(&self) -> usize {
        self.window.len()
    }

    fn front(&self) -> Option<&C::Item> {
        SubRangeMut::front(self)
    }

    fn back(&self) -> Option<&C::Item> {
        SubRangeMut::back(self)
    }

    fn at(&self, index: usize) -> Option<&C::Item> {
        SubRangeMut::get(self, index)
    }
}

impl<'a, C: SequenceMut + ?Sized> SequenceMut for SubRangeMut<'a, C> {
    type IterMut<'s>
        = Take<Skip<C::IterMut<'s>>>
    where
        Self: 's;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        SubRangeMut::iter_mut(self)
    }

    fn front_mut(&mut self) -> Option<&mut C::Item> {
        SubRangeMut::front_mut(self)
    }

    fn back_mut(&mut self) -> Option<&mut C::Item> {
        SubRangeMut::back_mut(self)
    }

    fn at_mut(&mut self, index: usize) -> Option<&mut C::Item> {
        SubRangeMut::get_mut(self, index)
    }
}

impl<'a, C: ContiguousMut + ?Sized> ContiguousMut for SubRangeMut<'a, C> {
    fn as_mut_slice(&mut self) -> &mut [C::Item] {
        let Window { front, back } = self.window;
        &mut self.source.as_mut_slice()[front..back]
    }
}

impl<'a, C: ContiguousMut + ?Sized> SortInPlace for SubRangeMut<'a, C> {
    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&C::Item, &C::Item) -> Ordering,
    {
        self.as_mut_slice().sort_by(compare)
    }

    fn reverse(&mut self) {
        self.as_mut_slice().reverse()
    }

    fn rotate_left(&mut self, mid: usize) {
        self.as_mut_slice().rotate_left(mid)
    }
}

impl<C: SequenceMut + ?Sized> Index<usize> for SubRangeMut<'_, C> {
    type Output = C::Item;

    fn index(&self, index: usize) -> &C::Item {
        let slot = self.window.slot(index, "SubRangeMut::index");
        match self.source.at(slot) {
            Some(item) => item,
            None => contract::fail(ContractViolation::IndexOutOfRange {
                operation: "SubRangeMut::index",
                index,
                len: self.window.len(),
            }),
        }
    }
}

impl<C: SequenceMut + ?Sized> IndexMut<usize> for SubRangeMut<'_, C> {
    fn index_mut(&mut self, index: usize) -> &mut C::Item {
        let slot = self.window.slot(index, "SubRangeMut::index_mut");
        let len = self.window.len();
        match self.source.at_mut(slot) {
            Some(item) => item,
            None => contract::fail(ContractViolation::IndexOutOfRange {
                operation: "SubRangeMut::index_mut",
                index,
                len,
            }),
        }
    }
}

impl<'a, C: SequenceMut + ?Sized> IntoIterator for SubRangeMut<'a, C> {
    type Item = &'a mut C::Item;
    type IntoIter = Take<Skip<C::IterMut<'a>>>;

    fn into_iter(self) -> Self::IntoIter {
        let Window { front, back } = self.window;
        C::iter_mut(self.source).skip(front).take(back - front)
    }
}

impl<C: ?Sized> Operand for SubRangeMut<'_, C> {
    const CATEGORY: ValueCategory = ValueCategory::Exclusive;
}

impl<C: ?Sized> fmt::Debug for SubRangeMut<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubRangeMut")
            .field("front", &self.window.front)
            .field("back", &self.window.back)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::LinkedList;
    use std::sync::{Arc, Mutex};

    use super::{SubRange, SubRangeMut};
    use crate::capability::SortInPlace;
    use crate::contract::{self, ContractObserver, ContractOptions, Enforcement, ViolationReport};
    use crate::error::ContractViolation;

    fn contents<C>(r: &SubRange<'_, C>) -> Vec<i32>
    where
        C: crate::capability::Sequence<Item = i32> + ?Sized,
    {
        r.iter().copied().collect()
    }

    fn report_only() -> (ContractOptions, Arc<Recorder>) {
        let rec = Arc::new(Recorder::default());
        let opts = ContractOptions {
            enforcement: Enforcement::Report,
            observer: Some(rec.clone()),
        };
        (opts, rec)
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<ContractViolation>>,
    }

    impl ContractObserver for Recorder {
        fn on_violation(&self, report: &ViolationReport) {
            self.seen.lock().unwrap().push(report.violation.clone());
        }
    }

    #[test]
    fn trims_from_both_edges() {
        let v = vec![3, 4, 5, 6, 7];
        let mut r = SubRange::new(&v, 1);
        assert_eq!(contents(&r), vec![4, 5, 6, 7]);

        assert!(r.pop_front());
        assert_eq!(contents(&r), vec![5, 6, 7]);

        assert!(r.pop_back());
        assert_eq!(contents(&r), vec![5, 6]);
        assert_eq!(r.front(), Some(&5));
        assert_eq!(r.back(), Some(&6));
        assert_eq!(r[1], 6);
        assert_eq!(v, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn empty_window_reports_absence() {
        let v = vec![1];
        let mut r = SubRange::new(&v, 1);
        assert!(r.is_empty());
        assert_eq!(r.front(), None);
        assert_eq!(r.back(), None);
        assert!(!r.pop_front());
        assert!(!r.pop_back());
    }

    #[test]
    fn resize_keeps_the_leading_elements() {
        let v = vec![10, 11, 12, 13, 14];
        let mut r = SubRange::new(&v, 0);
        r.resize(2);
        assert_eq!(contents(&r), vec![10, 11]);
    }

    #[test]
    fn growing_is_rejected_and_reported() {
        let v = vec![10, 11, 12, 13, 14];
        let mut r = SubRange::new(&v, 0);
        r.resize(2);

        let (opts, rec) = report_only();
        contract::with_options(opts, || r.resize(4));
        assert_eq!(r.len(), 2);
        assert_eq!(
            rec.seen.lock().unwrap().as_slice(),
            &[ContractViolation::GrowSubRange {
                operation: "SubRange::resize",
                len: 2,
                requested: 4,
            }]
        );
    }

    #[test]
    #[should_panic(expected = "cannot grow a sub-range")]
    fn growing_panics_under_panic_enforcement() {
        let v = vec![1, 2];
        let mut r = SubRange::new(&v, 1);
        let opts = ContractOptions {
            enforcement: Enforcement::Panic,
            observer: None,
        };
        contract::with_options(opts, || r.resize(2));
    }

    #[test]
    fn erase_only_at_the_front() {
        let v = vec![1, 2, 3, 4, 5];
        let mut r = SubRange::new(&v, 0);
        assert!(r.erase(0));
        r.erase_range(0..2);
        assert_eq!(contents(&r), vec![4, 5]);

        let (opts, rec) = report_only();
        contract::with_options(opts, || {
            assert!(!r.erase(1));
            r.erase_range(1..2);
        });
        assert_eq!(contents(&r), vec![4, 5]);
        assert_eq!(rec.seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_empty() {
        let v = vec![1, 2, 3];
        let (opts, rec) = report_only();
        let r = contract::with_options(opts, || SubRange::new(&v, 9));
        assert!(r.is_empty());
        assert_eq!(r.offset(), 3);
        assert_eq!(rec.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn unbounded_length_is_clamped_to_the_source() {
        let v = vec![1, 2, 3];
        let (opts, rec) = report_only();
        let r = contract::with_options(opts, || SubRange::with_len(&v, 1, usize::MAX));
        assert_eq!(contents(&r), vec![2, 3]);
        assert_eq!(
            rec.seen.lock().unwrap().as_slice(),
            &[ContractViolation::OffsetOutOfRange {
                operation: "SubRange::new",
                offset: usize::MAX,
                len: 3,
            }]
        );
    }

    #[test]
    fn narrow_and_with_len_compose() {
        let v: Vec<i32> = (0..10).collect();
        let r = SubRange::with_len(&v, 2, 6).narrow(3);
        assert_eq!(contents(&r), vec![5, 6, 7]);
        assert_eq!(r.offset(), 5);
    }

    #[test]
    fn works_over_node_based_sources() {
        let l: LinkedList<i32> = [1, 2, 3, 4].into_iter().collect();
        let mut r = SubRange::new(&l, 1);
        r.pop_back();
        assert_eq!(contents(&r), vec![2, 3]);
        assert_eq!(r.get(1), Some(&3));
    }

    #[test]
    #[should_panic(expected = "index 2 is out of range for length 2")]
    fn indexing_outside_the_window_is_fatal() {
        let v = vec![1, 2, 3, 4];
        let r = SubRange::with_len(&v, 1, 2);
        let _out_of_window: i32 = r[2];
    }

    #[test]
    fn mutable_window_writes_through() {
        let mut v = vec![9, 3, 1, 2, 8];
        {
            let mut r = SubRangeMut::with_len(&mut v, 1, 3);
            SortInPlace::sort_by(&mut r, |a, b| a.cmp(b));
            r[0] *= 10;
            if let Some(last) = r.back_mut() {
                *last = 0;
            }
            assert!(r.pop_front());
            assert_eq!(r.as_sub_range().iter().copied().collect::<Vec<_>>(), vec![2, 0]);
        }
        assert_eq!(v, vec![9, 10, 2, 0, 8]);
    }
}
