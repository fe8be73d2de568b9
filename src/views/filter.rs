use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::capability::{Sequence, SequenceMut};
use crate::category::{Operand, ValueCategory};
use crate::contract;
use crate::error::ContractViolation;

/// Items a filter cursor can test: shared or exclusive element references.
pub trait Element {
    type Target: ?Sized;

    fn target(&self) -> &Self::Target;
}

impl<T: ?Sized> Element for &T {
    type Target = T;

    fn target(&self) -> &T {
        self
    }
}

impl<T: ?Sized> Element for &mut T {
    type Target = T;

    fn target(&self) -> &T {
        self
    }
}

/// Where a [`FilterCursor`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Constructed, not yet sought. Only `seek_first` is allowed.
    Unpositioned,
    /// On an element that satisfied the predicate.
    Valid,
    /// Past the last element. Terminal.
    End,
}

/// A predicate-gated position over an element iterator.
///
/// Transitions:
///
/// - `Unpositioned --seek_first--> Valid | End`: scan forward to the first match.
/// - `Valid --advance--> Valid | End`: step once, then skip non-matching elements.
/// - `End --advance-->` precondition violation; the cursor stays at `End`.
///
/// Each position is tested exactly once, on the value it held when the cursor reached it. Writes
/// made through [`get_mut`](FilterCursor::get_mut) never cause an element to be re-tested.
///
/// Cursors compare by underlying position only.
pub struct FilterCursor<I: Iterator, F> {
    base: I,
    predicate: F,
    current: Option<I::Item>,
    position: usize,
    state: CursorState,
}

impl<I, F> FilterCursor<I, F>
where
    I: Iterator,
    I::Item: Element,
    F: Fn(&<I::Item as Element>::Target) -> bool,
{
    pub(crate) fn new(base: I, predicate: F) -> Self {
        Self {
            base,
            predicate,
            current: None,
            position: 0,
            state: CursorState::Unpositioned,
        }
    }

    pub(crate) fn at_end(base: I, predicate: F, position: usize) -> Self {
        Self {
            base,
            predicate,
            current: None,
            position,
            state: CursorState::End,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Offset of the current element in the underlying sequence (its length once at the end).
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_valid(&self) -> bool {
        self.state == CursorState::Valid
    }

    pub fn is_end(&self) -> bool {
        self.state == CursorState::End
    }

    /// Move an unpositioned cursor onto the first matching element.
    pub fn seek_first(&mut self) -> &mut Self {
        let unpositioned = self.state == CursorState::Unpositioned;
        if contract::check(unpositioned, || ContractViolation::CursorAlreadyPositioned {
            operation: "FilterCursor::seek_first",
        }) {
            self.skip_to_match();
        }
        self
    }

    /// Step past the current element, then on to the next match or the end.
    pub fn advance(&mut self) -> &mut Self {
        match self.state {
            CursorState::Valid => {
                self.position += 1;
                self.skip_to_match();
            }
            CursorState::End => {
                contract::check(false, || ContractViolation::AdvancePastEnd {
                    operation: "FilterCursor::advance",
                });
            }
            CursorState::Unpositioned => {
                contract::check(false, || ContractViolation::CursorNotPositioned {
                    operation: "FilterCursor::advance",
                });
            }
        }
        self
    }

    /// The current element. Fatal unless the cursor is [`CursorState::Valid`].
    pub fn get(&self) -> &<I::Item as Element>::Target {
        match (self.state, self.current.as_ref()) {
            (CursorState::Valid, Some(item)) => item.target(),
            _ => contract::fail(ContractViolation::CursorNotPositioned {
                operation: "FilterCursor::get",
            }),
        }
    }

    fn skip_to_match(&mut self) {
        self.current = None;
        for item in self.base.by_ref() {
            if (self.predicate)(item.target()) {
                self.current = Some(item);
                self.state = CursorState::Valid;
                return;
            }
            self.position += 1;
        }
        self.state = CursorState::End;
    }
}

impl<'a, T, I, F> FilterCursor<I, F>
where
    T: ?Sized + 'a,
    I: Iterator<Item = &'a mut T>,
    F: Fn(&T) -> bool,
{
    /// Write access to the current element. Fatal unless the cursor is [`CursorState::Valid`].
    pub fn get_mut<'s>(&'s mut self) -> &'s mut T
    where
        'a: 's,
    {
        match (self.state, self.current.as_mut()) {
            (CursorState::Valid, Some(item)) => &mut **item,
            _ => contract::fail(ContractViolation::CursorNotPositioned {
                operation: "FilterCursor::get_mut",
            }),
        }
    }
}

impl<I: Iterator, F> PartialEq for FilterCursor<I, F> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<I: Iterator, F> Eq for FilterCursor<I, F> {}

impl<I: Iterator, F> PartialOrd for FilterCursor<I, F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.position.cmp(&other.position))
    }
}

impl<I: Iterator, F> fmt::Debug for FilterCursor<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCursor")
            .field("state", &self.state)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Iterator over the matches of a filter, driven by the same state machine as [`FilterCursor`].
///
/// Nothing is scanned until the first call to `next`.
pub struct FilterIter<I: Iterator, F> {
    cursor: FilterCursor<I, F>,
}

impl<I, F> FilterIter<I, F>
where
    I: Iterator,
    I::Item: Element,
    F: Fn(&<I::Item as Element>::Target) -> bool,
{
    pub(crate) fn new(base: I, predicate: F) -> Self {
        Self {
            cursor: FilterCursor::new(base, predicate),
        }
    }
}

impl<I, F> Iterator for FilterIter<I, F>
where
    I: Iterator,
    I::Item: Element,
    F: Fn(&<I::Item as Element>::Target) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let cursor = &mut self.cursor;
        match cursor.state {
            CursorState::Unpositioned => cursor.skip_to_match(),
            CursorState::Valid => {
                cursor.position += 1;
                cursor.skip_to_match();
            }
            CursorState::End => return None,
        }
        cursor.current.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor.state {
            CursorState::End => (0, Some(0)),
            _ => (0, self.cursor.base.size_hint().1),
        }
    }
}

impl<I, F> FusedIterator for FilterIter<I, F>
where
    I: Iterator,
    I::Item: Element,
    F: Fn(&<I::Item as Element>::Target) -> bool,
{
}

impl<I: Iterator, F> fmt::Debug for FilterIter<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterIter").field(&self.cursor).finish()
    }
}

/// Read-only view over the elements of `source` that satisfy `predicate`.
///
/// The source is any [`Sequence`] handle: a shared borrow, a sub-range, or another filter view.
/// Construction scans nothing, and every traversal starts from scratch, so two traversals of the
/// same view see the same elements.
#[derive(Clone, Copy)]
pub struct FilterView<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> FilterView<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S, P> FilterView<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    pub fn iter(&self) -> FilterIter<S::Iter<'_>, &P> {
        FilterIter::new(self.source.iter(), &self.predicate)
    }

    /// An unpositioned cursor.
    pub fn cursor(&self) -> FilterCursor<S::Iter<'_>, &P> {
        FilterCursor::new(self.source.iter(), &self.predicate)
    }

    /// A cursor on the first match, or equal to [`end`](Self::end) when there is none.
    pub fn begin(&self) -> FilterCursor<S::Iter<'_>, &P> {
        let mut cursor = self.cursor();
        cursor.seek_first();
        cursor
    }

    pub fn end(&self) -> FilterCursor<S::Iter<'_>, &P> {
        FilterCursor::at_end(self.source.iter(), &self.predicate, self.source.len())
    }
}

impl<S, P> Sequence for FilterView<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Iter<'a>
        = FilterIter<S::Iter<'a>, &'a P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        FilterView::iter(self)
    }

    /// Number of matches. Walks the whole source.
    fn len(&self) -> usize {
        FilterView::iter(self).count()
    }

    fn is_empty(&self) -> bool {
        FilterView::iter(self).next().is_none()
    }
}

impl<S, P> IntoIterator for FilterView<S, P>
where
    S: IntoIterator,
    S::Item: Element,
    P: Fn(&<S::Item as Element>::Target) -> bool,
{
    type Item = S::Item;
    type IntoIter = FilterIter<S::IntoIter, P>;

    fn into_iter(self) -> Self::IntoIter {
        FilterIter::new(self.source.into_iter(), self.predicate)
    }
}

impl<'v, S, P> IntoIterator for &'v FilterView<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = &'v S::Item;
    type IntoIter = FilterIter<S::Iter<'v>, &'v P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S, P> Operand for FilterView<S, P> {
    const CATEGORY: ValueCategory = ValueCategory::Shared;
}

impl<S: fmt::Debug, P> fmt::Debug for FilterView<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterView")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Filter view with write access to the matching elements.
///
/// Writes never change which elements the current traversal visits: each element is tested once,
/// before it is handed out.
pub struct FilterViewMut<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> FilterViewMut<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S, P> FilterViewMut<S, P>
where
    S: SequenceMut,
    P: Fn(&S::Item) -> bool,
{
    pub fn iter(&self) -> FilterIter<S::Iter<'_>, &P> {
        FilterIter::new(self.source.iter(), &self.predicate)
    }

    pub fn iter_mut(&mut self) -> FilterIter<S::IterMut<'_>, &P> {
        FilterIter::new(S::iter_mut(&mut self.source), &self.predicate)
    }

    pub fn cursor(&self) -> FilterCursor<S::Iter<'_>, &P> {
        FilterCursor::new(self.source.iter(), &self.predicate)
    }

    pub fn begin(&self) -> FilterCursor<S::Iter<'_>, &P> {
        let mut cursor = self.cursor();
        cursor.seek_first();
        cursor
    }

    pub fn end(&self) -> FilterCursor<S::Iter<'_>, &P> {
        FilterCursor::at_end(self.source.iter(), &self.predicate, self.source.len())
    }

    pub fn cursor_mut(&mut self) -> FilterCursor<S::IterMut<'_>, &P> {
        FilterCursor::new(S::iter_mut(&mut self.source), &self.predicate)
    }

    /// A writable cursor on the first match.
    pub fn begin_mut(&mut self) -> FilterCursor<S::IterMut<'_>, &P> {
        let mut cursor = self.cursor_mut();
        cursor.seek_first();
        cursor
    }

    /// Read-only view of the same elements.
    pub fn as_view(&self) -> FilterView<&S, &P> {
        FilterView::new(&self.source, &self.predicate)
    }
}

impl<S, P> Sequence for FilterViewMut<S, P>
where
    S: SequenceMut,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Iter<'a>
        = FilterIter<S::Iter<'a>, &'a P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        FilterViewMut::iter(self)
    }

    fn len(&self) -> usize {
        FilterViewMut::iter(self).count()
    }

    fn is_empty(&self) -> bool {
        FilterViewMut::iter(self).next().is_none()
    }
}

impl<S, P> SequenceMut for FilterViewMut<S, P>
where
    S: SequenceMut,
    P: Fn(&S::Item) -> bool,
{
    type IterMut<'a>
        = FilterIter<S::IterMut<'a>, &'a P>
    where
        Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        FilterViewMut::iter_mut(self)
    }
}

impl<S, P> IntoIterator for FilterViewMut<S, P>
where
    S: IntoIterator,
    S::Item: Element,
    P: Fn(&<S::Item as Element>::Target) -> bool,
{
    type Item = S::Item;
    type IntoIter = FilterIter<S::IntoIter, P>;

    fn into_iter(self) -> Self::IntoIter {
        FilterIter::new(self.source.into_iter(), self.predicate)
    }
}

impl<'v, S, P> IntoIterator for &'v mut FilterViewMut<S, P>
where
    S: SequenceMut,
    P: Fn(&S::Item) -> bool,
{
    type Item = &'v mut S::Item;
    type IntoIter = FilterIter<S::IterMut<'v>, &'v P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<S, P> Operand for FilterViewMut<S, P> {
    const CATEGORY: ValueCategory = ValueCategory::Exclusive;
}

impl<S: fmt::Debug, P> fmt::Debug for FilterViewMut<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterViewMut")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
