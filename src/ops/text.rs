//! String stages. They read any `AsRef<str>` operand and return a new `String` (or tokens).

use crate::pipeline::{operation, Inspect, Query};

/// Which whitespace edge [`Trimmed`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimEdge {
    Both,
    Start,
    End,
}

#[derive(Debug, Clone, Copy)]
pub struct Trimmed(TrimEdge);

/// Case mapping performed by [`CaseMapped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct CaseMapped(Case);

#[derive(Debug, Clone, Copy)]
pub struct ReplacedSubstring<F, T> {
    from: F,
    to: T,
}

#[derive(Debug, Clone, Copy)]
pub struct Tokenized<D>(D);

operation!(Trimmed => "trimmed", 0);
operation!(CaseMapped => "case_mapped", 0);
operation!([F, T] ReplacedSubstring<F, T> => "replaced_substring", 2);
operation!([D] Tokenized<D> => "tokenized", 1);

impl<S: AsRef<str> + ?Sized> Inspect<S> for Trimmed {
    type Output = String;

    fn inspect(self, operand: &S) -> String {
        let text = operand.as_ref();
        let trimmed = match self.0 {
            TrimEdge::Both => text.trim(),
            TrimEdge::Start => text.trim_start(),
            TrimEdge::End => text.trim_end(),
        };
        trimmed.to_owned()
    }
}

impl<S: AsRef<str> + ?Sized> Inspect<S> for CaseMapped {
    type Output = String;

    fn inspect(self, operand: &S) -> String {
        match self.0 {
            Case::Lower => operand.as_ref().to_lowercase(),
            Case::Upper => operand.as_ref().to_uppercase(),
        }
    }
}

impl<S, F, T> Inspect<S> for ReplacedSubstring<F, T>
where
    S: AsRef<str> + ?Sized,
    F: AsRef<str>,
    T: AsRef<str>,
{
    type Output = String;

    fn inspect(self, operand: &S) -> String {
        let text = operand.as_ref();
        let from = self.from.as_ref();
        if from.is_empty() {
            return text.to_owned();
        }
        text.replace(from, self.to.as_ref())
    }
}

impl<S, D> Inspect<S> for Tokenized<D>
where
    S: AsRef<str> + ?Sized,
    D: AsRef<str>,
{
    type Output = Vec<String>;

    fn inspect(self, operand: &S) -> Vec<String> {
        let delimiters = self.0.as_ref();
        operand
            .as_ref()
            .split(|c: char| delimiters.contains(c))
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Whitespace removed from both ends.
pub fn trimmed() -> Query<Trimmed> {
    Query::new(Trimmed(TrimEdge::Both))
}

pub fn trimmed_start() -> Query<Trimmed> {
    Query::new(Trimmed(TrimEdge::Start))
}

pub fn trimmed_end() -> Query<Trimmed> {
    Query::new(Trimmed(TrimEdge::End))
}

pub fn to_lower() -> Query<CaseMapped> {
    Query::new(CaseMapped(Case::Lower))
}

pub fn to_upper() -> Query<CaseMapped> {
    Query::new(CaseMapped(Case::Upper))
}

/// Every occurrence of `from` replaced by `to`. An empty `from` leaves the text unchanged.
pub fn replaced_substring<F, T>(from: F, to: T) -> Query<ReplacedSubstring<F, T>>
where
    F: AsRef<str>,
    T: AsRef<str>,
{
    Query::new(ReplacedSubstring { from, to })
}

/// Split on any character of `delimiters`, dropping empty tokens.
///
/// ```
/// use collection_pipes::ops::tokenized;
///
/// assert_eq!("123454321" | tokenized("43"), vec!["12", "5", "21"]);
/// ```
pub fn tokenized<D: AsRef<str>>(delimiters: D) -> Query<Tokenized<D>> {
    Query::new(Tokenized(delimiters))
}
