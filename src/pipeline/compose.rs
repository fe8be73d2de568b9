use std::fmt;

/// Stage calling a unary function with the operand as-is.
///
/// No category resolution happens: the function sees exactly what the left side of `|` was,
/// whether that is a temporary, a reference, a [`Mutable`](crate::Mutable) or a view.
#[derive(Clone, Copy)]
#[must_use = "stages do nothing until applied with `|`"]
pub struct Pipe<F>(pub(crate) F);

/// Stage calling a binary function with the operand and one bound argument.
#[derive(Clone, Copy)]
#[must_use = "stages do nothing until applied with `|`"]
pub struct PipeWith<F, A> {
    pub(crate) function: F,
    pub(crate) arg: A,
}

impl<F> Pipe<F> {
    pub(crate) fn call<O, R>(self, operand: O) -> R
    where
        F: FnOnce(O) -> R,
    {
        (self.0)(operand)
    }
}

impl<F, A> PipeWith<F, A> {
    pub(crate) fn call<O, R>(self, operand: O) -> R
    where
        F: FnOnce(O, A) -> R,
    {
        (self.function)(operand, self.arg)
    }

    pub fn arg(&self) -> &A {
        &self.arg
    }
}

impl<F> fmt::Debug for Pipe<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe").finish_non_exhaustive()
    }
}

impl<F, A: fmt::Debug> fmt::Debug for PipeWith<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeWith")
            .field("arg", &self.arg)
            .finish_non_exhaustive()
    }
}

/// Adapt `function` into a pipeline stage.
///
/// ```
/// use collection_pipes::pipe;
///
/// let words = vec!["pipe", "line"];
/// let joined = &words | pipe(|w: &Vec<&str>| w.concat());
/// assert_eq!(joined, "pipeline");
/// ```
pub fn pipe<F>(function: F) -> Pipe<F> {
    Pipe(function)
}

/// Adapt a binary `function` into a stage, binding `arg` as its second parameter.
///
/// ```
/// use collection_pipes::pipe_with;
///
/// fn nth_or(v: &Vec<i32>, n: usize) -> i32 {
///     v.get(n).copied().unwrap_or_default()
/// }
///
/// let v = vec![10, 20, 30];
/// assert_eq!(&v | pipe_with(nth_or, 1), 20);
/// assert_eq!(&v | pipe_with(nth_or, 7), 0);
/// ```
pub fn pipe_with<F, A>(function: F, arg: A) -> PipeWith<F, A> {
    PipeWith { function, arg }
}
