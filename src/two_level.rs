//! Flattening of nested sequences, used for the (input x transition) walk of a state.

/// Walk a sequence of sequences element by element, remembering which outer element
/// the current inner element belongs to.
///
/// The inner sequence for an outer element is produced lazily by the `expand` function
/// handed to [TwoLevelCursor::next_with]. Keeping the function out of the struct lets
/// frontier entries store a cursor without capturing the transition system.
///
/// An outer element whose inner sequence is empty is skipped silently.
#[derive(Clone, Debug)]
pub struct TwoLevelCursor<O, L2>
where
    O: Iterator,
{
    outer: O,
    current: Option<(O::Item, L2)>,
    finished: bool,
}

impl<O, L2> TwoLevelCursor<O, L2>
where
    O: Iterator,
    O::Item: Clone,
    L2: Iterator,
{
    pub fn new(outer: O) -> Self {
        Self {
            outer,
            current: None,
            finished: false,
        }
    }

    /// Produce the next (outer, inner) pair, expanding further outer elements as needed.
    #[inline]
    pub fn next_with<F>(&mut self, mut expand: F) -> Option<(O::Item, L2::Item)>
    where
        F: FnMut(&O::Item) -> L2,
    {
        if self.finished {
            return None;
        }
        loop {
            if let Some((outer, inner)) = self.current.as_mut() {
                if let Some(item) = inner.next() {
                    return Some((outer.clone(), item));
                }
            }
            match self.outer.next() {
                Some(outer) => {
                    let inner = expand(&outer);
                    self.current = Some((outer, inner));
                }
                None => {
                    self.finish();
                    return None;
                }
            }
        }
    }

    /// Drop the rest of the current inner sequence; the walk resumes at the next outer
    /// element.
    #[inline]
    pub fn skip_inner(&mut self) {
        self.current = None;
    }

    /// Drop everything that is left.
    #[inline]
    pub fn finish(&mut self) {
        self.current = None;
        self.finished = true;
    }
}

/// An [Iterator] over a [TwoLevelCursor] that owns its expansion function.
pub struct TwoLevelIter<O, L2, F>
where
    O: Iterator,
{
    cursor: TwoLevelCursor<O, L2>,
    expand: F,
}

impl<O, L2, F> TwoLevelIter<O, L2, F>
where
    O: Iterator,
    O::Item: Clone,
    L2: Iterator,
{
    pub fn new(outer: O, expand: F) -> Self
    where
        F: FnMut(&O::Item) -> L2,
    {
        Self {
            cursor: TwoLevelCursor::new(outer),
            expand,
        }
    }

    /// See [TwoLevelCursor::skip_inner].
    pub fn skip_inner(&mut self) {
        self.cursor.skip_inner();
    }
}

impl<O, L2, F> Iterator for TwoLevelIter<O, L2, F>
where
    O: Iterator,
    O::Item: Clone,
    L2: Iterator,
    F: FnMut(&O::Item) -> L2,
{
    type Item = (O::Item, L2::Item);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_with(&mut self.expand)
    }
}

impl<O, L2, F> std::iter::FusedIterator for TwoLevelIter<O, L2, F>
where
    O: Iterator,
    O::Item: Clone,
    L2: Iterator,
    F: FnMut(&O::Item) -> L2,
{
}
