pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    /// Consume items for as long as `pred` holds.
    fn eat_while(&mut self, mut pred: impl FnMut(&Self::Item) -> bool) {
        while matches!(self.peek(), Some(item) if pred(&item)) {
            self.next();
        }
    }
}

impl<T> Peek for std::slice::Iter<'_, T> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}
