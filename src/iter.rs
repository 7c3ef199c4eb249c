use std::ops::Bound;

use crate::node::Node;

/// Ascending iterator over all elements of an [`Llrb`] instance. Holds
/// the path of pending ancestors on an explicit stack, so each call to
/// `next` is amortized O(1).
///
/// [`Llrb`]: crate::Llrb
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Iter<'a, T> {
        let mut iter = Iter { stack: vec![] };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right_deref());
        Some(&node.value)
    }
}

/// Ascending iterator over elements within a range. Call [`Range::rev`]
/// to iterate the same range in descending order.
pub struct Range<'a, T> {
    root: Option<&'a Node<T>>,
    stack: Option<Vec<&'a Node<T>>>,
    low: Bound<T>,
    high: Bound<T>,
}

impl<'a, T> Range<'a, T>
where
    T: Ord,
{
    pub(crate) fn new(root: Option<&'a Node<T>>, low: Bound<T>, high: Bound<T>) -> Range<'a, T> {
        Range {
            root,
            stack: None,
            low,
            high,
        }
    }

    pub fn rev(self) -> Reverse<'a, T> {
        Reverse {
            root: self.root,
            stack: None,
            low: self.low,
            high: self.high,
        }
    }

    // nodes below the low bound, and their left subtrees, are skipped.
    fn seed(&self) -> Vec<&'a Node<T>> {
        let (mut stack, mut node) = (vec![], self.root);
        while let Some(n) = node {
            if below(&self.low, &n.value) {
                node = n.right_deref();
            } else {
                stack.push(n);
                node = n.left_deref();
            }
        }
        stack
    }
}

impl<'a, T> Iterator for Range<'a, T>
where
    T: Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_none() {
            self.stack = Some(self.seed());
        }
        let stack = self.stack.as_mut()?;
        let node = stack.pop()?;
        if above(&self.high, &node.value) {
            stack.clear();
            return None;
        }
        let mut next = node.right_deref();
        while let Some(n) = next {
            stack.push(n);
            next = n.left_deref();
        }
        Some(&node.value)
    }
}

/// Descending iterator over elements within a range.
pub struct Reverse<'a, T> {
    root: Option<&'a Node<T>>,
    stack: Option<Vec<&'a Node<T>>>,
    low: Bound<T>,
    high: Bound<T>,
}

impl<'a, T> Reverse<'a, T>
where
    T: Ord,
{
    // nodes above the high bound, and their right subtrees, are skipped.
    fn seed(&self) -> Vec<&'a Node<T>> {
        let (mut stack, mut node) = (vec![], self.root);
        while let Some(n) = node {
            if above(&self.high, &n.value) {
                node = n.left_deref();
            } else {
                stack.push(n);
                node = n.right_deref();
            }
        }
        stack
    }
}

impl<'a, T> Iterator for Reverse<'a, T>
where
    T: Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_none() {
            self.stack = Some(self.seed());
        }
        let stack = self.stack.as_mut()?;
        let node = stack.pop()?;
        if below(&self.low, &node.value) {
            stack.clear();
            return None;
        }
        let mut next = node.left_deref();
        while let Some(n) = next {
            stack.push(n);
            next = n.right_deref();
        }
        Some(&node.value)
    }
}

fn below<T: Ord>(low: &Bound<T>, value: &T) -> bool {
    match low {
        Bound::Included(low) => value < low,
        Bound::Excluded(low) => value <= low,
        Bound::Unbounded => false,
    }
}

fn above<T: Ord>(high: &Bound<T>, value: &T) -> bool {
    match high {
        Bound::Included(high) => value > high,
        Bound::Excluded(high) => value >= high,
        Bound::Unbounded => false,
    }
}
