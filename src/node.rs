use std::ops::Deref;

/// Node corresponds to a single element in an [`Llrb`] instance. A node
/// exclusively owns its value and both of its children, there is no
/// parent back-reference.
///
/// [`Llrb`]: crate::Llrb
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) black: bool,                 // store: black or red
    pub(crate) left: Option<Box<Node<T>>>,  // store: left child
    pub(crate) right: Option<Box<Node<T>>>, // store: right child
}

impl<T> Node<T> {
    // new nodes are always red.
    pub(crate) fn new(value: T) -> Box<Node<T>> {
        Box::new(Node {
            value,
            black: false,
            left: None,
            right: None,
        })
    }

    /// Return the element held by this node.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Return the color of the link pointing to this node.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    /// Return the left child.
    #[inline]
    pub fn left(&self) -> Option<&Node<T>> {
        self.left_deref()
    }

    /// Return the right child.
    #[inline]
    pub fn right(&self) -> Option<&Node<T>> {
        self.right_deref()
    }

    #[inline]
    pub(crate) fn left_deref(&self) -> Option<&Node<T>> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn right_deref(&self) -> Option<&Node<T>> {
        self.right.as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub(crate) fn toggle_link(&mut self) {
        self.black = !self.black
    }

    // deep copy, preorder shaped: this node first, then left, then right.
    pub(crate) fn copy_tree(&self) -> Box<Node<T>>
    where
        T: Clone,
    {
        Box::new(Node {
            value: self.value.clone(),
            black: self.black,
            left: self.left.as_ref().map(|left| left.copy_tree()),
            right: self.right.as_ref().map(|right| right.copy_tree()),
        })
    }
}

/// Absent nodes are black.
pub(crate) fn is_red<T>(node: Option<&Node<T>>) -> bool {
    node.map_or(false, |node| !node.is_black())
}
