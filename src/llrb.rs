use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt, mem,
    ops::{Bound, Deref, DerefMut, RangeBounds},
};

use log::{debug, trace};
use rand::Rng;

use crate::depth::Depth;
use crate::error::Error;
use crate::iter::{Iter, Range};
use crate::node::{is_red, Node};
use crate::walk::{self, Order};

/// Llrb manage a single instance of in-memory ordered container using
/// [left-leaning-red-black][llrb] tree. Equal elements are permitted,
/// a new element lands to the right of elements equal to it.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
pub struct Llrb<T> {
    name: String,
    root: Option<Box<Node<T>>>,
    n_count: usize, // number of elements in the tree.
}

/// Different ways to construct a new Llrb instance.
impl<T> Llrb<T>
where
    T: Ord,
{
    /// Create an empty instance of Llrb, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Llrb<T>
    where
        S: AsRef<str>,
    {
        Llrb {
            name: name.as_ref().to_string(),
            root: Default::default(),
            n_count: Default::default(),
        }
    }

    /// Create a new instance of Llrb tree and load it with elements
    /// from `iter`. Duplicates are kept.
    pub fn load_from<S, I>(name: S, iter: I) -> Llrb<T>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = T>,
    {
        let mut llrb = Llrb::new(name);
        for value in iter {
            llrb.insert(value);
        }
        llrb
    }

    /// Deep copy this instance. The copy shares nothing with `self`,
    /// mutating one never shows up in the other.
    pub fn new_copy(&self) -> Llrb<T>
    where
        T: Clone,
    {
        Llrb {
            name: self.name.clone(),
            root: self.root.as_ref().map(|root| root.copy_tree()),
            n_count: self.n_count,
        }
    }
}

/// Maintenance API.
impl<T> Llrb<T>
where
    T: Ord,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating Llrb instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of elements in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this instance is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return number of nodes on the longest path from root to a leaf.
    /// Empty tree has height 0.
    pub fn height(&self) -> usize {
        walk::height(self.root_deref())
    }

    /// Return number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        walk::iterative(self.root_deref(), Order::Inorder, &mut |node| {
            if node.left.is_none() && node.right.is_none() {
                leaves += 1;
            }
        });
        leaves
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<T>>())
    }

    /// Destroy all elements, children before their parent. The instance
    /// can be reused afterwards.
    pub fn clear(&mut self) {
        let n = walk::teardown(self.root.take());
        trace!("{}: clear() destroyed {} nodes", self.name, n);
        self.n_count = 0;
    }

    /// Exchange contents with `other`. Names stay with their instance.
    pub fn swap(&mut self, other: &mut Llrb<T>) {
        mem::swap(&mut self.root, &mut other.root);
        mem::swap(&mut self.n_count, &mut other.n_count);
    }

    #[inline]
    fn root_deref(&self) -> Option<&Node<T>> {
        self.root.as_ref().map(Deref::deref)
    }
}

type Delete<T> = (Option<Box<Node<T>>>, Option<T>);

type Delmin<T> = (Option<Box<Node<T>>>, Option<Box<Node<T>>>);

/// Write operations on Llrb instance.
impl<T> Llrb<T>
where
    T: Ord,
{
    /// Insert `value` into the tree, equal elements are permitted.
    pub fn insert(&mut self, value: T) {
        let mut root = Llrb::do_insert(self.root.take(), value);
        root.set_black();
        self.root = Some(root);
        self.n_count += 1;
    }

    /// Insert `value` only if no equal element is present, otherwise
    /// leave the tree untouched and return [`Error::DuplicateKey`].
    pub fn insert_unique(&mut self, value: T) -> Result<(), Error<T>> {
        if self.find(&value).is_some() {
            debug!("{}: insert_unique() on duplicate key", self.name);
            return Err(Error::DuplicateKey);
        }
        self.insert(value);
        Ok(())
    }

    /// Remove one element equal to `key` and return it. If key is not
    /// present return [`Error::NotFound`], contents stay the same.
    pub fn erase<Q>(&mut self, key: &Q) -> Result<T, Error<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, old_value) = Llrb::do_erase(self.root.take(), key);
        self.root = Llrb::blacken(root);
        match old_value {
            Some(value) => {
                self.n_count -= 1;
                Ok(value)
            }
            None => {
                debug!("{}: erase() key not found", self.name);
                Err(Error::NotFound)
            }
        }
    }

    /// Remove and return the smallest element.
    pub fn erase_min(&mut self) -> Option<T> {
        let (root, node) = Llrb::do_erase_min(self.root.take());
        self.root = Llrb::blacken(root);
        node.map(|node| {
            self.n_count -= 1;
            node.value
        })
    }

    /// Remove and return the largest element.
    pub fn erase_max(&mut self) -> Option<T> {
        let (root, node) = Llrb::do_erase_max(self.root.take());
        self.root = Llrb::blacken(root);
        node.map(|node| {
            self.n_count -= 1;
            node.value
        })
    }

    /// Validate LLRB tree with following rules:
    ///
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * No red link leans right.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure elements are in sorted order.
    /// * Number of nodes matches len().
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<T>>
    where
        T: Clone,
    {
        let root = self.root_deref();
        let mut stats = Stats::new(self.n_count, mem::size_of::<Node<T>>());
        stats.set_depths(Depth::new());
        let mut acc = Validate {
            prev: None,
            count: 0,
            leaves: 0,
        };
        let blacks = Llrb::validate_tree(root, false, 0, 0, &mut acc, &mut stats)?;
        if acc.count != self.n_count {
            return Err(Error::LengthMismatch(self.n_count, acc.count));
        }
        stats.set_blacks(blacks);
        stats.set_height(walk::height(root));
        stats.set_leaves(acc.leaves);
        Ok(stats)
    }
}

/// Read operations on Llrb instance.
impl<T> Llrb<T>
where
    T: Ord,
{
    /// Return an element equal to `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root_deref();
        while let Some(nref) = node {
            node = match nref.value.borrow().cmp(key) {
                Ordering::Less => nref.right_deref(),
                Ordering::Greater => nref.left_deref(),
                Ordering::Equal => return Some(&nref.value),
            };
        }
        None
    }

    /// Check whether an element equal to `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Return the smallest element.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root_deref()?;
        while let Some(left) = node.left_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Return the largest element.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root_deref()?;
        while let Some(right) = node.right_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Return the largest element strictly less than `key`. Key need
    /// not be present in the tree.
    pub fn predecessor<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut node, mut found) = (self.root_deref(), None);
        while let Some(nref) = node {
            if nref.value.borrow().lt(key) {
                found = Some(&nref.value);
                node = nref.right_deref();
            } else {
                node = nref.left_deref();
            }
        }
        found
    }

    /// Return the smallest element strictly greater than `key`. Key need
    /// not be present in the tree.
    pub fn successor<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut node, mut found) = (self.root_deref(), None);
        while let Some(nref) = node {
            if nref.value.borrow().gt(key) {
                found = Some(&nref.value);
                node = nref.left_deref();
            } else {
                node = nref.right_deref();
            }
        }
        found
    }

    /// Return a random element from this instance.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        let mut nref = self.root_deref()?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => nref.left_deref(),
                _ => nref.right_deref(),
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    nref = next;
                }
                _ => break Some(&nref.value),
            }
        }
    }

    /// Call `f` on every element, in `order`. Uses an explicit stack,
    /// safe for trees of any depth.
    pub fn foreach<F>(&self, order: Order, mut f: F)
    where
        F: FnMut(&T),
    {
        walk::iterative(self.root_deref(), order, &mut |node| f(&node.value))
    }

    /// Same as [`Llrb::foreach`], recursing on the call stack.
    pub fn foreach_recursive<F>(&self, order: Order, mut f: F)
    where
        F: FnMut(&T),
    {
        walk::recursive(self.root_deref(), order, &mut |node| f(&node.value))
    }

    /// Call `f` on every node, in `order`. Useful to inspect the shape
    /// and colors of the tree.
    pub fn foreach_node<F>(&self, order: Order, mut f: F)
    where
        F: FnMut(&Node<T>),
    {
        walk::iterative(self.root_deref(), order, &mut |node| f(node))
    }

    /// Return an iterator over all elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root_deref())
    }

    /// Range over all elements from low to high.
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ToOwned<Owned = T> + ?Sized,
    {
        let low: Bound<T> = match range.start_bound() {
            Bound::Included(key) => Bound::Included(key.to_owned()),
            Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
            Bound::Unbounded => Bound::Unbounded,
        };
        let high: Bound<T> = match range.end_bound() {
            Bound::Included(key) => Bound::Included(key.to_owned()),
            Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
            Bound::Unbounded => Bound::Unbounded,
        };
        Range::new(self.root_deref(), low, high)
    }
}

// accumulator for validate_tree(), `prev` is the last element seen inorder.
struct Validate<'a, T> {
    prev: Option<&'a T>,
    count: usize,
    leaves: usize,
}

impl<T> Llrb<T>
where
    T: Ord,
{
    fn blacken(root: Option<Box<Node<T>>>) -> Option<Box<Node<T>>> {
        root.map(|mut root| {
            root.set_black();
            root
        })
    }

    fn do_insert(node: Option<Box<Node<T>>>, value: T) -> Box<Node<T>> {
        let mut node = match node {
            None => return Node::new(value),
            Some(node) => node,
        };

        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut());
        }

        if value < node.value {
            node.left = Some(Llrb::do_insert(node.left.take(), value));
        } else {
            node.right = Some(Llrb::do_insert(node.right.take(), value));
        }
        Llrb::fixup(node)
    }

    fn do_erase<Q>(node: Option<Box<Node<T>>>, key: &Q) -> Delete<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };

        if node.value.borrow().gt(key) {
            if node.left.is_none() {
                return (Some(Llrb::fixup(node)), None);
            }
            let left = node.left_deref();
            if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
                node = Llrb::move_red_left(node);
            }
            let (left, old_value) = Llrb::do_erase(node.left.take(), key);
            node.left = left;
            (Some(Llrb::fixup(node)), old_value)
        } else {
            if is_red(node.left_deref()) {
                node = Llrb::rotate_right(node);
            }

            if node.value.borrow().eq(key) && node.right.is_none() {
                return (None, Some(node.value));
            }

            let right = node.right_deref();
            let ok = right.is_some() && !is_red(right);
            let mut rotated = false;
            if ok && !is_red(right.and_then(Node::left_deref)) {
                // move_red_right() rotates on a red left-left grandchild,
                // flip does not touch grandchildren.
                rotated = is_red(node.left_deref().and_then(Node::left_deref));
                node = Llrb::move_red_right(node);
            }

            // after a rotation the matching node sits under node.right,
            // an equal element lifted from the left is not the target.
            if !rotated && node.value.borrow().eq(key) {
                // replace with the inorder successor, moved out of the
                // right subtree.
                let (right, res_node) = Llrb::do_erase_min(node.right.take());
                node.right = right;
                let succ = match res_node {
                    Some(succ) => succ,
                    None => panic!("do_erase(): fatal logic, call the programmer"),
                };
                let old_value = mem::replace(&mut node.value, succ.value);
                (Some(Llrb::fixup(node)), Some(old_value))
            } else {
                let (right, old_value) = Llrb::do_erase(node.right.take(), key);
                node.right = right;
                (Some(Llrb::fixup(node)), old_value)
            }
        }
    }

    pub(crate) fn do_erase_min(node: Option<Box<Node<T>>>) -> Delmin<T> {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };
        if node.left.is_none() {
            // a lone right child takes over this node's color.
            let right = node.right.take().map(|mut right| {
                right.black = node.black;
                right
            });
            return (right, Some(node));
        }
        let left = node.left_deref();
        if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
            node = Llrb::move_red_left(node);
        }
        let (left, old_node) = Llrb::do_erase_min(node.left.take());
        node.left = left;
        (Some(Llrb::fixup(node)), old_node)
    }

    fn do_erase_max(node: Option<Box<Node<T>>>) -> Delmin<T> {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };
        if is_red(node.left_deref()) {
            node = Llrb::rotate_right(node);
        }
        if node.right.is_none() {
            debug_assert!(node.left.is_none());
            return (None, Some(node));
        }
        let right = node.right_deref();
        if !is_red(right) && !is_red(right.and_then(Node::left_deref)) {
            node = Llrb::move_red_right(node);
        }
        let (right, old_node) = Llrb::do_erase_max(node.right.take());
        node.right = right;
        (Some(Llrb::fixup(node)), old_node)
    }

    fn validate_tree<'a>(
        node: Option<&'a Node<T>>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        acc: &mut Validate<'a, T>,
        stats: &mut Stats,
    ) -> Result<usize, Error<T>>
    where
        T: Clone,
    {
        let node = match node {
            None => {
                if let Some(depths) = stats.depths.as_mut() {
                    depths.sample(depth);
                }
                return Ok(nb);
            }
            Some(node) => node,
        };

        let red = !node.is_black();
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if is_red(node.right_deref()) {
            return Err(Error::RightLeaningRed);
        }
        if !red {
            nb += 1;
        }
        let (left, right) = (node.left_deref(), node.right_deref());
        let lblacks = Llrb::validate_tree(left, red, nb, depth + 1, acc, stats)?;

        if let Some(prev) = acc.prev {
            if prev.gt(&node.value) {
                return Err(Error::SortError(node.value.clone(), prev.clone()));
            }
        }
        acc.prev = Some(&node.value);
        acc.count += 1;
        if left.is_none() && right.is_none() {
            acc.leaves += 1;
        }

        let rblacks = Llrb::validate_tree(right, red, nb, depth + 1, acc, stats)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }

    //--------- rotation routines ----------------

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    (r)                 (r)  \
    //            /       \                 /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let mut x = match node.right.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotate_left(): rotating a black link ? Call the programmer"),
        };
        node.right = x.left.take();
        x.black = node.black;
        node.set_red();
        x.left = Some(node);
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //            (r)   \                   (r)  \
    //           /       \                 /      \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let mut x = match node.left.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotate_right(): rotating a black link ? Call the programmer"),
        };
        node.left = x.right.take();
        x.black = node.black;
        node.set_red();
        x.right = Some(node);
        x
    }

    //        (x)                   (!x)
    //         |                     |
    //        node                  node
    //        / \                   / \
    //      (y) (z)              (!y) (!z)
    //     /      \              /      \
    //   left    right         left    right
    //
    fn flip(node: &mut Node<T>) {
        if let Some(left) = node.left.as_mut() {
            left.toggle_link();
        }
        if let Some(right) = node.right.as_mut() {
            right.toggle_link();
        }
        node.toggle_link();
    }

    fn fixup(mut node: Box<Node<T>>) -> Box<Node<T>> {
        if is_red(node.right_deref()) {
            node = Llrb::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut());
        }
        node
    }

    fn move_red_left(mut node: Box<Node<T>>) -> Box<Node<T>> {
        Llrb::flip(node.deref_mut());
        if is_red(node.right_deref().and_then(Node::left_deref)) {
            node.right = node.right.take().map(Llrb::rotate_right);
            node = Llrb::rotate_left(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }

    fn move_red_right(mut node: Box<Node<T>>) -> Box<Node<T>> {
        Llrb::flip(node.deref_mut());
        if is_red(node.left_deref().and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }
}

impl<T> Clone for Llrb<T>
where
    T: Clone + Ord,
{
    fn clone(&self) -> Llrb<T> {
        self.new_copy()
    }
}

impl<T> Drop for Llrb<T> {
    fn drop(&mut self) {
        walk::teardown(self.root.take());
    }
}

impl<T> fmt::Debug for Llrb<T>
where
    T: fmt::Debug + Ord,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Llrb<T>
where
    T: Ord,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Statistics on [`Llrb`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Llrb::stats`] method.
/// * To get full statisics via [`Llrb::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of elements in the tree.
    node_size: usize,
    blacks: Option<usize>,
    height: Option<usize>,
    leaves: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            height: Default::default(),
            leaves: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_height(&mut self, height: usize) {
        self.height = Some(height)
    }

    #[inline]
    fn set_leaves(&mut self, leaves: usize) {
        self.leaves = Some(leaves)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number elements in [`Llrb`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Llrb<T>`. Although
    /// the node overhead is constant, the node size varies based on
    /// element type. EG:
    ///
    /// ```
    /// use llrb_tree::Llrb;
    /// let llrb: Llrb<u64> = Llrb::new("myinstance");
    ///
    /// // size of element: 8 bytes
    /// // color: 8 bytes, after padding
    /// // children: 16 bytes
    /// assert_eq!(llrb.stats().node_size(), 32);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return number of nodes on the longest root to leaf path.
    #[inline]
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    /// Return number of nodes without children.
    #[inline]
    pub fn leaves(&self) -> Option<usize> {
        self.leaves
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        self.depths
            .as_ref()
            .filter(|depths| depths.samples() > 0)
            .cloned()
    }
}
