use std::collections::VecDeque;

use crate::node::Node;

/// Order in which [`Llrb::foreach`] visits the tree.
///
/// [`Llrb::foreach`]: crate::Llrb::foreach
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Left subtree, node, right subtree. Yields sort order.
    Inorder,
    /// Node, left subtree, right subtree.
    Preorder,
    /// Left subtree, right subtree, node.
    Postorder,
    /// Breadth first, left to right within a level.
    LevelOrder,
}

// What remains to be scheduled for a node sitting on the postorder stack.
enum Pending {
    Left,
    Right,
    Nothing,
}

/// Visit every node under `root` in `order`, using the call stack.
pub(crate) fn recursive<'a, T, F>(root: Option<&'a Node<T>>, order: Order, f: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    match order {
        Order::Inorder => inorder(root, f),
        Order::Preorder => preorder(root, f),
        Order::Postorder => postorder(root, f),
        Order::LevelOrder => {
            let height = height(root);
            for level in 0..height {
                level_at(root, level, f);
            }
        }
    }
}

fn inorder<'a, T, F>(node: Option<&'a Node<T>>, f: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    if let Some(node) = node {
        inorder(node.left_deref(), f);
        f(node);
        inorder(node.right_deref(), f);
    }
}

fn preorder<'a, T, F>(node: Option<&'a Node<T>>, f: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    if let Some(node) = node {
        f(node);
        preorder(node.left_deref(), f);
        preorder(node.right_deref(), f);
    }
}

fn postorder<'a, T, F>(node: Option<&'a Node<T>>, f: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    if let Some(node) = node {
        postorder(node.left_deref(), f);
        postorder(node.right_deref(), f);
        f(node);
    }
}

fn level_at<'a, T, F>(node: Option<&'a Node<T>>, level: usize, f: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    match node {
        Some(node) if level == 0 => f(node),
        Some(node) => {
            level_at(node.left_deref(), level - 1, f);
            level_at(node.right_deref(), level - 1, f);
        }
        None => (),
    }
}

/// Visit every node under `root` in `order`, using an explicit stack
/// (or queue, for level order) instead of recursion.
pub(crate) fn iterative<'a, T, F>(root: Option<&'a Node<T>>, order: Order, f: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    match order {
        Order::Inorder => {
            let (mut stack, mut node) = (vec![], root);
            loop {
                while let Some(n) = node {
                    stack.push(n);
                    node = n.left_deref();
                }
                match stack.pop() {
                    Some(n) => {
                        f(n);
                        node = n.right_deref();
                    }
                    None => break,
                }
            }
        }
        Order::Preorder => {
            let (mut stack, mut node) = (vec![], root);
            loop {
                while let Some(n) = node {
                    f(n);
                    stack.push(n);
                    node = n.left_deref();
                }
                match stack.pop() {
                    Some(n) => node = n.right_deref(),
                    None => break,
                }
            }
        }
        Order::Postorder => {
            let mut stack: Vec<(&Node<T>, Pending)> = vec![];
            if let Some(root) = root {
                stack.push((root, Pending::Left));
            }
            while let Some((n, pending)) = stack.pop() {
                match pending {
                    Pending::Left => {
                        stack.push((n, Pending::Right));
                        if let Some(left) = n.left_deref() {
                            stack.push((left, Pending::Left));
                        }
                    }
                    Pending::Right => {
                        stack.push((n, Pending::Nothing));
                        if let Some(right) = n.right_deref() {
                            stack.push((right, Pending::Left));
                        }
                    }
                    Pending::Nothing => f(n),
                }
            }
        }
        Order::LevelOrder => {
            let mut queue = VecDeque::new();
            if let Some(root) = root {
                queue.push_back(root);
            }
            while let Some(n) = queue.pop_front() {
                f(n);
                if let Some(left) = n.left_deref() {
                    queue.push_back(left);
                }
                if let Some(right) = n.right_deref() {
                    queue.push_back(right);
                }
            }
        }
    }
}

/// Destroy the tree under `root` in postorder: a node is dropped only
/// after both its children are detached and dropped. Return the number
/// of nodes destroyed.
pub(crate) fn teardown<T>(root: Option<Box<Node<T>>>) -> usize {
    let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
    let mut count = 0;
    while let Some(mut node) = stack.pop() {
        if let Some(left) = node.left.take() {
            stack.push(node);
            stack.push(left);
        } else if let Some(right) = node.right.take() {
            stack.push(node);
            stack.push(right);
        } else {
            count += 1;
        }
    }
    count
}

/// Number of nodes on the longest path from `node` to a leaf.
pub(crate) fn height<T>(node: Option<&Node<T>>) -> usize {
    match node {
        None => 0,
        Some(node) => {
            let (l, r) = (height(node.left_deref()), height(node.right_deref()));
            1 + l.max(r)
        }
    }
}
