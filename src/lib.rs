//! Left leaning red black tree, an ordered container that permits
//! duplicate elements and rebalances itself using only local rotations
//! and color flips.

mod depth;
mod error;
mod iter;
mod llrb;
mod node;
mod walk;

pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::iter::{Iter, Range, Reverse};
pub use crate::llrb::{Llrb, Stats};
pub use crate::node::Node;
pub use crate::walk::Order;
