use super::Node;

use weft_core::stmt::{Key, Value};

use indexmap::IndexMap;

/// Contents of one named field or link on a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Scalar(Value),

    /// A one-to-one child
    One(Box<Node>),

    /// One-to-many children keyed by primary key, in row arrival order
    Many(IndexMap<Key, Node>),
}

impl Slot {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Slot::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Slot::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_one(&self) -> Option<&Node> {
        match self {
            Slot::One(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&IndexMap<Key, Node>> {
        match self {
            Slot::Many(nodes) => Some(nodes),
            _ => None,
        }
    }
}
