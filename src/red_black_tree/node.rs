use crate::arena::Handle;

/// A link to another node. `None` is the sentinel: it terminates every path, is the parent of
/// the root, and is always black.
pub type Link = Option<Handle>;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
pub struct Node<T, U> {
    pub key: T,
    pub value: U,
    pub color: Color,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, parent: Link) -> Self {
        Node {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Node};

    #[test]
    fn test_new_node_is_red_leaf() {
        let node = Node::new(1, "a", None);
        assert_eq!(node.color, Color::Red);
        assert!(node.left.is_none());
        assert!(node.right.is_none());
        assert!(node.parent.is_none());
    }
}
