//! Structural checks for the red black tree invariants.

use crate::red_black_tree::node::{Color, Link};
use crate::red_black_tree::tree::Tree;
use std::error;
use std::fmt;

/// The first broken invariant found while checking a tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// The key at this in-order position is not greater than the key before it.
    UnorderedKeys { position: usize },
    /// The maintained length disagrees with the number of reachable nodes.
    LengthMismatch { expected: usize, actual: usize },
    SentinelNotBlack,
    RootNotBlack,
    /// A child's parent link does not point back at the node holding it, or the root has a
    /// parent.
    BrokenParentLink,
    /// A red node has a red child.
    RedRedEdge,
    /// The two subtrees of a node have different black-heights.
    BlackHeightMismatch { left: usize, right: usize },
}

impl error::Error for Violation {}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnorderedKeys { position } => {
                write!(f, "keys are out of order at position {}", position)
            },
            Violation::LengthMismatch { expected, actual } => write!(
                f,
                "tree reports {} entries but {} are reachable",
                expected, actual,
            ),
            Violation::SentinelNotBlack => write!(f, "sentinel is not black"),
            Violation::RootNotBlack => write!(f, "root is not black"),
            Violation::BrokenParentLink => write!(f, "parent link is inconsistent"),
            Violation::RedRedEdge => write!(f, "red node has a red child"),
            Violation::BlackHeightMismatch { left, right } => write!(
                f,
                "black-height of left subtree is {} but right subtree is {}",
                left, right,
            ),
        }
    }
}

/// Checks every red black tree invariant and returns the black-height of the root, counting the
/// sentinel as one.
pub fn check<T, U>(tree: &Tree<T, U>) -> Result<usize, Violation>
where
    T: Ord,
{
    let keys = tree.in_order();
    if let Some(position) = keys.windows(2).position(|pair| pair[0] >= pair[1]) {
        return Err(Violation::UnorderedKeys {
            position: position + 1,
        });
    }
    if keys.len() != tree.len() {
        return Err(Violation::LengthMismatch {
            expected: tree.len(),
            actual: keys.len(),
        });
    }

    if tree.color(None) != Color::Black {
        return Err(Violation::SentinelNotBlack);
    }
    if tree.color(tree.root()) != Color::Black {
        return Err(Violation::RootNotBlack);
    }
    if let Some(root) = tree.root() {
        if tree.node(root).parent.is_some() {
            return Err(Violation::BrokenParentLink);
        }
    }

    black_height(tree, tree.root())
}

fn black_height<T, U>(tree: &Tree<T, U>, link: Link) -> Result<usize, Violation> {
    let handle = match link {
        None => return Ok(1),
        Some(handle) => handle,
    };
    let node = tree.node(handle);

    if node.color == Color::Red
        && (tree.color(node.left) == Color::Red || tree.color(node.right) == Color::Red)
    {
        return Err(Violation::RedRedEdge);
    }

    for child in [node.left, node.right].iter().flatten() {
        if tree.node(*child).parent != Some(handle) {
            return Err(Violation::BrokenParentLink);
        }
    }

    let left = black_height(tree, node.left)?;
    let right = black_height(tree, node.right)?;
    if left != right {
        return Err(Violation::BlackHeightMismatch { left, right });
    }

    match node.color {
        Color::Black => Ok(left + 1),
        Color::Red => Ok(left),
    }
}

#[cfg(test)]
mod tests {
    use super::{check, Violation};
    use crate::red_black_tree::tree::Tree;

    #[test]
    fn test_empty() {
        let tree: Tree<u32, ()> = Tree::new(16);
        assert_eq!(check(&tree), Ok(1));
    }

    #[test]
    fn test_valid() {
        let mut tree = Tree::new(16);
        for key in 0..32 {
            tree.insert(key, ());
        }
        assert!(check(&tree).unwrap() > 1);
    }

    #[test]
    fn test_red_root() {
        let mut tree = Tree::new(16);
        tree.insert(1, ());
        tree.insert(2, ());
        // promoting the red child leaves it at the root
        tree.rotate_left(tree.root().unwrap());
        assert_eq!(check(&tree), Err(Violation::RootNotBlack));
    }

    #[test]
    fn test_red_red_edge() {
        let mut tree = Tree::new(16);
        for key in &[4, 2, 6, 1, 3, 5, 7, 8] {
            tree.insert(*key, ());
        }
        // 4B (2B (1R, 3R), 6R (5B, 7B (_, 8R))); lifting 8 puts it red under red 6
        let seven = tree.search_node(&7).unwrap();
        tree.rotate_left(seven);
        assert_eq!(check(&tree), Err(Violation::RedRedEdge));
    }

    #[test]
    fn test_black_height_mismatch() {
        let mut tree = Tree::new(16);
        for key in &[2, 1, 3, 4] {
            tree.insert(*key, ());
        }
        // 2B (1B, 3B (_, 4R))
        tree.rotate_left(tree.root().unwrap());
        assert_eq!(
            check(&tree),
            Err(Violation::BlackHeightMismatch { left: 2, right: 1 }),
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Violation::BlackHeightMismatch { left: 2, right: 3 }.to_string(),
            "black-height of left subtree is 2 but right subtree is 3",
        );
        assert_eq!(Violation::RedRedEdge.to_string(), "red node has a red child");
    }
}
