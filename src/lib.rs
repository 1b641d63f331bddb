//! An ordered map and set backed by a red black tree whose nodes live in a typed arena.
//!
//! # Examples
//!
//! ```
//! use balanced_collections::red_black_tree::RedBlackSet;
//!
//! let mut set = RedBlackSet::new();
//! for key in 1..=100 {
//!     set.insert(key);
//! }
//!
//! assert_eq!(set.len(), 100);
//! assert!(set.check_invariants().is_ok());
//! ```

pub mod arena;
pub mod red_black_tree;
