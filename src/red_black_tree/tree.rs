use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::node::{Color, Link, Node};
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Which child slot of a node a link occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

fn expect_node(link: Link) -> Handle {
    link.expect("Expected a node, found the sentinel.")
}

/// The node graph of a red black tree. Every structural operation takes `&mut self` because
/// rotations and transplants may repoint the root.
pub struct Tree<T, U> {
    arena: TypedArena<Node<T, U>>,
    root: Link,
    len: usize,
}

impl<T, U> Tree<T, U> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn root(&self) -> Link {
        self.root
    }

    pub fn node(&self, handle: Handle) -> &Node<T, U> {
        &self.arena[handle]
    }

    /// The sentinel is black.
    pub fn color(&self, link: Link) -> Color {
        match link {
            None => Color::Black,
            Some(handle) => self.arena[handle].color,
        }
    }

    // the sentinel's color is fixed, so writes to it are dropped
    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(handle) = link {
            self.arena[handle].color = color;
        }
    }

    fn child(&self, handle: Handle, side: Side) -> Link {
        match side {
            Side::Left => self.arena[handle].left,
            Side::Right => self.arena[handle].right,
        }
    }

    // precondition: `child` occupies a slot of `parent`, or is the sentinel in an otherwise
    // occupied node
    fn side_of(&self, child: Link, parent: Handle) -> Side {
        if self.arena[parent].left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points the slot that held `old` at `new`. A sentinel `parent` means `old` was the root.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if self.arena[parent].left == Some(old) {
                    self.arena[parent].left = new;
                } else {
                    self.arena[parent].right = new;
                }
            },
        }
    }

    /// Promotes the right child of `x` into its position; `x` becomes that child's left child.
    /// Colors are left untouched.
    pub fn rotate_left(&mut self, x: Handle) {
        trace!("rotate left");
        let y = self.arena[x]
            .right
            .expect("Expected right child node to be `Some`.");

        let inner = self.arena[y].left;
        self.arena[x].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }

        let parent = self.arena[x].parent;
        self.arena[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.arena[y].left = Some(x);
        self.arena[x].parent = Some(y);
    }

    /// Promotes the left child of `x` into its position; `x` becomes that child's right child.
    /// Colors are left untouched.
    pub fn rotate_right(&mut self, x: Handle) {
        trace!("rotate right");
        let y = self.arena[x]
            .left
            .expect("Expected left child node to be `Some`.");

        let inner = self.arena[y].right;
        self.arena[x].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }

        let parent = self.arena[x].parent;
        self.arena[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.arena[y].right = Some(x);
        self.arena[x].parent = Some(y);
    }

    // moves `x` down towards `side`
    fn rotate(&mut self, x: Handle, side: Side) {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    pub fn search_node<V>(&self, key: &V) -> Link
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    pub fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    /// Inserts a key-value pair. Returns `false` and leaves the tree untouched if the key is
    /// already present.
    pub fn insert(&mut self, key: T, value: U) -> bool
    where
        T: Ord,
    {
        if self.search_node(&key).is_some() {
            debug!("ignoring insert of duplicate key");
            return false;
        }

        let new_node = self.bst_insert(key, value);
        self.fix_insert(new_node);
        self.len += 1;
        debug!("inserted key, {} entries", self.len);
        true
    }

    // Plain binary search tree insertion. Equal keys descend right; callers reject duplicates
    // before getting here.
    fn bst_insert(&mut self, key: T, value: U) -> Handle
    where
        T: Ord,
    {
        let mut parent = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            parent = curr;
            let node = &self.arena[handle];
            curr = if key < node.key { node.left } else { node.right };
        }

        let is_left = match parent {
            Some(parent) => key < self.arena[parent].key,
            None => false,
        };
        let new_node = self.arena.allocate(Node::new(key, value, parent));

        match parent {
            None => self.root = Some(new_node),
            Some(parent) if is_left => self.arena[parent].left = Some(new_node),
            Some(parent) => self.arena[parent].right = Some(new_node),
        }
        new_node
    }

    fn fix_insert(&mut self, mut z: Handle) {
        while self.color(self.arena[z].parent) == Color::Red {
            // a red parent is never the root, so the grandparent exists
            let parent = expect_node(self.arena[z].parent);
            let grandparent = expect_node(self.arena[parent].parent);
            let side = self.side_of(Some(parent), grandparent);
            let uncle = self.child(grandparent, side.opposite());

            if self.color(uncle) == Color::Red {
                trace!("insert fix-up: red uncle, recoloring");
                self.arena[parent].color = Color::Black;
                self.set_color(uncle, Color::Black);
                self.arena[grandparent].color = Color::Red;
                z = grandparent;
            } else {
                if self.child(parent, side.opposite()) == Some(z) {
                    trace!("insert fix-up: inner child, straightening");
                    z = parent;
                    self.rotate(z, side);
                }

                trace!("insert fix-up: outer child, rotating grandparent");
                let parent = expect_node(self.arena[z].parent);
                let grandparent = expect_node(self.arena[parent].parent);
                self.arena[parent].color = Color::Black;
                self.arena[grandparent].color = Color::Red;
                self.rotate(grandparent, side.opposite());
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`. The children of `v` are
    /// not touched.
    fn transplant(&mut self, u: Handle, v: Link) {
        let parent = self.arena[u].parent;
        self.replace_child(parent, u, v);
        if let Some(v) = v {
            self.arena[v].parent = parent;
        }
    }

    /// Removes a key from the tree and returns the removed key-value pair, or `None` if the key
    /// is absent.
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let z = self.search_node(key)?;
        let (z_left, z_right) = (self.arena[z].left, self.arena[z].right);

        // `removed_color` is the color of the node that leaves its position, `x` is what takes
        // its place and `x_parent` is where `x` now hangs. `x` may be the sentinel, which has no
        // parent link of its own, hence the separate `x_parent`.
        let mut removed_color = self.arena[z].color;
        let (x, x_parent) = match (z_left, z_right) {
            (None, _) => {
                let parent = self.arena[z].parent;
                self.transplant(z, z_right);
                (z_right, parent)
            },
            (_, None) => {
                let parent = self.arena[z].parent;
                self.transplant(z, z_left);
                (z_left, parent)
            },
            (Some(left), Some(right)) => {
                let y = self.minimum(right);
                removed_color = self.arena[y].color;
                let x = self.arena[y].right;

                let x_parent = if self.arena[y].parent == Some(z) {
                    Some(y)
                } else {
                    let y_parent = self.arena[y].parent;
                    self.transplant(y, x);
                    self.arena[y].right = Some(right);
                    self.arena[right].parent = Some(y);
                    y_parent
                };

                self.transplant(z, Some(y));
                self.arena[y].left = Some(left);
                self.arena[left].parent = Some(y);
                let z_color = self.arena[z].color;
                self.arena[y].color = z_color;
                (x, x_parent)
            },
        };

        if removed_color == Color::Black {
            self.fix_remove(x, x_parent);
        }

        self.len -= 1;
        debug!("removed key, {} entries", self.len);
        let node = self
            .arena
            .free(&z)
            .expect("Expected removed node to be live.");
        Some((node.key, node.value))
    }

    // `x` carries an extra black. Walks it up until it lands on a red node or the root, or until
    // a rotation absorbs it.
    fn fix_remove(&mut self, mut x: Link, mut parent: Link) {
        while x != self.root && self.color(x) == Color::Black {
            let p = expect_node(parent);
            let side = self.side_of(x, p);
            // the extra black guarantees a real sibling
            let mut w = expect_node(self.child(p, side.opposite()));

            if self.arena[w].color == Color::Red {
                trace!("remove fix-up: red sibling");
                self.arena[w].color = Color::Black;
                self.arena[p].color = Color::Red;
                self.rotate(p, side);
                w = expect_node(self.child(p, side.opposite()));
            }

            let near = self.child(w, side);
            let far = self.child(w, side.opposite());
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!("remove fix-up: black nephews, pushing deficit up");
                self.arena[w].color = Color::Red;
                x = Some(p);
                parent = self.arena[p].parent;
            } else {
                if self.color(far) == Color::Black {
                    trace!("remove fix-up: black far nephew, rotating sibling");
                    self.set_color(near, Color::Black);
                    self.arena[w].color = Color::Red;
                    self.rotate(w, side.opposite());
                    w = expect_node(self.child(p, side.opposite()));
                }

                trace!("remove fix-up: red far nephew, rotating parent");
                let p_color = self.arena[p].color;
                self.arena[w].color = p_color;
                self.arena[p].color = Color::Black;
                let far = self.child(w, side.opposite());
                self.set_color(far, Color::Black);
                self.rotate(p, side);
                x = self.root;
                parent = None;
            }
        }

        self.set_color(x, Color::Black);
    }

    pub fn get<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.search_node(key).map(|handle| {
            let node = &self.arena[handle];
            (&node.key, &node.value)
        })
    }

    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = self.search_node(key)?;
        Some(&mut self.arena[handle].value)
    }

    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[self.minimum(root)].key)
    }

    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[self.maximum(root)].key)
    }

    /// Returns every key in ascending order.
    pub fn in_order(&self) -> Vec<&T> {
        let mut keys = Vec::with_capacity(self.len);
        self.in_order_helper(self.root, &mut keys);
        keys
    }

    fn in_order_helper<'a>(&'a self, link: Link, keys: &mut Vec<&'a T>) {
        if let Some(handle) = link {
            let node = &self.arena[handle];
            self.in_order_helper(node.left, keys);
            keys.push(&node.key);
            self.in_order_helper(node.right, keys);
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Consumes the tree and returns its entries in ascending key order.
    pub fn into_entries(mut self) -> Vec<(T, U)> {
        let mut handles = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(handle) = curr {
                stack.push(handle);
                curr = self.arena[handle].left;
            }
            match stack.pop() {
                Some(handle) => {
                    handles.push(handle);
                    curr = self.arena[handle].right;
                },
                None => break,
            }
        }

        handles
            .iter()
            .filter_map(|handle| self.arena.free(handle))
            .map(|node| (node.key, node.value))
            .collect()
    }
}
