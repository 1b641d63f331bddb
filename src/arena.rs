//! Chunked allocator for the nodes of a linked structure.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in a `TypedArena<T>`.
///
/// Handles are plain indices: they stay valid across any number of other allocations and frees,
/// which is what lets nodes refer to their parents without owning them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Objects live in fixed-size chunks that are never reallocated, so growing the arena never moves
/// existing objects. Freed blocks are threaded onto a free list and reused by later allocations.
/// All remaining objects are dropped with the arena.
///
/// # Examples
///
/// ```
/// use balanced_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), Some(2));
/// assert_eq!(arena.free(&x), None);
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn block(&self, handle: &Handle) -> Option<&Block<T>> {
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.get(handle.block_index))
    }

    fn block_mut(&mut self, handle: &Handle) -> Option<&mut Block<T>> {
        self.chunks
            .get_mut(handle.chunk_index)
            .and_then(|chunk| chunk.get_mut(handle.block_index))
    }

    /// Constructs a new, empty `TypedArena<T>` holding at most `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Expected a positive chunk size.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Moves `value` into the arena and returns the handle that refers to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(handle) = self.head.take() {
            let block = &mut self.chunks[handle.chunk_index][handle.block_index];
            match mem::replace(block, Block::Occupied(value)) {
                Block::Vacant(next) => self.head = next,
                Block::Occupied(_) => unreachable!("Free list points at an occupied block."),
            }
            return handle;
        }

        if self.len > self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }

        let chunk_index = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_index];
        chunk.push(Block::Occupied(value));
        Handle {
            chunk_index,
            block_index: chunk.len() - 1,
        }
    }

    /// Removes the object referred to by `handle` and returns it. Returns `None` if the handle
    /// does not refer to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), Some(0));
    /// assert!(arena.is_empty());
    /// ```
    pub fn free(&mut self, handle: &Handle) -> Option<T> {
        match self.block(handle) {
            Some(Block::Occupied(_)) => {},
            _ => return None,
        }

        let next = self.head.take();
        let block = self.block_mut(handle)?;
        match mem::replace(block, Block::Vacant(next)) {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(*handle);
                Some(value)
            },
            Block::Vacant(_) => unreachable!("Block was checked to be occupied."),
        }
    }

    /// Returns an immutable reference to the object referred to by `handle`, or `None` if the
    /// handle is stale or foreign.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.block(handle) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object referred to by `handle`, or `None` if the
    /// handle is stale or foreign.
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.block_mut(handle) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and releases all chunks. Previously issued handles become stale.
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Expected handle to refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle)
            .expect("Expected handle to refer to a live object.")
    }
}

impl<T> fmt::Debug for TypedArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedArena")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    fn handle(chunk_index: usize, block_index: usize) -> Handle {
        Handle {
            chunk_index,
            block_index,
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new(1024);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(0), handle(0, 1));
        assert_eq!(arena.allocate(0), handle(0, 2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(0), handle(0, 1));
        assert_eq!(arena.allocate(0), handle(1, 0));
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        assert_eq!(arena.free(&x), Some(0));
        assert_eq!(arena.free(&y), Some(1));
        assert!(arena.is_empty());

        assert_eq!(arena.allocate(2), y);
        assert_eq!(arena.allocate(3), x);
        assert_eq!(arena.allocate(4), handle(0, 2));
    }

    #[test]
    fn test_free_reuse_does_not_grow_chunks() {
        let mut arena = TypedArena::new(2);
        let x = arena.allocate(0);
        arena.allocate(1);
        arena.free(&x);
        assert_eq!(arena.allocate(2), x);
        assert_eq!(arena.allocate(3), handle(1, 0));
    }

    #[test]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        assert_eq!(arena.free(&handle(0, 0)), None);
    }

    #[test]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        assert_eq!(arena.free(&x), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        *arena.get_mut(&x).unwrap() = 1;
        assert_eq!(arena.get(&x), Some(&1));
        assert_eq!(arena.get_mut(&handle(0, 1)), None);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.allocate(1), handle(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_index_stale_handle() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        let _value: u32 = arena[x];
    }
}
