//! An append-only slot allocator. Nodes of a document are never freed while
//! the parse is alive, so slots are handed out in creation order and stay
//! valid until the allocator is dropped.

#[derive(Debug)]
pub struct Allocator<T> {
    nodes: Vec<T>,
}

impl<T> Default for Allocator<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> Allocator<T> {
    pub fn allocate(&mut self, item: T) -> usize {
        self.nodes.push(item);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: usize) -> Option<&T> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut T> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over all the slots in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.nodes.iter().enumerate()
    }
}

impl<T> ::std::ops::Index<usize> for Allocator<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.nodes[index]
    }
}

impl<T> ::std::ops::IndexMut<usize> for Allocator<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.nodes[index]
    }
}
