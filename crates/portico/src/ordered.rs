//! Identity-indexed ordered collections.

use crate::error::SiteError;

/// Anything carrying a stable string id.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// An owned sequence whose index is the display order and whose ids are unique.
#[derive(Debug, Clone)]
pub struct OrderedEntityList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedEntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identifiable> OrderedEntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from `items`, preserving their order.
    ///
    /// # Errors
    /// Returns [`SiteError::DuplicateIdentity`] when two items share an id.
    pub fn try_from_items(items: impl IntoIterator<Item = T>) -> Result<Self, SiteError> {
        let mut list = Self::new();
        for item in items {
            list.add(item)?;
        }
        Ok(list)
    }

    /// Appends `item`.
    ///
    /// # Errors
    /// Returns [`SiteError::DuplicateIdentity`] when an item with the same id is present.
    pub fn add(&mut self, item: T) -> Result<&mut T, SiteError> {
        if self.index_of(item.id()).is_some() {
            return Err(SiteError::duplicate(item.id()));
        }
        self.items.push(item);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Moves `id` to `index`, clamped to the end of the list. Absent ids are ignored.
    pub fn move_to(&mut self, id: &str, index: usize) {
        let Some(from) = self.index_of(id) else {
            return;
        };
        let item = self.items.remove(from);
        let to = index.min(self.items.len());
        self.items.insert(to, item);
    }

    pub fn move_up(&mut self, id: &str) {
        if let Some(index) = self.index_of(id).filter(|&i| i > 0) {
            self.items.swap(index, index - 1);
        }
    }

    pub fn move_down(&mut self, id: &str) {
        if let Some(index) = self.index_of(id).filter(|&i| i + 1 < self.items.len()) {
            self.items.swap(index, index + 1);
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Identifiable::id)
    }
}

impl<T> OrderedEntityList<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> PartialEq for OrderedEntityList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a, T> IntoIterator for &'a OrderedEntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for OrderedEntityList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
