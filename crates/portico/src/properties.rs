//! Ordered string properties attached to pages and tools.

use fxhash::FxHashMap;

/// Ordered key/value properties. Keys are unique; overwriting a key keeps its position.
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    entries: Vec<(String, String)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Inserts or overwrites `key`.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Property names in insertion order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every entry of `other` into this bag, overwriting collisions.
    pub fn add_all(&mut self, other: &Self) {
        for (key, value) in other.iter() {
            self.add_property(key, value);
        }
    }

    /// Returns a copy whose values have every occurrence of `from` replaced by `to`.
    ///
    /// An empty `from` or `from == to` yields an unchanged copy.
    pub fn replacing_in_values(&self, from: &str, to: &str) -> Self {
        if from.is_empty() || from == to {
            return self.clone();
        }
        let entries =
            self.entries.iter().map(|(k, v)| (k.clone(), v.replace(from, to))).collect();
        Self { entries }
    }
}

impl PartialEq for PropertyBag {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let lookup: FxHashMap<&str, &str> = other.iter().collect();
        self.iter().all(|(k, v)| lookup.get(k) == Some(&v))
    }
}

impl Eq for PropertyBag {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.add_property(key, value);
        }
        bag
    }
}
