//! Explicit load state for data filled from storage on first access.

/// A value that is either not yet read from storage or fully loaded.
///
/// Once loaded, a value never returns to the unloaded state. A failing loader leaves the
/// state untouched, so the next access retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lazy<T> {
    value: Option<T>,
}

impl<T> Lazy<T> {
    pub const fn unloaded() -> Self {
        Self { value: None }
    }

    pub const fn loaded(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub const fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the loaded value without triggering a load.
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub const fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Runs `loader` if the value is not loaded yet, then returns the loaded value.
    ///
    /// # Errors
    /// Propagates the loader error; the value stays unloaded.
    pub fn materialize<E>(&mut self, loader: impl FnOnce() -> Result<T, E>) -> Result<&mut T, E> {
        match self.value {
            Some(ref mut value) => Ok(value),
            None => Ok(self.value.insert(loader()?)),
        }
    }

    /// Unwraps into the loaded value, if any.
    pub fn into_loaded(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self::unloaded()
    }
}

impl<T> From<T> for Lazy<T> {
    fn from(value: T) -> Self {
        Self::loaded(value)
    }
}
