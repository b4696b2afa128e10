use std::ops::{Deref, DerefMut};

/// Wraps a value together with a flag that marks it as not yet applied to
/// the map layers. Mutable access sets the flag; the reconciliation pass
/// clears it once the layers match again.
pub struct Dirty<T> {
    inner: T,
    dirty: bool,
}

impl<T> Dirty<T> {
    pub fn new(inner: T) -> Self {
        Self { inner, dirty: true }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_clean(&mut self) {
        self.dirty = false;
    }
}

impl<T> Deref for Dirty<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for Dirty<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.dirty = true;
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dirty() {
        assert!(Dirty::new(0).is_dirty());
    }

    #[test]
    fn mutable_access_marks_dirty_again() {
        let mut value = Dirty::new(0);
        value.set_clean();

        *value += 1;

        assert!(value.is_dirty());
    }
}
