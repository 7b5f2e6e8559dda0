//! Scope-bound ownership of a resource with a release function.

use std::ops::{Deref, DerefMut};

/// Owns `resource` and runs `release` on it exactly once, when dropped.
///
/// The release runs whatever the exit path: normal completion, early
/// return, `?` propagation or unwinding.
pub struct ReleaseGuard<T, F: FnOnce(&mut T)> {
    resource: T,
    release: Option<F>,
}

impl<T, F: FnOnce(&mut T)> ReleaseGuard<T, F> {
    pub fn new(resource: T, release: F) -> Self {
        Self { resource, release: Some(release) }
    }
}

impl<T, F: FnOnce(&mut T)> Deref for ReleaseGuard<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<T, F: FnOnce(&mut T)> DerefMut for ReleaseGuard<T, F> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.resource
    }
}

impl<T, F: FnOnce(&mut T)> Drop for ReleaseGuard<T, F> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&mut self.resource);
        }
    }
}

impl<T: std::fmt::Debug, F: FnOnce(&mut T)> std::fmt::Debug for ReleaseGuard<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseGuard").field("resource", &self.resource).finish()
    }
}
