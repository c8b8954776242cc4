//! Releasable resource handles.
//!
//! A [`Release`] handle is the one thing an iterator may own besides its
//! cursor. Every wrapping layer owns at most one handle and releases exactly
//! that one when it is closed.

use std::fmt;

use crate::error::SourceError;

/// Something that must be released once its owner is done with it.
pub trait Release {
    /// Release the resource.
    ///
    /// Handles provided by this crate treat a second call as a no-op.
    fn release(&mut self) -> Result<(), SourceError>;
}

impl<R: Release + ?Sized> Release for Box<R> {
    fn release(&mut self) -> Result<(), SourceError> {
        (**self).release()
    }
}

/// Handle owning nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRelease;

impl Release for NoRelease {
    fn release(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Handle running a closure on release.
///
/// The closure runs at most once.
pub struct ReleaseFn<F> {
    f: Option<F>,
}

/// Adapt a closure into a [`Release`] handle.
pub fn release_fn<F>(f: F) -> ReleaseFn<F>
where
    F: FnOnce() -> Result<(), SourceError>,
{
    ReleaseFn { f: Some(f) }
}

impl<F> Release for ReleaseFn<F>
where
    F: FnOnce() -> Result<(), SourceError>,
{
    fn release(&mut self) -> Result<(), SourceError> {
        match self.f.take() {
            Some(f) => f(),
            None => Ok(()),
        }
    }
}

impl<F> fmt::Debug for ReleaseFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseFn")
            .field("released", &self.f.is_none())
            .finish()
    }
}
