//! Scoped iteration handle
//!
//! Range and history scans hold a point-in-time view inside the ledger.
//! A [`Scan`] pairs the iterator with a release hook that runs exactly once:
//! on [`Scan::close`], or when the handle is dropped. Early returns through
//! `?` therefore release the view just like a completed iteration does.

use std::fmt;

use crate::error::StoreResult;

type Release<'a> = Box<dyn FnOnce() + 'a>;

/// Iterator over ledger results that releases its resources on every exit path
pub struct Scan<'a, T> {
    items: Box<dyn Iterator<Item = StoreResult<T>> + 'a>,
    release: Option<Release<'a>>,
}

impl<'a, T: 'a> Scan<'a, T> {
    /// Wrap an iterator that holds nothing to release
    pub fn new(items: impl Iterator<Item = StoreResult<T>> + 'a) -> Self {
        Scan {
            items: Box::new(items),
            release: None,
        }
    }

    /// Wrap an iterator together with the hook that releases it
    pub fn with_release(
        items: impl Iterator<Item = StoreResult<T>> + 'a,
        release: impl FnOnce() + 'a,
    ) -> Self {
        Scan {
            items: Box::new(items),
            release: Some(Box::new(release)),
        }
    }

    /// Scan over already materialized values
    pub fn from_vec(values: Vec<T>) -> Self {
        Scan::new(values.into_iter().map(Ok))
    }

    /// Release the scan now
    pub fn close(mut self) {
        self.release_now();
    }

    /// Whether the release hook has already run (or there never was one)
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }

    /// Transform each item, keeping the release hook with the new handle
    pub fn map_items<U: 'a>(
        mut self,
        f: impl FnMut(StoreResult<T>) -> StoreResult<U> + 'a,
    ) -> Scan<'a, U> {
        let items = std::mem::replace(&mut self.items, Box::new(std::iter::empty()));
        Scan {
            items: Box::new(items.map(f)),
            release: self.release.take(),
        }
    }
}

impl<'a, T> Scan<'a, T> {
    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl<'a, T> Iterator for Scan<'a, T> {
    type Item = StoreResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

impl<'a, T> Drop for Scan<'a, T> {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl<'a, T> fmt::Debug for Scan<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scan")
            .field("released", &self.release.is_none())
            .finish_non_exhaustive()
    }
}
