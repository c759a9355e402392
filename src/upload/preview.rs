//! Revocable preview handles
//!
//! A preview handle lets a selected file be displayed before it is saved.
//! Handles are minted by a [`PreviewRegistry`] and revoked when dropped, so
//! replacing or discarding a handle always releases it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use sha2::{Digest, Sha256};
use ulid::Ulid;

type LiveSet = RefCell<BTreeSet<String>>;

/// Table of live preview URLs
///
/// Cloning the registry shares the same table. Everything runs on one
/// thread, so the table is reference counted rather than locked.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Rc<LiveSet>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new handle for the given file contents
    pub fn acquire(&self, contents: &[u8]) -> PreviewHandle {
        let digest = format!("{:x}", Sha256::digest(contents));
        let url = format!("preview://{}/{}", &digest[..12], Ulid::new());

        self.live.borrow_mut().insert(url.clone());
        tracing::debug!(%url, live = self.live_count(), "preview handle acquired");

        PreviewHandle {
            url,
            registry: Rc::downgrade(&self.live),
        }
    }

    /// Number of handles not yet released
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.borrow().contains(url)
    }
}

/// A live preview URL; released on drop
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    registry: Weak<LiveSet>,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(live) = self.registry.upgrade() {
            live.borrow_mut().remove(&self.url);
        }
        tracing::debug!(url = %self.url, "preview handle released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_released_on_drop() {
        let registry = PreviewRegistry::new();
        let handle = registry.acquire(b"png bytes");
        let url = handle.url().to_string();

        assert!(url.starts_with("preview://"));
        assert!(registry.is_live(&url));
        assert_eq!(registry.live_count(), 1);

        drop(handle);
        assert!(!registry.is_live(&url));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_handles_for_same_contents_are_distinct() {
        let registry = PreviewRegistry::new();
        let a = registry.acquire(b"same");
        let b = registry.acquire(b"same");

        assert_ne!(a.url(), b.url());
        assert_eq!(a.url()[..22], b.url()[..22]);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_handle_outliving_registry_drops_cleanly() {
        let handle = {
            let registry = PreviewRegistry::new();
            registry.acquire(b"x")
        };
        drop(handle);
    }
}
