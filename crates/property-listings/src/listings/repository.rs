use std::sync::{Arc, Mutex};

use super::domain::{Listing, ListingDraft};

/// Storage abstraction so the HTTP layer and tests can swap the backing
/// collection. Absence is represented as `None`, never as an error, and the
/// in-memory operations cannot fail.
pub trait ListingRepository: Send + Sync {
    /// Snapshot of the full collection in insertion order.
    fn all(&self) -> Vec<Listing>;
    fn find_by_id(&self, id: u64) -> Option<Listing>;
    /// Assigns `max(existing ids, default 0) + 1`, appends, and returns the
    /// stored record. Atomic: a partially built record is never visible.
    fn append(&self, draft: ListingDraft) -> Listing;
}

/// The authoritative collection behind a mutex. Reads are snapshots; the only
/// writer is the admin create path.
#[derive(Default, Clone)]
pub struct InMemoryListingRepository {
    listings: Arc<Mutex<Vec<Listing>>>,
}

impl InMemoryListingRepository {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings: Arc::new(Mutex::new(listings)),
        }
    }
}

impl ListingRepository for InMemoryListingRepository {
    fn all(&self) -> Vec<Listing> {
        self.listings
            .lock()
            .expect("listing store mutex poisoned")
            .clone()
    }

    fn find_by_id(&self, id: u64) -> Option<Listing> {
        self.listings
            .lock()
            .expect("listing store mutex poisoned")
            .iter()
            .find(|listing| listing.id == id)
            .cloned()
    }

    fn append(&self, draft: ListingDraft) -> Listing {
        let mut guard = self.listings.lock().expect("listing store mutex poisoned");
        let next_id = guard.iter().map(|listing| listing.id).max().unwrap_or(0) + 1;
        let listing = draft.into_listing(next_id);
        guard.push(listing.clone());
        listing
    }
}
