use std::sync::Arc;

use tracing::info;

use super::domain::{Listing, ListingDraft};
use super::query::{filter_listings, ListingFilter, ListingPage, ListingQuery, QueryError};
use super::repository::ListingRepository;

/// Read/append operations over the shared listing store, consumed by the
/// public search routes and the admin create route alike.
pub struct ListingService<R> {
    repository: Arc<R>,
}

impl<R> ListingService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validates the filter request, snapshots the store, and runs the query
    /// engine over the snapshot.
    pub fn find_all(&self, filter: ListingFilter) -> Result<ListingPage, ListingServiceError> {
        let query = ListingQuery::try_from(filter)?;
        Ok(filter_listings(&self.repository.all(), &query))
    }

    pub fn find_by_id(&self, id: u64) -> Option<Listing> {
        self.repository.find_by_id(id)
    }

    /// Appends a new listing. The store assigns the id; the draft's `status`
    /// must carry at least one tag.
    pub fn create(&self, draft: ListingDraft) -> Result<Listing, ListingServiceError> {
        if draft.status.is_empty() {
            return Err(ListingServiceError::EmptyStatus);
        }
        let listing = self.repository.append(draft);
        info!(id = listing.id, "listing created");
        Ok(listing)
    }
}

/// Error raised by the listing service; both variants are request-shape
/// problems and render as 400s at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("status must carry at least one tag")]
    EmptyStatus,
}
