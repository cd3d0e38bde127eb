//! The listings domain: the in-memory store, the filter/pagination engine,
//! and the HTTP routes that expose them.

pub mod dataset;
pub mod domain;
pub mod price;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Listing, ListingDraft};
pub use query::{filter_listings, ListingFilter, ListingPage, ListingQuery, QueryError};
pub use repository::{InMemoryListingRepository, ListingRepository};
pub use router::{admin_router, listing_router};
pub use service::{ListingService, ListingServiceError};
