use serde::{Deserialize, Serialize};

/// One property record.
///
/// `price` stays a formatted string ("₦2,500,000 / year") because the source
/// listings mix rental and sale formatting; the numeric value is recovered on
/// demand by [`crate::listings::price::parse_amount`]. `status` is an ordered
/// tag sequence: position 0 carries the property type ("House"), position 1
/// the rental/sale type ("For Rent"). Consumers must tolerate fewer than two
/// tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub title: String,
    pub price: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub location: String,
    pub status: Vec<String>,
    pub image: String,
}

/// Admin-supplied fields for a new listing. The store assigns the id; an id
/// in the request body is silently dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub price: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub location: String,
    pub status: Vec<String>,
    pub image: String,
}

impl ListingDraft {
    pub fn into_listing(self, id: u64) -> Listing {
        Listing {
            id,
            title: self.title,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            location: self.location,
            status: self.status,
            image: self.image,
        }
    }
}
