use serde::{Deserialize, Serialize};

use super::domain::Listing;
use super::price;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Optional criteria accepted on the listing search endpoint.
///
/// Every field arrives as a string; the numeric ones are validated and parsed
/// into a [`ListingQuery`] before the engine runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    #[serde(rename = "rentalType")]
    pub rental_type: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A filter request with the numeric-string fields validated and defaulted.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub rental_type: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub page: u64,
    pub limit: u64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            location: None,
            property_type: None,
            rental_type: None,
            min_price: None,
            max_price: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("{field} must be a numeric string, got '{value}'")]
    NotNumeric { field: &'static str, value: String },
}

fn parse_numeric(field: &'static str, raw: &str) -> Result<u64, QueryError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::NotNumeric {
            field,
            value: raw.to_string(),
        });
    }
    raw.parse().map_err(|_| QueryError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

impl TryFrom<ListingFilter> for ListingQuery {
    type Error = QueryError;

    fn try_from(filter: ListingFilter) -> Result<Self, Self::Error> {
        let page = match filter.page.as_deref() {
            Some(raw) => parse_numeric("page", raw)?,
            None => DEFAULT_PAGE,
        };
        let limit = match filter.limit.as_deref() {
            Some(raw) => parse_numeric("limit", raw)?,
            None => DEFAULT_LIMIT,
        };
        let min_price = filter
            .min_price
            .as_deref()
            .map(|raw| parse_numeric("minPrice", raw))
            .transpose()?;
        let max_price = filter
            .max_price
            .as_deref()
            .map(|raw| parse_numeric("maxPrice", raw))
            .transpose()?;

        Ok(Self {
            location: filter.location,
            property_type: filter.property_type,
            rental_type: filter.rental_type,
            min_price,
            max_price,
            page,
            limit,
        })
    }
}

/// One page of filtered results plus its page metadata. `total` counts the
/// filtered set before pagination.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub data: Vec<Listing>,
}

/// Lower-cases a status tag and deletes all whitespace, so "For Rent",
/// "for rent", and "forrent" compare equal.
fn normalize_tag(raw: &str) -> String {
    raw.to_lowercase().split_whitespace().collect()
}

/// Applies the filter predicates and the pagination window to a snapshot of
/// the collection. Pure: no mutation, no I/O, original relative order kept.
///
/// The predicates are independent conjunctions, so their application order
/// only affects intermediate set sizes. A listing whose price does not parse
/// never matches a price-bounded query.
pub fn filter_listings(listings: &[Listing], query: &ListingQuery) -> ListingPage {
    let mut results: Vec<&Listing> = listings.iter().collect();

    if let Some(location) = &query.location {
        let needle = location.to_lowercase();
        results.retain(|listing| listing.location.to_lowercase().contains(&needle));
    }

    if let Some(property_type) = &query.property_type {
        let wanted = property_type.to_lowercase();
        results.retain(|listing| {
            listing
                .status
                .first()
                .is_some_and(|tag| tag.to_lowercase() == wanted)
        });
    }

    if let Some(rental_type) = &query.rental_type {
        let wanted = normalize_tag(rental_type);
        results.retain(|listing| {
            listing
                .status
                .get(1)
                .is_some_and(|tag| normalize_tag(tag) == wanted)
        });
    }

    if query.min_price.is_some() || query.max_price.is_some() {
        results.retain(|listing| match price::parse_amount(&listing.price) {
            Some(amount) => {
                query.min_price.map_or(true, |min| amount >= min)
                    && query.max_price.map_or(true, |max| amount <= max)
            }
            None => false,
        });
    }

    let total = results.len() as u64;
    let offset = query.page.saturating_sub(1).saturating_mul(query.limit);
    let data: Vec<Listing> = results
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
        .cloned()
        .collect();

    ListingPage {
        page: query.page,
        limit: query.limit,
        total,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: u64, location: &str, price: &str, status: &[&str]) -> Listing {
        Listing {
            id,
            title: format!("Listing {id}"),
            price: price.to_string(),
            bedrooms: 3,
            bathrooms: 2,
            location: location.to_string(),
            status: status.iter().map(|tag| tag.to_string()).collect(),
            image: format!("property{id}.jpg"),
        }
    }

    fn collection() -> Vec<Listing> {
        vec![
            listing(1, "Lekki, Lagos", "₦2,500,000 / year", &["House", "For Rent"]),
            listing(2, "Abuja", "₦1,200,000", &["Flat", "For Lease"]),
            listing(3, "Ikoyi, Lagos", "₦85,000,000", &["House", "For Sale"]),
            listing(4, "Yaba, Lagos", "₦150,000 / night", &["Flat", "Shortlet"]),
            listing(5, "Port Harcourt", "Contact agent", &["House", "For Rent"]),
            listing(6, "Ibadan", "₦1,800,000 / year", &["Terrace", "For Rent"]),
            listing(7, "Wuse, Abuja", "₦950,000 / year", &["Flat"]),
        ]
    }

    fn query(update: impl FnOnce(&mut ListingQuery)) -> ListingQuery {
        let mut query = ListingQuery::default();
        update(&mut query);
        query
    }

    #[test]
    fn empty_filter_returns_first_page_of_everything() {
        let listings = collection();
        let page = filter_listings(&listings, &ListingQuery::default());

        assert_eq!(page.page, DEFAULT_PAGE);
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.total, listings.len() as u64);
        assert_eq!(page.data.len(), listings.len().min(10));
        assert_eq!(page.data[0].id, 1);
    }

    #[test]
    fn location_matches_case_insensitive_substring() {
        let listings = collection();
        let page = filter_listings(&listings, &query(|q| q.location = Some("lagos".into())));

        assert_eq!(page.total, 3);
        assert!(page
            .data
            .iter()
            .all(|listing| listing.location.to_lowercase().contains("lagos")));
    }

    #[test]
    fn type_matches_first_status_tag() {
        let listings = collection();
        let page = filter_listings(&listings, &query(|q| q.property_type = Some("house".into())));

        assert_eq!(page.total, 3);
        assert!(page
            .data
            .iter()
            .all(|listing| listing.status[0].eq_ignore_ascii_case("house")));
    }

    #[test]
    fn rental_type_is_whitespace_and_case_normalized() {
        let listings = collection();
        let spaced = filter_listings(&listings, &query(|q| q.rental_type = Some("For Rent".into())));
        let squashed = filter_listings(&listings, &query(|q| q.rental_type = Some("forrent".into())));

        assert_eq!(spaced.total, 3);
        assert_eq!(squashed.total, spaced.total);
        let ids: Vec<u64> = spaced.data.iter().map(|listing| listing.id).collect();
        assert_eq!(ids, vec![1, 5, 6]);
    }

    #[test]
    fn single_tag_listings_never_match_rental_type() {
        let listings = collection();
        let page = filter_listings(&listings, &query(|q| q.rental_type = Some("For Lease".into())));

        // listing 7 has no second tag and must be skipped, not panic
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, 2);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let listings = collection();
        let page = filter_listings(
            &listings,
            &query(|q| {
                q.min_price = Some(1_000_000);
                q.max_price = Some(2_000_000);
            }),
        );

        let ids: Vec<u64> = page.data.iter().map(|listing| listing.id).collect();
        assert_eq!(ids, vec![2, 6]);
        assert!(page.data.iter().all(|listing| {
            let amount = price::parse_amount(&listing.price).expect("parsable price");
            (1_000_000..=2_000_000).contains(&amount)
        }));
    }

    #[test]
    fn min_price_alone_keeps_everything_above_it() {
        let listings = collection();
        let page = filter_listings(&listings, &query(|q| q.min_price = Some(2_500_000)));

        let ids: Vec<u64> = page.data.iter().map(|listing| listing.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn unparsable_price_is_excluded_by_price_filters() {
        let listings = collection();
        let page = filter_listings(&listings, &query(|q| q.min_price = Some(0)));

        // listing 5 ("Contact agent") must drop out even with a zero bound
        assert!(page.data.iter().all(|listing| listing.id != 5));
        assert_eq!(page.total, 6);
    }

    #[test]
    fn pagination_is_stable_and_non_overlapping() {
        let listings = collection();
        let limit = 3;
        let total_pages = (listings.len() as u64).div_ceil(limit);

        let mut seen = Vec::new();
        for page_num in 1..=total_pages {
            let page = filter_listings(
                &listings,
                &query(|q| {
                    q.page = page_num;
                    q.limit = limit;
                }),
            );
            assert_eq!(page.total, listings.len() as u64);
            seen.extend(page.data.iter().map(|listing| listing.id));
        }

        let expected: Vec<u64> = listings.iter().map(|listing| listing.id).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let listings = collection();
        let page = filter_listings(
            &listings,
            &query(|q| {
                q.page = 9;
                q.limit = 10;
            }),
        );

        assert!(page.data.is_empty());
        assert_eq!(page.total, listings.len() as u64);
    }

    #[test]
    fn second_page_of_two_item_set_holds_the_second_item() {
        let listings = collection();
        let page = filter_listings(
            &listings,
            &query(|q| {
                q.location = Some("Abuja".into());
                q.page = 2;
                q.limit = 1;
            }),
        );

        assert_eq!(page.total, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 7);
    }

    #[test]
    fn location_scenario_from_two_listing_collection() {
        let listings = vec![
            listing(1, "Lekki, Lagos", "₦2,500,000 / year", &["House", "For Rent"]),
            listing(2, "Abuja", "₦1,200,000", &["Flat", "For Lease"]),
        ];
        let page = filter_listings(&listings, &query(|q| q.location = Some("Lagos".into())));

        assert_eq!(page.total, 1);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 1);
    }

    #[test]
    fn filters_compose_as_conjunctions() {
        let listings = collection();
        let page = filter_listings(
            &listings,
            &query(|q| {
                q.location = Some("Lagos".into());
                q.property_type = Some("House".into());
                q.rental_type = Some("For Rent".into());
            }),
        );

        let ids: Vec<u64> = page.data.iter().map(|listing| listing.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn try_from_defaults_page_and_limit() {
        let parsed = ListingQuery::try_from(ListingFilter::default()).expect("valid filter");
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.limit, 10);
        assert!(parsed.min_price.is_none());
    }

    #[test]
    fn try_from_parses_numeric_strings() {
        let filter = ListingFilter {
            min_price: Some("1000000".into()),
            max_price: Some("2000000".into()),
            page: Some("2".into()),
            limit: Some("5".into()),
            ..ListingFilter::default()
        };
        let parsed = ListingQuery::try_from(filter).expect("valid filter");
        assert_eq!(parsed.min_price, Some(1_000_000));
        assert_eq!(parsed.max_price, Some(2_000_000));
        assert_eq!(parsed.page, 2);
        assert_eq!(parsed.limit, 5);
    }

    #[test]
    fn try_from_rejects_non_numeric_strings() {
        let filter = ListingFilter {
            min_price: Some("1,000,000".into()),
            ..ListingFilter::default()
        };
        let err = ListingQuery::try_from(filter).expect_err("separators are not digits");
        assert!(matches!(
            err,
            QueryError::NotNumeric { field: "minPrice", .. }
        ));

        let filter = ListingFilter {
            page: Some("two".into()),
            ..ListingFilter::default()
        };
        assert!(ListingQuery::try_from(filter).is_err());
    }

    #[test]
    fn page_zero_behaves_like_page_one() {
        let listings = collection();
        let page = filter_listings(
            &listings,
            &query(|q| {
                q.page = 0;
                q.limit = 3;
            }),
        );

        let ids: Vec<u64> = page.data.iter().map(|listing| listing.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
