use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entity::sea_orm_active_enums::{
    ArtistStatus, ArtworkStatus, PaymentMethod, PaymentStatus, ShippingStatus,
};

/// Highest page a listing will seek to.
pub const MAX_PAGE: i64 = 100_000;

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
    pub offset: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    /// Page is clamped to `[1, MAX_PAGE]`; `per_page` falls back to `default` and is
    /// clamped to `[1, max]`.
    pub fn normalize(&self, default: i64, max: i64) -> Page {
        let page = self.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let per_page = self.per_page.unwrap_or(default).clamp(1, max);
        Page {
            page,
            per_page,
            offset: (page - 1) * per_page,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkSort {
    #[default]
    Latest,
    Oldest,
    HighestPrice,
    LowestPrice,
    MostViewed,
    MostLiked,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArtworkQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matches title or description.
    pub q: Option<String>,
    pub category: Option<String>,
    /// Matches the artist's city.
    pub city: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    #[param(inline)]
    pub sort: Option<ArtworkSort>,
}

impl ArtworkQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArtistSearchQuery {
    /// Artist name to search for (required).
    pub artist: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ArtistSearchQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnArtworkQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    #[param(inline)]
    pub status: Option<ArtworkStatus>,
}

impl OwnArtworkQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArtistOrderQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    #[param(inline)]
    pub shipping_status: Option<ShippingStatus>,
}

impl ArtistOrderQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminArtworkSort {
    #[default]
    Latest,
    Oldest,
    PriceHigh,
    PriceLow,
    MostViewed,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminArtworkQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matches title, description or artist name.
    pub search: Option<String>,
    #[param(inline)]
    pub status: Option<ArtworkStatus>,
    pub category: Option<String>,
    #[param(inline)]
    pub artist_status: Option<ArtistStatus>,
    #[param(inline)]
    pub sort: Option<AdminArtworkSort>,
}

impl AdminArtworkQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminOrderSort {
    #[default]
    Latest,
    Oldest,
    AmountHigh,
    AmountLow,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminOrderQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matches buyer name or tracking number.
    pub search: Option<String>,
    #[param(inline)]
    pub payment_status: Option<PaymentStatus>,
    #[param(inline)]
    pub shipping_status: Option<ShippingStatus>,
    #[param(inline)]
    pub payment_method: Option<PaymentMethod>,
    #[param(inline)]
    pub sort: Option<AdminOrderSort>,
}

impl AdminOrderQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

/// Trimmed, non-empty filter value.
pub fn filter_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let page = Pagination::default().normalize(12, 50);
        assert_eq!(page, Page { page: 1, per_page: 12, offset: 0 });
    }

    #[test]
    fn per_page_is_clamped() {
        assert_eq!(Pagination::new(None, Some(500)).normalize(12, 50).per_page, 50);
        assert_eq!(Pagination::new(None, Some(0)).normalize(12, 50).per_page, 1);
        assert_eq!(Pagination::new(None, Some(-3)).normalize(8, 20).per_page, 1);
        assert_eq!(Pagination::new(None, Some(30)).normalize(8, 20).per_page, 20);
    }

    #[test]
    fn offset_follows_page() {
        let page = Pagination::new(Some(3), Some(10)).normalize(10, 50);
        assert_eq!(page.offset, 20);
        assert_eq!(Pagination::new(Some(-1), None).normalize(10, 50).page, 1);
    }

    #[test]
    fn huge_page_is_capped() {
        let page = Pagination::new(Some(i64::MAX), Some(50)).normalize(12, 50);
        assert_eq!(page.page, MAX_PAGE);
        assert_eq!(page.offset, (MAX_PAGE - 1) * 50);
        assert!(page.offset >= 0);
    }

    #[test]
    fn query_string_parses() {
        let uri: axum::http::Uri = "/api/artworks?page=2&per_page=5&sort=highest_price&price_min=600"
            .parse()
            .unwrap();
        let axum::extract::Query(query) =
            axum::extract::Query::<ArtworkQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.page, Some(2));
        assert!(matches!(query.sort, Some(ArtworkSort::HighestPrice)));
        assert_eq!(query.price_min, Some(600));
    }

    #[test]
    fn blank_filters_are_ignored() {
        assert_eq!(filter_value(&Some("  ".into())), None);
        assert_eq!(filter_value(&Some(" oil ".into())), Some("oil"));
        assert_eq!(filter_value(&None), None);
    }
}
