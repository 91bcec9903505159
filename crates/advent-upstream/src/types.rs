//! Response types for the `GET_ADVENTCALENDAR` GraphQL operation.
//!
//! ## Observed shape
//!
//! The endpoint answers a batched request with a JSON array holding one
//! envelope per operation: `[{"data": {"adventCalendar": {...}}}]`.
//!
//! ### Nullable fields
//! `nameProperties` and `insteadOfPrice` are `null` for many products, and
//! `images` can be an empty array. Every scalar here is decoded leniently:
//! `null` or a missing key becomes the type's default (empty string, `0`,
//! empty list) so that one odd product never fails the whole calendar.
//!
//! ### `validFrom`
//! An RFC 3339 string with an offset, e.g. `"2024-12-05T00:00:00+01:00"`.
//! Kept as the raw string; the feed builder owns the parsing and the
//! fallback for values that do not parse.
//!
//! ### `insteadOfPrice`
//! Present only when the offer is a reduction. Only `price.amountInclusive`
//! is used; the currency of the current price applies to both.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One element of the batched response array.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope {
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponseData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub advent_calendar: CalendarSnapshot,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// The calendar as published for the current day.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: CalendarHeader,
    /// Products in upstream order (not sorted).
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<ProductOffer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarHeader {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Often protocol-relative (`//static.example.com/...`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductOffer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub product: Product,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offer: Offer,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque GraphQL node id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Numeric catalogue id; the stable key for feed entries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_properties: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_type_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_ratings: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sales_information: SalesInformation,
    #[serde(default)]
    pub instead_of_price: Option<InsteadOfPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_inclusive: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInformation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_items: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_items_sold: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid_from: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsteadOfPrice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
}
