//! Maps a [`CalendarSnapshot`] onto a [`FeedDocument`].
//!
//! Pure and infallible: fields that do not parse degrade to defaults instead
//! of failing the feed. The caller's snapshot is never modified.

use std::cmp::Reverse;

use advent_core::StoreProfile;
use advent_upstream::{CalendarSnapshot, ProductOffer};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use quick_xml::escape::escape;

use crate::atom::{FeedAuthor, FeedDocument, FeedEntry};

/// `updated` value for offers whose `validFrom` does not parse.
pub(crate) const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// Builds the feed for `calendar`, stamped with the current time.
#[must_use]
pub fn build_feed(calendar: &CalendarSnapshot, profile: &StoreProfile) -> FeedDocument {
    build_feed_at(calendar, profile, Utc::now())
}

/// Builds the feed for `calendar` with `now` as the document's `updated`
/// timestamp.
///
/// Entries are ordered newest offer first by `validFrom`; offers whose date
/// does not parse sort last.
#[must_use]
pub fn build_feed_at(
    calendar: &CalendarSnapshot,
    profile: &StoreProfile,
    now: DateTime<Utc>,
) -> FeedDocument {
    let mut products: Vec<&ProductOffer> = calendar.products.iter().collect();
    products.sort_by_cached_key(|p| {
        Reverse(parse_valid_from(&p.offer.sales_information.valid_from))
    });

    let entries = products
        .into_iter()
        .map(|p| build_entry(p, profile))
        .collect();

    let header = &calendar.header;
    FeedDocument {
        title: format!("{} - {}", header.title, profile.name),
        subtitle: header.description.clone(),
        link: format!("{}/advent-calendar", profile.base_url),
        icon: normalize_icon_url(&header.image_url),
        updated: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        id: format!("urn:advent-calendar:{}", profile.name),
        author: FeedAuthor {
            name: profile.name.clone(),
            uri: profile.base_url.clone(),
        },
        entries,
    }
}

/// Whole-percent reduction from `original` to `current`, rounded down.
///
/// Returns `0` when there is no original price, when it is not positive, or
/// when the current price is not below it.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn discount_percent(current: f64, original: Option<f64>) -> u32 {
    let Some(original) = original else {
        return 0;
    };
    if original <= 0.0 || current >= original {
        return 0;
    }
    ((original - current) / original * 100.0).floor() as u32
}

/// Rewrites a protocol-relative URL (`//host/path`) to `https://host/path`.
/// Anything else is returned unchanged.
#[must_use]
pub fn normalize_icon_url(url: &str) -> String {
    if url.len() > 2 && url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_owned()
    }
}

fn build_entry(p: &ProductOffer, profile: &StoreProfile) -> FeedEntry {
    let product = &p.product;
    let offer = &p.offer;
    let sales = &offer.sales_information;

    let link = format!("{}/product/{}", profile.base_url, product.product_id);
    let original = offer
        .instead_of_price
        .as_ref()
        .map(|instead| instead.price.amount_inclusive);
    let discount = discount_percent(offer.price.amount_inclusive, original);

    let mut title = format!("{}: {}", product.brand_name, product.name);
    if !product.name_properties.is_empty() {
        title.push_str(" - ");
        title.push_str(&product.name_properties);
    }
    if discount > 0 {
        title = format!("[{discount}% off] {title}");
    }

    let updated = match parse_valid_from(&sales.valid_from) {
        Some(valid_from) => valid_from.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => {
            tracing::debug!(
                product_id = product.product_id,
                valid_from = %sales.valid_from,
                "unparseable validFrom, using zero timestamp"
            );
            ZERO_TIMESTAMP.to_owned()
        }
    };

    let current = offer.price.amount_inclusive;
    let price_line = format_price(current, original, &escape(&offer.price.currency));
    let stock_line = format!(
        "{}/{} remaining",
        sales.number_of_items - sales.number_of_items_sold,
        sales.number_of_items
    );
    let rating_line = if product.total_ratings > 0 {
        format!(
            "{:.1}/5 ({} reviews)",
            product.average_rating, product.total_ratings
        )
    } else {
        String::new()
    };

    let mut content = String::new();
    if let Some(image) = product.images.first() {
        content.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" style=\"max-width:400px;\"/><br/><br/>",
            escape(&image.url),
            escape(&product.name)
        ));
    }
    content.push_str(&format!(
        "<p><strong>Brand:</strong> {}</p>\n\
         <p><strong>Type:</strong> {}</p>\n\
         <p><strong>Price:</strong> {price_line}</p>\n\
         <p><strong>Stock:</strong> {stock_line}</p>",
        escape(&product.brand_name),
        escape(&product.product_type_name),
    ));
    if !rating_line.is_empty() {
        content.push_str(&format!("\n<p><strong>Rating:</strong> {rating_line}</p>"));
    }
    content.push_str(&format!(
        "<p><a href=\"{}\">View on {}</a></p>",
        escape(&link),
        escape(&profile.name)
    ));

    FeedEntry {
        summary: format!(
            "{} - {} - {}",
            product.brand_name,
            product.product_type_name,
            format_price(current, original, &offer.price.currency)
        ),
        title,
        id: format!("urn:advent:{}", product.product_id),
        link,
        updated,
        content,
    }
}

/// `8.00 CHF`, or `<strong>8.00 CHF</strong> <s>10.00 CHF</s>` when there is
/// an original price. `currency` is inserted as given.
fn format_price(current: f64, original: Option<f64>, currency: &str) -> String {
    match original {
        Some(original) => {
            format!("<strong>{current:.2} {currency}</strong> <s>{original:.2} {currency}</s>")
        }
        None => format!("{current:.2} {currency}"),
    }
}

/// Parses an RFC 3339 `validFrom`, keeping its offset. `None` when it does
/// not parse.
fn parse_valid_from(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
