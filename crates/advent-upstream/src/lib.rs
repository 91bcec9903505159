pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use types::{
    CalendarHeader, CalendarSnapshot, InsteadOfPrice, Offer, Price, Product, ProductImage,
    ProductOffer, SalesInformation,
};
