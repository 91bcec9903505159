//! The fixed catalogue of retailers whose advent calendar can be republished.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A known retailer. Selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Galaxus,
    Digitec,
}

/// Connection details for one retailer's storefront and GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreProfile {
    /// Display name used in feed titles and author fields (e.g. `"Galaxus"`).
    pub name: String,
    /// GraphQL endpoint the calendar query is POSTed to.
    pub api_url: String,
    /// Storefront origin without a trailing slash.
    pub base_url: String,
    /// Value of the `x-dg-portal` routing header.
    pub portal_id: String,
}

impl Store {
    pub const ALL: [Store; 2] = [Store::Galaxus, Store::Digitec];

    /// Returns the lowercase key used on the command line and in env vars.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Store::Galaxus => "galaxus",
            Store::Digitec => "digitec",
        }
    }

    /// Builds the [`StoreProfile`] for this retailer.
    #[must_use]
    pub fn profile(self) -> StoreProfile {
        let (name, host, portal_id) = match self {
            Store::Galaxus => ("Galaxus", "www.galaxus.ch", "22"),
            Store::Digitec => ("Digitec", "www.digitec.ch", "25"),
        };
        StoreProfile {
            name: name.to_owned(),
            api_url: format!("https://{host}/api/graphql/get-adventcalendar"),
            base_url: format!("https://{host}"),
            portal_id: portal_id.to_owned(),
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Store {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Store::ALL
            .into_iter()
            .find(|store| store.key() == key)
            .ok_or_else(|| ConfigError::UnknownStore(s.to_owned()))
    }
}

impl StoreProfile {
    /// Returns a copy of this profile with the GraphQL endpoint replaced.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}
