use std::time::Duration;

use advent_core::{parse_duration, AppConfig, Store};
use clap::Parser;

/// Serves a retailer's advent calendar as an Atom feed.
///
/// Flags override the matching `ADVENT_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "advent-server", version, about)]
pub struct Cli {
    /// Store to fetch from: galaxus or digitec.
    #[arg(long)]
    pub store: Option<Store>,

    /// Port to listen on; the bind host stays as configured.
    #[arg(long)]
    pub port: Option<u16>,

    /// How long a built feed is served before refetching (e.g. 5m, 1h, 90).
    #[arg(long, value_parser = parse_duration)]
    pub cache: Option<Duration>,

    /// User-Agent header sent upstream.
    #[arg(long)]
    pub ua: Option<String>,
}

impl Cli {
    /// Layers the flags given on the command line over `config`.
    pub fn apply(self, mut config: AppConfig) -> anyhow::Result<AppConfig> {
        if let Some(store) = self.store {
            config = config.with_store(store);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(ttl) = self.cache {
            config.cache_ttl = ttl;
        }
        if let Some(ua) = self.ua {
            if ua.trim().is_empty() {
                anyhow::bail!("--ua must not be blank");
            }
            config.user_agent = ua;
        }
        Ok(config)
    }
}
