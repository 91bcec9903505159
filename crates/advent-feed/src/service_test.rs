use std::sync::atomic::{AtomicUsize, Ordering};

use advent_core::Store;
use advent_upstream::{CalendarHeader, ProductOffer};

use super::*;

const TTL: Duration = Duration::from_secs(300);

/// Counts fetches and answers each with the configured outcome.
struct FakeSource {
    calls: AtomicUsize,
    fail: bool,
    delay: Duration,
}

impl FakeSource {
    fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
            delay: Duration::ZERO,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::ok()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CalendarSource for FakeSource {
    async fn fetch_calendar(&self) -> Result<CalendarSnapshot, UpstreamError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(UpstreamError::UnexpectedStatus {
                status: 502,
                body: "bad gateway".to_owned(),
            });
        }
        let mut product = ProductOffer::default();
        product.product.product_id = 42;
        product.product.name = format!("Widget {call}");
        Ok(CalendarSnapshot {
            current_date: "2024-12-05".to_owned(),
            header: CalendarHeader {
                title: "Adventskalender".to_owned(),
                ..CalendarHeader::default()
            },
            products: vec![product],
        })
    }
}

fn service(source: FakeSource, ttl: Duration) -> FeedService<FakeSource> {
    FeedService::new(source, Store::Galaxus.profile(), ttl)
}

#[tokio::test]
async fn first_call_fetches_and_builds() {
    let svc = service(FakeSource::ok(), TTL);

    let feed = svc.get_feed().await.expect("feed");
    assert_eq!(svc.source.calls(), 1);
    assert_eq!(feed.title, "Adventskalender - Galaxus");
    assert_eq!(feed.entries.len(), 1);
    assert_eq!(feed.entries[0].id, "urn:advent:42");
}

#[tokio::test]
async fn second_call_within_ttl_is_served_from_cache() {
    let svc = service(FakeSource::ok(), TTL);

    let first = svc.get_feed().await.expect("first");
    let second = svc.get_feed().await.expect("second");

    assert_eq!(svc.source.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn zero_ttl_fetches_every_time() {
    let svc = service(FakeSource::ok(), Duration::ZERO);

    let first = svc.get_feed().await.expect("first");
    let second = svc.get_feed().await.expect("second");

    assert_eq!(svc.source.calls(), 2);
    assert_eq!(first.entries[0].title, ": Widget 1");
    assert_ne!(first.entries[0].title, second.entries[0].title);
}

#[tokio::test]
async fn upstream_error_propagates_and_leaves_cache_empty() {
    let svc = service(FakeSource::failing(), TTL);

    let err = svc.get_feed().await.unwrap_err();
    assert!(
        matches!(err, UpstreamError::UnexpectedStatus { status: 502, .. }),
        "expected UnexpectedStatus(502), got: {err:?}"
    );
    assert!(svc.cache.get().await.is_none());

    // The next call tries upstream again.
    let _ = svc.get_feed().await.unwrap_err();
    assert_eq!(svc.source.calls(), 2);
}

#[tokio::test]
async fn concurrent_misses_each_fetch() {
    let svc = service(FakeSource::slow(Duration::from_millis(50)), TTL);

    let results = futures::future::join_all((0..3).map(|_| svc.get_feed())).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(svc.source.calls(), 3);
    // Once the misses settle, later calls hit the cache.
    svc.get_feed().await.expect("cached");
    assert_eq!(svc.source.calls(), 3);
}

#[test]
fn profile_is_exposed() {
    let svc = service(FakeSource::ok(), TTL);
    assert_eq!(svc.profile().name, "Galaxus");
}
