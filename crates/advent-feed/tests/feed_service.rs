//! End-to-end tests for `FeedService` over a real `UpstreamClient`.
//!
//! `wiremock` stands in for the GraphQL endpoint; `feed-rs` checks that the
//! rendered document is valid Atom.

use std::time::Duration;

use advent_core::Store;
use advent_feed::FeedService;
use advent_upstream::{UpstreamClient, UpstreamError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/api/graphql/get-adventcalendar";

fn product(product_id: i64, valid_from: &str) -> serde_json::Value {
    json!({
        "product": {
            "productId": product_id,
            "name": format!("Widget {product_id}"),
            "nameProperties": null,
            "productTypeName": "Gadget",
            "brandName": "Acme",
            "averageRating": 4.0,
            "totalRatings": 3,
            "images": []
        },
        "offer": {
            "price": {"amountInclusive": 8.0, "currency": "CHF"},
            "salesInformation": {
                "numberOfItems": 50,
                "numberOfItemsSold": 20,
                "validFrom": valid_from
            },
            "insteadOfPrice": {"price": {"amountInclusive": 10.0}}
        }
    })
}

fn calendar_json() -> serde_json::Value {
    json!([{
        "data": {
            "adventCalendar": {
                "currentDate": "2024-12-05",
                "header": {
                    "title": "Adventskalender",
                    "description": "Jeden Tag ein neues Angebot",
                    "imageUrl": "//static.galaxus.ch/advent.png"
                },
                "products": [
                    product(1, "2024-12-04T00:00:00+01:00"),
                    product(2, "2024-12-05T00:00:00+01:00")
                ]
            }
        }
    }])
}

fn service_for(server: &MockServer, ttl: Duration) -> FeedService<UpstreamClient> {
    let profile = Store::Galaxus
        .profile()
        .with_api_url(format!("{}{API_PATH}", server.uri()));
    let client = UpstreamClient::new(profile.clone(), "advent-test/0.1").expect("client");
    FeedService::new(client, profile, ttl)
}

#[tokio::test]
async fn get_feed_fetches_once_within_ttl() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(calendar_json()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, Duration::from_secs(300));
    let first = service.get_feed().await.expect("first fetch");
    let second = service.get_feed().await.expect("cached");

    assert_eq!(first, second);
    assert_eq!(first.title, "Adventskalender - Galaxus");
    assert_eq!(first.icon, "https://static.galaxus.ch/advent.png");
}

#[tokio::test]
async fn get_feed_renders_sorted_atom() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(calendar_json()))
        .mount(&server)
        .await;

    let feed = service_for(&server, Duration::from_secs(300))
        .get_feed()
        .await
        .expect("feed");
    let xml = feed.to_xml().expect("render");

    let parsed = feed_rs::parser::parse(xml.as_bytes()).expect("valid atom");
    let ids: Vec<&str> = parsed.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["urn:advent:2", "urn:advent:1"]);
    assert_eq!(
        parsed.entries[0].title.as_ref().map(|t| t.content.as_str()),
        Some("[20% off] Acme: Widget 2")
    );
}

#[tokio::test]
async fn get_feed_surfaces_upstream_failure_then_recovers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(calendar_json()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, Duration::from_secs(300));

    let err = service.get_feed().await.unwrap_err();
    assert!(
        matches!(err, UpstreamError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );

    let feed = service.get_feed().await.expect("second attempt succeeds");
    assert_eq!(feed.entries.len(), 2);
}
