use super::*;

#[test]
fn parse_calendar_response_takes_first_envelope() {
    let body = br#"[
        {"data": {"adventCalendar": {"currentDate": "2024-12-05", "header": {"title": "First"}, "products": []}}},
        {"data": {"adventCalendar": {"currentDate": "2024-12-06", "header": {"title": "Second"}, "products": []}}}
    ]"#;
    let calendar = parse_calendar_response(body, "Galaxus").unwrap();
    assert_eq!(calendar.current_date, "2024-12-05");
    assert_eq!(calendar.header.title, "First");
}

#[test]
fn parse_calendar_response_rejects_empty_array() {
    let err = parse_calendar_response(b"[]", "Galaxus").unwrap_err();
    assert!(
        matches!(err, UpstreamError::EmptyResponse),
        "expected EmptyResponse, got: {err:?}"
    );
}

#[test]
fn parse_calendar_response_rejects_object_body() {
    let body = br#"{"data": {"adventCalendar": {}}}"#;
    let err = parse_calendar_response(body, "Digitec").unwrap_err();
    match err {
        UpstreamError::Deserialize { context, .. } => assert!(context.contains("Digitec")),
        other => panic!("expected Deserialize, got: {other:?}"),
    }
}

#[test]
fn parse_calendar_response_surfaces_graphql_errors() {
    let body = br#"[{"data": null, "errors": [{"message": "forbidden"}, {"message": "try later"}]}]"#;
    let err = parse_calendar_response(body, "Galaxus").unwrap_err();
    match err {
        UpstreamError::GraphQl { messages } => assert_eq!(messages, "forbidden; try later"),
        other => panic!("expected GraphQl, got: {other:?}"),
    }
}

#[test]
fn parse_calendar_response_missing_calendar_is_empty() {
    let body = br#"[{"data": {"adventCalendar": null}}]"#;
    let calendar = parse_calendar_response(body, "Galaxus").unwrap();
    assert!(calendar.products.is_empty());
    assert!(calendar.header.title.is_empty());
}

#[test]
fn truncate_body_keeps_short_bodies() {
    assert_eq!(truncate_body("upstream down"), "upstream down");
}

#[test]
fn truncate_body_cuts_long_bodies() {
    let long = "x".repeat(MAX_ERROR_BODY_CHARS + 100);
    let cut = truncate_body(&long);
    assert_eq!(cut.len(), MAX_ERROR_BODY_CHARS + 3);
    assert!(cut.ends_with("..."));
}
