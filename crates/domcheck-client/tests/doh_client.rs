//! HTTP-level tests against a mocked DNS-over-HTTPS resolver.

use domcheck_client::{DohClient, DomcheckError, RecordChecker, CHECK_FAILED};
use domcheck_core::{CheckOutcome, DomainSet, Presence, RecordFlags, RecordType};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DohClient {
    DohClient::builder()
        .base_url(format!("{}/resolve", server.uri()))
        .build()
        .expect("client builds")
}

fn answers(name: &str, rtype: u16, data: &[&str]) -> serde_json::Value {
    json!({
        "Status": 0,
        "TC": false,
        "RD": true,
        "RA": true,
        "AD": false,
        "CD": false,
        "Question": [{ "name": format!("{name}."), "type": rtype }],
        "Answer": data
            .iter()
            .map(|d| json!({ "name": format!("{name}."), "type": rtype, "TTL": 300, "data": d }))
            .collect::<Vec<_>>()
    })
}

fn no_answers(name: &str, rtype: u16) -> serde_json::Value {
    json!({
        "Status": 3,
        "Question": [{ "name": format!("{name}."), "type": rtype }],
        "Comment": "Response from 192.0.2.1."
    })
}

async fn mount(server: &MockServer, name: &str, rtype: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", name))
        .and(query_param("type", rtype))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn txt_lookup_sends_json_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "example.com"))
        .and(query_param("type", "TXT"))
        .and(header("accept", "application/dns-json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answers("example.com", 16, &["\"v=spf1 -all\""])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .records()
        .txt("example.com")
        .await
        .expect("lookup succeeds");

    assert!(response.has_answers());
    assert_eq!(response.answer[0].ttl, 300);
    assert!(response.any_data_contains("v=spf1"));
}

#[tokio::test]
async fn query_builder_flags_become_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "example.com"))
        .and(query_param("type", "PTR"))
        .and(query_param("do", "1"))
        .and(query_param("cd", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_answers("example.com", 12)))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .records()
        .query("example.com")
        .record_type(RecordType::Ptr)
        .dnssec(true)
        .checking_disabled(true)
        .send()
        .await
        .expect("lookup succeeds");

    assert_eq!(response.status, 3);
    assert!(!response.has_answers());
}

#[tokio::test]
async fn server_errors_map_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid name" })))
        .mount(&server)
        .await;

    let err = client_for(&server).records().txt("example.com").await.unwrap_err();
    match err {
        DomcheckError::Api { code, message } => {
            assert_eq!(code, 400);
            assert_eq!(message, "Invalid name");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limits_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = client_for(&server).records().ptr("example.com").await.unwrap_err();
    assert!(matches!(err, DomcheckError::RateLimited { retry_after: Some(7) }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).records().txt("example.com").await.unwrap_err();
    assert!(matches!(err, DomcheckError::Json(_)));
}

#[tokio::test]
async fn check_derives_all_flags() {
    let server = MockServer::start().await;
    mount(
        &server,
        "_dmarc.example.com",
        "TXT",
        ResponseTemplate::new(200)
            .set_body_json(answers("_dmarc.example.com", 16, &["\"v=DMARC1; p=reject\""])),
    )
    .await;
    mount(
        &server,
        "example.com",
        "TXT",
        ResponseTemplate::new(200).set_body_json(answers(
            "example.com",
            16,
            &["\"google-site-verification=abc\"", "\"v=spf1 include:_spf.example.com ~all\""],
        )),
    )
    .await;
    mount(
        &server,
        "example.com",
        "PTR",
        ResponseTemplate::new(200).set_body_json(no_answers("example.com", 12)),
    )
    .await;

    let outcome = RecordChecker::new(client_for(&server)).check("example.com").await;
    assert_eq!(
        outcome,
        CheckOutcome::Flags(RecordFlags {
            dmarc: true,
            spf: true,
            rdns: false,
        })
    );
}

#[tokio::test]
async fn txt_answers_without_marker_leave_spf_false() {
    let server = MockServer::start().await;
    mount(
        &server,
        "_dmarc.example.org",
        "TXT",
        ResponseTemplate::new(200).set_body_json(no_answers("_dmarc.example.org", 16)),
    )
    .await;
    mount(
        &server,
        "example.org",
        "TXT",
        ResponseTemplate::new(200).set_body_json(answers("example.org", 16, &["\"hello world\""])),
    )
    .await;
    mount(
        &server,
        "example.org",
        "PTR",
        ResponseTemplate::new(200).set_body_json(answers("example.org", 12, &["host.example.org."])),
    )
    .await;

    let flags = RecordChecker::new(client_for(&server))
        .try_check("example.org")
        .await
        .expect("check succeeds");
    assert!(!flags.dmarc);
    assert!(!flags.spf);
    assert!(flags.rdns);
}

#[tokio::test]
async fn one_failed_lookup_marks_only_that_domain() {
    let server = MockServer::start().await;

    // good.com answers everything
    for (name, rtype, code) in [
        ("_dmarc.good.com", "TXT", 16),
        ("good.com", "TXT", 16),
        ("good.com", "PTR", 12),
    ] {
        mount(
            &server,
            name,
            rtype,
            ResponseTemplate::new(200).set_body_json(answers(name, code, &["\"v=spf1 -all\""])),
        )
        .await;
    }

    // bad.com fails on the PTR lookup only
    mount(
        &server,
        "_dmarc.bad.com",
        "TXT",
        ResponseTemplate::new(200).set_body_json(answers("_dmarc.bad.com", 16, &["\"v=DMARC1\""])),
    )
    .await;
    mount(
        &server,
        "bad.com",
        "TXT",
        ResponseTemplate::new(200).set_body_json(answers("bad.com", 16, &["\"v=spf1 -all\""])),
    )
    .await;
    mount(&server, "bad.com", "PTR", ResponseTemplate::new(503)).await;

    let checker = RecordChecker::new(client_for(&server));
    let mut set = DomainSet::from_text("Contact good.com or BAD.com");
    for domain in ["bad.com", "good.com"] {
        assert!(set.begin_check(domain));
    }

    let (bad, good) = tokio::join!(checker.check("bad.com"), checker.check("good.com"));
    assert!(set.apply("bad.com", &bad));
    assert!(set.apply("good.com", &good));

    let bad = set.get("bad.com").expect("record exists");
    assert!(bad.error.as_deref().is_some_and(|e| e.starts_with(CHECK_FAILED)));
    assert_eq!(bad.dmarc, Presence::Unknown);
    assert_eq!(bad.spf, Presence::Unknown);
    assert_eq!(bad.rdns, Presence::Unknown);

    let good = set.get("good.com").expect("record exists");
    assert!(good.error.is_none());
    assert_eq!(good.dmarc, Presence::Present);
    assert_eq!(good.spf, Presence::Present);
    assert_eq!(good.rdns, Presence::Present);
    assert!(set.pending().is_empty());
}

#[tokio::test]
async fn null_answer_sections_are_absent_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "Status": 3, "Answer": null })),
        )
        .mount(&server)
        .await;

    let outcome = RecordChecker::new(client_for(&server)).check("example.com").await;
    assert_eq!(
        outcome,
        CheckOutcome::Flags(RecordFlags {
            dmarc: false,
            spf: false,
            rdns: false
        })
    );
}

/// Mount healthy answers for every lookup of `domain` except `failing`.
async fn mount_all_but(server: &MockServer, domain: &str, failing: (&str, &str)) {
    let policy = format!("_dmarc.{domain}");
    for (name, rtype, code) in [
        (policy.as_str(), "TXT", 16),
        (domain, "TXT", 16),
        (domain, "PTR", 12),
    ] {
        let response = if (name, rtype) == failing {
            ResponseTemplate::new(503)
        } else {
            ResponseTemplate::new(200).set_body_json(answers(name, code, &["\"v=spf1 -all\""]))
        };
        mount(server, name, rtype, response).await;
    }
}

async fn assert_failed_check_clears_flags(failing: (&str, &str)) {
    let server = MockServer::start().await;
    mount_all_but(&server, "example.net", failing).await;

    let mut set = DomainSet::from_text("example.net");
    set.begin_check("example.net");
    let outcome = RecordChecker::new(client_for(&server)).check("example.net").await;
    assert!(outcome.is_failed(), "{failing:?} should fail the check");
    set.apply("example.net", &outcome);

    let record = set.get("example.net").expect("record exists");
    assert!(record.error.as_deref().is_some_and(|e| e.starts_with(CHECK_FAILED)));
    assert_eq!(record.dmarc, Presence::Unknown);
    assert_eq!(record.spf, Presence::Unknown);
    assert_eq!(record.rdns, Presence::Unknown);
    assert!(!record.checking);
}

#[tokio::test]
async fn failed_dmarc_lookup_fails_the_check() {
    assert_failed_check_clears_flags(("_dmarc.example.net", "TXT")).await;
}

#[tokio::test]
async fn failed_spf_lookup_fails_the_check() {
    assert_failed_check_clears_flags(("example.net", "TXT")).await;
}

#[tokio::test]
async fn failed_ptr_lookup_fails_the_check() {
    assert_failed_check_clears_flags(("example.net", "PTR")).await;
}
