//! Integration tests for the CrmClient using mockito for HTTP mocking.

use chrono::NaiveDate;
use contact_verifier::{
    CrmApiError, CrmClient, StaleContactQuery, VerificationStatus, VerificationUpdate,
};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> CrmClient {
    CrmClient::with_base_url(server.url(), "test-token".to_string())
}

fn update(contact_id: &str) -> VerificationUpdate {
    VerificationUpdate {
        contact_id: contact_id.to_string(),
        status: VerificationStatus::Confirmed,
        notes: "Confirmed via public profile: Jane Doe".to_string(),
        verified_on: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        source_url: Some("https://www.linkedin.com/in/janedoe".to_string()),
    }
}

#[test]
fn test_check_connection() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/services/data/v59.0/")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create();

    let client = client_for(&server);
    assert!(client.check_connection().is_ok());
    mock.assert();
}

#[test]
fn test_check_connection_unauthorized() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/services/data/v59.0/")
        .with_status(401)
        .with_body(r#"[{"errorCode":"INVALID_SESSION_ID"}]"#)
        .create();

    let client = client_for(&server);
    let result = client.check_connection();

    mock.assert();
    assert!(matches!(result, Err(CrmApiError::Unauthorized)));
    assert_eq!(client.metrics().summary().crm_errors_total, 1);
}

#[test]
fn test_query_stale_contacts() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/services/data/v59.0/query")
        .match_query(Matcher::Regex("LAST_N_MONTHS".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "totalSize": 2,
                "done": true,
                "records": [
                    {
                        "Id": "003A",
                        "Name": "Jane Doe",
                        "Title": "VP Sales",
                        "Email": "jane@acme.com",
                        "Account": {"Name": "Acme Corp"},
                        "Last_Verified__c": null,
                        "LastModifiedDate": "2026-09-01T10:00:00.000+0000"
                    },
                    {
                        "Id": "003B",
                        "Name": " John Roe ",
                        "Account": null
                    }
                ]
            })
            .to_string(),
        )
        .create();

    let client = client_for(&server);
    let contacts = client
        .query_stale_contacts(&StaleContactQuery {
            limit: 25,
            months: 6,
        })
        .unwrap();

    mock.assert();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].id, "003A");
    assert_eq!(contacts[0].company_name(), Some("Acme Corp"));
    assert_eq!(contacts[0].job_title(), Some("VP Sales"));
    assert_eq!(contacts[1].name, "John Roe");
    assert_eq!(contacts[1].company_name(), None);
    assert_eq!(client.metrics().summary().contacts_fetched_total, 2);
}

#[test]
fn test_query_follows_next_records_url() {
    let mut server = Server::new();

    let first = server
        .mock("GET", "/services/data/v59.0/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "totalSize": 3,
                "done": false,
                "nextRecordsUrl": "/services/data/v59.0/query/01gD0000002HU6KIAW-2000",
                "records": [
                    {"Id": "003A", "Name": "Jane Doe"},
                    {"Id": "003B", "Name": "John Roe"}
                ]
            })
            .to_string(),
        )
        .create();

    let second = server
        .mock("GET", "/services/data/v59.0/query/01gD0000002HU6KIAW-2000")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "totalSize": 3,
                "done": true,
                "records": [{"Id": "003C", "Name": "Ann Lee"}]
            })
            .to_string(),
        )
        .create();

    let client = client_for(&server);
    let contacts = client
        .query_stale_contacts(&StaleContactQuery {
            limit: 25,
            months: 6,
        })
        .unwrap();

    first.assert();
    second.assert();
    let ids: Vec<_> = contacts.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["003A", "003B", "003C"]);
}

#[test]
fn test_query_stops_paging_at_limit() {
    let mut server = Server::new();

    let first = server
        .mock("GET", "/services/data/v59.0/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "totalSize": 4,
                "done": false,
                "nextRecordsUrl": "/services/data/v59.0/query/next-page",
                "records": [
                    {"Id": "003A", "Name": "Jane Doe"},
                    {"Id": "003B", "Name": "John Roe"}
                ]
            })
            .to_string(),
        )
        .create();

    let second = server
        .mock("GET", "/services/data/v59.0/query/next-page")
        .expect(0)
        .create();

    let client = client_for(&server);
    let contacts = client
        .query_stale_contacts(&StaleContactQuery {
            limit: 1,
            months: 6,
        })
        .unwrap();

    first.assert();
    second.assert();
    assert_eq!(contacts.len(), 1);
}

#[test]
fn test_query_malformed_body() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/services/data/v59.0/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create();

    let client = client_for(&server);
    let result = client.query_stale_contacts(&StaleContactQuery {
        limit: 25,
        months: 6,
    });

    assert!(matches!(result, Err(CrmApiError::JsonError(_))));
}

#[test]
fn test_query_rejected() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/services/data/v59.0/query")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"[{"errorCode":"MALFORMED_QUERY"}]"#)
        .create();

    let client = client_for(&server);
    let result = client.query_stale_contacts(&StaleContactQuery {
        limit: 25,
        months: 6,
    });

    match result {
        Err(CrmApiError::InvalidRequest(message)) => assert!(message.contains("MALFORMED_QUERY")),
        other => panic!("Expected InvalidRequest, got: {:?}", other),
    }
}

#[test]
fn test_update_verification() {
    let mut server = Server::new();

    let mock = server
        .mock("PATCH", "/services/data/v59.0/sobjects/Contact/003A")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({
            "Verification_Status__c": "Confirmed",
            "Last_Verified__c": "2026-10-01",
            "Verification_Source__c": "https://www.linkedin.com/in/janedoe"
        })))
        .with_status(204)
        .create();

    let client = client_for(&server);
    assert!(client.update_verification(&update("003A")).is_ok());
    mock.assert();
}

#[test]
fn test_update_error_status_written_as_unknown() {
    let mut server = Server::new();

    let mock = server
        .mock("PATCH", "/services/data/v59.0/sobjects/Contact/003E")
        .match_body(Matcher::PartialJson(json!({
            "Verification_Status__c": "Unknown"
        })))
        .with_status(204)
        .create();

    let mut failed = update("003E");
    failed.status = VerificationStatus::Error;
    failed.source_url = None;

    let client = client_for(&server);
    assert!(client.update_verification(&failed).is_ok());
    mock.assert();
}

#[test]
fn test_update_not_found() {
    let mut server = Server::new();

    let _mock = server
        .mock("PATCH", "/services/data/v59.0/sobjects/Contact/003Z")
        .with_status(404)
        .with_body(r#"[{"errorCode":"NOT_FOUND"}]"#)
        .create();

    let client = client_for(&server);
    let result = client.update_verification(&update("003Z"));

    assert!(matches!(result, Err(CrmApiError::NotFound(_))));
}

#[test]
fn test_update_rate_limited() {
    let mut server = Server::new();

    let _mock = server
        .mock("PATCH", "/services/data/v59.0/sobjects/Contact/003A")
        .with_status(429)
        .create();

    let client = client_for(&server);
    let result = client.update_verification(&update("003A"));

    assert!(matches!(result, Err(CrmApiError::RateLimitExceeded)));
}

#[test]
fn test_update_server_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("PATCH", "/services/data/v59.0/sobjects/Contact/003A")
        .with_status(503)
        .with_body("maintenance")
        .create();

    let client = client_for(&server);
    match client.update_verification(&update("003A")) {
        Err(CrmApiError::ApiError { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}
