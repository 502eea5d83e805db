use saldo_banking::{BankingError, GoCardlessClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_with_keys(server: &MockServer) -> GoCardlessClient {
    let client = GoCardlessClient::with_base_url(server.uri());
    client.set_credentials("secret-id", "secret-key").await;
    client
}

fn token_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access": "tok-1",
        "access_expires": 86400,
    }))
}

#[tokio::test]
async fn missing_credentials_fail_before_any_request() {
    let server = MockServer::start().await;
    let client = GoCardlessClient::with_base_url(server.uri());

    let err = client
        .list_institutions("IT")
        .await
        .expect_err("must fail without keys");
    assert!(matches!(err, BankingError::CredentialsMissing));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn token_is_fetched_once_within_expiry_window() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .and(body_json(json!({
            "secret_id": "secret-id",
            "secret_key": "secret-key",
        })))
        .respond_with(token_response())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/institutions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_with_keys(&server).await;
    client.list_institutions("IT").await.expect("first call");
    client.list_institutions("IT").await.expect("second call");
}

#[tokio::test]
async fn credential_change_invalidates_cached_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .respond_with(token_response())
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/institutions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_with_keys(&server).await;
    client.list_institutions("IT").await.expect("first call");

    client.set_credentials("other-id", "other-key").await;
    client.list_institutions("IT").await.expect("re-authenticates");
}

#[tokio::test]
async fn rejected_key_pair_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_with_keys(&server).await;
    let err = client
        .list_institutions("IT")
        .await
        .expect_err("bad keys must fail");
    assert!(matches!(err, BankingError::Auth { .. }));
}

#[tokio::test]
async fn institutions_parse_with_history_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .respond_with(token_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/institutions/"))
        .and(query_param("country", "IT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "INTESA_SANPAOLO_BCITITMM",
                "name": "Intesa Sanpaolo",
                "logo": "https://cdn.example.com/intesa.png",
                "countries": ["IT"],
                "transaction_total_days": "730"
            },
            {
                "id": "REVOLUT_REVOGB21",
                "name": "Revolut",
                "logo": "",
                "countries": ["IT", "GB"]
            }
        ])))
        .mount(&server)
        .await;

    let client = client_with_keys(&server).await;
    let institutions = client.list_institutions("IT").await.expect("list parses");

    assert_eq!(institutions.len(), 2);
    assert_eq!(institutions[0].max_history_days, 730);
    assert_eq!(institutions[1].max_history_days, 90);
}

#[tokio::test]
async fn booked_transactions_drop_pending_entries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .respond_with(token_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/transactions/"))
        .and(query_param("date_from", "2026-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transactions": {
                "booked": [
                    {
                        "transactionId": "TX1",
                        "bookingDate": "2026-03-01",
                        "transactionAmount": {"amount": "-45.90", "currency": "EUR"},
                        "remittanceInformationUnstructured": "POS ESSELUNGA MILANO"
                    }
                ],
                "pending": [
                    {"transactionAmount": {"amount": "-3.00", "currency": "EUR"}}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = client_with_keys(&server).await;
    let booked = client
        .booked_transactions(
            "acc-1",
            Some(chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            None,
        )
        .await
        .expect("transactions parse");

    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].transaction_id.as_deref(), Some("TX1"));
}

#[tokio::test]
async fn balance_prefers_interim_available_over_first_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .respond_with(token_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/balances/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "balances": [
                {"balanceAmount": {"amount": "999.99", "currency": "EUR"}, "balanceType": "closingBooked"},
                {"balanceAmount": {"amount": "1250.40", "currency": "EUR"}, "balanceType": "interimAvailable"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_with_keys(&server).await;
    let balance = client.balance("acc-1").await.expect("balance parses");
    assert!((balance - 1250.40).abs() < 1e-9);
}

#[tokio::test]
async fn balance_falls_back_to_first_entry_then_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .respond_with(token_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/balances/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "balances": [
                {"balanceAmount": {"amount": "10.00", "currency": "EUR"}, "balanceType": "closingBooked"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc-2/balances/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balances": []})))
        .mount(&server)
        .await;

    let client = client_with_keys(&server).await;
    assert!((client.balance("acc-1").await.expect("first entry") - 10.0).abs() < 1e-9);
    assert_eq!(client.balance("acc-2").await.expect("empty list"), 0.0);
}
