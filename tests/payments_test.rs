mod common;

use common::{dispatcher_for, has_idempotency_key, BEARER};
use httpmock::prelude::*;
use serde_json::json;
use square_dispatch::{Dispatcher, ErrorDescriptor, Outcome};

#[tokio::test]
async fn card_payment_sends_card_nonce_key_and_amount() {
    let server = MockServer::start_async().await;
    let payload = json!({"payment": {"id": "pay-1", "status": "COMPLETED", "amount_money": {"amount": 500, "currency": "GBP"}}});
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/payments")
                .header("authorization", BEARER)
                .header("square-version", "2023-10-18")
                .json_body_partial(
                    json!({
                        "source_id": "cnon:card-nonce-ok",
                        "amount_money": {"amount": 500, "currency": "GBP"}
                    })
                    .to_string(),
                )
                .matches(has_idempotency_key);
            then.status(200).json_body(payload.clone());
        })
        .await;

    let outcome = dispatcher_for(&server).create_card_payment(500).await;

    mock.assert_async().await;
    assert_eq!(outcome, Outcome::Success(payload));
}

#[tokio::test]
async fn bank_transfer_payment_uses_bank_nonce() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/payments")
                .json_body_partial(
                    json!({
                        "source_id": "bnon:bank-nonce-ok",
                        "amount_money": {"amount": 2500, "currency": "GBP"}
                    })
                    .to_string(),
                )
                .matches(has_idempotency_key);
            then.status(200).json_body(json!({"payment": {"id": "pay-2", "status": "PENDING"}}));
        })
        .await;

    let outcome = dispatcher_for(&server).create_bank_transfer_payment(2500).await;

    mock.assert_async().await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn cash_payment_carries_required_and_supplied_amounts() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/payments")
                .json_body_partial(
                    json!({
                        "source_id": "CASH",
                        "amount_money": {"amount": 1000, "currency": "GBP"},
                        "cash_details": {
                            "buyer_supplied_money": {"amount": 1200, "currency": "GBP"}
                        }
                    })
                    .to_string(),
                )
                .matches(has_idempotency_key);
            then.status(200).json_body(json!({
                "payment": {"id": "pay-3", "cash_details": {"change_back_money": {"amount": 200, "currency": "GBP"}}}
            }));
        })
        .await;

    let outcome = dispatcher_for(&server).create_cash_payment(1000, 1200).await;

    mock.assert_async().await;
    let payload = outcome.into_result().expect("success");
    assert_eq!(payload["payment"]["cash_details"]["change_back_money"]["amount"], 200);
}

#[tokio::test]
async fn external_payment_records_source_and_fee() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/payments")
                .json_body_partial(
                    json!({
                        "source_id": "EXTERNAL",
                        "amount_money": {"amount": 3000, "currency": "GBP"},
                        "external_details": {
                            "type": "OTHER",
                            "source": "Food delivery app",
                            "source_fee_money": {"amount": 150, "currency": "GBP"}
                        }
                    })
                    .to_string(),
                )
                .matches(has_idempotency_key);
            then.status(200).json_body(json!({"payment": {"id": "pay-4"}}));
        })
        .await;

    let outcome = dispatcher_for(&server)
        .create_external_payment(3000, "Food delivery app", 150)
        .await;

    mock.assert_async().await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn currency_comes_from_configuration() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/payments").json_body_partial(
                json!({"amount_money": {"amount": 500, "currency": "USD"}}).to_string(),
            );
            then.status(200).json_body(json!({"payment": {"id": "pay-5"}}));
        })
        .await;

    let dispatcher =
        Dispatcher::from_config(common::config_for(&server).with_currency("USD")).unwrap();
    let outcome = dispatcher.create_card_payment(500).await;

    mock.assert_async().await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn payment_rejection_surfaces_error_list() {
    let server = MockServer::start_async().await;
    let errors = json!([
        {"category": "PAYMENT_METHOD_ERROR", "code": "CARD_DECLINED", "detail": "Card declined."},
        {"category": "INVALID_REQUEST_ERROR", "code": "INVALID_VALUE", "field": "amount_money.amount"}
    ]);
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/payments");
            then.status(400).json_body(json!({"errors": errors.clone()}));
        })
        .await;

    let outcome = dispatcher_for(&server).create_card_payment(-1).await;

    let expected: Vec<ErrorDescriptor> = serde_json::from_value(errors).unwrap();
    assert_eq!(outcome, Outcome::Error(expected));
}

#[tokio::test]
async fn list_and_get_payments_return_payload_unchanged() {
    let server = MockServer::start_async().await;
    let list = json!({"payments": [{"id": "pay-1"}, {"id": "pay-2"}], "cursor": "next-page"});
    let single = json!({"payment": {"id": "pay-1", "status": "COMPLETED"}});
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/payments").header("authorization", BEARER);
            then.status(200).json_body(list.clone());
        })
        .await;
    let get_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/payments/pay-1");
            then.status(200).json_body(single.clone());
        })
        .await;

    let dispatcher = dispatcher_for(&server);
    assert_eq!(dispatcher.list_payments().await, Outcome::Success(list));
    assert_eq!(dispatcher.get_payment("pay-1").await, Outcome::Success(single));

    list_mock.assert_async().await;
    get_mock.assert_async().await;
}
