//! Integration tests for order lookup and payment-term commands

use serde_json::json;
use tropeiro_app::commands;
use tropeiro_domain::{ErpError, PaymentTerms};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::setup;

fn order_body(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "numero": format!("PED-{id:04}"),
        "cliente": { "id": 12, "nome": "Armazém Boa Vista" },
        "valor_total": 1500.0,
        "condicao": "PARCELADO",
        "qtd_parcelas": 3,
        "criado_em": "2024-02-01T09:30:00Z",
        "status": "ENTREGUE"
    })
}

/// Validates the per-order read-through cache.
#[tokio::test]
async fn order_details_answer_from_cache_on_second_call() {
    let harness = setup().await;

    Mock::given(method("GET"))
        .and(path("/pedidos/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body(42)))
        .expect(1)
        .mount(&harness.server)
        .await;

    let first = commands::order_details(&harness.ctx, 42).await.unwrap();
    let second = commands::order_details(&harness.ctx, 42).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.condicao, PaymentTerms::Parcelado);
    assert_eq!(first.qtd_parcelas, Some(3));
}

/// Validates that a missing order answers `NotFound` and is not cached.
#[tokio::test]
async fn missing_order_maps_to_not_found() {
    let harness = setup().await;

    Mock::given(method("GET"))
        .and(path("/pedidos/99"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&harness.server)
        .await;

    let err = commands::order_details(&harness.ctx, 99).await.unwrap_err();
    assert!(matches!(err, ErpError::NotFound(_)));

    // The miss must not be pinned; the next call asks again.
    let again = commands::order_details(&harness.ctx, 99).await.unwrap_err();
    assert!(matches!(again, ErpError::NotFound(_)));
}

/// Validates the terms change and its cache fanout.
///
/// Assertions:
/// - Confirms the updated order comes back from the mutation.
/// - Confirms the cached order is refetched after the change.
#[tokio::test]
async fn change_terms_invalidates_the_cached_order() {
    let harness = setup().await;

    Mock::given(method("GET"))
        .and(path("/pedidos/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body(42)))
        .expect(2)
        .mount(&harness.server)
        .await;

    let updated_body = {
        let mut body = order_body(42);
        body["condicao"] = json!("A_VISTA");
        body["qtd_parcelas"] = json!(null);
        body
    };
    Mock::given(method("PUT"))
        .and(path("/pedidos/42/condicao-pagamento"))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated_body))
        .expect(1)
        .mount(&harness.server)
        .await;

    commands::order_details(&harness.ctx, 42).await.unwrap();

    let updated =
        commands::change_terms(&harness.ctx, 42, PaymentTerms::AVista, None).await.unwrap();
    assert_eq!(updated.condicao, PaymentTerms::AVista);
    assert_eq!(updated.qtd_parcelas, None);

    commands::order_details(&harness.ctx, 42).await.unwrap();
}

/// Validates the client-side guard on installment terms.
#[tokio::test]
async fn installment_terms_require_a_count() {
    let harness = setup().await;

    let err = commands::change_terms(&harness.ctx, 42, PaymentTerms::Parcelado, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ErpError::Validation(_)));
    assert!(harness.server.received_requests().await.unwrap().is_empty());
}

/// Validates the per-client order list cache.
#[tokio::test]
async fn client_orders_are_cached_per_client() {
    let harness = setup().await;

    Mock::given(method("GET"))
        .and(path("/clientes/12/pedidos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([order_body(42)])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let first = commands::client_orders(&harness.ctx, 12).await.unwrap();
    let second = commands::client_orders(&harness.ctx, 12).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}
