//! Integration tests for registry lookup commands

use serde_json::json;
use tropeiro_app::commands;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::setup;

/// Validates that searches cache per normalized term.
///
/// Assertions:
/// - Confirms `"silva"` and `"  silva "` share one cache slot.
/// - Confirms the backend sees the trimmed term.
#[tokio::test]
async fn client_search_is_cached_per_term() {
    let harness = setup().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .and(query_param("busca", "silva"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nome": "Silva & Filhos", "documento": "11222333000144" }
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let first = commands::clients(&harness.ctx, Some("silva".to_string())).await.unwrap();
    let second = commands::clients(&harness.ctx, Some("  silva ".to_string())).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].nome, "Silva & Filhos");
}

/// Validates that a blank search shares the unfiltered cache slot.
#[tokio::test]
async fn blank_search_shares_the_unfiltered_slot() {
    let harness = setup().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nome": "Silva & Filhos" }
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;

    commands::clients(&harness.ctx, None).await.unwrap();
    commands::clients(&harness.ctx, Some("   ".to_string())).await.unwrap();
}

/// Validates that suppliers and carriers occupy separate cache slots.
#[tokio::test]
async fn suppliers_and_carriers_cache_separately() {
    let harness = setup().await;

    Mock::given(method("GET"))
        .and(path("/fornecedores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 5, "nome": "Laticínios Serra Azul", "documento": "55666777000188" }
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transportadoras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 8, "nome": "Transportes Mogiana" }
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let suppliers = commands::suppliers(&harness.ctx).await.unwrap();
    let carriers = commands::carriers(&harness.ctx).await.unwrap();

    // Cached answers, no extra backend traffic.
    commands::suppliers(&harness.ctx).await.unwrap();
    commands::carriers(&harness.ctx).await.unwrap();

    assert_eq!(suppliers[0].nome, "Laticínios Serra Azul");
    assert_eq!(carriers[0].nome, "Transportes Mogiana");
}
