//! Debounced supplier product suggestions against in-memory search.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;

use common::{FakeCatalog, RecordingSuggestions, SelectedSupplier};
use orderdesk_client::config::SuggestSettings;
use orderdesk_client::SuggestionInput;
use orderdesk_core::HiddenSelection;

const SUPPLIER: &str = "17";

fn catalog() -> FakeCatalog {
    FakeCatalog::new()
        .with_search(
            "bolt",
            json!([
                {"name": "Hex bolt", "supplier_sku": "HB-8"},
                {"name": "Carriage bolt", "sku": "CB-6"},
                {"name": "Bolt assortment"},
            ]),
        )
        .with_search("nut", json!([{"name": "Hex nut", "supplier_sku": "HN-8"}]))
        .with_search("odd", json!({"results": []}))
        .with_outage("down")
}

fn input(
    catalog: Arc<FakeCatalog>,
    surface: Arc<RecordingSuggestions>,
    mirror_selection: bool,
) -> SuggestionInput {
    let settings = SuggestSettings {
        debounce_ms: 300,
        mirror_selection,
    };
    SuggestionInput::new(catalog, surface, Arc::new(SelectedSupplier::new(SUPPLIER)), &settings)
}

/// Types `text` one character at a time, `gap` apart.
async fn type_text(input: &SuggestionInput, text: &str, gap: Duration) {
    let mut typed = String::new();
    for ch in text.chars() {
        typed.push(ch);
        input.on_input(&typed).await;
        sleep(gap).await;
    }
}

async fn quiet() {
    sleep(Duration::from_millis(400)).await;
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_typing_sends_one_search() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    type_text(&input, "bolts", Duration::from_millis(50)).await;
    assert!(catalog.search_calls().is_empty());

    quiet().await;
    assert_eq!(
        catalog.search_calls(),
        vec![(SUPPLIER.to_string(), "bolts".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_search_fires_after_quiet_interval() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    input.on_input("bolt").await;
    assert!(input.is_pending().await);

    sleep(Duration::from_millis(299)).await;
    assert!(catalog.search_calls().is_empty());

    sleep(Duration::from_millis(2)).await;
    assert_eq!(catalog.search_calls().len(), 1);
    assert!(!input.is_pending().await);
}

#[tokio::test(start_paused = true)]
async fn test_clearing_input_cancels_search() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    input.on_input("b").await;
    input.on_input("").await;
    assert!(!input.is_pending().await);

    quiet().await;
    assert!(catalog.search_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_results_replace_options() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    input.on_input("bolt").await;
    quiet().await;
    assert_eq!(
        surface.values(),
        vec!["[HB-8] Hex bolt", "[CB-6] Carriage bolt", "Bolt assortment"]
    );

    input.on_input("nut").await;
    quiet().await;
    assert_eq!(surface.values(), vec!["[HN-8] Hex nut"]);
    assert_eq!(*surface.renders.lock().unwrap(), 2);
    assert_eq!(*surface.attached.lock().unwrap(), 1);
    assert_eq!(input.options().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_non_list_response_keeps_options() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    input.on_input("nut").await;
    quiet().await;
    input.on_input("odd").await;
    quiet().await;

    assert_eq!(catalog.search_calls().len(), 2);
    assert_eq!(surface.values(), vec!["[HN-8] Hex nut"]);
    assert_eq!(*surface.renders.lock().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_search_failure_is_swallowed() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    input.on_input("nut").await;
    quiet().await;
    input.on_input("down").await;
    quiet().await;
    assert_eq!(surface.values(), vec!["[HN-8] Hex nut"]);

    // Still usable afterwards.
    input.on_input("bolt").await;
    quiet().await;
    assert_eq!(surface.values().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_fields_mirror_exact_match() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    input.on_input("bolt").await;
    quiet().await;

    input.on_input("[CB-6] Carriage bolt").await;
    assert_eq!(
        surface.last_hidden(),
        Some(HiddenSelection {
            name: "Carriage bolt".into(),
            sku: "CB-6".into(),
        })
    );

    input.on_input("Bolt assortment").await;
    assert_eq!(input.hidden().await.name, "Bolt assortment");
    assert_eq!(input.hidden().await.sku, "");

    input.on_input("Bolt assortmen").await;
    assert!(surface.last_hidden().unwrap().is_cleared());
}

#[tokio::test(start_paused = true)]
async fn test_hidden_fields_lag_one_search() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), true);

    // Nothing has been searched yet, so even an exact name cannot match.
    input.on_input("[HN-8] Hex nut").await;
    assert!(surface.last_hidden().unwrap().is_cleared());
}

#[tokio::test(start_paused = true)]
async fn test_plain_variant_never_touches_hidden_fields() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let input = input(Arc::clone(&catalog), Arc::clone(&surface), false);

    input.on_input("nut").await;
    quiet().await;
    input.on_input("[HN-8] Hex nut").await;

    assert!(surface.hidden.lock().unwrap().is_empty());
    assert_eq!(surface.values(), vec!["[HN-8] Hex nut"]);
}

#[tokio::test(start_paused = true)]
async fn test_supplier_is_read_when_timer_fires() {
    let catalog = Arc::new(catalog());
    let surface = Arc::new(RecordingSuggestions::default());
    let selector = Arc::new(SelectedSupplier::new(SUPPLIER));
    let settings = SuggestSettings::default();
    let input = SuggestionInput::new(
        Arc::clone(&catalog) as _,
        surface,
        Arc::clone(&selector) as _,
        &settings,
    );

    input.on_input("bolt").await;
    sleep(Duration::from_millis(100)).await;
    selector.select("42");
    quiet().await;

    assert_eq!(
        catalog.search_calls(),
        vec![("42".to_string(), "bolt".to_string())]
    );
}
