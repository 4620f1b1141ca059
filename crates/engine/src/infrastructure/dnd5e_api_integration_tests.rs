//! Adapter tests against the in-process fixture server.

use std::sync::Arc;
use std::time::Duration;

use spelltome_domain::{FilterCriteria, MagicSchool, SpellComponent, SpellcastingClass};

use crate::infrastructure::dnd5e_api::Dnd5eApiClient;
use crate::infrastructure::ports::{CatalogError, SpellDataPort};
use crate::test_fixtures::dnd5e_server;
use crate::use_cases::catalog::{CatalogUseCases, DetailFailurePolicy};

#[tokio::test]
async fn lists_spells_in_listing_order() {
    let server = dnd5e_server::start().await;
    let client = Dnd5eApiClient::new(&server.base_url());

    let spells = client.list_spells().await.expect("listing should load");

    let indices: Vec<&str> = spells.iter().map(|s| s.index.as_str()).collect();
    assert_eq!(indices, dnd5e_server::FIXTURE_SPELLS);
}

#[tokio::test]
async fn fetches_and_converts_spell_detail() {
    let server = dnd5e_server::start().await;
    let client = Dnd5eApiClient::new(&format!("{}/", server.base_url()));

    let spell = client.get_spell("fireball").await.expect("detail should load");

    assert_eq!(spell.name, "Fireball");
    assert_eq!(spell.level.value(), 3);
    assert_eq!(spell.school, MagicSchool::Evocation);
    assert_eq!(spell.description.len(), 2);
    assert!(spell.has_component(SpellComponent::Material));
    assert_eq!(spell.classes, vec!["Sorcerer", "Wizard"]);
}

#[tokio::test]
async fn server_error_is_data_source_unavailable() {
    let server = dnd5e_server::start().await;
    let client = Dnd5eApiClient::new(&server.base_url());

    let err = client.get_spell("broken").await.expect_err("500 must fail");

    assert!(err.is_unavailable());
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn undecodable_detail_is_malformed() {
    let server = dnd5e_server::start().await;
    let client = Dnd5eApiClient::new(&server.base_url());

    let garbled = client.get_spell("garbled").await.expect_err("not json");
    assert!(matches!(
        garbled,
        CatalogError::MalformedRecord { ref index, .. } if index == "garbled"
    ));

    let levelless = client.get_spell("levelless").await.expect_err("no level");
    assert!(matches!(levelless, CatalogError::MalformedRecord { .. }));
}

#[tokio::test]
async fn lists_classes_and_class_spells() {
    let server = dnd5e_server::start().await;
    let client = Dnd5eApiClient::new(&server.base_url());

    let classes = client.list_classes().await.expect("classes should load");
    assert_eq!(classes.len(), 4);
    assert_eq!(classes[1].name.as_deref(), Some("Fighter"));

    let wizard = client
        .list_class_spells("wizard")
        .await
        .expect("class spells should load");
    assert_eq!(wizard, vec!["fireball", "light"]);

    let fighter = client
        .list_class_spells("fighter")
        .await
        .expect("empty list is fine");
    assert!(fighter.is_empty());
}

#[tokio::test]
async fn unreachable_host_is_data_source_unavailable() {
    let server = dnd5e_server::start_unavailable().await;
    let client = Dnd5eApiClient::with_timeout(&server.base_url(), Some(Duration::from_secs(5)));

    let err = client.list_spells().await.expect_err("503 must fail");
    assert!(matches!(
        err,
        CatalogError::DataSourceUnavailable { operation: "list_spells", .. }
    ));
}

#[tokio::test]
async fn loads_full_catalog_over_http() {
    let server = dnd5e_server::start().await;
    let source = Arc::new(Dnd5eApiClient::new(&server.base_url()));
    let use_cases = CatalogUseCases::new(source, DetailFailurePolicy::FailBatch);

    let load = use_cases
        .load_catalog
        .execute()
        .await
        .expect("catalog should load");

    assert!(load.is_complete());
    assert_eq!(load.snapshot.len(), 3);
    assert_eq!(
        load.snapshot.classes(),
        &[
            SpellcastingClass::Cleric,
            SpellcastingClass::Wizard,
            SpellcastingClass::Sorcerer
        ]
    );

    let cleric_level_one = load
        .snapshot
        .filter(&FilterCriteria::new().with_class("cleric").with_level(1));
    assert_eq!(cleric_level_one.len(), 1);
    assert_eq!(cleric_level_one[0].id, "cure-wounds");
}

#[tokio::test]
async fn failed_detail_fails_batch_or_is_skipped_by_policy() {
    let server = dnd5e_server::start_with_listing(&["light", "broken", "garbled"]).await;
    let source: Arc<dyn SpellDataPort> = Arc::new(Dnd5eApiClient::new(&server.base_url()));

    let strict = CatalogUseCases::new(source.clone(), DetailFailurePolicy::FailBatch);
    let err = strict
        .load_spells
        .execute()
        .await
        .expect_err("unavailable detail fails the batch");
    assert!(err.is_unavailable());

    let lenient = CatalogUseCases::new(source, DetailFailurePolicy::SkipFailed);
    let report = lenient
        .load_spells
        .execute()
        .await
        .expect("partial load should succeed");
    assert_eq!(report.spells.len(), 1);
    assert_eq!(report.spells[0].id, "light");
    let failed: Vec<&str> = report.failures.iter().map(|f| f.index.as_str()).collect();
    assert_eq!(failed, vec!["broken", "garbled"]);
}
