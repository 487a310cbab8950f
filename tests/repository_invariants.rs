//! Repository Invariant Tests
//!
//! Properties that must hold for any sequence of repository operations:
//! - ids are unique and never change
//! - createdAt is set once
//! - an empty patch is the identity
//! - a failed validation never reaches the store
//! - a deleted record stays gone

use std::collections::HashSet;
use std::sync::Arc;

use lightsaber_api::repository::{LightsaberRepository, RepositoryError, COLLECTION};
use lightsaber_api::schema::{
    Color, CrystalType, HiltMaterial, LightsaberPatch, ListFilters, NewLightsaber,
};
use lightsaber_api::storage::{DocumentStore, FilterSet, MemoryStore};
use lightsaber_api::validation::{validate_create, validate_update};
use serde_json::json;

// =============================================================================
// Test Utilities
// =============================================================================

fn repository() -> (LightsaberRepository, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (LightsaberRepository::new(store.clone()), store)
}

fn new_saber(name: &str, color: Color, creator: &str) -> NewLightsaber {
    NewLightsaber {
        name: name.to_string(),
        color,
        creator: creator.to_string(),
        crystal_type: CrystalType::Kyber,
        hilt_material: HiltMaterial::Durasteel,
        is_active: None,
    }
}

// =============================================================================
// Identity
// =============================================================================

#[tokio::test]
async fn test_ids_are_unique_across_creates() {
    let (repo, _) = repository();
    let mut ids = HashSet::new();

    for i in 0..50 {
        let saber = repo
            .create(new_saber(&format!("Saber {}", i), Color::Blue, "Smith"))
            .await
            .unwrap();
        assert!(ids.insert(saber.id));
    }

    assert_eq!(repo.list(&ListFilters::default()).await.unwrap().len(), 50);
}

#[tokio::test]
async fn test_identity_survives_every_mutation() {
    let (repo, _) = repository();
    let created = repo
        .create(new_saber("Original", Color::Green, "Yoda"))
        .await
        .unwrap();

    let patched = repo
        .update(
            &created.id,
            LightsaberPatch {
                name: Some("Patched".into()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.id, created.id);
    assert_eq!(patched.created_at, created.created_at);

    let replaced = repo
        .replace(&created.id, new_saber("Replaced", Color::Red, "Vader"))
        .await
        .unwrap();
    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.created_at, created.created_at);
    assert!(replaced.is_active);

    let fetched = repo.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, replaced);
}

// =============================================================================
// Partial Update
// =============================================================================

#[tokio::test]
async fn test_empty_patch_is_identity() {
    let (repo, _) = repository();
    let created = repo
        .create(new_saber("Still", Color::White, "Ahsoka"))
        .await
        .unwrap();

    let after = repo
        .update(&created.id, LightsaberPatch::default())
        .await
        .unwrap();
    assert_eq!(after, created);
}

#[tokio::test]
async fn test_patch_matches_apply_to() {
    let (repo, _) = repository();
    let created = repo
        .create(new_saber("Before", Color::Blue, "Kenobi"))
        .await
        .unwrap();

    let patch = LightsaberPatch {
        color: Some(Color::Silver),
        hilt_material: Some(HiltMaterial::Beskar),
        ..Default::default()
    };

    let mut expected = created.clone();
    patch.apply_to(&mut expected);

    let actual = repo.update(&created.id, patch).await.unwrap();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_update_missing_record_creates_nothing() {
    let (repo, store) = repository();
    let err = repo
        .update(
            "00000000-0000-4000-8000-000000000000",
            LightsaberPatch {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
    assert!(store.is_empty().unwrap());
}

// =============================================================================
// Validation Gate
// =============================================================================

#[tokio::test]
async fn test_rejected_payloads_never_reach_store() {
    let (_, store) = repository();

    let bad_create = json!({"name": "", "color": "pink"});
    assert!(validate_create(&bad_create).is_err());

    let bad_patch = json!({"isActive": "yes"});
    assert!(validate_update(&bad_patch).is_err());

    let stored = store
        .query(COLLECTION, &FilterSet::new())
        .await
        .unwrap();
    assert!(stored.is_empty());
}

// =============================================================================
// Delete and List
// =============================================================================

#[tokio::test]
async fn test_deleted_record_stays_gone() {
    let (repo, _) = repository();
    let created = repo
        .create(new_saber("Doomed", Color::Orange, "Maul"))
        .await
        .unwrap();

    repo.delete(&created.id).await.unwrap();

    assert!(matches!(
        repo.get_by_id(&created.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete(&created.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.replace(&created.id, new_saber("Back", Color::Blue, "Maul"))
            .await,
        Err(RepositoryError::NotFound)
    ));
    assert!(repo.list(&ListFilters::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_results_satisfy_every_filter() {
    let (repo, _) = repository();
    let colors = [Color::Red, Color::Blue, Color::Red, Color::Green];
    let creators = ["Vader", "Vader", "Sidious", "Vader"];

    for (i, (color, creator)) in colors.iter().zip(creators.iter()).enumerate() {
        let mut saber = new_saber(&format!("S{}", i), *color, creator);
        saber.is_active = Some(i % 2 == 0);
        repo.create(saber).await.unwrap();
    }

    let filters = ListFilters {
        color: Some(Color::Red),
        creator: Some("Vader".into()),
        is_active: None,
    };
    let matched = repo.list(&filters).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert!(matched
        .iter()
        .all(|s| s.color == Color::Red && s.creator == "Vader"));

    let inactive = repo
        .list(&ListFilters {
            is_active: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(inactive.len(), 2);
    assert!(inactive.iter().all(|s| !s.is_active));
}
