use anyhow::Result;
use std::sync::Arc;
use tempfile::tempdir;

use stokemeet::profiles::{NewProfile, ProfileRegistry};
use stokemeet::storage::{Database, KeyValueStore};
use stokemeet::summary::{ActionItem, StoredSummary, SummaryCache};

#[test]
fn profiles_survive_reopening_the_store() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("stokemeet.db");

    let created = {
        let store: Arc<dyn KeyValueStore> = Arc::new(Database::open_path(&db_path)?);
        let registry = ProfileRegistry::new(store);
        let profile = registry.create(NewProfile {
            name: "Board Review".to_string(),
            description: "Decisions for the board".to_string(),
            system_prompt: "List every decision and its owner.".to_string(),
        })?;
        registry.set_default_profile_id(&profile.id)?;
        profile
    };

    let store: Arc<dyn KeyValueStore> = Arc::new(Database::open_path(&db_path)?);
    let registry = ProfileRegistry::new(store);

    let custom = registry.list_custom();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0].id, created.id);
    assert_eq!(registry.default_profile_id(), created.id);
    assert_eq!(
        registry.framework_instruction(&created.id),
        "List every decision and its owner."
    );

    assert!(registry.delete(&created.id)?);
    assert!(registry.list_custom().is_empty());

    Ok(())
}

#[tokio::test]
async fn cached_summaries_survive_reopening_the_store() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("stokemeet.db");

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(Database::open_path(&db_path)?);
        let cache = SummaryCache::local_only(store);
        let summary = StoredSummary::new(
            "# Retrospective Summary".to_string(),
            vec![ActionItem::new("Fix the flaky deploy", "Sam")],
        );
        cache.save(None, "42", "Retrospective", &summary).await;
    }

    let db = Database::open_path(&db_path)?;
    assert_eq!(db.entry_count()?, 1);

    let store: Arc<dyn KeyValueStore> = Arc::new(db);
    let cache = SummaryCache::local_only(store);

    let loaded = cache
        .load(None, "42", "Retrospective")
        .await
        .expect("summary should be cached");
    assert_eq!(loaded.content, "# Retrospective Summary");
    assert_eq!(
        loaded.action_items(),
        vec![ActionItem::new("Fix the flaky deploy", "Sam")]
    );

    assert_eq!(
        cache.list_local(None)?,
        vec![("42".to_string(), "Retrospective".to_string())]
    );
    assert!(cache.load(None, "42", "General").await.is_none());
    assert!(cache.clear_local("42", "Retrospective")?);
    assert!(cache.load(None, "42", "Retrospective").await.is_none());

    Ok(())
}
