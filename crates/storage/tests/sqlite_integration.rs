use lesson_core::Catalog;
use lesson_core::model::{
    AccessibilitySettingsDraft, ColorBlindness, FontFamily, SkillLevel, SkillTree, Theme,
};
use storage::repository::{AccessibilitySettingsRepository, SkillTreeRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_skill_tree_snapshot_overwrites_whole_record() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_skill_tree?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_skill_tree().await.unwrap().is_none());

    let catalog = Catalog::physics_motion();
    let mut tree = SkillTree::default_for(&catalog);
    repo.save_skill_tree(&tree).await.unwrap();

    tree.record_practice("motion").unwrap();
    tree.record_mastery("motion").unwrap();
    repo.save_skill_tree(&tree).await.unwrap();

    let loaded = repo.load_skill_tree().await.unwrap().expect("snapshot");
    assert_eq!(loaded, tree);
    assert_eq!(loaded.get("motion").unwrap().level, SkillLevel::Mastered);
    assert!(loaded.get("velocity").unwrap().unlocked);
    assert_eq!(loaded.skills().len(), catalog.len());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let versions: Vec<i64> = sqlx::query_scalar("SELECT version FROM schema_migrations ORDER BY version")
        .fetch_all(repo.pool())
        .await
        .unwrap();
    assert_eq!(versions, vec![1, 2]);
}

#[tokio::test]
async fn sqlite_persists_accessibility_settings() {
    let storage = Storage::sqlite("sqlite:file:memdb_accessibility?mode=memory&cache=shared")
        .await
        .expect("storage");
    assert!(storage.accessibility.get_settings().await.unwrap().is_none());

    let settings = AccessibilitySettingsDraft {
        font: Some(FontFamily::OpenDyslexic),
        theme: Some(Theme::HighContrast),
        color_blindness: Some(ColorBlindness::Achromatopsia),
        reading_ruler: Some(true),
        font_scale: Some(1.25),
        ..AccessibilitySettingsDraft::new()
    }
    .validate()
    .unwrap();
    storage.accessibility.save_settings(&settings).await.unwrap();

    let loaded = storage
        .accessibility
        .get_settings()
        .await
        .unwrap()
        .expect("settings");
    assert_eq!(loaded, settings);
}

#[tokio::test]
async fn sqlite_connect_creates_missing_file_in_wal_mode() {
    let path = std::env::temp_dir().join(format!("aacl_connect_{}.sqlite3", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let repo = SqliteRepository::connect(&format!("sqlite://{}", path.display()))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    assert!(path.exists());

    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(mode.to_ascii_lowercase(), "wal");

    repo.pool().close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
