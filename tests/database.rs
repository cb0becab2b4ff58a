use chrono::Utc;
use tempfile::{tempdir, TempDir};

use whale_watch::{
    database::{SightingStore, SightingStoreBuilder},
    errors::WhaleWatchError,
    models::{NewSighting, ReportForm},
};

async fn setup_test_db() -> (TempDir, SightingStore) {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = SightingStoreBuilder::new()
        .path(temp_dir.path().join("db").join("sightings.db"))
        .build()
        .expect("Failed to build store");

    store.initialize().await.expect("Failed to initialize store");

    (temp_dir, store)
}

fn report(name: &str, location: &str, latitude: &str, longitude: &str) -> ReportForm {
    ReportForm {
        name: Some(name.to_string()),
        location: Some(location.to_string()),
        latitude: Some(latitude.to_string()),
        longitude: Some(longitude.to_string()),
    }
}

#[tokio::test]
async fn test_report_round_trip() {
    let (_dir, store) = setup_test_db().await;

    let submitted = Utc::now();
    let sighting = report("Alice", "Bay", "49.28", "-123.12")
        .into_new_sighting()
        .expect("Valid report rejected");
    let stored = store
        .insert(sighting)
        .await
        .expect("Failed to insert sighting");

    let sightings = store.list_all().await.expect("Failed to list sightings");
    assert_eq!(sightings.len(), 1);

    let listed = &sightings[0];
    assert_eq!(listed.id, stored.id);
    assert_eq!(listed.name.as_deref(), Some("Alice"));
    assert_eq!(listed.location.as_deref(), Some("Bay"));
    assert_eq!(listed.latitude, 49.28);
    assert_eq!(listed.longitude, -123.12);
    assert!(listed.date >= submitted);
}

#[tokio::test]
async fn test_invalid_report_writes_nothing() {
    let (_dir, store) = setup_test_db().await;

    let err = report("Alice", "Bay", "forty-nine", "-123.12")
        .into_new_sighting()
        .unwrap_err();

    assert!(matches!(err, WhaleWatchError::Validation(_)));
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_only() {
    let (_dir, store) = setup_test_db().await;

    for i in 0..5 {
        store
            .insert(NewSighting {
                name: Some(format!("Observer {}", i)),
                location: None,
                latitude: 49.0 + i as f64 / 100.0,
                longitude: -123.0,
            })
            .await
            .expect("Failed to insert sighting");
        assert_eq!(store.list_all().await.unwrap().len(), i + 1);
    }

    let sightings = store.list_all().await.unwrap();
    let names: Vec<_> = sightings.iter().filter_map(|s| s.name.clone()).collect();
    assert_eq!(
        names,
        vec!["Observer 0", "Observer 1", "Observer 2", "Observer 3", "Observer 4"]
    );
    assert!(sightings.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_reopen_keeps_data() {
    let (dir, store) = setup_test_db().await;
    store
        .insert(NewSighting {
            name: None,
            location: Some("Stanley Park".to_string()),
            latitude: 49.30,
            longitude: -123.14,
        })
        .await
        .unwrap();

    // A second store on the same file, as after a restart
    let reopened = SightingStoreBuilder::new()
        .path(dir.path().join("db").join("sightings.db"))
        .build()
        .unwrap();
    reopened.initialize().await.unwrap();

    let sightings = reopened.list_all().await.unwrap();
    assert_eq!(sightings.len(), 1);
    assert_eq!(sightings[0].location.as_deref(), Some("Stanley Park"));
}
