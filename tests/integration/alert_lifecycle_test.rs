#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use alertkeeper::application::error::AlertError;
use alertkeeper::application::services::alert::{AlertService, UpdateOutcome};
use alertkeeper::domain::entities::alert::{Alert, AlertId};
use alertkeeper::domain::ports::store::UserStore;
use alertkeeper::domain::ports::synchronizer::{AlertSynchronizer, SyncError};
use alertkeeper::domain::value_objects::principal::Principal;
use alertkeeper::infrastructure::persistence::sqlite_store::SqliteStore;

// ---------------------------------------------------------------------------
// RecordingSynchronizer
// ---------------------------------------------------------------------------

struct RecordingSynchronizer {
    pushed: Mutex<Vec<(AlertId, bool)>>,
    fail: AtomicBool,
}

impl RecordingSynchronizer {
    const fn new() -> Self {
        Self {
            pushed: Mutex::new(vec![]),
            fail: AtomicBool::new(false),
        }
    }

    fn pushed(&self) -> Vec<(AlertId, bool)> {
        self.pushed.lock().expect("lock").clone()
    }
}

#[async_trait]
impl AlertSynchronizer for RecordingSynchronizer {
    async fn synchronize(&self, alert: &Alert) -> Result<(), SyncError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SyncError::Unavailable("backend down".into()));
        }
        self.pushed
            .lock()
            .expect("lock")
            .push((alert.id, alert.enabled));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn principal(name: &str) -> Principal {
    Principal::new(name).expect("principal")
}

fn setup() -> (AlertService, Arc<RecordingSynchronizer>) {
    let store = Arc::new(SqliteStore::open_in_memory().expect("store"));
    for name in ["alice", "bob", "root"] {
        store.save_user(name).expect("save user");
    }
    let sync = Arc::new(RecordingSynchronizer::new());
    let service = AlertService::new(
        store.clone(),
        store,
        sync.clone(),
        Some("root".to_string()),
    );
    (service, sync)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_lifecycle_create_update_forbid_delete() {
    let (service, sync) = setup();
    let alice = principal("alice");
    let bob = principal("bob");

    let created = service
        .create_alert(Some(&alice), "cpu-high", false)
        .expect("create");
    assert_eq!(created.admins, vec!["alice".to_string()]);
    assert!(sync.pushed().is_empty(), "create does not push");

    let outcome = service
        .update_alert(Some(&alice), created.id, true)
        .await
        .expect("update");
    assert!(matches!(outcome, UpdateOutcome::Synced(ref a) if a.enabled));
    assert_eq!(sync.pushed(), vec![(created.id, true)]);
    assert!(service.get_alert(created.id).expect("get").enabled);

    let err = service
        .update_alert(Some(&bob), created.id, false)
        .await
        .expect_err("bob is not an admin");
    assert!(matches!(err, AlertError::Forbidden { .. }));
    assert!(service.get_alert(created.id).expect("get").enabled);
    assert_eq!(sync.pushed().len(), 1);

    let err = service
        .delete_alert(Some(&bob), created.id)
        .expect_err("bob cannot delete");
    assert!(matches!(err, AlertError::Forbidden { .. }));

    assert!(service.delete_alert(Some(&alice), created.id).expect("delete"));
    assert!(matches!(
        service.get_alert(created.id),
        Err(AlertError::NotFound(id)) if id == created.id
    ));

    // Deleting again is a no-op.
    assert!(!service.delete_alert(Some(&alice), created.id).expect("delete again"));
}

#[tokio::test]
async fn sync_failure_keeps_saved_state() {
    let (service, sync) = setup();
    let alice = principal("alice");
    let alert = service
        .create_alert(Some(&alice), "disk-full", false)
        .expect("create");

    sync.fail.store(true, Ordering::SeqCst);
    let outcome = service
        .update_alert(Some(&alice), alert.id, true)
        .await
        .expect("update");
    match outcome {
        UpdateOutcome::SyncFailed { alert: saved, error } => {
            assert!(saved.enabled);
            assert!(matches!(error, SyncError::Unavailable(_)));
        }
        other => panic!("expected SyncFailed, got {other:?}"),
    }
    assert!(service.get_alert(alert.id).expect("get").enabled);

    // Retrying the same update pushes again once the backend is back.
    sync.fail.store(false, Ordering::SeqCst);
    let outcome = service
        .update_alert(Some(&alice), alert.id, true)
        .await
        .expect("retry");
    assert!(matches!(outcome, UpdateOutcome::Synced(_)));
    assert_eq!(sync.pushed(), vec![(alert.id, true)]);
}

#[tokio::test]
async fn listing_depends_on_principal() {
    let (service, _) = setup();
    let alice = principal("alice");
    let bob = principal("bob");
    let root = principal("root");

    let a1 = service.create_alert(Some(&alice), "a1", true).expect("a1");
    let b1 = service.create_alert(Some(&bob), "b1", false).expect("b1");
    let a2 = service.create_alert(Some(&alice), "a2", false).expect("a2");

    let ids = |alerts: Vec<Alert>| alerts.into_iter().map(|a| a.id).collect::<Vec<_>>();

    let mut all = ids(service.list_alerts(Some(&root)).expect("root list"));
    all.sort_unstable();
    assert_eq!(all, vec![a1.id, b1.id, a2.id]);

    let mut mine = ids(service.list_alerts(Some(&alice)).expect("alice list"));
    mine.sort_unstable();
    assert_eq!(mine, vec![a1.id, a2.id]);

    assert!(service.list_alerts(None).expect("anonymous").is_empty());
}

#[tokio::test]
async fn superuser_can_manage_any_alert() {
    let (service, sync) = setup();
    let alice = principal("alice");
    let root = principal("root");
    let alert = service.create_alert(Some(&alice), "mem-high", false).expect("create");

    let outcome = service
        .update_alert(Some(&root), alert.id, true)
        .await
        .expect("root update");
    assert!(outcome.alert().is_some());
    assert_eq!(sync.pushed(), vec![(alert.id, true)]);
    assert!(service.delete_alert(Some(&root), alert.id).expect("root delete"));
}

#[test]
fn duplicate_names_are_rejected() {
    let (service, _) = setup();
    let alice = principal("alice");
    let bob = principal("bob");
    service.create_alert(Some(&alice), "cpu-high", true).expect("create");

    let err = service
        .create_alert(Some(&bob), "cpu-high", false)
        .expect_err("duplicate");
    assert!(matches!(err, AlertError::Conflict(_)));
    assert!(service.is_alert_duplicated("cpu-high").expect("check"));
    assert!(!service.is_alert_duplicated("CPU-HIGH").expect("check"));
}

#[test]
fn concurrent_creates_with_same_name_yield_one_alert() {
    let (service, _) = setup();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                service
                    .create_alert(Some(&principal("alice")), "race", true)
                    .is_ok()
            })
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().expect("join"))
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    let root = principal("root");
    assert_eq!(service.list_alerts(Some(&root)).expect("list").len(), 1);
}

#[test]
fn unknown_principal_is_unauthenticated() {
    let (service, _) = setup();
    let ghost = principal("ghost");
    let err = service
        .create_alert(Some(&ghost), "x", true)
        .expect_err("no user record");
    assert!(matches!(err, AlertError::Unauthenticated));
}
