mod common;

use common::{user, MockApi};
use lebanon_tourism::client::{
    models::Registration,
    session::USER_KEY,
    AuthSession, ClientError, FileSessionStore, MemorySessionStore, Preferences, SessionStore, Theme, TourismApi,
};
use std::sync::Arc;

fn api() -> Arc<dyn TourismApi> {
    Arc::new(MockApi::new().with_user(user(1, "Rana"), "pw").with_user(user(2, "Omar"), "pw"))
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&path).unwrap());
        let auth = AuthSession::restore(api(), store);
        assert!(!auth.is_authenticated());
        auth.login("rana@example.com", "pw").await.unwrap();
    }

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&path).unwrap());
    let auth = AuthSession::restore(api(), store);
    assert_eq!(auth.current_user(), Some(user(1, "Rana")));

    auth.logout().unwrap();
    let store = FileSessionStore::open(&path).unwrap();
    assert_eq!(store.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_failed_login_persists_nothing() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = AuthSession::restore(api(), store.clone());

    let err = auth.login("rana@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(!auth.is_authenticated());
    assert_eq!(store.get(USER_KEY).unwrap(), None);
    assert_eq!(auth.generation(), 0);

    let err = auth.login("", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_corrupt_saved_user_is_discarded() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    store.set(USER_KEY, "{not json").unwrap();

    let auth = AuthSession::restore(api(), store.clone());
    assert!(!auth.is_authenticated());
    assert_eq!(store.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_generation_tracks_identity_changes() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = AuthSession::restore(api(), store);
    let mut rx = auth.subscribe();

    auth.login("rana@example.com", "pw").await.unwrap();
    assert_eq!(auth.generation(), 1);
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.id), Some(1));

    // Same identity again is not a change.
    auth.login("rana@example.com", "pw").await.unwrap();
    assert_eq!(auth.generation(), 1);

    auth.login("omar@example.com", "pw").await.unwrap();
    assert_eq!(auth.generation(), 2);

    auth.logout().unwrap();
    assert_eq!(auth.generation(), 3);
    assert_eq!(auth.current_user(), None);
}

#[tokio::test]
async fn test_register_validates_and_reports_conflict() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = AuthSession::restore(api(), store);

    let blank = Registration { name: "Maya".into(), email: "maya@example.com".into(), password: String::new() };
    assert!(matches!(auth.register(&blank).await, Err(ClientError::Validation(_))));

    let taken = Registration { name: "Rana".into(), email: "rana@example.com".into(), password: "pw".into() };
    assert!(matches!(auth.register(&taken).await, Err(ClientError::Conflict(_))));

    let fresh = Registration { name: "Maya".into(), email: "maya@example.com".into(), password: "pw".into() };
    auth.register(&fresh).await.unwrap();

    // Registering does not sign in.
    assert!(!auth.is_authenticated());
    auth.login("maya@example.com", "pw").await.unwrap();
    assert_eq!(auth.current_user().unwrap().name, "Maya");
}

#[tokio::test]
async fn test_theme_persists_next_to_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&path).unwrap());
        let auth = AuthSession::restore(api(), store.clone());
        auth.login("omar@example.com", "pw").await.unwrap();
        assert_eq!(Preferences::new(store).toggle_theme().unwrap(), Theme::Dark);
    }

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&path).unwrap());
    let auth = AuthSession::restore(api(), store.clone());
    let prefs = Preferences::new(store);
    assert_eq!(prefs.theme(), Theme::Dark);

    // Logging out keeps the theme.
    auth.logout().unwrap();
    assert_eq!(prefs.theme(), Theme::Dark);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_generation_bumped_before_identity_broadcast() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = Arc::new(AuthSession::restore(api(), store));
    let mut rx = auth.subscribe();

    let observer = {
        let auth = auth.clone();
        tokio::spawn(async move {
            let mut seen = 0u64;
            while rx.changed().await.is_ok() {
                seen += 1;
                let signed_in = rx.borrow_and_update().is_some();
                let generation = auth.generation();
                // Every broadcast is preceded by its bump.
                assert!(generation >= seen, "generation {generation} behind {seen} changes");
                // Odd generations are signed in, even ones signed out.
                if generation == seen {
                    assert_eq!(signed_in, generation % 2 == 1);
                }
            }
        })
    };

    for _ in 0..200 {
        auth.login("rana@example.com", "pw").await.unwrap();
        auth.logout().unwrap();
    }
    assert_eq!(auth.generation(), 400);

    // The observer holds the session, so the channel never closes.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    observer.abort();
    if let Err(e) = observer.await {
        if e.is_panic() {
            std::panic::resume_unwind(e.into_panic());
        }
    }
}
