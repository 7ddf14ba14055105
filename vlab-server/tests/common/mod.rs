//! Shared helpers for server integration tests

use std::sync::Arc;

use axum_test::TestServer;
use vlab_core::{LearnerIdentity, StaticTokenProvider};
use vlab_server::{AppState, create_router};
use vlab_store::{LabStore, TursoLabStore, seed_default_catalog};

/// Token the test identity provider accepts
pub const LEARNER_TOKEN: &str = "learner-token";
/// User id behind [`LEARNER_TOKEN`]
pub const LEARNER_ID: &str = "user_learner";
/// Token for a second learner
pub const OTHER_TOKEN: &str = "other-token";

/// Bearer header value for the test learner
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Spin up a TestServer over a seeded in-memory store.
///
/// Returns the store too so tests can assert on persistence directly.
pub async fn create_test_server() -> (TestServer, Arc<TursoLabStore>) {
    let store = Arc::new(TursoLabStore::new_memory().await.unwrap());
    seed_default_catalog(&store).await.unwrap();

    let identity = StaticTokenProvider::new()
        .with_token(LEARNER_TOKEN, LearnerIdentity::new(LEARNER_ID))
        .with_token(OTHER_TOKEN, LearnerIdentity::new("user_other"));

    let state = Arc::new(AppState::new(
        store.clone() as Arc<dyn LabStore>,
        Arc::new(identity),
    ));
    let server = TestServer::new(create_router(state)).unwrap();
    (server, store)
}

/// The seeded experiment's id, looked up through the store
pub async fn seeded_experiment_id(store: &TursoLabStore) -> String {
    store
        .get_experiment("raspberry-pi-intro")
        .await
        .unwrap()
        .expect("seeded experiment")
        .id
}
