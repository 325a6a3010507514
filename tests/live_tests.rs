//! Calls against the real API.
//!
//! Run with: DRIBBBLE_ACCESS_TOKEN=... cargo test --test live_tests -- --ignored

use dribbble::{Config, DribbbleClient, ShotsQuery, USER_SELF};

fn access_token() -> String {
    std::env::var("DRIBBBLE_ACCESS_TOKEN").expect("DRIBBBLE_ACCESS_TOKEN must be set")
}

fn client() -> DribbbleClient {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    DribbbleClient::with_config(Config::from_env()).expect("failed to build client")
}

#[tokio::test]
#[ignore]
async fn test_live_me() {
    let user = client().me(&access_token()).await.expect("failed to get profile");
    assert!(!user.username.is_empty(), "expected a username");
    println!("Logged in as {} ({} followers)", user.username, user.followers_count);
}

#[tokio::test]
#[ignore]
async fn test_live_shots() {
    let shots = client()
        .shots(&access_token(), ShotsQuery::new().page(1))
        .await
        .expect("failed to list shots");

    for shot in &shots {
        assert!(shot.id > 0);
    }
    println!("Got {} shots", shots.len());
}

#[tokio::test]
#[ignore]
async fn test_live_own_shots_and_buckets() {
    let client = client();
    let token = access_token();

    let shots = client
        .user_shots(USER_SELF, None, &token, None)
        .await
        .expect("failed to list own shots");
    let buckets = client
        .my_buckets(&token, Some(1))
        .await
        .expect("failed to list buckets");

    println!("{} shots, {} buckets", shots.len(), buckets.len());
}

#[tokio::test]
#[ignore]
async fn test_live_bad_token() {
    let err = client().me("definitely-not-a-token").await.unwrap_err();
    assert_eq!(err.status_code(), Some(401), "unexpected error: {}", err);
}
