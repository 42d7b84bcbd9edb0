//! Integration tests for the sqlite config store (in-memory database).

use chrono::Utc;

use avaliai_cli::auth::Session;
use avaliai_cli::config::{Config, Profile};

fn profile(name: &str, host: &str) -> Profile {
    Profile {
        name: name.to_string(),
        host: host.to_string(),
    }
}

fn session(access: &str) -> Session {
    Session {
        access_token: access.to_string(),
        refresh_token: format!("{}-refresh", access),
        username: Some("prof.silva".to_string()),
        obtained_at: Utc::now(),
    }
}

#[tokio::test]
async fn profiles_list_sorted_by_name() {
    let config = Config::new_test().await.unwrap();
    config
        .add_profile(profile("producao", "https://api.avaliai.example"))
        .await
        .unwrap();
    config
        .add_profile(profile("local", "http://localhost:8000"))
        .await
        .unwrap();

    let names: Vec<_> = config
        .list_profiles()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["local", "producao"]);
}

#[tokio::test]
async fn add_profile_replaces_host_on_same_name() {
    let config = Config::new_test().await.unwrap();
    config
        .add_profile(profile("local", "http://localhost:8000"))
        .await
        .unwrap();
    config
        .add_profile(profile("local", "http://localhost:9000"))
        .await
        .unwrap();

    let stored = config.get_profile("local").await.unwrap().unwrap();
    assert_eq!(stored.host, "http://localhost:9000");
    assert_eq!(config.list_profiles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_profile_drops_its_session() {
    let config = Config::new_test().await.unwrap();
    config
        .add_profile(profile("local", "http://localhost:8000"))
        .await
        .unwrap();
    config.save_session("local", session("a1")).await.unwrap();

    config.remove_profile("local").await.unwrap();

    assert!(config.get_profile("local").await.unwrap().is_none());
    assert!(config.get_session("local").await.unwrap().is_none());
}

#[tokio::test]
async fn remove_missing_profile_errors() {
    let config = Config::new_test().await.unwrap();
    assert!(config.remove_profile("ghost").await.is_err());
}

#[tokio::test]
async fn sessions_are_isolated_per_profile() {
    let config = Config::new_test().await.unwrap();
    config
        .add_profile(profile("a", "http://a.test"))
        .await
        .unwrap();
    config
        .add_profile(profile("b", "http://b.test"))
        .await
        .unwrap();

    config.save_session("a", session("token-a")).await.unwrap();
    config.save_session("b", session("token-b")).await.unwrap();

    config.clear_session("a").await.unwrap();

    assert!(config.get_session("a").await.unwrap().is_none());
    let b = config.get_session("b").await.unwrap().unwrap();
    assert_eq!(b.access_token, "token-b");
}
