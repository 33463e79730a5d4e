//! Session lifecycle against an in-process backend stub.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{Reply, StubServer, jwt, unreachable_base_url, user_json};
use daybook_auth::{AuthClient, AuthError, MemoryStore, RegisterRequest, SessionManager, StoredSession};
use daybook_core::enums::SessionState;
use daybook_core::errors::ErrorKind;
use pretty_assertions::assert_eq;
use serde_json::json;

fn manager(base_url: &str, store: &MemoryStore) -> SessionManager {
    let client = AuthClient::new(base_url, Duration::from_secs(5)).expect("client");
    SessionManager::new(client, Box::new(store.clone()))
}

fn stored(access: &str, refresh: &str) -> StoredSession {
    StoredSession {
        access_token: access.into(),
        refresh_token: refresh.into(),
        user: None,
    }
}

/// Accepts access token `good-access` and refresh token `good-refresh`,
/// which is exchanged for `fresh-access`.
fn backend() -> StubServer {
    StubServer::start(|request| {
        if request.is("GET", "/api/auth/user/") {
            return match request.bearer() {
                Some("good-access" | "fresh-access") => Reply::json(200, user_json()),
                _ => Reply::unauthorized(),
            };
        }
        if request.is("POST", "/api/auth/token/refresh/") {
            return if request.json()["refresh"] == "good-refresh" {
                Reply::json(200, json!({"access": "fresh-access"}))
            } else {
                Reply::json(401, json!({"detail": "Token is invalid or expired", "code": "token_not_valid"}))
            };
        }
        if request.is("POST", "/api/auth/login/") {
            return if request.json()["password"] == "correct horse" {
                Reply::json(
                    200,
                    json!({
                        "user": user_json(),
                        "tokens": {"access": "good-access", "refresh": "good-refresh"}
                    }),
                )
            } else {
                Reply::json(401, json!({"detail": "No active account found with the given credentials"}))
            };
        }
        if request.is("POST", "/api/auth/logout/") {
            return Reply::json(200, json!({"message": "Successfully logged out"}));
        }
        Reply::status(404)
    })
}

// ---------------------------------------------------------------------------
// bootstrap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bootstrap_with_expired_access_and_valid_refresh_ends_authenticated() {
    let server = backend();
    let store = MemoryStore::with_session(stored("expired-access", "good-refresh"));
    let mut session = manager(&server.base_url, &store);

    let state = session.bootstrap().await.expect("bootstrap");

    assert_eq!(state, SessionState::Authenticated);
    assert_eq!(session.access_token(), Some("fresh-access"));
    assert_eq!(session.user().map(|u| u.email.as_str()), Some("ada@example.com"));

    let persisted = store.snapshot().expect("persisted session");
    assert_eq!(persisted.access_token, "fresh-access");
    assert_eq!(persisted.refresh_token, "good-refresh");
    assert!(persisted.user.is_some());

    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 1);
    assert_eq!(server.count("GET", "/api/auth/user/"), 2);
}

#[tokio::test]
async fn bootstrap_with_both_tokens_invalid_ends_anonymous_and_clears_storage() {
    let server = backend();
    let store = MemoryStore::with_session(stored("expired-access", "expired-refresh"));
    let mut session = manager(&server.base_url, &store);

    let state = session.bootstrap().await.expect("bootstrap");

    assert_eq!(state, SessionState::Anonymous);
    assert_eq!(session.access_token(), None);
    assert!(session.user().is_none());
    assert_eq!(store.snapshot(), None);
    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 1);
    assert_eq!(server.count("GET", "/api/auth/user/"), 1);
}

#[tokio::test]
async fn bootstrap_with_valid_access_skips_refresh() {
    let server = backend();
    let store = MemoryStore::with_session(stored("good-access", "good-refresh"));
    let mut session = manager(&server.base_url, &store);

    assert_eq!(
        session.bootstrap().await.expect("bootstrap"),
        SessionState::Authenticated
    );
    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 0);
    assert_eq!(
        store.snapshot().and_then(|s| s.user).map(|u| u.id),
        Some(4)
    );
}

#[tokio::test]
async fn bootstrap_without_stored_tokens_makes_no_requests() {
    let server = backend();
    let store = MemoryStore::with_session(stored("good-access", ""));
    let mut session = manager(&server.base_url, &store);

    assert_eq!(
        session.bootstrap().await.expect("bootstrap"),
        SessionState::Anonymous
    );
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn bootstrap_network_failure_keeps_stored_tokens() {
    let store = MemoryStore::with_session(stored("good-access", "good-refresh"));
    let mut session = manager(&unreachable_base_url(), &store);

    let err = session.bootstrap().await.expect_err("network failure");

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(session.access_token(), None);
    assert_eq!(store.snapshot(), Some(stored("good-access", "good-refresh")));
}

#[tokio::test]
async fn bootstrap_refresh_server_error_discards_stored_tokens() {
    let server = StubServer::start(|request| {
        if request.is("GET", "/api/auth/user/") {
            return Reply::unauthorized();
        }
        if request.is("POST", "/api/auth/token/refresh/") {
            return Reply::json(500, json!({"detail": "server error"}));
        }
        Reply::status(404)
    });
    let store = MemoryStore::with_session(stored("expired-access", "some-refresh"));
    let mut session = manager(&server.base_url, &store);

    let err = session.bootstrap().await.expect_err("refresh failed");

    assert_eq!(err.kind(), ErrorKind::Other);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(session.access_token(), None);
    assert_eq!(store.snapshot(), None);
    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 1);
    assert_eq!(server.count("GET", "/api/auth/user/"), 1);
}

// ---------------------------------------------------------------------------
// login / register
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_stores_tokens_and_user() {
    let server = backend();
    let store = MemoryStore::new();
    let mut session = manager(&server.base_url, &store);

    let user = session
        .login("ada@example.com", "correct horse")
        .await
        .expect("login");
    assert_eq!(user.display_name(), "Ada Lovelace");

    assert!(session.is_authenticated());
    assert_eq!(session.access_token(), Some("good-access"));
    let persisted = store.snapshot().expect("persisted");
    assert_eq!(persisted.refresh_token, "good-refresh");
}

#[tokio::test]
async fn failed_login_leaves_state_untouched() {
    let server = backend();
    let store = MemoryStore::new();
    let mut session = manager(&server.base_url, &store);

    let err = session
        .login("ada@example.com", "wrong")
        .await
        .expect_err("rejected");
    assert!(matches!(err, AuthError::InvalidCredentials(_)));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(store.snapshot(), None);

    session
        .login("ada@example.com", "correct horse")
        .await
        .expect("login");
    let err = session
        .login("ada@example.com", "wrong")
        .await
        .expect_err("rejected");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.access_token(), Some("good-access"));
}

#[tokio::test]
async fn login_network_failure_is_typed() {
    let store = MemoryStore::new();
    let mut session = manager(&unreachable_base_url(), &store);

    let err = session
        .login("ada@example.com", "correct horse")
        .await
        .expect_err("unreachable");
    assert!(matches!(err, AuthError::Network(_)));
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn register_surfaces_field_errors() {
    let server = StubServer::start(|request| {
        if request.json()["password"] == request.json()["password2"] {
            Reply::json(
                201,
                json!({"user": user_json(), "tokens": {"access": "a", "refresh": "r"}}),
            )
        } else {
            Reply::json(400, json!({"password": ["Password fields didn't match."]}))
        }
    });
    let store = MemoryStore::new();
    let mut session = manager(&server.base_url, &store);

    let mut request = RegisterRequest {
        email: "ada@example.com".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        password: "s3cret-pass".into(),
        password2: "different".into(),
    };
    let err = session.register(&request).await.expect_err("mismatch");
    let AuthError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("password"), ["Password fields didn't match."]);
    assert_eq!(session.state(), SessionState::Anonymous);

    request.password2 = request.password.clone();
    session.register(&request).await.expect("register");
    assert!(session.is_authenticated());
    assert_eq!(server.requests()[1].path(), "/api/auth/register/");
}

// ---------------------------------------------------------------------------
// logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_clears_storage_when_backend_is_unreachable() {
    let store = MemoryStore::with_session(stored("good-access", "good-refresh"));
    let mut session = manager(&unreachable_base_url(), &store);

    session.logout().await.expect("logout");

    assert_eq!(store.snapshot(), None);
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn logout_notifies_backend_with_refresh_token() {
    let server = backend();
    let store = MemoryStore::new();
    let mut session = manager(&server.base_url, &store);
    session
        .login("ada@example.com", "correct horse")
        .await
        .expect("login");

    session.logout().await.expect("logout");

    let logout = server
        .requests()
        .into_iter()
        .find(|r| r.is("POST", "/api/auth/logout/"))
        .expect("logout request");
    assert_eq!(logout.json()["refresh_token"], "good-refresh");
    assert_eq!(logout.bearer(), Some("good-access"));
    assert_eq!(store.snapshot(), None);
    assert_eq!(session.access_token(), None);
}

#[tokio::test]
async fn logout_ignores_backend_errors() {
    let server = StubServer::start(|_| Reply::status(500));
    let store = MemoryStore::with_session(stored("good-access", "good-refresh"));
    let mut session = manager(&server.base_url, &store);

    session.logout().await.expect("logout");
    assert_eq!(store.snapshot(), None);
}

// ---------------------------------------------------------------------------
// send_authorized
// ---------------------------------------------------------------------------

async fn signed_in(server: &StubServer, store: &MemoryStore) -> SessionManager {
    let mut session = manager(&server.base_url, store);
    session
        .login("ada@example.com", "correct horse")
        .await
        .expect("login");
    session
}

#[tokio::test]
async fn rejected_request_is_refreshed_and_resent_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let server = StubServer::start(move |request| {
        if request.is("POST", "/api/auth/login/") {
            return Reply::json(
                200,
                json!({"user": user_json(), "tokens": {"access": "old-access", "refresh": "good-refresh"}}),
            );
        }
        if request.is("POST", "/api/auth/token/refresh/") {
            return Reply::json(200, json!({"access": "new-access", "refresh": "rotated-refresh"}));
        }
        counter.fetch_add(1, Ordering::SeqCst);
        match request.bearer() {
            Some("new-access") => Reply::json(200, json!([])),
            _ => Reply::unauthorized(),
        }
    });
    let store = MemoryStore::new();
    let mut session = signed_in(&server, &store).await;
    let url = format!("{}/api/diary/entries/", server.base_url);

    let resp = session
        .send_authorized(|http| http.get(&url))
        .await
        .expect("request");

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 1);
    assert_eq!(session.access_token(), Some("new-access"));
    let persisted = store.snapshot().expect("persisted");
    assert_eq!(persisted.access_token, "new-access");
    assert_eq!(persisted.refresh_token, "rotated-refresh");
}

#[tokio::test]
async fn failed_refresh_forces_logout() {
    let server = StubServer::start(|request| {
        if request.is("POST", "/api/auth/login/") {
            return Reply::json(
                200,
                json!({"user": user_json(), "tokens": {"access": "old-access", "refresh": "revoked"}}),
            );
        }
        Reply::unauthorized()
    });
    let store = MemoryStore::new();
    let mut session = signed_in(&server, &store).await;
    let url = format!("{}/api/tracker/habits/", server.base_url);

    let err = session
        .send_authorized(|http| http.get(&url))
        .await
        .expect_err("expired");

    assert!(matches!(err, AuthError::SessionExpired));
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(store.snapshot(), None);
    assert_eq!(server.count("GET", "/api/tracker/habits/"), 1);
    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 1);
}

#[tokio::test]
async fn unavailable_refresh_also_forces_logout() {
    let server = StubServer::start(|request| {
        if request.is("POST", "/api/auth/login/") {
            return Reply::json(
                200,
                json!({"user": user_json(), "tokens": {"access": "a1", "refresh": "r1"}}),
            );
        }
        if request.is("POST", "/api/auth/token/refresh/") {
            return Reply::json(503, json!({"detail": "unavailable"}));
        }
        if request.is("POST", "/api/auth/logout/") {
            return Reply::json(200, json!({"message": "Successfully logged out"}));
        }
        Reply::unauthorized()
    });
    let store = MemoryStore::new();
    let mut session = signed_in(&server, &store).await;
    let url = format!("{}/api/diary/entries/", server.base_url);

    let err = session
        .send_authorized(|http| http.get(&url))
        .await
        .expect_err("expired");

    assert!(matches!(err, AuthError::SessionExpired));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(session.access_token(), None);
    assert_eq!(store.snapshot(), None);
    assert_eq!(server.count("GET", "/api/diary/entries/"), 1);
    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 1);
}

#[tokio::test]
async fn second_rejection_is_not_retried_again() {
    let server = StubServer::start(|request| {
        if request.is("POST", "/api/auth/login/") {
            return Reply::json(
                200,
                json!({"user": user_json(), "tokens": {"access": "old-access", "refresh": "good-refresh"}}),
            );
        }
        if request.is("POST", "/api/auth/token/refresh/") {
            return Reply::json(200, json!({"access": "new-access"}));
        }
        Reply::unauthorized()
    });
    let store = MemoryStore::new();
    let mut session = signed_in(&server, &store).await;
    let url = format!("{}/api/self-reflection/reflections/today/", server.base_url);

    let err = session
        .send_authorized(|http| http.get(&url))
        .await
        .expect_err("expired");

    assert!(matches!(err, AuthError::SessionExpired));
    assert_eq!(
        server.count("GET", "/api/self-reflection/reflections/today/"),
        2
    );
    assert_eq!(server.count("POST", "/api/auth/token/refresh/"), 1);
    assert_eq!(store.snapshot(), None);
}

#[tokio::test]
async fn anonymous_session_cannot_send_authorized_requests() {
    let store = MemoryStore::new();
    let mut session = manager(&unreachable_base_url(), &store);
    let err = session
        .send_authorized(|http| http.get("http://127.0.0.1:1/"))
        .await
        .expect_err("anonymous");
    assert!(matches!(err, AuthError::NotAuthenticated));
}

#[tokio::test]
async fn change_password_goes_through_the_authorized_path() {
    let server = StubServer::start(|request| {
        if request.is("POST", "/api/auth/login/") {
            return Reply::json(
                200,
                json!({"user": user_json(), "tokens": {"access": jwt(3600), "refresh": "good-refresh"}}),
            );
        }
        if request.is("POST", "/api/auth/change-password/") {
            return if request.json()["old_password"] == "correct horse" {
                Reply::json(200, json!({"message": "Password changed"}))
            } else {
                Reply::json(400, json!({"old_password": ["Wrong password."]}))
            };
        }
        Reply::status(404)
    });
    let store = MemoryStore::new();
    let mut session = signed_in(&server, &store).await;
    assert!(session.access_expires_at().is_some());
    assert!(!session.access_expiring());

    let err = session
        .change_password("nope", "battery staple")
        .await
        .expect_err("wrong old password");
    assert_eq!(err.kind(), ErrorKind::Validation);

    session
        .change_password("correct horse", "battery staple")
        .await
        .expect("changed");
    let change = server
        .requests()
        .into_iter()
        .rfind(|r| r.is("POST", "/api/auth/change-password/"))
        .expect("request");
    assert_eq!(change.json()["new_password"], "battery staple");
}
