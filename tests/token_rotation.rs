//! Rotation-engine behavior over the in-memory infrastructure: single-use
//! enforcement, expiry, anomaly notification, and race safety.

use chrono::Duration;
use std::sync::Arc;
use tokenmill::application_impl::*;
use tokenmill::application_port::*;
use tokenmill::domain_model::*;
use tokenmill::domain_port::*;
use tokenmill::infra_memory::*;
use uuid::Uuid;

const SIGNING_KEY: &[u8] = b"test-signing-key";
const CLIENT_IP: &str = "10.0.0.1";

struct Harness {
    service: Arc<RealTokenService>,
    users: Arc<MemoryUserRepo>,
    tokens: Arc<MemoryTokenRepo>,
    notifier: Arc<MemoryNotifier>,
    codec: Arc<JwtHs512Codec>,
}

fn harness_with_refresh_ttl(refresh_ttl: Duration) -> Harness {
    let users = Arc::new(MemoryUserRepo::new());
    let tokens = Arc::new(MemoryTokenRepo::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let codec = Arc::new(JwtHs512Codec::new(JwtConfig {
        access_ttl: std::time::Duration::from_secs(15 * 60),
        signing_key: SIGNING_KEY.to_vec(),
    }));

    let service = Arc::new(RealTokenService::new(
        users.clone(),
        tokens.clone(),
        codec.clone(),
        Arc::new(Argon2SecretGenerator::new()),
        notifier.clone(),
        refresh_ttl,
    ));

    Harness {
        service,
        users,
        tokens,
        notifier,
        codec,
    }
}

fn harness() -> Harness {
    harness_with_refresh_ttl(Duration::hours(24))
}

fn seed_user(h: &Harness) -> UserId {
    let user_id = UserId(Uuid::new_v4());
    h.users.insert_user(UserRecord {
        user_id,
        email: "user@example.com".to_string(),
    });
    user_id
}

#[tokio::test]
async fn create_tokens_issues_pair_for_known_user() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h
        .service
        .create_tokens(user_id, CLIENT_IP)
        .await
        .expect("create should succeed");

    assert!(!pair.access_token.0.is_empty());
    assert_eq!(pair.refresh_token.0.len(), 43);
    assert_eq!(h.tokens.record_count(), 1);

    let parsed = h
        .codec
        .parse_access_token(&pair.access_token)
        .await
        .expect("freshly issued token should parse");
    assert!(matches!(parsed, ParsedAccessToken::Valid(_)));
    assert_eq!(parsed.claims().sub, user_id);
    assert_eq!(parsed.claims().client_ip, CLIENT_IP);
}

#[tokio::test]
async fn create_tokens_rejects_unknown_user() {
    let h = harness();

    let result = h
        .service
        .create_tokens(UserId(Uuid::new_v4()), "1.2.3.4")
        .await;

    assert!(matches!(result, Err(AuthError::UserNotFound)));
    assert_eq!(h.tokens.record_count(), 0, "nothing may be persisted");
}

#[tokio::test]
async fn duplicate_digest_is_a_session_conflict() {
    let h = harness();
    let user_id = seed_user(&h);

    let now = chrono::Utc::now();
    let token = NewRefreshToken {
        user_id,
        secret_digest: "argon2-digest".to_string(),
        issued_at: now,
        expires_at: now + Duration::hours(24),
        client_ip: CLIENT_IP.to_string(),
    };

    h.tokens
        .create_refresh_token(token.clone())
        .await
        .expect("first insert must succeed");
    let duplicate = h.tokens.create_refresh_token(token).await;

    assert!(matches!(duplicate, Err(AuthError::SessionAlreadyExists)));
    assert_eq!(h.tokens.record_count(), 1);
}

#[tokio::test]
async fn refresh_rotates_even_with_unexpired_access_token() {
    let h = harness();
    let user_id = seed_user(&h);

    let first = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();
    let second = h
        .service
        .refresh_tokens(&first.refresh_token.0, &first.access_token.0)
        .await
        .expect("an unexpired access token must still be accepted for refresh");

    assert_ne!(second.access_token.0, first.access_token.0);
    assert_ne!(second.refresh_token.0, first.refresh_token.0);
    assert_eq!(h.tokens.record_count(), 2);
}

#[tokio::test]
async fn consumed_secret_cannot_be_replayed() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();
    h.service
        .refresh_tokens(&pair.refresh_token.0, &pair.access_token.0)
        .await
        .unwrap();

    let replay = h
        .service
        .refresh_tokens(&pair.refresh_token.0, &pair.access_token.0)
        .await;

    assert!(matches!(replay, Err(AuthError::RefreshTokenAlreadyUsed)));
}

#[tokio::test]
async fn unknown_secret_is_not_found() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();
    let result = h
        .service
        .refresh_tokens("garbage-secret", &pair.access_token.0)
        .await;

    assert!(matches!(result, Err(AuthError::RefreshTokenNotFound)));
}

#[tokio::test]
async fn user_without_sessions_is_rejected() {
    let h = harness();
    let user_id = seed_user(&h);

    let (access, _) = h
        .codec
        .issue_access_token(user_id, CLIENT_IP)
        .await
        .unwrap();
    let result = h.service.refresh_tokens("whatever", &access.0).await;

    assert!(matches!(
        result,
        Err(AuthError::NoSessionsFoundWithThisUserID)
    ));
}

#[tokio::test]
async fn expired_record_is_rejected() {
    let h = harness_with_refresh_ttl(Duration::seconds(-60));
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();
    let result = h
        .service
        .refresh_tokens(&pair.refresh_token.0, &pair.access_token.0)
        .await;

    assert!(matches!(result, Err(AuthError::RefreshTokenExpired)));
}

#[tokio::test]
async fn tampered_access_token_refuses_refresh() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();
    let mut tampered = pair.access_token.0.clone();
    tampered.pop();

    let result = h
        .service
        .refresh_tokens(&pair.refresh_token.0, &tampered)
        .await;

    assert!(matches!(result, Err(AuthError::ParsingAccessToken)));
}

#[tokio::test]
async fn ip_mismatch_notifies_but_still_rotates() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();

    // Same user, same secret, but an access token claiming a different IP.
    let (foreign_access, _) = h
        .codec
        .issue_access_token(user_id, "203.0.113.9")
        .await
        .unwrap();

    let rotated = h
        .service
        .refresh_tokens(&pair.refresh_token.0, &foreign_access.0)
        .await
        .expect("mismatch is advisory, refresh must succeed");
    assert_ne!(rotated.refresh_token.0, pair.refresh_token.0);

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1, "exactly one warning attempt");
    assert_eq!(sent[0].to_email, "user@example.com");
    assert!(sent[0].body.contains("203.0.113.9"));

    // The replacement session stays bound to the claims' IP, not the
    // record's original one.
    let records = h.tokens.list_refresh_tokens_by_user(user_id).await.unwrap();
    let fresh = records.iter().find(|r| !r.used).unwrap();
    assert_eq!(fresh.client_ip, "203.0.113.9");
}

#[tokio::test]
async fn matching_ip_sends_no_warning() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();
    h.service
        .refresh_tokens(&pair.refresh_token.0, &pair.access_token.0)
        .await
        .unwrap();

    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn notification_failure_never_blocks_rotation() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();
    let (foreign_access, _) = h
        .codec
        .issue_access_token(user_id, "198.51.100.7")
        .await
        .unwrap();

    h.notifier.fail_next();
    let result = h
        .service
        .refresh_tokens(&pair.refresh_token.0, &foreign_access.0)
        .await;

    assert!(result.is_ok(), "delivery failure is logged, not surfaced");
}

#[tokio::test]
async fn concurrent_refreshes_spend_a_secret_exactly_once() {
    let h = harness();
    let user_id = seed_user(&h);

    let pair = h.service.create_tokens(user_id, CLIENT_IP).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = h.service.clone();
        let secret = pair.refresh_token.0.clone();
        let access = pair.access_token.0.clone();
        handles.push(tokio::spawn(async move {
            service.refresh_tokens(&secret, &access).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AuthError::RefreshTokenAlreadyUsed) | Err(AuthError::RefreshTokenNotFound) => {}
            Err(other) => panic!("unexpected failure mode: {other}"),
        }
    }

    assert_eq!(successes, 1);
}
