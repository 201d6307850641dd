//! Tokio front end

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{Duration, Utc};
use futures::StreamExt;
use tokenmint_jwt::{Algorithm, AsyncTokenCodec, ClaimSet, ClaimsBuilder, TokenCodec, TokenError};

mod common;
use common::keypair;

fn claims_for(subject: &str) -> ClaimSet {
    ClaimsBuilder::new()
        .issuer("svc-a")
        .subject(subject)
        .expires_in(Duration::hours(1))
        .build()
        .expect("valid claims")
}

#[tokio::test]
async fn test_async_sign_and_verify() {
    let codec = AsyncTokenCodec::default();
    let (signing_key, verification_key) = keypair(Algorithm::ES256);
    let claims = claims_for("user-123");

    let token = codec
        .sign(claims.clone(), signing_key)
        .await
        .expect("async signing");
    let verified = codec
        .verify(token.as_str(), verification_key)
        .await
        .expect("async verification");

    assert_eq!(verified, claims);
}

#[tokio::test]
async fn test_async_matches_sync_output() {
    let (signing_key, _) = keypair(Algorithm::RS256);
    let claims = claims_for("user-123");

    let sync_token = TokenCodec::new()
        .sign(&claims, &signing_key)
        .expect("sync signing");
    let async_token = AsyncTokenCodec::new(TokenCodec::new())
        .sign(claims, signing_key)
        .await
        .expect("async signing");

    assert_eq!(sync_token, async_token);
}

#[tokio::test]
async fn test_async_verify_reports_errors() {
    let codec = AsyncTokenCodec::default();
    let (_, verification_key) = keypair(Algorithm::ES384);

    let err = codec
        .verify("not-a-token", verification_key)
        .await
        .expect_err("garbage input");
    assert!(matches!(err, TokenError::MalformedToken(_)), "got {err:?}");
}

#[tokio::test]
async fn test_sign_batch_preserves_order() {
    let codec = AsyncTokenCodec::default();
    let (signing_key, verification_key) = keypair(Algorithm::ES256);
    let subjects: Vec<String> = (0..50).map(|i| format!("user-{i}")).collect();
    let batch: Vec<ClaimSet> = subjects.iter().map(|s| claims_for(s)).collect();

    let tokens: Vec<_> = codec.sign_batch(batch, signing_key).collect().await;
    assert_eq!(tokens.len(), subjects.len());

    let sync = codec.codec();
    for (result, subject) in tokens.into_iter().zip(&subjects) {
        let token = result.expect("batch signing");
        let claims = sync
            .verify_at(token.as_str(), &verification_key, Utc::now())
            .expect("batch token verifies");
        assert_eq!(claims.subject(), Some(subject.as_str()));
    }
}

#[tokio::test]
async fn test_sign_batch_yields_per_item_errors() {
    let now = Utc::now();
    let expired = ClaimsBuilder::new()
        .expiration(now - Duration::seconds(1))
        .build_at(now - Duration::hours(1))
        .expect("valid at its own build time");
    let batch = vec![claims_for("first"), expired, claims_for("third")];

    let (signing_key, _) = keypair(Algorithm::ES256);
    let results: Vec<_> = AsyncTokenCodec::default()
        .sign_batch(batch, signing_key)
        .collect()
        .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(TokenError::Validation(_))));
    assert!(results[2].is_ok());
}

#[tokio::test]
async fn test_dropping_batch_stream_early() {
    let (signing_key, _) = keypair(Algorithm::ES256);
    let batch: Vec<ClaimSet> = (0..100).map(|i| claims_for(&format!("user-{i}"))).collect();

    let mut stream = Box::pin(AsyncTokenCodec::default().sign_batch(batch, signing_key));
    let first = stream.next().await.expect("at least one item");
    assert!(first.is_ok());
    drop(stream);
}

#[test]
fn test_outside_runtime_reports_internal_error() {
    let codec = AsyncTokenCodec::default();
    let (signing_key, verification_key) = keypair(Algorithm::ES256);

    let signed =
        futures::executor::block_on(codec.sign(claims_for("user-123"), signing_key.clone()));
    assert!(matches!(signed, Err(TokenError::Internal(_))), "got {signed:?}");

    let verified = futures::executor::block_on(codec.verify("a.b.c", verification_key));
    assert!(matches!(verified, Err(TokenError::Internal(_))), "got {verified:?}");

    let batch = vec![claims_for("first"), claims_for("second")];
    let results: Vec<_> =
        futures::executor::block_on(codec.sign_batch(batch, signing_key).collect());
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(TokenError::Internal(_))));
}
