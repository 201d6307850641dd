//! Structural problems surface as `MalformedToken`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use p256::ecdsa::{signature::Signer, Signature};
use serde_json::{json, Value};
use tokenmint_jwt::{ClaimSet, TokenCodec, TokenError, VerificationKey};

mod common;
use common::fixed_now;

/// Fixed P-256 key for hand-assembled tokens.
fn forging_key() -> p256::ecdsa::SigningKey {
    p256::ecdsa::SigningKey::from_slice(&[7u8; 32]).expect("valid P-256 scalar")
}

fn verification_key() -> VerificationKey {
    VerificationKey::es256(p256::ecdsa::VerifyingKey::from(&forging_key()))
}

/// Correctly signed token over arbitrary header and payload bytes.
fn signed(header: &[u8], payload: &[u8]) -> String {
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let signature: Signature = forging_key().sign(signing_input.as_bytes());
    format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    )
}

fn signed_payload(payload: &Value) -> String {
    signed(
        br#"{"alg":"ES256","typ":"JWT"}"#,
        payload.to_string().as_bytes(),
    )
}

fn verify(token: &str) -> Result<ClaimSet, TokenError> {
    TokenCodec::new().verify_at(token, &verification_key(), fixed_now())
}

fn assert_malformed(token: &str) {
    match verify(token) {
        Err(TokenError::MalformedToken(_)) => {}
        other => panic!("expected MalformedToken for {token:?}, got {other:?}"),
    }
}

#[test]
fn test_hand_signed_token_verifies() {
    let exp = fixed_now().timestamp() + 60;
    let claims = verify(&signed_payload(&json!({"sub": "user-123", "exp": exp})))
        .expect("well-formed token");
    assert_eq!(claims.subject(), Some("user-123"));
    assert_eq!(claims.expiration(), exp);
}

#[test]
fn test_fractional_numeric_dates_truncate_to_seconds() {
    let exp = fixed_now().timestamp() + 60;
    let issued = fixed_now().timestamp() - 10;
    let claims = verify(&signed_payload(
        &json!({"exp": exp as f64 + 0.5, "iat": issued as f64 + 0.75}),
    ))
    .expect("fractional dates are valid NumericDates");

    assert_eq!(claims.expiration(), exp);
    assert_eq!(claims.issued_at(), Some(issued));

    let expired = fixed_now().timestamp() as f64 - 0.5;
    assert!(matches!(
        verify(&signed_payload(&json!({"exp": expired}))),
        Err(TokenError::Expired { .. })
    ));
}

#[test]
fn test_wrong_segment_count() {
    assert_malformed("");
    assert_malformed("abc");
    assert_malformed("abc.def");

    let valid = signed_payload(&json!({"exp": fixed_now().timestamp() + 60}));
    assert_malformed(&format!("{valid}.extra"));
    assert_malformed(&format!("{valid}."));
}

#[test]
fn test_invalid_base64url() {
    let valid = signed_payload(&json!({"exp": fixed_now().timestamp() + 60}));
    let segments: Vec<&str> = valid.split('.').collect();

    // Padding is not part of the compact encoding
    assert_malformed(&format!("{}=.{}.{}", segments[0], segments[1], segments[2]));
    // Standard-alphabet characters
    assert_malformed(&format!("{}.{}+/.{}", segments[0], segments[1], segments[2]));
    assert_malformed(&format!("{}.{}.{}*", segments[0], segments[1], segments[2]));
    // Whitespace
    assert_malformed(&format!(" {}.{}.{}", segments[0], segments[1], segments[2]));
}

#[test]
fn test_header_must_be_a_json_object_with_alg_and_typ() {
    let payload = json!({"exp": fixed_now().timestamp() + 60}).to_string();

    assert_malformed(&signed(b"not json", payload.as_bytes()));
    assert_malformed(&signed(b"[\"ES256\"]", payload.as_bytes()));
    assert_malformed(&signed(br#"{"typ":"JWT"}"#, payload.as_bytes()));
    assert_malformed(&signed(br#"{"alg":"ES256"}"#, payload.as_bytes()));
    assert_malformed(&signed(br#"{"alg":256,"typ":"JWT"}"#, payload.as_bytes()));
}

#[test]
fn test_payload_must_be_a_json_object() {
    let header = br#"{"alg":"ES256","typ":"JWT"}"#;
    assert_malformed(&signed(header, b"not json"));
    assert_malformed(&signed(header, b"[1, 2, 3]"));
    assert_malformed(&signed(header, b"\"exp\""));
}

#[test]
fn test_payload_registered_claim_types() {
    let exp = fixed_now().timestamp() + 60;

    assert_malformed(&signed_payload(&json!({"sub": "user-123"})));
    assert_malformed(&signed_payload(&json!({"exp": exp.to_string()})));
    assert_malformed(&signed_payload(&json!({"exp": 1e30})));
    assert_malformed(&signed_payload(&json!({"exp": exp, "iss": 42})));
    assert_malformed(&signed_payload(&json!({"exp": exp, "nbf": "soon"})));
    assert_malformed(&signed_payload(&json!({"exp": exp, "aud": [1, 2]})));
}

#[test]
fn test_signature_is_checked_before_payload() {
    let token = signed_payload(&json!({"sub": "user-123"}));
    let (signing_input, _) = token.rsplit_once('.').expect("three segments");
    let forged = format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode([0u8; 64]));

    assert_eq!(verify(&forged), Err(TokenError::SignatureInvalid));
}
