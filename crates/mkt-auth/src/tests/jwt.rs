use crate::{AuthError, Claims, SessionVerifier};

use jsonwebtoken::Algorithm;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

fn create_test_token(claims: &Claims, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

fn valid_claims() -> Claims {
    Claims {
        sub: "ext-123".to_string(),
        email: Some("a@x.com".to_string()),
        exp: chrono::Utc::now().timestamp() + 3600,
        iat: chrono::Utc::now().timestamp(),
        user_metadata: json!({ "full_name": "Ann A" })
            .as_object()
            .cloned()
            .unwrap(),
    }
}

#[test]
fn given_valid_token_when_verified_then_returns_identity() {
    let secret = b"test-secret-key-at-least-32-bytes";
    let verifier = SessionVerifier::with_hs256(secret);
    let token = create_test_token(&valid_claims(), secret);

    let identity = verifier.verify(&token).unwrap();

    assert_eq!(identity.id, "ext-123");
    assert_eq!(identity.email.as_deref(), Some("a@x.com"));
    assert_eq!(identity.metadata_str("full_name"), Some("Ann A"));
}

#[test]
fn given_expired_token_when_verified_then_returns_token_expired_error() {
    let secret = b"test-secret-key-at-least-32-bytes";
    let verifier = SessionVerifier::with_hs256(secret);
    let mut claims = valid_claims();
    claims.exp = chrono::Utc::now().timestamp() - 3600; // Expired 1 hour ago
    let token = create_test_token(&claims, secret);

    let result = verifier.verify(&token);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_wrong_secret_when_verified_then_returns_decode_error() {
    let secret = b"test-secret-key-at-least-32-bytes";
    let wrong_secret = b"wrong-secret-key-at-least-32-by";
    let verifier = SessionVerifier::with_hs256(wrong_secret);
    let token = create_test_token(&valid_claims(), secret);

    let result = verifier.verify(&token);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_empty_subject_when_verified_then_returns_invalid_claim() {
    let secret = b"test-secret-key-at-least-32-bytes";
    let verifier = SessionVerifier::with_hs256(secret);
    let mut claims = valid_claims();
    claims.sub = String::new();
    let token = create_test_token(&claims, secret);

    let result = verifier.verify(&token);

    assert!(matches!(result, Err(AuthError::InvalidClaim { .. })));
}
