use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::Role;

/// Key under which the backend stores the role claim.
const ROLE_CLAIM_KEY: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Identity claims carried by the bearer token.
///
/// Only the payload segment is decoded; the signature is never verified
/// client-side. Correctness of the claims is trusted from HTTPS transport and
/// backend issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id of the account.
    pub sub: String,
    pub email: String,
    /// Display name (username).
    pub name: String,
    #[serde(rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role")]
    pub role: Role,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    #[serde(rename = "urlPerfil", default)]
    pub profile_photo_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token is not a three-part compact token")]
    Malformed,
    #[error("payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not a valid claim set: {0}")]
    Json(#[from] serde_json::Error),
}

impl Claims {
    /// Decodes the middle segment of a compact three-part token.
    pub fn from_token(token: &str) -> Result<Self, ClaimsError> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(ClaimsError::Malformed),
        };
        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Whether the claim set is still valid at `now_secs` (Unix seconds).
    /// Expiry is compared on every call, never cached.
    pub fn is_valid_at(&self, now_secs: i64) -> bool {
        self.exp > now_secs
    }

    pub fn role_claim_key() -> &'static str {
        ROLE_CLAIM_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an unsigned compact token carrying the given payload.
    pub fn make_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    fn sample_payload(exp: i64) -> serde_json::Value {
        serde_json::json!({
            "sub": "u-42",
            "email": "lia@example.com",
            "name": "lia",
            ROLE_CLAIM_KEY: "Artista",
            "exp": exp,
            "urlPerfil": "https://cdn.example/lia.png"
        })
    }

    #[test]
    fn decodes_well_formed_token() {
        let token = make_token(&sample_payload(4_102_444_800));
        let claims = Claims::from_token(&token).unwrap();
        assert_eq!(claims.sub, "u-42");
        assert_eq!(claims.name, "lia");
        assert_eq!(claims.role, Role::Artista);
        assert_eq!(claims.profile_photo_url.as_deref(), Some("https://cdn.example/lia.png"));
    }

    #[test]
    fn rejects_token_without_three_parts() {
        assert!(matches!(
            Claims::from_token("only-one-part"),
            Err(ClaimsError::Malformed)
        ));
        assert!(matches!(
            Claims::from_token("a.b"),
            Err(ClaimsError::Malformed)
        ));
        assert!(matches!(
            Claims::from_token("a.b.c.d"),
            Err(ClaimsError::Malformed)
        ));
    }

    #[test]
    fn rejects_garbage_payload() {
        let bad = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json"));
        assert!(matches!(Claims::from_token(&bad), Err(ClaimsError::Json(_))));
        assert!(matches!(
            Claims::from_token("h.!!!.s"),
            Err(ClaimsError::Base64(_))
        ));
    }

    #[test]
    fn validity_is_an_expiry_comparison() {
        let claims = Claims::from_token(&make_token(&sample_payload(1_000))).unwrap();
        assert!(claims.is_valid_at(999));
        assert!(!claims.is_valid_at(1_000));
        assert!(!claims.is_valid_at(1_001));
    }

    #[test]
    fn missing_photo_claim_defaults_to_none() {
        let mut payload = sample_payload(4_102_444_800);
        payload.as_object_mut().unwrap().remove("urlPerfil");
        let claims = Claims::from_token(&make_token(&payload)).unwrap();
        assert!(claims.profile_photo_url.is_none());
    }
}
