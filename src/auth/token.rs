//! Access-token payload decoding.
//!
//! The backend issues JWT bearer tokens. The client decodes the payload
//! segment locally to learn the expiry instant; signatures are never
//! verified here because the backend is the authority on token validity.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

/// Standard claims carried in the access token payload
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPayload {
    /// Expiry, epoch seconds
    pub exp: i64,
    /// Issued-at, epoch seconds
    #[serde(default)]
    pub iat: Option<i64>,
    /// Subject (the account id)
    #[serde(default)]
    pub sub: Option<String>,
}

/// Decode the payload segment of a `header.payload.signature` token
pub fn decode_payload(token: &str) -> Result<TokenPayload> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => anyhow::bail!("Access token is not in header.payload.signature form"),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .context("Failed to base64-decode token payload")?;
    serde_json::from_slice(&bytes).context("Failed to parse token claims")
}

/// Expiry instant of a token in epoch milliseconds
pub fn decode_expiry_millis(token: &str) -> Result<i64> {
    Ok(decode_payload(token)?.exp * 1000)
}

/// Pure expiry check against a caller-supplied "now"
pub fn is_expired(expiry_millis: i64, now_millis: i64) -> bool {
    now_millis >= expiry_millis
}

/// Mint an unsigned test token carrying the given expiry.
/// Only the payload segment matters to the decoder; the signature is junk.
#[cfg(test)]
pub(crate) fn mint_test_token(exp_epoch_secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = format!(r#"{{"sub":"42","iat":0,"exp":{}}}"#, exp_epoch_secs);
    let payload = URL_SAFE_NO_PAD.encode(claims.as_bytes());
    format!("{}.{}.sig", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_token() {
        let token = mint_test_token(1_767_225_600);
        let payload = decode_payload(&token).expect("minted token should decode");
        assert_eq!(payload.exp, 1_767_225_600);
        assert_eq!(payload.sub.as_deref(), Some("42"));
        assert_eq!(
            decode_expiry_millis(&token).unwrap(),
            1_767_225_600_000
        );
    }

    #[test]
    fn test_decode_rejects_wrong_segment_count() {
        assert!(decode_payload("only-one-segment").is_err());
        assert!(decode_payload("two.segments").is_err());
        assert!(decode_payload("a.b.c.d").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode_payload("header.!!not-base64!!.sig").is_err());
    }

    #[test]
    fn test_decode_rejects_missing_exp() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"42"}"#);
        let token = format!("h.{}.s", payload);
        assert!(decode_payload(&token).is_err());
    }

    #[test]
    fn test_is_expired_boundary() {
        assert!(!is_expired(1_000, 999));
        // Expiry instant itself counts as expired
        assert!(is_expired(1_000, 1_000));
        assert!(is_expired(1_000, 1_001));
    }
}
