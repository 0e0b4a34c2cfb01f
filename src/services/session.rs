use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::SessionError;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "session";

/// Fixed validity window: 7 days from issuance
pub const SESSION_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

/// Issues and resolves tamper-evident session tokens
///
/// A token binds a user id, an issuance instant and a random nonce, MAC'd
/// with HMAC-SHA256 under the service key:
///
/// ```text
/// base64url( "v1:<user_id>:<issued_at>:<nonce>:<mac hex>" )
/// ```
///
/// Resolution verifies structure, signature and expiry only. It does NOT
/// confirm the user still exists or is active - callers must re-check that
/// against the user store on every request, which is what makes deactivation
/// take effect immediately even though outstanding tokens stay structurally
/// valid until expiry.
///
/// There is no server-side revocation list. Logout removes the cookie
/// client-side; the token itself remains usable until it expires.
pub struct SessionService {
    key: Vec<u8>,
    validity_secs: i64,
}

/// Successfully decoded and verified token contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSession {
    pub user_id: i32,
    pub issued_at: i64,
}

impl SessionService {
    pub fn new(secret: &str) -> Self {
        Self::with_validity(secret, SESSION_VALIDITY_SECS)
    }

    pub fn with_validity(secret: &str, validity_secs: i64) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            validity_secs,
        }
    }

    pub fn validity_secs(&self) -> i64 {
        self.validity_secs
    }

    /// Issue a token for the given user, valid from now
    pub fn issue(&self, user_id: i32) -> String {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    fn issue_at(&self, user_id: i32, issued_at: i64) -> String {
        let nonce = format!("{:032x}", rand::random::<u128>());
        let payload = format!("v1:{}:{}:{}", user_id, issued_at, nonce);
        let mac = self.sign(&payload);
        URL_SAFE_NO_PAD.encode(format!("{}:{}", payload, mac))
    }

    /// Decode and validate a token, returning the bound user id
    pub fn resolve(&self, token: &str) -> Result<ResolvedSession, SessionError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| SessionError::Malformed)?;
        let text = String::from_utf8(raw).map_err(|_| SessionError::Malformed)?;

        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() != 5 || parts[0] != "v1" {
            return Err(SessionError::Malformed);
        }

        let user_id: i32 = parts[1].parse().map_err(|_| SessionError::Malformed)?;
        let issued_at: i64 = parts[2].parse().map_err(|_| SessionError::Malformed)?;
        let mac_bytes = decode_hex(parts[4]).ok_or(SessionError::Malformed)?;

        let payload_len = text.len() - parts[4].len() - 1;
        let payload = &text[..payload_len];

        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&mac_bytes)
            .map_err(|_| SessionError::BadSignature)?;

        let now = Utc::now().timestamp();
        if issued_at + self.validity_secs < now {
            return Err(SessionError::Expired);
        }

        Ok(ResolvedSession { user_id, issued_at })
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        format!("{:x}", mac.finalize().into_bytes())
    }
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    // Byte-wise: string slicing could land inside a multi-byte char on
    // attacker-supplied input
    if s.len() % 2 != 0 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    s.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new("test-session-secret-at-least-32-chars")
    }

    #[test]
    fn issue_then_resolve_round_trip() {
        let sessions = service();
        let token = sessions.issue(42);
        let resolved = sessions.resolve(&token).unwrap();
        assert_eq!(resolved.user_id, 42);
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        let sessions = service();
        assert_ne!(sessions.issue(1), sessions.issue(1));
    }

    #[test]
    fn altered_user_id_is_rejected() {
        let sessions = service();
        let token = sessions.issue(42);

        // Re-encode the token with a different user id but the original MAC
        let text = String::from_utf8(URL_SAFE_NO_PAD.decode(&token).unwrap()).unwrap();
        let mut parts: Vec<String> = text.split(':').map(str::to_string).collect();
        parts[1] = "1".to_string();
        let forged = URL_SAFE_NO_PAD.encode(parts.join(":"));

        assert!(matches!(
            sessions.resolve(&forged),
            Err(SessionError::BadSignature)
        ));
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let token = SessionService::new("some other secret key entirely!!").issue(7);
        assert!(matches!(
            service().resolve(&token),
            Err(SessionError::BadSignature)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let sessions = service();
        let stale = Utc::now().timestamp() - SESSION_VALIDITY_SECS - 60;
        let token = sessions.issue_at(9, stale);
        assert!(matches!(sessions.resolve(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn token_at_window_edge_still_resolves() {
        let sessions = service();
        let edge = Utc::now().timestamp() - SESSION_VALIDITY_SECS + 60;
        let token = sessions.issue_at(9, edge);
        assert!(sessions.resolve(&token).is_ok());
    }

    #[test]
    fn multibyte_mac_segment_is_malformed() {
        let sessions = service();
        // The fifth segment has even byte length but is not ASCII hex; the
        // decoder must reject it rather than slice mid-character
        let token = URL_SAFE_NO_PAD.encode("v1:1:2:abcd:€a");
        assert!(matches!(
            sessions.resolve(&token),
            Err(SessionError::Malformed)
        ));
    }

    #[test]
    fn garbage_tokens_are_malformed() {
        let sessions = service();
        for bad in ["", "not base64 !!!", "bm90IGEgdG9rZW4", "djE6YTpiOmM"] {
            assert!(matches!(
                sessions.resolve(bad),
                Err(SessionError::Malformed)
            ));
        }
    }
}
