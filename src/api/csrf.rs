//! Session-bound CSRF tokens for the HTML add form.

use argon2::Argon2;
use tower_sessions::{Session, cookie::Key};
use uuid::Uuid;

use super::ApiError;

const CSRF_SESSION_KEY: &str = "csrf_token";

/// Fixed salt for deriving the cookie signing key. The secret supplies the entropy.
const SESSION_KEY_SALT: &[u8] = b"cafe-wifi.session-key.v1";

/// Stretches the configured secret into the 64 bytes `cookie::Key` requires.
pub fn derive_session_key(secret: &str) -> anyhow::Result<Key> {
    let mut material = [0u8; 64];
    Argon2::default()
        .hash_password_into(secret.as_bytes(), SESSION_KEY_SALT, &mut material)
        .map_err(|e| anyhow::anyhow!("Failed to derive session key: {e}"))?;

    Key::try_from(&material[..]).map_err(|e| anyhow::anyhow!("Invalid session key: {e:?}"))
}

/// Returns the session's token, creating one on first use.
pub async fn issue_token(session: &Session) -> Result<String, ApiError> {
    if let Some(token) = session
        .get::<String>(CSRF_SESSION_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
    {
        return Ok(token);
    }

    let token = Uuid::new_v4().simple().to_string();
    session
        .insert(CSRF_SESSION_KEY, token.clone())
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;
    Ok(token)
}

/// True when `submitted` matches the token stored in the session.
pub async fn verify_token(session: &Session, submitted: Option<&str>) -> Result<bool, ApiError> {
    let Some(submitted) = submitted.filter(|s| !s.is_empty()) else {
        return Ok(false);
    };

    let expected = session
        .get::<String>(CSRF_SESSION_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    Ok(expected.is_some_and(|token| token == submitted))
}
