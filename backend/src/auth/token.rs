use std::fmt;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};

/// How a request got past the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No secret is configured; the API is unprotected.
    Open,
    /// The presented token matched the configured secret.
    Granted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Se requiere un token de autenticación en el header Authorization")]
    MissingToken,
    #[error("Token de autenticación inválido")]
    InvalidToken,
    #[error("Token de autenticación incorrecto")]
    WrongToken,
}

impl AuthError {
    /// 401 when no usable identity was asserted, 403 when it was asserted but wrong.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::WrongToken => StatusCode::FORBIDDEN,
        }
    }
}

/// Static shared-secret check applied to every proxied request.
#[derive(Clone)]
pub struct ApiTokenGate {
    secret: Option<String>,
}

impl ApiTokenGate {
    /// Build a gate; `None` or an empty secret leaves the API open.
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(String::from),
        }
    }

    pub fn is_protected(&self) -> bool {
        self.secret.is_some()
    }

    /// Decide on a raw `Authorization` header value.
    pub fn verify(&self, header: Option<&str>) -> Result<Access, AuthError> {
        let Some(secret) = self.secret.as_deref() else {
            tracing::warn!("API_TOKEN is not configured, the API is unprotected");
            return Ok(Access::Open);
        };

        let header = header.filter(|h| !h.is_empty()).ok_or(AuthError::MissingToken)?;

        let token = strip_bearer(header);
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        if token != secret {
            return Err(AuthError::WrongToken);
        }

        Ok(Access::Granted)
    }

    /// Decide on a request's headers.
    pub fn check(&self, headers: &HeaderMap) -> Result<Access, AuthError> {
        match headers.get(AUTHORIZATION) {
            None => self.verify(None),
            // `to_str` only admits visible ASCII; UTF-8 secrets must still compare.
            Some(value) => match std::str::from_utf8(value.as_bytes()) {
                Ok(header) => self.verify(Some(header)),
                // Bytes that aren't UTF-8 can't carry a comparable token.
                Err(_) if self.is_protected() => Err(AuthError::InvalidToken),
                Err(_) => self.verify(None),
            },
        }
    }
}

impl fmt::Debug for ApiTokenGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiTokenGate")
            .field("protected", &self.is_protected())
            .finish()
    }
}

/// Remove a case-insensitive `Bearer` scheme followed by whitespace.
///
/// Values without the scheme are returned untouched and compared as raw tokens.
fn strip_bearer(value: &str) -> &str {
    const SCHEME: &str = "bearer";

    if value.len() > SCHEME.len()
        && value.as_bytes()[..SCHEME.len()].eq_ignore_ascii_case(SCHEME.as_bytes())
    {
        let rest = &value[SCHEME.len()..];
        let token = rest.trim_start();
        if token.len() < rest.len() {
            return token;
        }
    }
    value
}
