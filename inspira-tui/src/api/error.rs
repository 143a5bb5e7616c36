use thiserror::Error;

/// Fallback shown when the server gives us nothing usable.
pub const GENERIC_FAILURE: &str = "Não foi possível completar a operação. Tente novamente mais tarde.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Human-readable message for the UI layer.
    ///
    /// Rejected requests carry whatever message the server embedded in the
    /// error body; everything else collapses to the generic fallback. This is
    /// the single place error bodies are interpreted.
    pub fn display_message(&self) -> &str {
        match self {
            ApiError::Api(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg) => {
                if msg.is_empty() {
                    GENERIC_FAILURE
                } else {
                    msg
                }
            }
            ApiError::Network(_) | ApiError::Serialization(_) => GENERIC_FAILURE,
        }
    }
}

/// Extracts a human-readable message from a raw error body.
///
/// Prefers a `message` (then `error`) field of a JSON body; a plain-text body
/// is used as-is; HTML (e.g. proxy error pages) and empty bodies fall back to
/// the generic localized string.
pub fn server_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return GENERIC_FAILURE.to_string();
    }
    if trimmed.contains("<html") || trimmed.contains("<!DOCTYPE") {
        return GENERIC_FAILURE.to_string();
    }
    if let Ok(parsed) = serde_json::from_str::<inspira_types::ErrorResponse>(trimmed) {
        if let Some(msg) = parsed.message.or(parsed.error) {
            if !msg.is_empty() {
                return msg;
            }
        }
        return GENERIC_FAILURE.to_string();
    }
    trimmed.to_string()
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_embedded_json_message() {
        let msg = server_message(r#"{"message": "Usuário já existe."}"#);
        assert_eq!(msg, "Usuário já existe.");
    }

    #[test]
    fn falls_back_to_error_field() {
        let msg = server_message(r#"{"error": "Categoria inválida."}"#);
        assert_eq!(msg, "Categoria inválida.");
    }

    #[test]
    fn html_and_empty_bodies_use_generic_fallback() {
        assert_eq!(server_message("<html><body>502</body></html>"), GENERIC_FAILURE);
        assert_eq!(server_message("   "), GENERIC_FAILURE);
        assert_eq!(server_message(r#"{"unrelated": true}"#), GENERIC_FAILURE);
    }

    #[test]
    fn plain_text_body_passes_through() {
        assert_eq!(server_message("rate limited"), "rate limited");
    }

    #[test]
    fn display_message_collapses_transport_errors() {
        let err = ApiError::Api(String::new());
        assert_eq!(err.display_message(), GENERIC_FAILURE);
        let err = ApiError::BadRequest("Título obrigatório.".to_string());
        assert_eq!(err.display_message(), "Título obrigatório.");
    }
}
