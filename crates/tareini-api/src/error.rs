//! Error taxonomy for backend requests.

use thiserror::Error;

/// Errors that can occur when talking to the Tareini backend.
///
/// Local validation failures never reach this type; they abort the
/// submission before a request exists.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend no longer recognizes the session. Callers clear the
    /// stored token and send the user back to the login screen.
    #[error("Debes iniciar sesión")]
    Unauthenticated,

    /// The backend rejected the request; the message comes from the
    /// response body when present, otherwise a static fallback.
    #[error("{0}")]
    Rejected(String),

    /// Network-level failure; shown to the user as a generic retry message.
    #[error("Ocurrió un error. Inténtalo de nuevo.")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Message suitable for the general error line of a form.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
