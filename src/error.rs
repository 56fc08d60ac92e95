//! Error types shared by the gateway, the session guard and the forms.

/// A failed call to the records API.
///
/// Callers treat every variant the same way; the distinction only exists for
/// the console log.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GatewayError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("network error calling {url}: {reason}")]
    Network { url: String, reason: String },

    /// The server answered with a non-2xx status.
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be decoded as the expected JSON.
    #[error("could not decode the response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The request body could not be encoded.
    #[error("could not encode the request to {url}: {reason}")]
    Encode { url: String, reason: String },
}

/// No user identifier is stored in the browser.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no logged-in user")]
    MissingSession,
}

/// Input from one of the create forms that cannot be sent to the API.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Informe uma descrição.")]
    EmptyDescription,

    #[error("Valor inválido: \"{0}\"")]
    InvalidAmount(String),
}
