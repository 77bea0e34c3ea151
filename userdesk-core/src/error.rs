use thiserror::Error;

/// Any failure of a call to the remote user service.
///
/// Not-found and server errors share this one channel; the console never
/// branches on the variant, it only shows the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        TransportError::Network(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        TransportError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_render_code_and_body() {
        let err = TransportError::Status {
            status: 404,
            body: "{}".into(),
        };
        assert_eq!(err.to_string(), "Request failed with status 404: {}");
    }
}
