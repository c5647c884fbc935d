use thiserror::Error;

/// Errors produced while turning raw payloads into a renderable summary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload parsed as JSON but no known field mapping matched.
    /// Usually signals an appliance generation this build doesn't know.
    #[error("no known schema field for '{field}'")]
    Schema { field: &'static str },

    /// Failure from the API layer (auth, transport, endpoint errors).
    #[error(transparent)]
    Api(#[from] inkhole_api::Error),
}
