use http::StatusCode;

/// Trait for domain errors that map onto HTTP responses
///
/// Each feature crate implements this on its own error enum. The
/// server layer renders implementors into response bodies, so the
/// domain crates stay decoupled from any particular error wire shape.
pub trait HttpError: std::error::Error {
    /// Status code to respond with
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error kind (e.g. `auth_error`)
    fn kind(&self) -> &str;

    /// Message safe to expose to API consumers
    ///
    /// Internal details (connection strings, SQL, upstream bodies)
    /// must not leak through this.
    fn client_message(&self) -> String;
}
