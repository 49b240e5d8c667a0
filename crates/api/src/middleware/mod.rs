/// Signature, bearer token and role checks
pub mod auth;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
/// Extractors that validate what they deserialize
pub mod extract;
/// Process-wide request budget
pub mod rate_limit;
/// The success/error envelope every response is wrapped in
pub mod response;
