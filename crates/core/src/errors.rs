use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// A single field-level validation failure reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Coarse classification of a [`BookingError`].
///
/// The HTTP layer maps kinds to status codes; nothing in the crate inspects
/// error messages to decide how to treat an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyExists,
    Infrastructure,
    Unauthorized,
    RateLimited,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    BadRequest(String),

    #[error("invalid upload file")]
    InvalidUploadFile,

    #[error("image size too big, max 5 MiB per image")]
    ImageSizeTooBig,

    #[error("field not found")]
    FieldNotFound,

    #[error("time not found")]
    TimeNotFound,

    #[error("field schedule not found")]
    FieldScheduleNotFound,

    /// A schedule named in a batch request that does not exist.
    #[error("field schedule {0} not found")]
    FieldScheduleIdNotFound(Uuid),

    #[error("field schedule already exists")]
    FieldScheduleAlreadyExists,

    #[error("SQL error: {0}")]
    Database(#[source] eyre::Report),

    #[error("upload error: {0}")]
    Upload(#[source] eyre::Report),

    #[error("upstream service error: {0}")]
    Upstream(#[source] eyre::Report),

    #[error("internal server error: {0}")]
    Internal(#[source] eyre::Report),

    #[error("unauthorized")]
    Unauthorized,

    #[error("too many requests")]
    TooManyRequests,
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_)
            | Self::BadRequest(_)
            | Self::InvalidUploadFile
            | Self::ImageSizeTooBig => ErrorKind::Validation,
            Self::FieldNotFound
            | Self::TimeNotFound
            | Self::FieldScheduleNotFound
            | Self::FieldScheduleIdNotFound(_) => ErrorKind::NotFound,
            Self::FieldScheduleAlreadyExists => ErrorKind::AlreadyExists,
            Self::Database(_) | Self::Upload(_) | Self::Upstream(_) | Self::Internal(_) => {
                ErrorKind::Infrastructure
            }
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::TooManyRequests => ErrorKind::RateLimited,
        }
    }

    /// Stable identifier for the error, safe to expose to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::InvalidUploadFile => "INVALID_UPLOAD_FILE",
            Self::ImageSizeTooBig => "IMAGE_SIZE_TOO_BIG",
            Self::FieldNotFound => "FIELD_NOT_FOUND",
            Self::TimeNotFound => "TIME_NOT_FOUND",
            Self::FieldScheduleNotFound | Self::FieldScheduleIdNotFound(_) => {
                "FIELD_SCHEDULE_NOT_FOUND"
            }
            Self::FieldScheduleAlreadyExists => "FIELD_SCHEDULE_ALREADY_EXISTS",
            Self::Database(_) => "SQL_ERROR",
            Self::Upload(_) => "UPLOAD_ERROR",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
        }
    }

    /// Message shown to clients. Infrastructure details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "SQL error".to_string(),
            Self::Upload(_) => "failed to upload file".to_string(),
            Self::Upstream(_) | Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Wraps any database driver failure.
    pub fn database<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Database(eyre::Report::new(err))
    }
}

impl From<ValidationErrors> for BookingError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                let field = field.to_string();
                failures.iter().map(move |error| FieldViolation {
                    field: field.clone(),
                    message: match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("field {} failed on the '{}' rule", field, error.code),
                    },
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));

        Self::Validation(violations)
    }
}
