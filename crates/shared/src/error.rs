use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown provider '{0}', expected 'meta' or 'google'")]
    UnknownProvider(String),
    #[error("unknown filter dimension '{0}', expected campaign, adSet or objective")]
    UnknownFilterDimension(String),
    #[error("invalid date '{0}', expected yyyy-MM-dd")]
    InvalidDate(String),
    #[error("malformed filter '{0}', expected dimension=value")]
    MalformedFilter(String),
}
