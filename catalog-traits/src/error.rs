use thiserror::Error;

/// Errors produced at the catalog provider boundary.
///
/// Providers map vendor HTTP responses into this taxonomy so the transfer
/// pipeline can decide what is whole-run fatal and what is per-track.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Catalog API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse catalog response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Whether this error indicates the caller's credentials are unusable.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, CatalogError::AccessDenied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CatalogError::Api {
            status: 404,
            message: "playlist missing".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Catalog API error (status 404): playlist missing"
        );
    }

    #[test]
    fn test_is_access_denied() {
        assert!(CatalogError::AccessDenied("bad cookie".to_string()).is_access_denied());
        assert!(!CatalogError::Parse("oops".to_string()).is_access_denied());
    }
}
