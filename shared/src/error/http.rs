//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::ProductNotFound
            | Self::CategoryNotFound
            | Self::BrandNotFound
            | Self::FeaturedSpecsNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::ProductSlugExists
            | Self::CategorySlugExists
            | Self::BrandSlugExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::AdminRequired => StatusCode::FORBIDDEN,

            // 429 Too Many Requests
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and malformed input)
            Self::ValidationFailed | Self::SpecKeyInvalid => StatusCode::BAD_REQUEST,
        }
    }
}
