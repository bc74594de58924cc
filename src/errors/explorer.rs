// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for block-explorer lookups.

/// Errors returned by [`ExplorerClient`](crate::ExplorerClient) implementations.
///
/// An address the explorer has never seen is reported as `Ok(None)`, not as
/// one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// The HTTP request could not be completed (DNS, TLS, timeout, reset).
    #[error("Explorer request for {address} failed")]
    RequestFailed {
        /// Address being looked up
        address: String,
        /// The underlying HTTP client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The explorer answered with a non-success HTTP status.
    #[error("Explorer returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The explorer answered with an application-level error object.
    #[error("Explorer error {code}: {message}")]
    Api {
        /// Service-specific error code
        code: i64,
        /// Service-provided message
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode explorer response: {details}")]
    Decode {
        /// What could not be decoded
        details: String,
    },

    /// The configured explorer base URL is not a valid URL.
    #[error("Invalid explorer URL {url}: {details}")]
    BaseUrlInvalid {
        /// The rejected URL
        url: String,
        /// Parser message
        details: String,
    },
}

impl ExplorerError {
    /// Create a `RequestFailed` error from any error type.
    pub fn request_failed(
        address: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ExplorerError::RequestFailed {
            address: address.into(),
            source: Box::new(source),
        }
    }

    /// Create a `Decode` error with details.
    pub fn decode(details: impl Into<String>) -> Self {
        ExplorerError::Decode {
            details: details.into(),
        }
    }
}
