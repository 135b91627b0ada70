// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the huelink library.
//!
//! This module provides the error hierarchy for failures across the
//! library: transport problems, unexpected HTTP statuses, JSON parsing,
//! value validation, and errors the bridge itself reports inside an
//! otherwise successful response.

use thiserror::Error;

/// The main error type for this library.
///
/// Transport failures and parse failures are deliberately distinguishable:
/// callers that only care about "the fetch failed" can match on the top
/// level, callers that care why can go one level deeper.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be completed (connection refused,
    /// timeout, DNS failure).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The bridge answered with a non-success HTTP status.
    #[error("bridge returned HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The bridge reported an error inside the response body.
    #[error("bridge error: {0}")]
    Api(#[from] ApiError),

    /// A value was outside its allowed range.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Errors related to parsing bridge responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response document.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// A field was present but held an unusable value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },
}

/// An error object reported by the bridge.
///
/// The bridge wraps failures in a JSON array entry of the form
/// `{"error": {"type": 3, "address": "/lights/99", "description": "..."}}`
/// while still answering 200 OK. Surfacing these gives callers an explicit
/// signal for conditions like "no such light" that the HTTP layer alone
/// cannot distinguish.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("type {kind} at {address}: {description}")]
pub struct ApiError {
    /// The bridge's numeric error type (e.g. 3 for "resource not available").
    pub kind: u16,
    /// The resource address the error refers to.
    pub address: String,
    /// Human-readable description from the bridge.
    pub description: String,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
