//! Response wrapper for successful API calls.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// A successful response from the Ometria API.
///
/// Holds the HTTP status, the response headers, and the parsed JSON body.
/// Error statuses never reach this type; they are classified into
/// [`ApiError`](crate::ApiError) before the wrapper is constructed.
///
/// # Example
///
/// ```rust
/// use ometria_api::ApiResponse;
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let response = ApiResponse::new(200, HashMap::new(), json!({"id": 1234}));
/// assert!(response.is_ok());
/// assert_eq!(response.data["id"], 1234);
/// ```
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed JSON response body.
    pub data: serde_json::Value,
}

impl ApiResponse {
    /// Creates a new response wrapper.
    #[must_use]
    pub const fn new(
        status: u16,
        headers: HashMap<String, Vec<String>>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            status,
            headers,
            data,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Deserializes the response body into a caller-provided type.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error if the body does not
    /// match the target type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }
}
