use serde::Serialize;

/// Standardized wrapper for every JSON response the API returns.
///
/// ```json
/// {
///   "success": true,
///   "data": { "pendingUpdateId": 12 },
///   "message": "Faculty addition submitted for review"
/// }
/// ```
///
/// Error responses carry `success: false`, a default (usually empty) `data`
/// and a human-readable `message`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error response with `T::default()` as its data.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }

    /// Error response that still carries data, such as the quota reset time
    /// on a `429`.
    pub fn error_with_data(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            message: message.into(),
        }
    }
}
