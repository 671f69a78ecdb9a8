use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Envelope for every successful JSON body the server returns. Failures use
/// the structured error body instead.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializes_data() {
        let body = serde_json::to_value(ApiResponse::success("/images/a.jpg")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": true, "data": "/images/a.jpg" })
        );
    }

    #[test]
    fn test_success_round_trips_through_json() {
        let response: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"success": true, "data": ["/images/a.jpg"]}"#).unwrap();
        assert!(response.is_success());
        assert_eq!(response.into_data(), Some(vec!["/images/a.jpg".to_string()]));
    }
}
