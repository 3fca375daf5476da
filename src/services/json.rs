use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;

// 通用JSON响应结构体 对外契约 { success, msg, data, errors }
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(msg: &str, data: Option<T>) -> Self {
        Self {
            success: true,
            msg: msg.to_string(),
            data,
            errors: None,
        }
    }

    pub fn fail(msg: &str, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            msg: msg.to_string(),
            data: None,
            errors,
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "application/json; charset=utf-8")],
            Json(self),
        ).into_response()
    }
}
