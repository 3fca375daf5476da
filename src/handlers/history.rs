use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::services::json::ApiResponse;
use crate::services::library::{mark_all_read, mark_novel_read, record_reading, LibraryError};
use crate::utils::cookie::current_user_id;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HistoryReq {
    novel_id: u64,
    chapter_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MarkReadReq {
    novel_id: u64,
}

/// POST /api/history 记录读到哪一章 每本只留最近一章
pub(crate) async fn post_history(
    jar: CookieJar,
    Json(params): Json<HistoryReq>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let Some(user_id) = current_user_id(&jar) else {
        return Err(AppError::AuthError("未登录".to_string()));
    };
    if params.novel_id == 0 || params.chapter_id == 0 {
        return Err(AppError::ValidationError("传参错误".to_string()));
    }
    record_reading(user_id, params.novel_id, params.chapter_id).await?;
    Ok(ApiResponse::success("进度已记录", Some("")))
}

/// POST /api/library/read 单本标记已读 未关注返回错误对象
pub(crate) async fn post_mark_read(
    jar: CookieJar,
    Json(params): Json<MarkReadReq>,
) -> impl IntoResponse {
    let Some(user_id) = current_user_id(&jar) else {
        return ApiResponse::fail("标记失败", Some(vec!["未登录".to_string()]));
    };
    if params.novel_id == 0 {
        return ApiResponse::fail("标记失败", Some(vec!["传参错误".to_string()]));
    }
    match mark_novel_read(user_id, params.novel_id).await {
        Ok(()) => ApiResponse::success("已标记为已读", Some("")),
        Err(LibraryError::NotFollowed) => {
            ApiResponse::fail("标记失败", Some(vec!["尚未关注该小说".to_string()]))
        }
        Err(e) => {
            eprintln!("mark read error: {e:?}");
            ApiResponse::fail("标记失败", Some(vec!["数据库操作失败".to_string()]))
        }
    }
}

/// POST /api/library/read-all 全部标记已读 空书架是无操作
pub(crate) async fn post_mark_all_read(jar: CookieJar) -> impl IntoResponse {
    let Some(user_id) = current_user_id(&jar) else {
        return ApiResponse::fail("标记失败", Some(vec!["未登录".to_string()]));
    };
    match mark_all_read(user_id).await {
        Ok(num) => ApiResponse::success("已全部标记为已读", Some(num)),
        Err(e) => {
            eprintln!("mark all read error: {e:?}");
            ApiResponse::fail("标记失败", Some(vec!["数据库操作失败".to_string()]))
        }
    }
}
