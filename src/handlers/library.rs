use axum::extract::Query;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::services::json::ApiResponse;
use crate::services::library::{
    follow_novel, get_followed_novels, get_library_page, get_library_update_count,
    get_library_updates, unfollow_novel,
};
use crate::utils::conf::CONFIG;
use crate::utils::cookie::current_user_id;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct LibraryQuery {
    #[serde(rename = "withUpdates")]
    with_updates: Option<bool>,
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NovelIdReq {
    novel_id: u64,
}

/// GET /api/library
///
/// 不带withUpdates给普通书架列表 带withUpdates给未读更新的分页视图
/// 未登录一律空结果 轮询端不用分支处理
pub(crate) async fn get_library(
    jar: CookieJar,
    Query(params): Query<LibraryQuery>,
) -> Response {
    let user_id = current_user_id(&jar);
    if params.with_updates == Some(true) {
        let page = params.page.unwrap_or(1);
        let limit = CONFIG.clamp_limit(params.limit);
        let data = get_library_page(user_id, page, limit).await;
        return ApiResponse::success("获取成功", Some(data)).into_response();
    }
    let rows = get_followed_novels(user_id).await;
    ApiResponse::success("获取成功", Some(rows)).into_response()
}

/// GET /api/library/updates 服务端渲染用的简表 默认取配置条数
pub(crate) async fn get_updates(jar: CookieJar) -> impl IntoResponse {
    let user_id = current_user_id(&jar);
    let data = get_library_updates(user_id, None).await;
    ApiResponse::success("获取成功", Some(data))
}

/// GET /api/library/updates/count 铃铛角标
pub(crate) async fn get_update_count(jar: CookieJar) -> impl IntoResponse {
    let user_id = current_user_id(&jar);
    let cnt = get_library_update_count(user_id).await;
    ApiResponse::success("获取成功", Some(cnt))
}

/// POST /api/library 关注 已关注409 小说不存在404
pub(crate) async fn post_library(
    jar: CookieJar,
    Json(params): Json<NovelIdReq>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let Some(user_id) = current_user_id(&jar) else {
        return Err(AppError::AuthError("未登录".to_string()));
    };
    if params.novel_id == 0 {
        return Err(AppError::ValidationError("传参错误".to_string()));
    }
    follow_novel(user_id, params.novel_id).await?;
    Ok(ApiResponse::success("关注成功", Some("")))
}

/// DELETE /api/library 取消关注 未关注404
pub(crate) async fn delete_library(
    jar: CookieJar,
    Json(params): Json<NovelIdReq>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let Some(user_id) = current_user_id(&jar) else {
        return Err(AppError::AuthError("未登录".to_string()));
    };
    if params.novel_id == 0 {
        return Err(AppError::ValidationError("传参错误".to_string()));
    }
    unfollow_novel(user_id, params.novel_id).await?;
    Ok(ApiResponse::success("取消关注成功", Some("")))
}
