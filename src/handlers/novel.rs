use axum::extract::Path;

use crate::models::novel::NovelDetail;
use crate::services::json::ApiResponse;
use crate::services::novel::get_novel_detail;
use crate::utils::error::AppError;

/// GET /api/novel/{slug} 小说详情与已发布章节序列
pub(crate) async fn get_novel(
    Path(slug): Path<String>,
) -> Result<ApiResponse<NovelDetail>, AppError> {
    if slug.is_empty() {
        return Err(AppError::ValidationError("传参错误".to_string()));
    }
    let detail = get_novel_detail(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("小说不存在".to_string()))?;
    Ok(ApiResponse::success("获取成功", Some(detail)))
}
