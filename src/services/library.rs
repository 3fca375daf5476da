use std::collections::HashMap;

use sea_orm::{DbErr, Values};
use thiserror::Error;
use time::OffsetDateTime;

use crate::models::library::{
    BookcaseNovel, FollowedNovel, HistoryRow, LibraryPage, LibraryUpdate, LibraryUpdates,
};
use crate::models::novel::Chapter;
use crate::services::novel::{chapter_in_novel, get_flat_chapters, novel_exists};
use crate::services::updates::{build_updates, has_new};
use crate::utils::conf::CONFIG;
use crate::utils::db::db::{exec_sql, query_all_as, query_count};
use crate::utils::error::AppError;
use crate::utils::redis::conn::{
    cache_get_json, cache_set_json, count_key, get_redis_conn, invalidate_library, list_key,
};

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("小说不存在")]
    NovelNotFound,
    #[error("已经在书架中")]
    AlreadyFollowed,
    #[error("尚未关注该小说")]
    NotFollowed,
    #[error("章节不存在或未发布")]
    ChapterNotFound,
    #[error("数据库错误：{0}")]
    Db(#[from] DbErr),
}

impl From<LibraryError> for AppError {
    fn from(e: LibraryError) -> Self {
        match e {
            LibraryError::NovelNotFound | LibraryError::NotFollowed | LibraryError::ChapterNotFound => {
                AppError::NotFound(e.to_string())
            }
            LibraryError::AlreadyFollowed => AppError::Conflict(e.to_string()),
            LibraryError::Db(err) => AppError::DbError(err),
        }
    }
}

/// 生成10位时间戳
pub fn timestamp_10() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// 书架行联查小说元数据 按关注时间倒序
async fn load_bookcase(user_id: u64) -> Result<Vec<BookcaseNovel>, DbErr> {
    let sql = format!(
        "SELECT b.novelid, n.novelname, n.slug, n.coverimg, b.lastread, b.createtime \
         FROM {bookcase} b JOIN {novel} n ON n.novelid = b.novelid \
         WHERE b.userid = ? ORDER BY b.createtime DESC",
        bookcase = CONFIG.bookcase_table(),
        novel = CONFIG.novel_table()
    );
    query_all_as::<BookcaseNovel>(&sql, Some(Values(vec![user_id.into()]))).await
}

async fn load_history_map(user_id: u64) -> Result<HashMap<u64, u64>, DbErr> {
    let sql = format!(
        "SELECT novelid, chapterid FROM {table} WHERE userid = ?",
        table = CONFIG.history_table()
    );
    let rows = query_all_as::<HistoryRow>(&sql, Some(Values(vec![user_id.into()]))).await?;
    Ok(rows.into_iter().map(|r| (r.novelid, r.chapterid)).collect())
}

async fn load_chapter_map(entries: &[BookcaseNovel]) -> Result<HashMap<u64, Vec<Chapter>>, DbErr> {
    let mut map = HashMap::with_capacity(entries.len());
    for e in entries {
        map.insert(e.novelid, get_flat_chapters(e.novelid).await?);
    }
    Ok(map)
}

/// 全量装配该用户的更新条目 两次读之间没有共享快照 通知场景可接受
async fn load_updates(user_id: u64) -> Result<Vec<LibraryUpdate>, DbErr> {
    let entries = load_bookcase(user_id).await?;
    if entries.is_empty() {
        return Ok(Vec::new());
    }
    let history = load_history_map(user_id).await?;
    let chapters = load_chapter_map(&entries).await?;
    Ok(build_updates(&entries, &chapters, &history))
}

/// 未登录给空结果 查询失败也给空结果 轮询端无需分支
pub(crate) async fn get_library_updates(user_id: Option<u64>, limit: Option<u64>) -> LibraryUpdates {
    let Some(uid) = user_id else {
        return LibraryUpdates::default();
    };
    let limit = limit.unwrap_or(CONFIG.update_limit) as usize;
    match load_updates(uid).await {
        Ok(all) => LibraryUpdates {
            total: all.len() as u64,
            novels: all.into_iter().take(limit).collect(),
        },
        Err(e) => {
            eprintln!("library updates error: {e:?}");
            LibraryUpdates::default()
        }
    }
}

/// 角标计数 与列表共用同一新章谓词
pub(crate) async fn get_library_update_count(user_id: Option<u64>) -> u64 {
    let Some(uid) = user_id else {
        return 0;
    };
    let key = count_key(uid);
    let redis = get_redis_conn().await;
    if let Some(ref redis_arc) = redis {
        if let Ok(Some(cnt)) = cache_get_json::<u64>(Some(redis_arc), &key).await {
            return cnt;
        }
    }
    let cnt = match count_fresh(uid).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("library update count error: {e:?}");
            return 0;
        }
    };
    if let Some(ref redis_arc) = redis {
        let _ = cache_set_json(Some(redis_arc), &key, &cnt, CONFIG.cache.count).await;
    }
    cnt
}

async fn count_fresh(user_id: u64) -> Result<u64, DbErr> {
    let entries = load_bookcase(user_id).await?;
    let mut cnt = 0u64;
    for e in &entries {
        let chapters = get_flat_chapters(e.novelid).await?;
        if has_new(&chapters, e.lastread) {
            cnt += 1;
        }
    }
    Ok(cnt)
}

/// withUpdates 分页视图 先全量装配再切窗口
pub(crate) async fn get_library_page(user_id: Option<u64>, page: u64, limit: u64) -> LibraryPage {
    let page = page.max(1);
    let all = match user_id {
        Some(uid) => match load_updates(uid).await {
            Ok(all) => all,
            Err(e) => {
                eprintln!("library page error: {e:?}");
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    let total = all.len() as u64;
    let (start, end, has_more) = page_window(all.len(), page, limit);
    LibraryPage {
        items: all[start..end].to_vec(),
        total,
        page,
        limit,
        has_more,
    }
}

/// 普通书架列表 带关注时间 不做更新过滤
pub(crate) async fn get_followed_novels(user_id: Option<u64>) -> Vec<FollowedNovel> {
    let Some(uid) = user_id else {
        return Vec::new();
    };
    let key = list_key(uid);
    let redis = get_redis_conn().await;
    if let Some(ref redis_arc) = redis {
        if let Ok(Some(rows)) = cache_get_json::<Vec<BookcaseNovel>>(Some(redis_arc), &key).await {
            return rows.iter().map(FollowedNovel::from).collect();
        }
    }
    let rows = match load_bookcase(uid).await {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("bookcase list error: {e:?}");
            return Vec::new();
        }
    };
    if !rows.is_empty() {
        if let Some(ref redis_arc) = redis {
            let _ = cache_set_json(Some(redis_arc), &key, &rows, CONFIG.cache.list).await;
        }
    }
    rows.iter().map(FollowedNovel::from).collect()
}

pub(crate) async fn follow_novel(user_id: u64, novel_id: u64) -> Result<(), LibraryError> {
    if !novel_exists(novel_id).await? {
        return Err(LibraryError::NovelNotFound);
    }
    let count_sql = format!(
        "SELECT COUNT(*) AS cnt FROM {table} WHERE userid = ? AND novelid = ?",
        table = CONFIG.bookcase_table()
    );
    let num = query_count(&count_sql, Some(Values(vec![user_id.into(), novel_id.into()]))).await?;
    if num > 0 {
        // 重复关注不动原行的createtime
        return Err(LibraryError::AlreadyFollowed);
    }
    let now = timestamp_10();
    let sql = format!(
        "INSERT INTO {table} (userid, novelid, lastread, createtime) VALUES (?, ?, ?, ?)",
        table = CONFIG.bookcase_table()
    );
    exec_sql(&sql, Some(Values(vec![user_id.into(), novel_id.into(), now.into(), now.into()]))).await?;
    invalidate_library(user_id);
    Ok(())
}

pub(crate) async fn unfollow_novel(user_id: u64, novel_id: u64) -> Result<(), LibraryError> {
    let sql = format!(
        "DELETE FROM {table} WHERE userid = ? AND novelid = ?",
        table = CONFIG.bookcase_table()
    );
    let num = exec_sql(&sql, Some(Values(vec![user_id.into(), novel_id.into()]))).await?;
    if num == 0 {
        return Err(LibraryError::NotFollowed);
    }
    invalidate_library(user_id);
    Ok(())
}

/// 单本标记已读 只动当前用户的行
pub(crate) async fn mark_novel_read(user_id: u64, novel_id: u64) -> Result<(), LibraryError> {
    let sql = format!(
        "UPDATE {table} SET lastread = ? WHERE userid = ? AND novelid = ?",
        table = CONFIG.bookcase_table()
    );
    let num = exec_sql(
        &sql,
        Some(Values(vec![timestamp_10().into(), user_id.into(), novel_id.into()])),
    )
    .await?;
    if num == 0 {
        return Err(LibraryError::NotFollowed);
    }
    invalidate_library(user_id);
    Ok(())
}

/// 全部标记已读 空书架是无操作 重复调用以第二次时间为准
pub(crate) async fn mark_all_read(user_id: u64) -> Result<u64, LibraryError> {
    let sql = format!(
        "UPDATE {table} SET lastread = ? WHERE userid = ?",
        table = CONFIG.bookcase_table()
    );
    let num = exec_sql(&sql, Some(Values(vec![timestamp_10().into(), user_id.into()]))).await?;
    invalidate_library(user_id);
    Ok(num)
}

/// 记录阅读进度 每个(用户,小说)只留最近一章 覆盖写
///
/// 没关注也允许记录 只是书架的lastread无行可touch
pub(crate) async fn record_reading(
    user_id: u64,
    novel_id: u64,
    chapter_id: u64,
) -> Result<(), LibraryError> {
    if !chapter_in_novel(novel_id, chapter_id).await? {
        return Err(LibraryError::ChapterNotFound);
    }
    let now = timestamp_10();
    let upsert = format!(
        "INSERT INTO {table} (userid, novelid, chapterid, updatetime) VALUES (?, ?, ?, ?) \
         ON DUPLICATE KEY UPDATE chapterid = VALUES(chapterid), updatetime = VALUES(updatetime)",
        table = CONFIG.history_table()
    );
    exec_sql(
        &upsert,
        Some(Values(vec![user_id.into(), novel_id.into(), chapter_id.into(), now.into()])),
    )
    .await?;
    // 两条写之间无事务 中间被读到半程状态可接受
    let touch = format!(
        "UPDATE {table} SET lastread = ? WHERE userid = ? AND novelid = ?",
        table = CONFIG.bookcase_table()
    );
    let _ = exec_sql(&touch, Some(Values(vec![now.into(), user_id.into(), novel_id.into()]))).await?;
    invalidate_library(user_id);
    Ok(())
}

/// 分页窗口 page从1起 返回 [start, end) 与是否还有下一页
fn page_window(total: usize, page: u64, limit: u64) -> (usize, usize, bool) {
    let limit = limit.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(limit).min(total);
    let end = (start + limit).min(total);
    (start, end, end < total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_basic() {
        assert_eq!(page_window(10, 1, 5), (0, 5, true));
        assert_eq!(page_window(10, 2, 5), (5, 10, false));
    }

    #[test]
    fn page_window_past_end_is_empty() {
        assert_eq!(page_window(10, 3, 5), (10, 10, false));
        assert_eq!(page_window(0, 1, 5), (0, 0, false));
    }

    #[test]
    fn page_window_partial_tail() {
        assert_eq!(page_window(7, 2, 5), (5, 7, false));
        assert_eq!(page_window(7, 1, 5), (0, 5, true));
    }

    #[test]
    fn page_window_zero_inputs_normalized() {
        assert_eq!(page_window(7, 0, 5), (0, 5, true));
        assert_eq!(page_window(7, 1, 0), (0, 1, true));
    }
}
