use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::models::novel::ChapterRef;

/// 书架行联查小说元数据后的形态 (userid, novelid) 唯一
#[derive(Debug, FromQueryResult, Serialize, Deserialize, Clone)]
#[allow(dead_code)]
pub(crate) struct BookcaseNovel {
    pub novelid: u64,
    pub novelname: String,
    pub slug: String,
    pub coverimg: String,
    pub lastread: i64,
    pub createtime: i64,
}

/// 阅读进度行 (userid, novelid) 唯一 只记录最近读到的一章
#[derive(Debug, FromQueryResult, Serialize, Deserialize, Clone)]
#[allow(dead_code)]
pub(crate) struct HistoryRow {
    pub novelid: u64,
    pub chapterid: u64,
}

/// 单本小说的更新条目 对外契约 字段名不可变
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LibraryUpdate {
    pub novel_id: u64,
    pub title: String,
    pub slug: String,
    pub cover_image: String,
    pub latest_chapter: ChapterRef,
    pub next_chapter_slug: String,
    pub new_chapters_count: u64,
    pub last_read_at: i64,
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct LibraryUpdates {
    pub novels: Vec<LibraryUpdate>,
    pub total: u64,
}

/// 普通书架列表条目（不带更新过滤）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FollowedNovel {
    pub novel_id: u64,
    pub title: String,
    pub slug: String,
    pub cover_image: String,
    pub followed_at: i64,
    pub last_read_at: i64,
}

impl From<&BookcaseNovel> for FollowedNovel {
    fn from(b: &BookcaseNovel) -> Self {
        FollowedNovel {
            novel_id: b.novelid,
            title: b.novelname.clone(),
            slug: b.slug.clone(),
            cover_image: b.coverimg.clone(),
            followed_at: b.createtime,
            last_read_at: b.lastread,
        }
    }
}

/// withUpdates 分页响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LibraryPage {
    pub items: Vec<LibraryUpdate>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub has_more: bool,
}
