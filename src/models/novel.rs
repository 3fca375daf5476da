use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, FromQueryResult, Serialize, Deserialize, Clone)]
#[allow(dead_code)]
pub(crate) struct Novel {
    pub novelid: u64,
    pub novelname: String,
    pub slug: String,
    pub author: String,
    pub intro: String,
    pub coverimg: String,
}

/// 扁平化后的章节行 卷序+章序联查得出
#[derive(Debug, FromQueryResult, Serialize, Deserialize, Clone)]
#[allow(dead_code)]
pub(crate) struct Chapter {
    pub chapterid: u64,
    pub chaptername: String,
    pub slug: String,
    pub volumeorder: u32,
    pub chapterorder: u32,
    pub createtime: i64,
    pub isdraft: bool,
}

/// 对外输出的章节摘要
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChapterRef {
    pub id: u64,
    pub title: String,
    pub slug: String,
}

impl From<&Chapter> for ChapterRef {
    fn from(c: &Chapter) -> Self {
        ChapterRef {
            id: c.chapterid,
            title: c.chaptername.clone(),
            slug: c.slug.clone(),
        }
    }
}

/// GET /api/novel/{slug} 的响应体
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NovelDetail {
    pub novel_id: u64,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub intro: String,
    pub cover_image: String,
    pub chapters: Vec<ChapterRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_chapter: Option<ChapterRef>,
}
