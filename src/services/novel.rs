use sea_orm::{DbErr, Values};

use crate::models::novel::{Chapter, ChapterRef, Novel, NovelDetail};
use crate::services::updates::reading_sequence;
use crate::utils::conf::CONFIG;
use crate::utils::db::db::{get_one_as, query_all_as, query_count};
use crate::utils::redis::conn::{cache_get_json, cache_set_json, get_redis_conn, novel_key};

pub(crate) async fn novel_exists(novel_id: u64) -> Result<bool, DbErr> {
    let sql = format!(
        "SELECT COUNT(*) AS cnt FROM {table} WHERE novelid = ?",
        table = CONFIG.novel_table()
    );
    let cnt = query_count(&sql, Some(Values(vec![novel_id.into()]))).await?;
    Ok(cnt > 0)
}

pub(crate) async fn get_novel_by_slug(slug: &str) -> Result<Option<Novel>, DbErr> {
    let sql = format!(
        "SELECT novelid, novelname, slug, author, intro, coverimg FROM {table} WHERE slug = ? LIMIT 1",
        table = CONFIG.novel_table()
    );
    get_one_as::<Novel>(&sql, Some(Values(vec![slug.into()]))).await
}

/// 某小说全部已发布章节 按 (卷序, 章序) 升序取出
pub(crate) async fn get_flat_chapters(novel_id: u64) -> Result<Vec<Chapter>, DbErr> {
    let sql = format!(
        "SELECT c.chapterid, c.chaptername, c.slug, v.volumeorder, c.chapterorder, c.createtime, c.isdraft \
         FROM {chapter} c JOIN {volume} v ON v.volumeid = c.volumeid \
         WHERE v.novelid = ? AND c.isdraft = 0 \
         ORDER BY v.volumeorder ASC, c.chapterorder ASC",
        chapter = CONFIG.chapter_table(),
        volume = CONFIG.volume_table()
    );
    query_all_as::<Chapter>(&sql, Some(Values(vec![novel_id.into()]))).await
}

/// 章节是否属于该小说且已发布
pub(crate) async fn chapter_in_novel(novel_id: u64, chapter_id: u64) -> Result<bool, DbErr> {
    let sql = format!(
        "SELECT COUNT(*) AS cnt FROM {chapter} c JOIN {volume} v ON v.volumeid = c.volumeid \
         WHERE c.chapterid = ? AND v.novelid = ? AND c.isdraft = 0",
        chapter = CONFIG.chapter_table(),
        volume = CONFIG.volume_table()
    );
    let cnt = query_count(&sql, Some(Values(vec![chapter_id.into(), novel_id.into()]))).await?;
    Ok(cnt > 0)
}

pub(crate) async fn get_novel_detail(slug: &str) -> Result<Option<NovelDetail>, DbErr> {
    let key = novel_key(slug);
    let redis = get_redis_conn().await;
    if let Some(ref redis_arc) = redis {
        if let Ok(Some(detail)) = cache_get_json::<NovelDetail>(Some(redis_arc), &key).await {
            return Ok(Some(detail));
        }
    }
    let Some(novel) = get_novel_by_slug(slug).await? else {
        return Ok(None);
    };
    let chapters = get_flat_chapters(novel.novelid).await?;
    let seq = reading_sequence(&chapters);
    let detail = NovelDetail {
        novel_id: novel.novelid,
        title: novel.novelname,
        slug: novel.slug,
        author: novel.author,
        intro: novel.intro,
        cover_image: novel.coverimg,
        latest_chapter: seq.last().map(|c| ChapterRef::from(*c)),
        chapters: seq.iter().map(|c| ChapterRef::from(*c)).collect(),
    };
    if let Some(ref redis_arc) = redis {
        let _ = cache_set_json(Some(redis_arc), &key, &detail, CONFIG.cache.novel).await;
    }
    Ok(Some(detail))
}
