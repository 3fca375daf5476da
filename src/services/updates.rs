use std::collections::HashMap;

use crate::models::library::{BookcaseNovel, LibraryUpdate};
use crate::models::novel::{Chapter, ChapterRef};

/// 单本小说的未读判定结果 引用阅读序列里的章节
#[derive(Debug)]
pub(crate) struct NovelDiff<'a> {
    pub new_count: u64,
    pub latest: &'a Chapter,
    pub next: &'a Chapter,
}

/// 阅读序列：剔除草稿后按 (卷序, 章序) 升序扁平化
pub(crate) fn reading_sequence(chapters: &[Chapter]) -> Vec<&Chapter> {
    let mut seq: Vec<&Chapter> = chapters.iter().filter(|c| !c.isdraft).collect();
    seq.sort_by_key(|c| (c.volumeorder, c.chapterorder));
    seq
}

/// 未读章节判定
///
/// 没有已发布章节或没有新章节的小说返回 None，不出现在任何结果里。
/// lastread 比较用章节发布时间，严格大于才算新。
pub(crate) fn diff_novel<'a>(
    chapters: &'a [Chapter],
    lastread: i64,
    history_chapter: Option<u64>,
) -> Option<NovelDiff<'a>> {
    let seq = reading_sequence(chapters);
    let latest = *seq.last()?;
    let new_count = seq.iter().filter(|c| c.createtime > lastread).count() as u64;
    if new_count == 0 {
        return None;
    }
    let next = next_chapter(&seq, history_chapter);
    Some(NovelDiff { new_count, latest, next })
}

/// 智能跳转：读过的下一章 已在末章则停在末章 没读过从第一章开始
///
/// 按章节在阅读序列中的位置比较，不比较章内序号，
/// 各卷从1重新编号也不会跨卷错位。
fn next_chapter<'a>(seq: &[&'a Chapter], history_chapter: Option<u64>) -> &'a Chapter {
    let Some(cid) = history_chapter else {
        return seq[0];
    };
    match seq.iter().position(|c| c.chapterid == cid) {
        Some(i) if i + 1 < seq.len() => seq[i + 1],
        Some(_) => seq[seq.len() - 1],
        None => seq[0], // 进度指向的章节已撤下 回到第一章
    }
}

/// 角标计数用的存在性判定 与 diff_novel 共用同一谓词 保证角标和列表不漂移
pub(crate) fn has_new(chapters: &[Chapter], lastread: i64) -> bool {
    chapters
        .iter()
        .any(|c| !c.isdraft && c.createtime > lastread)
}

/// 把书架行装配成更新条目 按关注时间倒序
pub(crate) fn build_updates(
    entries: &[BookcaseNovel],
    chapters_by_novel: &HashMap<u64, Vec<Chapter>>,
    history: &HashMap<u64, u64>,
) -> Vec<LibraryUpdate> {
    let mut ordered: Vec<&BookcaseNovel> = entries.iter().collect();
    ordered.sort_by_key(|e| std::cmp::Reverse(e.createtime));

    static NO_CHAPTERS: Vec<Chapter> = Vec::new();
    let mut out = Vec::new();
    for entry in ordered {
        let chapters = chapters_by_novel
            .get(&entry.novelid)
            .unwrap_or(&NO_CHAPTERS);
        let Some(diff) = diff_novel(chapters, entry.lastread, history.get(&entry.novelid).copied())
        else {
            continue;
        };
        out.push(LibraryUpdate {
            novel_id: entry.novelid,
            title: entry.novelname.clone(),
            slug: entry.slug.clone(),
            cover_image: entry.coverimg.clone(),
            latest_chapter: ChapterRef::from(diff.latest),
            next_chapter_slug: diff.next.slug.clone(),
            new_chapters_count: diff.new_count,
            last_read_at: entry.lastread,
        });
    }
    out
}

/// 有更新的小说数 每本命中一章即停
pub(crate) fn count_updates(
    entries: &[BookcaseNovel],
    chapters_by_novel: &HashMap<u64, Vec<Chapter>>,
) -> u64 {
    entries
        .iter()
        .filter(|e| {
            chapters_by_novel
                .get(&e.novelid)
                .map(|cs| has_new(cs, e.lastread))
                .unwrap_or(false)
        })
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(id: u64, vol: u32, ord: u32, created: i64) -> Chapter {
        Chapter {
            chapterid: id,
            chaptername: format!("第{}章", id),
            slug: format!("chapter-{}", id),
            volumeorder: vol,
            chapterorder: ord,
            createtime: created,
            isdraft: false,
        }
    }

    fn draft(id: u64, vol: u32, ord: u32, created: i64) -> Chapter {
        Chapter { isdraft: true, ..ch(id, vol, ord, created) }
    }

    fn entry(novelid: u64, lastread: i64, followed: i64) -> BookcaseNovel {
        BookcaseNovel {
            novelid,
            novelname: format!("novel-{}", novelid),
            slug: format!("novel-{}", novelid),
            coverimg: String::new(),
            lastread,
            createtime: followed,
        }
    }

    #[test]
    fn empty_novel_never_included() {
        assert!(diff_novel(&[], 0, None).is_none());
        assert!(diff_novel(&[], i64::MIN, None).is_none());
    }

    #[test]
    fn draft_only_novel_never_included() {
        let chapters = vec![draft(1, 1, 1, 100), draft(2, 1, 2, 200)];
        assert!(diff_novel(&chapters, 0, None).is_none());
        assert!(!has_new(&chapters, 0));
    }

    #[test]
    fn new_count_is_strictly_newer_than_lastread() {
        let chapters = vec![ch(1, 1, 1, 100), ch(2, 1, 2, 200), ch(3, 1, 3, 300)];
        let diff = diff_novel(&chapters, 150, None).unwrap();
        assert_eq!(diff.new_count, 2);
        // 相等不算新
        let diff = diff_novel(&chapters, 200, None).unwrap();
        assert_eq!(diff.new_count, 1);
    }

    #[test]
    fn zero_new_chapters_excluded_not_reported_as_zero() {
        let chapters = vec![ch(1, 1, 1, 100), ch(2, 1, 2, 200)];
        assert!(diff_novel(&chapters, 200, None).is_none());
        assert!(diff_novel(&chapters, 999, None).is_none());
    }

    #[test]
    fn draft_chapters_do_not_count_as_new() {
        let chapters = vec![ch(1, 1, 1, 100), draft(2, 1, 2, 500)];
        assert!(diff_novel(&chapters, 100, None).is_none());
        assert!(!has_new(&chapters, 100));
    }

    #[test]
    fn smart_routing_mid_progress_targets_following_chapter() {
        let chapters: Vec<Chapter> = (1..=10).map(|i| ch(i, 1, i as u32, i as i64 * 100)).collect();
        let diff = diff_novel(&chapters, 0, Some(5)).unwrap();
        assert_eq!(diff.next.chapterid, 6);
        assert_eq!(diff.next.slug, "chapter-6");
    }

    #[test]
    fn smart_routing_at_last_chapter_clamps_to_last() {
        let chapters: Vec<Chapter> = (1..=10).map(|i| ch(i, 1, i as u32, i as i64 * 100)).collect();
        let diff = diff_novel(&chapters, 0, Some(10)).unwrap();
        assert_eq!(diff.next.chapterid, 10);
    }

    #[test]
    fn smart_routing_without_history_targets_first_chapter() {
        let chapters: Vec<Chapter> = (1..=10).map(|i| ch(i, 1, i as u32, i as i64 * 100)).collect();
        let diff = diff_novel(&chapters, 0, None).unwrap();
        assert_eq!(diff.next.chapterid, 1);
    }

    #[test]
    fn smart_routing_crosses_volume_boundaries_by_position() {
        // 两卷都从第1章编号 按序列位置推进不会跨卷错位
        let chapters = vec![
            ch(11, 1, 1, 100),
            ch(12, 1, 2, 200),
            ch(13, 1, 3, 300),
            ch(21, 2, 1, 400),
            ch(22, 2, 2, 500),
        ];
        let diff = diff_novel(&chapters, 0, Some(13)).unwrap();
        assert_eq!(diff.next.chapterid, 21);
    }

    #[test]
    fn vanished_history_chapter_falls_back_to_first() {
        let chapters = vec![ch(1, 1, 1, 100), ch(2, 1, 2, 200)];
        let diff = diff_novel(&chapters, 0, Some(999)).unwrap();
        assert_eq!(diff.next.chapterid, 1);
    }

    #[test]
    fn latest_chapter_is_sequence_tail_regardless_of_progress() {
        let chapters = vec![ch(3, 2, 1, 50), ch(1, 1, 1, 300), ch(2, 1, 2, 200)];
        // 序列按 (卷序, 章序) 排 不按发布时间
        let diff = diff_novel(&chapters, 0, Some(1)).unwrap();
        assert_eq!(diff.latest.chapterid, 3);
        let diff = diff_novel(&chapters, 0, None).unwrap();
        assert_eq!(diff.latest.chapterid, 3);
    }

    #[test]
    fn count_matches_list_inclusion() {
        // A 有新章 B 无新章 C 无已发布章节 → 角标为1
        let mut chapters_by_novel = HashMap::new();
        chapters_by_novel.insert(1, vec![ch(1, 1, 1, 100), ch(2, 1, 2, 900)]);
        chapters_by_novel.insert(2, vec![ch(3, 1, 1, 100)]);
        chapters_by_novel.insert(3, Vec::new());
        let entries = vec![entry(1, 500, 10), entry(2, 500, 20), entry(3, 500, 30)];
        let history = HashMap::new();

        let list = build_updates(&entries, &chapters_by_novel, &history);
        let count = count_updates(&entries, &chapters_by_novel);
        assert_eq!(list.len(), 1);
        assert_eq!(count, list.len() as u64);
        assert_eq!(list[0].novel_id, 1);
        assert_eq!(list[0].new_chapters_count, 1);
    }

    #[test]
    fn updates_ordered_by_follow_time_desc() {
        let mut chapters_by_novel = HashMap::new();
        chapters_by_novel.insert(1, vec![ch(1, 1, 1, 900)]);
        chapters_by_novel.insert(2, vec![ch(2, 1, 1, 900)]);
        chapters_by_novel.insert(3, vec![ch(3, 1, 1, 900)]);
        let entries = vec![entry(1, 0, 100), entry(2, 0, 300), entry(3, 0, 200)];
        let list = build_updates(&entries, &chapters_by_novel, &HashMap::new());
        let ids: Vec<u64> = list.iter().map(|u| u.novel_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn update_shape_carries_novel_and_routing_fields() {
        let mut chapters_by_novel = HashMap::new();
        chapters_by_novel.insert(7, vec![ch(1, 1, 1, 100), ch(2, 1, 2, 900)]);
        let mut history = HashMap::new();
        history.insert(7u64, 1u64);
        let entries = vec![entry(7, 500, 10)];
        let list = build_updates(&entries, &chapters_by_novel, &history);
        let u = &list[0];
        assert_eq!(u.novel_id, 7);
        assert_eq!(u.latest_chapter.id, 2);
        assert_eq!(u.next_chapter_slug, "chapter-2");
        assert_eq!(u.new_chapters_count, 1);
        assert_eq!(u.last_read_at, 500);
    }

    #[test]
    fn missing_chapter_rows_treated_as_empty_novel() {
        let entries = vec![entry(42, 0, 10)];
        let list = build_updates(&entries, &HashMap::new(), &HashMap::new());
        assert!(list.is_empty());
        assert_eq!(count_updates(&entries, &HashMap::new()), 0);
    }
}
