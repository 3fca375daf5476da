use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub(crate) site_name: String,
    pub(crate) prefix: String,
    pub(crate) update_limit: u64,
    pub(crate) page_size: u64,
    pub(crate) max_page_size: u64,
    pub(crate) cache: Cache,
}

impl Config {
    pub(crate) fn bookcase_table(&self) -> String {
        format!("{}bookcase", self.prefix)
    }

    pub(crate) fn novel_table(&self) -> String {
        format!("{}novel", self.prefix)
    }

    pub(crate) fn volume_table(&self) -> String {
        format!("{}volume", self.prefix)
    }

    pub(crate) fn chapter_table(&self) -> String {
        format!("{}chapter", self.prefix)
    }

    pub(crate) fn history_table(&self) -> String {
        format!("{}reading_history", self.prefix)
    }

    /// 每页条数 0或缺省回退到配置值 超限截断
    pub(crate) fn clamp_limit(&self, limit: Option<u64>) -> u64 {
        match limit {
            Some(0) | None => self.page_size,
            Some(n) if n > self.max_page_size => self.max_page_size,
            Some(n) => n,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Cache {
    pub(crate) list: u64,   // 书架列表缓存秒数
    pub(crate) count: u64,  // 更新角标缓存秒数
    pub(crate) novel: u64,  // 小说详情缓存秒数
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conf() -> Config {
        Config {
            site_name: "书架".to_string(),
            prefix: "bc_".to_string(),
            update_limit: 5,
            page_size: 20,
            max_page_size: 50,
            cache: Cache { list: 60, count: 30, novel: 300 },
        }
    }

    #[test]
    fn table_names_carry_prefix() {
        let c = conf();
        assert_eq!(c.bookcase_table(), "bc_bookcase");
        assert_eq!(c.history_table(), "bc_reading_history");
    }

    #[test]
    fn clamp_limit_bounds() {
        let c = conf();
        assert_eq!(c.clamp_limit(None), 20);
        assert_eq!(c.clamp_limit(Some(0)), 20);
        assert_eq!(c.clamp_limit(Some(10)), 10);
        assert_eq!(c.clamp_limit(Some(500)), 50);
    }
}
