use std::sync::Arc;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, OnceCell};

pub(crate) static REDIS_CONN: OnceCell<Option<Arc<Mutex<MultiplexedConnection>>>> = OnceCell::const_new();

pub async fn get_redis_conn() -> Option<Arc<Mutex<MultiplexedConnection>>> {
    let opt = REDIS_CONN
        .get_or_init(|| async { init_redis().await })
        .await;

    opt.clone()
}

/// --------------------------
/// 初始化Redis连接 失败不致命 无缓存直连数据库
/// --------------------------
pub(crate) async fn init_redis() -> Option<Arc<Mutex<MultiplexedConnection>>> {
    let redis_url =
        std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379/0".to_string());
    let client = match Client::open(redis_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Redis Client 创建失败（非致命）：{}", e);
            return None;
        }
    };
    match client.get_multiplexed_async_connection().await {
        Ok(conn) => Some(Arc::new(Mutex::new(conn))),
        Err(e) => {
            eprintln!("Redis 连接失败（非致命）：{}", e);
            None
        }
    }
}

pub(crate) async fn cache_set_json<T: Serialize>(
    redis: Option<&Arc<Mutex<MultiplexedConnection>>>,
    key: &str,
    value: &T,
    ttl_secs: u64,
) -> RedisResult<()> {
    let Some(redis) = redis else {
        return Ok(());
    };

    let s = match serde_json::to_string(value) {
        Ok(v) => v,
        Err(_) => return Ok(()), // 序列化失败不影响主流程
    };

    let mut conn = redis.lock().await;
    let _: () = conn.set_ex(key, s, ttl_secs).await?;
    Ok(())
}

pub(crate) async fn cache_get_json<T: DeserializeOwned>(
    redis: Option<&Arc<Mutex<MultiplexedConnection>>>,
    key: &str,
) -> RedisResult<Option<T>> {
    let Some(redis) = redis else {
        return Ok(None);
    };

    let mut conn = redis.lock().await;
    let s: Option<String> = conn.get(key).await?;
    Ok(s.and_then(|s| serde_json::from_str(&s).ok()))
}

pub(crate) fn list_key(user_id: u64) -> String {
    format!("bookcase:list:{}", user_id)
}

pub(crate) fn count_key(user_id: u64) -> String {
    format!("bookcase:count:{}", user_id)
}

pub(crate) fn novel_key(slug: &str) -> String {
    format!("bookcase:novel:{}", slug)
}

/// 写操作后失效该用户的书架缓存 不等待结果
pub(crate) fn invalidate_library(user_id: u64) {
    tokio::spawn(async move {
        let Some(redis) = get_redis_conn().await else {
            return;
        };
        let keys = [list_key(user_id), count_key(user_id)];
        let mut conn = redis.lock().await;
        let res: RedisResult<()> = conn.del(&keys[..]).await;
        if let Err(e) = res {
            eprintln!("bookcase cache del error: {e}");
        }
    });
}
