use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;

use crate::handlers::history::{post_history, post_mark_all_read, post_mark_read};
use crate::handlers::library::{
    delete_library, get_library, get_update_count, get_updates, post_library,
};
use crate::handlers::novel::get_novel;
use crate::utils::db::conn::{init_conn, DB_CONN};

pub async fn router() -> Router {
    let db = init_conn().await.expect("初始化数据库连接失败");
    DB_CONN.set(db).expect("DB_CONN 已经初始化过了");
    Router::new()
        .route(
            "/api/library",
            get(get_library).post(post_library).delete(delete_library),
        )
        .route("/api/library/updates", get(get_updates))
        .route("/api/library/updates/count", get(get_update_count))
        .route("/api/library/read", post(post_mark_read))
        .route("/api/library/read-all", post(post_mark_all_read))
        .route("/api/history", post(post_history))
        .route("/api/novel/{slug}", get(get_novel))
        .layer(CompressionLayer::new())
}
