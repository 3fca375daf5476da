use axum_extra::extract::cookie::CookieJar;

pub fn get_cookie_value(jar: &CookieJar, key: &str) -> Option<String> {
    jar.get(key).map(|c| c.value().to_owned())
}

/// 从会话cookie解析当前用户id 登录态由外部登录流程写入
/// 解析不出来一律视为未登录
pub(crate) fn current_user_id(jar: &CookieJar) -> Option<u64> {
    let raw = get_cookie_value(jar, "ss_userid")?;
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(uid) => Some(uid),
    }
}
