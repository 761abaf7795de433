//! Instagram CDN 链接过期检测
//!
//! Instagram CDN 的签名链接在查询参数 `oe` 中携带十六进制的 Unix 秒级过期时间。

use url::Url;

/// CDN 域名
pub const INSTAGRAM_CDN_DOMAIN: &str = "cdninstagram.com";

/// 携带过期时间的查询参数
pub const EXPIRY_PARAM: &str = "oe";

/// 提前视为过期的时间窗口（1 小时）
pub const EXPIRY_MARGIN_MS: i64 = 60 * 60 * 1000;

/// 判断 Instagram CDN 链接是否已经（或即将在 1 小时内）过期
///
/// 无法解析、非 CDN 域名或缺少过期参数的链接一律视为未过期。
pub fn is_instagram_url_expired(url: &str) -> bool {
    is_instagram_url_expired_at(url, chrono::Utc::now().timestamp_millis())
}

/// 以给定的当前时间（毫秒）判断是否过期
pub fn is_instagram_url_expired_at(url: &str, now_ms: i64) -> bool {
    expiration_millis(url)
        .is_some_and(|expires_at| now_ms >= expires_at.saturating_sub(EXPIRY_MARGIN_MS))
}

/// 提取 CDN 链接的过期时间（毫秒）
pub fn expiration_millis(url: &str) -> Option<i64> {
    let parsed = Url::parse(url).ok()?;

    if !is_instagram_cdn_host(parsed.host_str()?) {
        return None;
    }

    let (_, raw) = parsed.query_pairs().find(|(key, _)| key == EXPIRY_PARAM)?;
    parse_hex_seconds(&raw)?.checked_mul(1000)
}

/// 解析十六进制秒数：允许 `0x`/`0X` 前缀，只取开头连续的十六进制数字
fn parse_hex_seconds(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len());

    i64::from_str_radix(&digits[..end], 16).ok()
}

fn is_instagram_cdn_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    host == INSTAGRAM_CDN_DOMAIN
        || host
            .strip_suffix(INSTAGRAM_CDN_DOMAIN)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPIRES_AT_SECS: i64 = 0x6700_0000;

    fn cdn_url(oe: &str) -> String {
        format!(
            "https://scontent-lax3-1.cdninstagram.com/v/t51.2885-15/clip.mp4?_nc_ht=x&oe={}&_nc_sid=1",
            oe
        )
    }

    #[test]
    fn test_expiration_is_parsed_from_hex() {
        assert_eq!(
            expiration_millis(&cdn_url("67000000")),
            Some(EXPIRES_AT_SECS * 1000)
        );
        assert_eq!(
            expiration_millis(&cdn_url("6700000A")),
            Some((EXPIRES_AT_SECS + 10) * 1000)
        );
    }

    #[test]
    fn test_margin_boundary() {
        let url = cdn_url("67000000");
        let expires_at = EXPIRES_AT_SECS * 1000;

        assert!(!is_instagram_url_expired_at(&url, expires_at - EXPIRY_MARGIN_MS - 1));
        assert!(is_instagram_url_expired_at(&url, expires_at - EXPIRY_MARGIN_MS));
        assert!(is_instagram_url_expired_at(&url, expires_at + 1));
    }

    #[test]
    fn test_host_matching() {
        assert!(is_instagram_cdn_host("cdninstagram.com"));
        assert!(is_instagram_cdn_host("scontent.CDNINSTAGRAM.com"));
        assert!(!is_instagram_cdn_host("evilcdninstagram.com"));
        assert!(!is_instagram_cdn_host("cdninstagram.com.example.org"));
    }

    #[test]
    fn test_invalid_hex_is_not_expired() {
        assert!(!is_instagram_url_expired_at(&cdn_url("zz"), i64::MAX));
        assert!(!is_instagram_url_expired_at(&cdn_url(""), i64::MAX));
    }

    #[test]
    fn test_hex_prefix_and_trailing_garbage() {
        let expected = Some(EXPIRES_AT_SECS * 1000);
        assert_eq!(expiration_millis(&cdn_url("0x67000000")), expected);
        assert_eq!(expiration_millis(&cdn_url("0X67000000")), expected);
        assert_eq!(expiration_millis(&cdn_url("67000000zz")), expected);
        assert_eq!(expiration_millis(&cdn_url("0x")), None);
        assert!(is_instagram_url_expired_at(&cdn_url("0x67000000"), EXPIRES_AT_SECS * 1000));
    }

    #[test]
    fn test_overflowing_expiry_is_not_expired() {
        assert_eq!(expiration_millis(&cdn_url("7FFFFFFFFFFFFFFF")), None);
        assert!(!is_instagram_url_expired_at(&cdn_url("7FFFFFFFFFFFFFFF"), i64::MAX));
    }
}
