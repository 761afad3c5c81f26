// ==========================================
// 出货数据对账系统 - 国际化 (i18n)
// ==========================================
// 使用 rust-i18n 库，文案位于 locales/*.yml
// 支持中文（默认）和英文；--locale 接受 zh / zh-CN / en / en-US 等写法
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use tracing::warn;

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 已提供文案的语言
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en"];

/// 把用户传入的语言代码映射到已支持的语言（未知语言返回 None）
pub fn resolve_locale(requested: &str) -> Option<&'static str> {
    let lang = requested
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match lang.as_str() {
        "zh" => Some("zh-CN"),
        "en" => Some("en"),
        _ => None,
    }
}

/// 设置语言，返回实际生效的语言代码
///
/// # 参数
/// - locale: 语言代码；不支持时回退默认语言
pub fn set_locale(locale: &str) -> &'static str {
    let resolved = resolve_locale(locale).unwrap_or_else(|| {
        warn!(requested = %locale, fallback = DEFAULT_LOCALE, "不支持的语言，使用默认语言");
        DEFAULT_LOCALE
    });
    rust_i18n::set_locale(resolved);
    resolved
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数，替换 %{name} 占位符）
///
/// # 示例
/// ```no_run
/// use shipment_recon::i18n::t_with_args;
/// let msg = t_with_args("recon.master_processed", &[("rows", "12")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// rust-i18n 的 locale 为进程级全局状态，切换语言的单元测试共用此锁
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale_variants() {
        assert_eq!(resolve_locale("zh-CN"), Some("zh-CN"));
        assert_eq!(resolve_locale("zh"), Some("zh-CN"));
        assert_eq!(resolve_locale("zh_TW"), Some("zh-CN"));
        assert_eq!(resolve_locale("EN-us"), Some("en"));
        assert_eq!(resolve_locale(" en "), Some("en"));
        assert_eq!(resolve_locale("fr"), None);
        assert_eq!(resolve_locale(""), None);
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(set_locale("de-DE"), DEFAULT_LOCALE);
        assert_eq!(rust_i18n::locale().to_string(), DEFAULT_LOCALE);
        assert_eq!(set_locale("en-GB"), "en");
        assert_eq!(rust_i18n::locale().to_string(), "en");
        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_every_locale_has_recon_messages() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let keys = [
            "recon.master_processed",
            "recon.feed_processed",
            "recon.master_rolled_back",
            "recon.no_master",
            "recon.no_previous_master",
            "recon.status",
            "recon.storage_failed",
            "recon.config_failed",
            "import.file_not_found",
            "import.unsupported_format",
            "import.missing_columns",
            "import.missing_header",
            "import.empty_workbook",
            "import.read_failed",
        ];
        for locale in SUPPORTED_LOCALES {
            set_locale(locale);
            for key in keys {
                let msg = t(key);
                // 缺失键时 rust-i18n 返回键名本身
                assert!(!msg.ends_with(key), "locale {locale} missing {key}");
            }
        }
        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_feed_message_carries_match_counts() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");
        let msg = t_with_args(
            "recon.feed_processed",
            &[("rows", "3"), ("exact", "1"), ("partial", "1"), ("unmatched", "1")],
        );
        assert!(msg.contains("Exact matches: 1"));
        assert!(msg.contains("Partial matches: 1"));
        assert!(msg.contains("Unmatched: 1"));

        set_locale("zh-CN");
        let msg = t_with_args(
            "recon.feed_processed",
            &[("rows", "3"), ("exact", "2"), ("partial", "0"), ("unmatched", "1")],
        );
        assert!(msg.contains("精确匹配: 2"));
        assert!(!msg.contains("%{"));
    }
}
