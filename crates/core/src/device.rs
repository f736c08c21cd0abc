//! Best-effort client device classification from a raw `User-Agent` string.
//!
//! Each axis (device type, operating system, browser) is an ordered table of
//! [`Rule`]s evaluated top-to-bottom; the first rule that matches wins and a
//! fixed `Unknown` label is used when none does. The ordering is part of the
//! contract: later rules assume earlier ones did not match. For example the
//! Android-without-"mobile" tablet rule must run before the generic Android
//! mobile rule, and Edge/Opera/Samsung must run before Chrome because their
//! user agents also carry a `Chrome/` token.
//!
//! The classifier has no error states.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Label used for any axis that no rule matched.
pub const UNKNOWN: &str = "Unknown";

/// Separator between OS and browser in [`DeviceInfo::device_name`].
pub const DEVICE_NAME_SEPARATOR: &str = " • ";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Coarse device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    Unknown,
}

impl DeviceType {
    /// Storage/wire representation (`"desktop"`, `"mobile"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Unknown => "unknown",
        }
    }

    /// Parse the storage representation. Unrecognised values map to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "desktop" => DeviceType::Desktop,
            "mobile" => DeviceType::Mobile,
            "tablet" => DeviceType::Tablet,
            _ => DeviceType::Unknown,
        }
    }
}

/// Result of classifying a user agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_type: DeviceType,
    pub os: String,
    pub browser: String,
    /// `"{os} • {browser}"`.
    pub device_name: String,
}

impl DeviceInfo {
    /// Classify a raw user-agent string. `None` or an empty string yields
    /// an all-unknown result.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let ua = user_agent.unwrap_or_default().to_lowercase();

        let device_type = first_match(DEVICE_TYPE_RULES, &ua).unwrap_or(DeviceType::Unknown);
        let os = first_match(OS_RULES, &ua).unwrap_or_else(|| UNKNOWN.to_string());
        let browser = first_match(BROWSER_RULES, &ua).unwrap_or_else(|| UNKNOWN.to_string());
        let device_name = format!("{os}{DEVICE_NAME_SEPARATOR}{browser}");

        Self {
            device_type,
            os,
            browser,
            device_name,
        }
    }
}

/// One entry of an ordered classification table.
pub struct Rule<T> {
    /// Short identifier, used in tests and when debugging misclassifications.
    pub name: &'static str,
    /// Returns `Some(label)` when the (lowercased) user agent matches.
    pub detect: fn(&str) -> Option<T>,
}

/// Evaluate `rules` in order and return the first label produced.
pub fn first_match<T>(rules: &[Rule<T>], ua: &str) -> Option<T> {
    rules.iter().find_map(|rule| (rule.detect)(ua))
}

/// Name of the first rule in `rules` that matches `ua`.
pub fn matching_rule<T>(rules: &[Rule<T>], ua: &str) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| (rule.detect)(ua).is_some())
        .map(|rule| rule.name)
}

fn contains_any(ua: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| ua.contains(n))
}

fn capture(re: &Regex, ua: &str) -> Option<String> {
    re.captures(ua)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn labelled(label: &str, version: Option<String>) -> String {
    match version {
        Some(v) => format!("{label} {v}"),
        None => label.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Device type
// ---------------------------------------------------------------------------

pub const DEVICE_TYPE_RULES: &[Rule<DeviceType>] = &[
    Rule {
        name: "tablet",
        detect: detect_tablet,
    },
    Rule {
        name: "mobile",
        detect: detect_mobile,
    },
    Rule {
        name: "desktop",
        detect: detect_desktop,
    },
];

fn detect_tablet(ua: &str) -> Option<DeviceType> {
    let android_tablet = ua.contains("android") && !ua.contains("mobile");
    (android_tablet || contains_any(ua, &["ipad", "tablet", "kindle", "silk", "playbook"]))
        .then_some(DeviceType::Tablet)
}

fn detect_mobile(ua: &str) -> Option<DeviceType> {
    contains_any(
        ua,
        &[
            "mobile",
            "iphone",
            "ipod",
            "android",
            "blackberry",
            "windows phone",
            "opera mini",
            "iemobile",
        ],
    )
    .then_some(DeviceType::Mobile)
}

fn detect_desktop(ua: &str) -> Option<DeviceType> {
    contains_any(ua, &["windows", "macintosh", "mac os x", "linux", "cros", "x11"])
        .then_some(DeviceType::Desktop)
}

// ---------------------------------------------------------------------------
// Operating system
// ---------------------------------------------------------------------------

static WINDOWS_NT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"windows nt (\d+\.\d+)").expect("valid regex"));
static IOS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:iphone os|cpu os) (\d+(?:_\d+)*)").expect("valid regex"));
static ANDROID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"android (\d+(?:\.\d+)*)").expect("valid regex"));
static MACOS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"mac os x (\d+(?:[_.]\d+)*)").expect("valid regex"));

pub const OS_RULES: &[Rule<String>] = &[
    Rule {
        name: "windows_phone",
        detect: detect_windows_phone,
    },
    Rule {
        name: "windows",
        detect: detect_windows,
    },
    Rule {
        name: "ios",
        detect: detect_ios,
    },
    Rule {
        name: "android",
        detect: detect_android,
    },
    Rule {
        name: "chrome_os",
        detect: detect_chrome_os,
    },
    Rule {
        name: "macos",
        detect: detect_macos,
    },
    Rule {
        name: "linux",
        detect: detect_linux,
    },
];

fn detect_windows_phone(ua: &str) -> Option<String> {
    ua.contains("windows phone")
        .then(|| "Windows Phone".to_string())
}

/// Map a `Windows NT x.y` kernel version to its marketing name.
pub fn windows_release_name(nt_version: &str) -> &'static str {
    match nt_version {
        "10.0" => "Windows 10",
        "6.3" => "Windows 8.1",
        "6.2" => "Windows 8",
        "6.1" => "Windows 7",
        "6.0" => "Windows Vista",
        "5.1" | "5.2" => "Windows XP",
        _ => "Windows",
    }
}

fn detect_windows(ua: &str) -> Option<String> {
    if !ua.contains("windows") {
        return None;
    }
    let name = capture(&WINDOWS_NT_RE, ua)
        .map(|v| windows_release_name(&v))
        .unwrap_or("Windows");
    Some(name.to_string())
}

fn detect_ios(ua: &str) -> Option<String> {
    if !contains_any(ua, &["iphone", "ipad", "ipod"]) {
        return None;
    }
    let version = capture(&IOS_RE, ua).map(|v| v.replace('_', "."));
    Some(labelled("iOS", version))
}

fn detect_android(ua: &str) -> Option<String> {
    ua.contains("android")
        .then(|| labelled("Android", capture(&ANDROID_RE, ua)))
}

fn detect_chrome_os(ua: &str) -> Option<String> {
    ua.contains("cros").then(|| "Chrome OS".to_string())
}

fn detect_macos(ua: &str) -> Option<String> {
    if !contains_any(ua, &["mac os x", "macintosh"]) {
        return None;
    }
    let version = capture(&MACOS_RE, ua).map(|v| v.replace('_', "."));
    Some(labelled("macOS", version))
}

fn detect_linux(ua: &str) -> Option<String> {
    contains_any(ua, &["linux", "x11"]).then(|| "Linux".to_string())
}

// ---------------------------------------------------------------------------
// Browser
// ---------------------------------------------------------------------------

static EDGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"edg(?:e|a|ios)?/(\d+)").expect("valid regex"));
static OPERA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:opr|opera)[/ ](\d+)").expect("valid regex"));
static SAMSUNG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"samsungbrowser/(\d+)").expect("valid regex"));
static FIREFOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:firefox|fxios)/(\d+)").expect("valid regex"));
static CHROME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:chrome|crios)/(\d+)").expect("valid regex"));
static CHROMIUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"chromium/(\d+)").expect("valid regex"));
static SAFARI_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"version/(\d+(?:\.\d+)?)").expect("valid regex"));
static MSIE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"msie (\d+)").expect("valid regex"));
static TRIDENT_RV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rv:(\d+)").expect("valid regex"));

pub const BROWSER_RULES: &[Rule<String>] = &[
    Rule {
        name: "edge",
        detect: detect_edge,
    },
    Rule {
        name: "opera",
        detect: detect_opera,
    },
    Rule {
        name: "samsung",
        detect: detect_samsung,
    },
    Rule {
        name: "firefox",
        detect: detect_firefox,
    },
    Rule {
        name: "chrome",
        detect: detect_chrome,
    },
    Rule {
        name: "chromium",
        detect: detect_chromium,
    },
    Rule {
        name: "safari",
        detect: detect_safari,
    },
    Rule {
        name: "internet_explorer",
        detect: detect_ie,
    },
];

fn detect_edge(ua: &str) -> Option<String> {
    capture(&EDGE_RE, ua).map(|v| labelled("Edge", Some(v)))
}

fn detect_opera(ua: &str) -> Option<String> {
    if let Some(v) = capture(&OPERA_RE, ua) {
        return Some(labelled("Opera", Some(v)));
    }
    ua.contains("opera").then(|| "Opera".to_string())
}

fn detect_samsung(ua: &str) -> Option<String> {
    capture(&SAMSUNG_RE, ua).map(|v| labelled("Samsung Internet", Some(v)))
}

fn detect_firefox(ua: &str) -> Option<String> {
    capture(&FIREFOX_RE, ua).map(|v| labelled("Firefox", Some(v)))
}

/// Chromium builds also advertise a `Chrome/` token; they must not be
/// reported as Chrome.
fn detect_chrome(ua: &str) -> Option<String> {
    if ua.contains("chromium") {
        return None;
    }
    capture(&CHROME_RE, ua).map(|v| labelled("Chrome", Some(v)))
}

fn detect_chromium(ua: &str) -> Option<String> {
    capture(&CHROMIUM_RE, ua).map(|v| labelled("Chromium", Some(v)))
}

fn detect_safari(ua: &str) -> Option<String> {
    if !ua.contains("safari/") || contains_any(ua, &["chrome", "chromium", "crios"]) {
        return None;
    }
    Some(labelled("Safari", capture(&SAFARI_VERSION_RE, ua)))
}

fn detect_ie(ua: &str) -> Option<String> {
    if let Some(v) = capture(&MSIE_RE, ua) {
        return Some(labelled("Internet Explorer", Some(v)));
    }
    ua.contains("trident/")
        .then(|| labelled("Internet Explorer", capture(&TRIDENT_RV_RE, ua)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPAD_SAFARI: &str = "Mozilla/5.0 (iPad; CPU OS 17_1 like Mac OS X) AppleWebKit/605.1.15 \
                               (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";
    const WIN10_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const LINUX_CHROMIUM: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chromium/119.0.6045.159 \
                                  Chrome/119.0.6045.159 Safari/537.36";
    const WIN10_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
                                 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const MAC_FIREFOX: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0";
    const MAC_SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                              (KHTML, like Gecko) Version/17.2 Safari/605.1.15";
    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_6 like Mac OS X) \
                                 AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.6 \
                                 Mobile/15E148 Safari/604.1";
    const WIN7_IE11: &str = "Mozilla/5.0 (Windows NT 6.1; Trident/7.0; rv:11.0) like Gecko";

    #[test]
    fn ipad_is_tablet_running_ios() {
        let info = DeviceInfo::from_user_agent(Some(IPAD_SAFARI));
        assert_eq!(info.device_type, DeviceType::Tablet);
        assert_eq!(info.os, "iOS 17.1");
        assert_eq!(info.browser, "Safari 17.1");
    }

    #[test]
    fn windows_nt_10_is_desktop_windows_10() {
        let info = DeviceInfo::from_user_agent(Some(WIN10_CHROME));
        assert_eq!(info.device_type, DeviceType::Desktop);
        assert_eq!(info.os, "Windows 10");
        assert_eq!(info.browser, "Chrome 120");
        assert_eq!(info.device_name, "Windows 10 • Chrome 120");
    }

    #[test]
    fn chromium_token_blocks_chrome_match() {
        let info = DeviceInfo::from_user_agent(Some(LINUX_CHROMIUM));
        assert!(!info.browser.starts_with("Chrome "), "got {}", info.browser);
        assert_eq!(info.browser, "Chromium 119");
        assert_eq!(info.os, "Linux");
    }

    #[test]
    fn edge_wins_over_chrome_by_order() {
        let info = DeviceInfo::from_user_agent(Some(WIN10_EDGE));
        assert_eq!(info.browser, "Edge 120");
        assert_eq!(
            matching_rule(BROWSER_RULES, &WIN10_EDGE.to_lowercase()),
            Some("edge")
        );
    }

    #[test]
    fn android_with_mobile_token_is_phone() {
        let info = DeviceInfo::from_user_agent(Some(ANDROID_PHONE));
        assert_eq!(info.device_type, DeviceType::Mobile);
        assert_eq!(info.os, "Android 14");
    }

    #[test]
    fn android_without_mobile_token_is_tablet() {
        let info = DeviceInfo::from_user_agent(Some(ANDROID_TABLET));
        assert_eq!(info.device_type, DeviceType::Tablet);
        assert_eq!(info.os, "Android 13");
    }

    #[test]
    fn mac_versions_are_dotted() {
        let firefox = DeviceInfo::from_user_agent(Some(MAC_FIREFOX));
        assert_eq!(firefox.os, "macOS 10.15");
        assert_eq!(firefox.browser, "Firefox 121");

        let safari = DeviceInfo::from_user_agent(Some(MAC_SAFARI));
        assert_eq!(safari.os, "macOS 10.15.7");
        assert_eq!(safari.browser, "Safari 17.2");
        assert_eq!(safari.device_type, DeviceType::Desktop);
    }

    #[test]
    fn iphone_is_mobile_not_macos() {
        let info = DeviceInfo::from_user_agent(Some(IPHONE_SAFARI));
        assert_eq!(info.device_type, DeviceType::Mobile);
        assert_eq!(info.os, "iOS 16.6");
    }

    #[test]
    fn trident_is_internet_explorer() {
        let info = DeviceInfo::from_user_agent(Some(WIN7_IE11));
        assert_eq!(info.os, "Windows 7");
        assert_eq!(info.browser, "Internet Explorer 11");
    }

    #[test]
    fn missing_user_agent_is_unknown_everywhere() {
        let info = DeviceInfo::from_user_agent(None);
        assert_eq!(info.device_type, DeviceType::Unknown);
        assert_eq!(info.os, UNKNOWN);
        assert_eq!(info.browser, UNKNOWN);
        assert_eq!(info.device_name, "Unknown • Unknown");
    }

    #[test]
    fn device_type_round_trips_through_storage_form() {
        for t in [
            DeviceType::Desktop,
            DeviceType::Mobile,
            DeviceType::Tablet,
            DeviceType::Unknown,
        ] {
            assert_eq!(DeviceType::parse(t.as_str()), t);
        }
        assert_eq!(DeviceType::parse("toaster"), DeviceType::Unknown);
    }

    #[test]
    fn windows_release_table() {
        assert_eq!(windows_release_name("6.3"), "Windows 8.1");
        assert_eq!(windows_release_name("5.2"), "Windows XP");
        assert_eq!(windows_release_name("11.0"), "Windows");
    }
}
