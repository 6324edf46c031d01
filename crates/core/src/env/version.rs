use once_cell::sync::Lazy;
use regex::Regex;

static VERSION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"version "(.*)""#).expect("valid version regex")
});

static DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+").expect("valid digits regex")
});

/// Extracts the major Java version from a `java -version` banner.
///
/// `1.8.0_231` reads as 8, `11.0.2` as 11, `17` as 17. Anything that does not carry a
/// quoted `version "..."` token, or has no digits in it, reads as 0.
pub fn parse_major_version(banner: &str) -> u32 {
    let Some(captures) = VERSION_TOKEN.captures(banner) else {
        return 0;
    };
    let mut version = captures.get(1).map_or("", |m| m.as_str());
    // Legacy scheme: Java 8 reports itself as 1.8.x
    if let Some(rest) = version.strip_prefix("1.") {
        version = rest;
    }
    DIGITS
        .find(version)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
