//! Display formatting shared by every view.

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;

use crate::config::AssetsConfig;

/// Placeholder for absent values.
pub const PLACEHOLDER: &str = "-";

/// `2024/05/01 10:00`
pub fn format_date_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y/%m/%d %H:%M").to_string()
}

/// Like [`format_date_time`], rendering `-` for a missing timestamp.
pub fn format_opt(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(format_date_time)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Expand a relative object-storage path into a public URL.
///
/// An empty path stays empty so views can skip the `<img>` entirely.
pub fn cos_url(assets: &AssetsConfig, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    format!(
        "https://{}.cos.{}.myqcloud.com/{}",
        assets.cos_bucket,
        assets.cos_region,
        path.trim_start_matches('/')
    )
}

/// Last path segment of a URL, percent-decoded, without query or fragment.
/// Returns an empty string when the URL is not valid UTF-8 after decoding.
pub fn file_name_from_url(url: &str) -> String {
    let Ok(decoded) = percent_decode_str(url).decode_utf8() else {
        return String::new();
    };
    let last = decoded.rsplit('/').next().unwrap_or_default();
    let end = last.find(['?', '#']).unwrap_or(last.len());
    last[..end].to_string()
}

/// `1 day`, `3 days`
pub(crate) fn count(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date_time() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 59).unwrap();
        assert_eq!(format_date_time(&ts), "2024/05/01 09:05");
        assert_eq!(format_opt(None), "-");
    }

    #[test]
    fn test_cos_url() {
        let assets = AssetsConfig {
            cos_bucket: "books-1250000000".to_string(),
            cos_region: "ap-shanghai".to_string(),
        };
        assert_eq!(
            cos_url(&assets, "cover/dune.jpg"),
            "https://books-1250000000.cos.ap-shanghai.myqcloud.com/cover/dune.jpg"
        );
        assert_eq!(cos_url(&assets, ""), "");
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://x.test/ebook/%E4%B8%89%E4%BD%93.pdf?sign=abc#p2"),
            "三体.pdf"
        );
        assert_eq!(file_name_from_url("plain.pdf"), "plain.pdf");
        assert_eq!(file_name_from_url("https://x.test/%FF.pdf"), "");
    }

    #[test]
    fn test_count() {
        assert_eq!(count(1, "day"), "1 day");
        assert_eq!(count(0, "hour"), "0 hours");
    }
}
