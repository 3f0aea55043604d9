// 时间列解析: 本库写入 RFC 3339；旧库可能是 "YYYY-MM-DD HH:MM:SS[.fff][+08:00]"

use chrono::{DateTime, NaiveDateTime, Utc};

pub(crate) fn parse_timestamp(value: Option<String>) -> DateTime<Utc> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| {
            DateTime::parse_from_rfc3339(s)
                .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z"))
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                        .ok()
                        .map(|naive| naive.and_utc())
                })
        })
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_and_legacy_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 4, 0, 0).unwrap();
        assert_eq!(
            parse_timestamp(Some("2024-05-01T04:00:00+00:00".to_string())),
            expected
        );
        assert_eq!(
            parse_timestamp(Some("2024-05-01 12:00:00.000+08:00".to_string())),
            expected
        );
        assert_eq!(
            parse_timestamp(Some("2024-05-01 04:00:00".to_string())),
            expected
        );
    }
}
