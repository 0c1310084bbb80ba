//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use notifyd_core::notification::{Notification, NotificationType};

/// Convert a SQLite row to a Notification.
///
/// Expected columns: id, type, recipient, subject, content, created_at, updated_at
pub fn row_to_notification(row: &Row) -> rusqlite::Result<Notification> {
    let id: i64 = row.get(0)?;
    let kind: String = row.get(1)?;
    let recipient: String = row.get(2)?;
    let subject: Option<String> = row.get(3)?;
    let content: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Notification {
        id,
        kind: parse_notification_type(1, &kind)?,
        recipient,
        subject,
        content,
        created_at: parse_datetime(5, &created_at)?,
        updated_at: parse_datetime(6, &updated_at)?,
    })
}

fn parse_notification_type(column: usize, s: &str) -> rusqlite::Result<NotificationType> {
    NotificationType::parse(s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            format!("unknown notification type: {s}").into(),
        )
    })
}

fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Formats a timestamp with fixed nanosecond precision and a `Z` suffix.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::nanoseconds(1_500);

        let a = format_datetime(&whole);
        let b = format_datetime(&fractional);

        assert_eq!(a, "2024-01-01T00:00:00.000000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn test_datetime_roundtrip() {
        let now = Utc::now();
        let parsed = parse_datetime(0, &format_datetime(&now)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(matches!(
            parse_datetime(5, "yesterday"),
            Err(rusqlite::Error::FromSqlConversionFailure(5, _, _))
        ));
    }

    #[test]
    fn test_parse_notification_type() {
        assert_eq!(
            parse_notification_type(1, "SMS").unwrap(),
            NotificationType::Sms
        );
        assert!(parse_notification_type(1, "FAX").is_err());
    }
}
