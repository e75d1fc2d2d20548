//! Wire timestamps: RFC 3339, whole seconds, explicit UTC offset.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Drop sub-second precision.
pub fn truncate_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}

/// Format as e.g. `2024-03-01T12:30:05+00:00`.
pub fn format_seconds(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// `#[serde(with = "...")]` adapter emitting [`format_seconds`].
pub mod rfc3339_seconds {
    use chrono::{DateTime, FixedOffset, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_seconds(at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::<FixedOffset>::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_offset_and_no_fraction() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
            + chrono::Duration::milliseconds(750);
        assert_eq!(format_seconds(&truncate_to_seconds(at)), "2024-03-01T12:30:05+00:00");
    }

    #[test]
    fn serde_adapter_accepts_foreign_offsets() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "rfc3339_seconds")]
            at: DateTime<Utc>,
        }

        let w: Wrapper = serde_json::from_str(r#"{"at":"2024-03-01T15:30:05+03:00"}"#).unwrap();
        assert_eq!(w.at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap());
    }
}
