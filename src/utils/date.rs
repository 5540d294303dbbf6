use chrono::{Duration, NaiveDateTime};
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn add_hours(at: NaiveDateTime, hours: i64) -> LibraryResult<NaiveDateTime> {
    Duration::try_hours(hours).and_then(|d| at.checked_add_signed(d)).ok_or_else(||
        LibraryError::validation(format!("{} hours after {} is out of range", hours, at).as_str(),
                                 Some("400".to_string())))
}

pub fn add_days(at: NaiveDateTime, days: i64) -> LibraryResult<NaiveDateTime> {
    Duration::try_days(days).and_then(|d| at.checked_add_signed(d)).ok_or_else(||
        LibraryError::validation(format!("{} days after {} is out of range", days, at).as_str(),
                                 Some("400".to_string())))
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }

    fn time_to_json(t: NaiveDateTime) -> String {
        format!("{}", t.format(DATE_FMT))
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&format!("{}", t.format(DATE_FMT))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(s) => NaiveDateTime::parse_from_str(&s, DATE_FMT).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
