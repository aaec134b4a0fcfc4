use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reads a duration given as a number of milliseconds.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms: u64 = Deserialize::deserialize(deserializer)?;
    Ok(Duration::from_millis(ms))
}

pub fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    ms.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Timeout {
        #[serde(
            deserialize_with = "deserialize_duration",
            serialize_with = "serialize_duration"
        )]
        timeout: Duration,
    }

    #[test]
    fn should_read_milliseconds() {
        let timeout: Timeout = serde_json::from_str(r#"{"timeout": 1500}"#).unwrap();
        assert_eq!(timeout.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn should_write_milliseconds() {
        let json = serde_json::to_value(Timeout {
            timeout: Duration::from_secs(10),
        })
        .unwrap();
        assert_eq!(json["timeout"], 10000);
    }
}
