use crate::{
    collectors::Collector,
    document::{
        Document,
        FieldValue,
        Fields,
    },
    endpoint::{
        EndpointSpec,
        DEBUG_PATH,
    },
    fetcher::Fetcher,
};
use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    Utc,
};
use serde_json::Value;
use std::{
    future::Future,
    pin::Pin,
};

pub const DOCUMENT_NAME: &str = "debug_status";

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Service status and uptime derived from `serviceStatus` and `startTime`.
pub struct DebugStatus {
    service_status: EndpointSpec,
    start_time: EndpointSpec,
    fetcher: Fetcher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Uptime {
    /// Splits `now - start` into whole days, hours and minutes using floor
    /// division, so a start time in the future yields a negative day count.
    pub fn between(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let seconds = (now - start).num_seconds();
        let remainder = seconds.rem_euclid(SECONDS_PER_DAY);
        Self {
            days: seconds.div_euclid(SECONDS_PER_DAY),
            hours: remainder / SECONDS_PER_HOUR,
            minutes: (remainder % SECONDS_PER_HOUR) / 60,
        }
    }
}

/// Accepts RFC 3339 and the common ISO 8601 variants: offsets without a colon,
/// a space instead of `T`, minute precision and bare dates. Timestamps without
/// an offset are taken as UTC, bare dates as midnight UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

impl DebugStatus {
    pub fn new(host: &str, fetcher: Fetcher) -> Self {
        Self {
            service_status: EndpointSpec::new(host, DEBUG_PATH, "serviceStatus"),
            start_time: EndpointSpec::new(host, DEBUG_PATH, "startTime"),
            fetcher,
        }
    }

    pub fn flatten(
        host: &str,
        start_time: Option<&Value>,
        service_status: Option<&Value>,
        now: DateTime<Utc>,
    ) -> Vec<Document> {
        let mut fields = Fields::new();

        if let Some(raw) = start_time.and_then(|v| v.get("startTime")).and_then(Value::as_str) {
            fields.insert("startTime".to_string(), FieldValue::Timestamp(raw.to_string()));
            match parse_start_time(raw) {
                Some(start) => {
                    let uptime = Uptime::between(start, now);
                    fields.insert("days".to_string(), uptime.days.into());
                    fields.insert("hours".to_string(), uptime.hours.into());
                    fields.insert("minutes".to_string(), uptime.minutes.into());
                }
                None => debug!(%host, %raw, "unparsable start time"),
            }
        }

        let status = service_status.and_then(|v| v.get("status")).and_then(|status| match status {
            Value::String(status) => Some(status.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            scalar => Some(scalar.to_string()),
        });
        if let Some(status) = status {
            fields.insert("status".to_string(), status.into());
        }

        if fields.is_empty() {
            return Vec::new();
        }
        vec![Document::new(DOCUMENT_NAME, host, fields)]
    }
}

impl Collector for DebugStatus {
    fn collect(&self) -> Pin<Box<dyn Future<Output = Vec<Document>> + Send + '_>> {
        Box::pin(async move {
            let (start_time, service_status) = tokio::join!(
                self.fetcher.fetch(&self.start_time),
                self.fetcher.fetch(&self.service_status)
            );
            Self::flatten(
                &self.service_status.host,
                start_time.as_ref(),
                service_status.as_ref(),
                Utc::now(),
            )
        })
    }

    fn endpoints(&self) -> Vec<EndpointSpec> {
        vec![self.service_status.clone(), self.start_time.clone()]
    }

    fn name(&self) -> &'static str {
        "DebugStatus"
    }
}
