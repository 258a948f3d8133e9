use crate::caller;
use crate::logger::{Entry, Logger};
use crate::record::{ErrorContext, LogRecord, ServiceContext};
use crate::sink::{emit, LineSink, StdoutSink};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Cloud error-reporting backend: one JSON object per line.
///
/// Info/Debug lines carry severity, time, message and service identity,
/// which is enough for a log collector to turn them into log entries.
/// Error/Critical lines additionally carry the report location and the
/// stack trace, which makes the error-reporting service pick them up.
///
/// Every call builds its own [`LogRecord`]; the handle holds nothing but
/// the service identity, so it can be shared across threads freely.
#[derive(Clone)]
pub struct Stackdriver {
    service: ServiceContext,
    sink: Arc<dyn LineSink>,
}

impl Stackdriver {
    /// Backend writing to stdout, tagged with `daemon` as the service name
    /// and `version` as the service version.
    pub fn new(daemon: &str, version: &str) -> Result<Self, Infallible> {
        Ok(Self::with_sink(daemon, version, Arc::new(StdoutSink)))
    }

    pub fn with_sink(daemon: &str, version: &str, sink: Arc<dyn LineSink>) -> Self {
        Stackdriver {
            service: ServiceContext {
                service: daemon.to_string(),
                version: version.to_string(),
            },
            sink,
        }
    }

    pub fn service(&self) -> &ServiceContext {
        &self.service
    }

    fn basic_record(&self, entry: &Entry<'_>) -> LogRecord<'_> {
        LogRecord {
            severity: entry.severity,
            event_time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            message: entry.message(),
            service_context: (!self.service.is_empty()).then_some(&self.service),
            context: None,
            stacktrace: String::new(),
        }
    }

    fn report_record(&self, entry: &Entry<'_>) -> LogRecord<'_> {
        let report = caller::capture(&entry.call_site);

        let mut record = self.basic_record(entry);
        record.context = Some(ErrorContext {
            report_location: report.location,
        });
        record.stacktrace = report.stacktrace;
        record
    }

    /// Emit one JSON line. A payload that fails to encode is replaced by an
    /// empty line; the encoder error goes to stderr so stdout only ever
    /// carries JSON lines.
    fn write<T: Serialize + ?Sized>(&self, payload: &T) {
        emit(&*self.sink, &encode(payload));
    }
}

fn encode<T: Serialize + ?Sized>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|e| {
        eprintln!("logr: cannot marshal payload: {}", e);
        String::new()
    })
}

impl Logger for Stackdriver {
    fn log(&self, entry: &Entry<'_>) {
        let record = if entry.severity.is_report() {
            self.report_record(entry)
        } else {
            self.basic_record(entry)
        };
        self.write(&record);
    }
}
