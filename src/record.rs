use crate::logger::Severity;
use serde::Serialize;

/// One structured log line in the cloud error-reporting format.
///
/// Field names and order are fixed by the ingestion schema; renaming or
/// reordering them breaks downstream consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord<'a> {
    pub severity: Severity,
    pub event_time: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_context: Option<&'a ServiceContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stacktrace: String,
}

/// Service identity, fixed when the backend is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceContext {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl ServiceContext {
    pub fn is_empty(&self) -> bool {
        self.service.is_empty() && self.version.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    pub report_location: ReportLocation,
}

/// Where an Error/Critical report was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLocation {
    pub file_path: String,
    pub function_name: String,
    pub line_number: u32,
}
