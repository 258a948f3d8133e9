use crate::logger::{CallSite, Entry, Logger, Severity};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that forwards every event to a [`Logger`].
///
/// Forwarding is synchronous and happens on the thread that emitted the
/// event, so the emitting function is still on the stack when a backend
/// resolves the report location of an Error/Critical entry.
pub struct LogrLayer<L> {
    logger: L,
}

impl<L: Logger> LogrLayer<L> {
    pub fn new(logger: L) -> Self {
        LogrLayer { logger }
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }
}

/// Map a `tracing` level onto the four logger severities.
pub fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::ERROR => Severity::Error,
        Level::WARN | Level::INFO => Severity::Info,
        _ => Severity::Debug,
    }
}

impl<S, L> Layer<S> for LogrLayer<L>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    L: Logger + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor { fields: &mut fields, message: &mut message };
        event.record(&mut visitor);

        let mut text = message.unwrap_or_default();
        for (name, value) in &fields {
            if !text.is_empty() {
                text.push(' ');
            }
            let _ = write!(text, "{}={}", name, value);
        }

        let meta = event.metadata();
        let call_site = CallSite {
            file: meta.file().unwrap_or("<unknown>"),
            line: meta.line().unwrap_or(0),
            function: None,
        };

        self.logger.log(&Entry::new(
            severity_for(meta.level()),
            format_args!("{}", text),
            call_site,
        ));
    }
}

pub struct FieldVisitor<'a> {
    pub fields: &'a mut BTreeMap<&'static str, String>,
    pub message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name(), value.to_string());
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields.insert(field.name(), format!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[derive(Clone, Default)]
    struct Captured {
        entries: Arc<Mutex<Vec<(Severity, String, u32)>>>,
    }

    impl Logger for Captured {
        fn log(&self, entry: &Entry<'_>) {
            self.entries
                .lock()
                .unwrap()
                .push((entry.severity, entry.message(), entry.call_site.line));
        }
    }

    #[test]
    fn levels_collapse_onto_four_severities() {
        assert_eq!(severity_for(&Level::ERROR), Severity::Error);
        assert_eq!(severity_for(&Level::WARN), Severity::Info);
        assert_eq!(severity_for(&Level::INFO), Severity::Info);
        assert_eq!(severity_for(&Level::DEBUG), Severity::Debug);
        assert_eq!(severity_for(&Level::TRACE), Severity::Debug);
    }

    #[test]
    fn events_are_forwarded_with_fields_and_location() {
        let logger = Captured::default();
        let subscriber = Registry::default().with(LogrLayer::new(logger.clone()));

        let line = tracing::subscriber::with_default(subscriber, || {
            tracing::info!("plain");
            let line = line!() + 1;
            tracing::error!(user_id = 42, reason = "bad password", "authentication failed");
            line
        });

        let entries = logger.entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, Severity::Info);
        assert_eq!(entries[0].1, "plain");
        assert_eq!(entries[1].0, Severity::Error);
        assert_eq!(entries[1].1, "authentication failed reason=bad password user_id=42");
        assert_eq!(entries[1].2, line);
    }

    #[test]
    fn fields_without_message_still_emit() {
        let logger = Captured::default();
        let subscriber = Registry::default().with(LogrLayer::new(logger.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(attempt = 3_u64, ok = false);
        });

        let entries = logger.entries.lock().unwrap();
        assert_eq!(entries[0].0, Severity::Debug);
        assert_eq!(entries[0].1, "attempt=3 ok=false");
    }
}
