//! Call-stack introspection for error reports.
//!
//! Only the Error/Critical path of the cloud backend comes here: resolving
//! symbols walks debug info and is far more expensive than formatting.

use crate::logger::CallSite;
use crate::record::ReportLocation;
use backtrace::Backtrace;
use std::path::Path;

const UNKNOWN_FUNCTION: &str = "unknown";

/// Stack trace text plus the resolved location of the reporting call.
#[derive(Debug, Clone)]
pub struct Report {
    pub location: ReportLocation,
    pub stacktrace: String,
}

/// Capture the current stack and resolve the function that owns
/// `call_site`.
///
/// The file and line come straight from the call site, which is tracked at
/// compile time and cannot drift with inlining or wrapper layers. The
/// function name is taken from the call site when known, otherwise from
/// the innermost frame whose file and line match it. Without line tables
/// (release builds) the first frame outside the logging machinery is used.
pub fn capture(call_site: &CallSite<'_>) -> Report {
    let trace = Backtrace::new();

    let function = match call_site.function {
        Some(name) => last_segment(name).to_string(),
        None => function_at(&trace, call_site)
            .or_else(|| first_caller(&trace))
            .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string()),
    };

    Report {
        location: ReportLocation {
            file_path: call_site.file.to_string(),
            function_name: function,
            line_number: call_site.line,
        },
        stacktrace: format!("{:?}", trace),
    }
}

fn function_at(trace: &Backtrace, call_site: &CallSite<'_>) -> Option<String> {
    let wanted = Path::new(call_site.file);
    trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .find(|symbol| {
            symbol.lineno() == Some(call_site.line)
                && symbol.filename().map_or(false, |file| file.ends_with(wanted))
        })
        .and_then(|symbol| symbol.name())
        .map(|name| last_segment(&format!("{:#}", name)).to_string())
}

fn first_caller(trace: &Backtrace) -> Option<String> {
    let names: Vec<String> = trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| symbol.name())
        .map(|name| format!("{:#}", name))
        .collect();

    first_external(names.iter().map(String::as_str)).map(|name| last_segment(name).to_string())
}

/// Crates whose frames sit between a log call and the stack capture.
const INTERNAL_CRATES: &[&str] = &[
    "backtrace",
    "logr",
    "tracing",
    "tracing_core",
    "tracing_subscriber",
    "core",
    "alloc",
    "std",
];

/// First symbol, innermost first, that belongs to neither this crate nor
/// the runtime and tracing plumbing around it.
fn first_external<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    names.into_iter().find(|name| !is_internal(name))
}

/// `<A as B>::f` is internal when either `A` or `B` is rooted in an
/// internal crate, so backend impls of the logging trait are skipped too.
fn is_internal(name: &str) -> bool {
    name.trim_start_matches('<').split(" as ").any(|part| {
        let part = part
            .trim_start_matches(|c: char| matches!(c, '&' | '*' | '<' | ' '))
            .trim_start_matches("mut ")
            .trim_start_matches("const ");
        let root = part.split("::").next().unwrap_or(part);
        INTERNAL_CRATES.contains(&root)
    })
}

/// Strip the module path, keeping the innermost named item:
/// `billing::worker::run::{{closure}}` and `billing::worker::run::<u32>`
/// both become `run`.
fn last_segment(path: &str) -> &str {
    top_level_segments(path)
        .into_iter()
        .rev()
        .find(|segment| !segment.is_empty() && !segment.starts_with('{') && !is_generic_args(segment))
        .unwrap_or(path)
}

/// `<u32>` or `<T, U>`, but not a `<A as B>` qualified self type.
fn is_generic_args(segment: &str) -> bool {
    segment.starts_with('<') && segment.ends_with('>') && !segment.contains(" as ")
}

/// Split on `::` outside angle brackets, so generic arguments and
/// qualified self types stay in one piece.
fn top_level_segments(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_drops_module_path() {
        assert_eq!(last_segment("billing::worker::run"), "run");
        assert_eq!(last_segment("run"), "run");
    }

    #[test]
    fn last_segment_skips_closures() {
        assert_eq!(last_segment("billing::worker::run::{{closure}}"), "run");
        assert_eq!(
            last_segment("billing::worker::run::{{closure}}::{{closure}}"),
            "run"
        );
    }

    #[test]
    fn explicit_function_name_wins() {
        let site = CallSite {
            file: "src/jobs.rs",
            line: 12,
            function: Some("jobs::reconcile"),
        };
        let report = capture(&site);

        assert_eq!(report.location.file_path, "src/jobs.rs");
        assert_eq!(report.location.line_number, 12);
        assert_eq!(report.location.function_name, "reconcile");
        assert!(!report.stacktrace.is_empty());
    }

    #[test]
    fn last_segment_skips_v0_closures_and_generic_args() {
        assert_eq!(last_segment("a::run::<u32>"), "run");
        assert_eq!(last_segment("a::run::{closure#0}"), "run");
        assert_eq!(last_segment("a::run::<u32>::{closure#0}"), "run");
        assert_eq!(last_segment("a::run::<alloc::vec::Vec<u8>>"), "run");
    }

    #[test]
    fn last_segment_keeps_trait_method_name() {
        assert_eq!(last_segment("<billing::Ledger as billing::Store>::commit"), "commit");
        assert_eq!(
            top_level_segments("<billing::Ledger as billing::Store>::commit"),
            vec!["<billing::Ledger as billing::Store>", "commit"]
        );
    }

    #[test]
    fn plumbing_frames_are_internal() {
        assert!(is_internal("backtrace::capture::Backtrace::new"));
        assert!(is_internal("logr::stackdriver::Stackdriver::report_record"));
        assert!(is_internal("<logr::stackdriver::Stackdriver as logr::logger::Logger>::log"));
        assert!(is_internal("<&L as logr::logger::Logger>::errorf"));
        assert!(is_internal("<alloc::sync::Arc<L> as logr::logger::Logger>::log"));
        assert!(is_internal("<billing::Audit as logr::logger::Logger>::log"));
        assert!(is_internal("tracing_core::event::Event::dispatch"));
        assert!(is_internal("core::ops::function::FnOnce::call_once"));
    }

    #[test]
    fn application_frames_are_external() {
        assert!(!is_internal("billing::worker::run"));
        assert!(!is_internal("<billing::Ledger as billing::Store>::commit"));
        assert!(!is_internal("logrotate::main"));
    }

    #[test]
    fn first_external_skips_logging_frames_without_line_info() {
        let frames = [
            "backtrace::backtrace::trace",
            "backtrace::capture::Backtrace::new",
            "logr::caller::capture",
            "logr::stackdriver::Stackdriver::report_record",
            "<logr::stackdriver::Stackdriver as logr::logger::Logger>::log",
            "<&L as logr::logger::Logger>::errorf",
            "billing::worker::charge_card",
            "billing::worker::run",
            "std::rt::lang_start",
        ];
        let name = first_external(frames).unwrap();
        assert_eq!(name, "billing::worker::charge_card");
        assert_eq!(last_segment(name), "charge_card");
    }

    #[test]
    fn only_internal_frames_resolve_to_nothing() {
        let frames = ["backtrace::capture::Backtrace::new", "logr::caller::capture", "std::rt::lang_start"];
        assert_eq!(first_external(frames), None);
    }

    #[test]
    fn unmatched_line_still_names_a_caller() {
        let site = CallSite {
            file: "no/such/file.rs",
            line: 1,
            function: None,
        };
        let name = capture(&site).location.function_name;
        assert!(!name.is_empty());
        assert!(!name.starts_with('{'));
    }
}
