//! Diagnostic rendering with `ariadne`.

use std::path::Path;

use ariadne::{Config, Label, Report, ReportKind, Source};
use zitp_ir::Span;

/// Render `message` against `source`, pointing at `span` when there is one.
///
/// Output is uncoloured so it reads the same in a terminal and in a log file.
pub(crate) fn render(path: &Path, source: &str, message: &str, span: Option<Span>) -> String {
    let Some(span) = span else {
        return format!("error: {message}\n");
    };

    let name = path.display().to_string();
    let end = source.len();
    let range = (span.start as usize).min(end)..(span.end as usize).min(end);
    let location = span.line_col(source);

    let report = Report::build(ReportKind::Error, name.as_str(), range.start)
        .with_config(Config::default().with_color(false))
        .with_message(message)
        .with_label(Label::new((name.as_str(), range)).with_message(format!("at {location}")))
        .finish();

    let mut buf = Vec::new();
    match report.write((name.as_str(), Source::from(source.to_string())), &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => format!("error: {message}\n  --> {name}:{location}\n"),
    }
}
