//! User-facing output for the CLI: colored warnings, summaries, inventories.

use std::io::Write;

use miette::GraphicalReportHandler;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Sexp;
use crate::domain::{ObjectRecord, Warning, WarningSink};
use crate::host::BuildReport;
use crate::{err_msg, ScmError};

/// Writes warnings to stderr as they arrive, and counts them.
pub struct StderrSink {
    stream: StandardStream,
    pub count: usize,
}

impl StderrSink {
    pub fn new() -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
            count: 0,
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WarningSink for StderrSink {
    fn warn(&mut self, warning: Warning) {
        self.count += 1;
        let _ = self.stream.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        let _ = writeln!(self.stream, "{warning}");
        let _ = self.stream.reset();
    }
}

/// Renders a diagnostic to stderr without taking ownership of it.
pub fn print_error(err: &ScmError) {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, err) {
        Ok(()) => eprint!("{out}"),
        Err(_) => eprintln!("{err}"),
    }
}

pub fn print_parsed(sexp: &Sexp, name: Option<&str>) {
    println!("{sexp}");
    if let Some(name) = name {
        println!("name: {name}");
    }
}

pub fn print_summary(report: &BuildReport, warnings: usize) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let color = if report.is_clean() {
        Color::Green
    } else {
        Color::Red
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(
        stdout,
        "{}",
        if report.is_clean() { "build succeeded" } else { "build finished with errors" }
    );
    let _ = stdout.reset();
    let _ = writeln!(
        stdout,
        ": {} read, {} removed, {} described, {} skipped, {} warning(s), {} link(s), {} unresolved",
        report.read.len(),
        report.removed.len(),
        report.described,
        report.skipped.len(),
        warnings,
        report.links.len(),
        report.unresolved.len()
    );
}

/// One `name<TAB>type<TAB>doc<TAB>anchor` line per record, sorted by name.
pub fn print_inventory<'a>(
    records: impl Iterator<Item = ObjectRecord<'a>>,
    json: bool,
) -> Result<(), ScmError> {
    let mut records: Vec<_> = records.collect();
    records.sort_by(|a, b| a.name.cmp(b.name));
    if json {
        let text = serde_json::to_string_pretty(&records)
            .map_err(|e| err_msg!(Internal, "failed to serialize inventory").caused_by(e))?;
        println!("{text}");
    } else {
        for r in records {
            println!("{}\t{}\t{}\t{}", r.name, r.objtype, r.docname, r.anchor);
        }
    }
    Ok(())
}
