use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use survey_checks::{AuditReport, CheckReport, ColumnAudit, InputShape, ReportValue, Severity};
use survey_cli::cli::OutputFormatArg;
use survey_cli::commands::{AuditOutcome, CheckOutcome, display_name};

const REPORT_SCHEMA: &str = "column-survey.report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct ReportPayload<'a, T: Serialize> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    source: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<&'static str>,
    report: &'a T,
}

fn payload_json<T: Serialize>(source: &Path, check: Option<&'static str>, report: &T) -> Result<String> {
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        source,
        check,
        report,
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

pub fn print_check(outcome: &CheckOutcome, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Json => {
            let json = payload_json(&outcome.source, Some(outcome.check.label()), &outcome.report)?;
            println!("{json}");
        }
        OutputFormatArg::Table => {
            println!("Source: {}", display_name(&outcome.source));
            println!("Check: {}", outcome.check.label());
            println!("{}", check_table(&outcome.report));
            let flagged = outcome.report.flagged_columns();
            if !flagged.is_empty() {
                println!("Flagged: {}", flagged.join(", "));
            }
        }
    }
    Ok(())
}

pub fn print_audit(outcome: &AuditOutcome, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Json => {
            let json = payload_json(&outcome.source, None, &outcome.report)?;
            println!("{json}");
        }
        OutputFormatArg::Table => {
            println!("Source: {}", display_name(&outcome.source));
            println!("Rows: {}", outcome.report.row_count);
            println!("{}", audit_table(&outcome.report));
            println!(
                "{} of {} columns flagged",
                outcome.report.flagged().len(),
                outcome.report.columns.len()
            );
        }
    }
    Ok(())
}

fn check_table(report: &CheckReport) -> Table {
    let mut table = Table::new();
    let named = report.shape == InputShape::Table;
    let mut header = Vec::with_capacity(report.metrics.len() + 2);
    if named {
        header.push(header_cell("Column"));
    }
    header.push(header_cell(report.title));
    header.extend(report.metrics.iter().map(|metric| header_cell(metric)));
    table.set_header(header);
    apply_table_style(&mut table);

    let offset = usize::from(named);
    for index in 0..report.metrics.len() {
        align_column(&mut table, offset + 1 + index, CellAlignment::Right);
    }
    for row in &report.rows {
        let mut cells = Vec::with_capacity(row.metrics.len() + 2);
        if let Some(column) = &row.column {
            cells.push(column_cell(column));
        }
        cells.push(verdict_cell(&row.verdict));
        cells.extend(row.metrics.iter().map(value_cell));
        table.add_row(cells);
    }
    table
}

fn audit_table(report: &AuditReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Rows"),
        header_cell("Status"),
        header_cell("Findings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for audit in &report.columns {
        table.add_row(vec![
            column_cell(&audit.column),
            dim_cell(audit.kind),
            Cell::new(audit.row_count),
            status_cell(audit),
            findings_cell(audit),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(audit: &ColumnAudit) -> Cell {
    if audit.is_flagged() {
        Cell::new("FLAG")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("ok").fg(Color::Green)
    }
}

fn findings_cell(audit: &ColumnAudit) -> Cell {
    if audit.findings.is_empty() {
        return dim_cell("-");
    }
    let lines: Vec<String> = audit
        .findings
        .iter()
        .map(|finding| format!("{}: {}", finding.name(), finding.message()))
        .collect();
    let cell = Cell::new(lines.join("\n"));
    if audit
        .findings
        .iter()
        .all(|finding| finding.severity() == Severity::Note)
    {
        cell.fg(Color::DarkGrey)
    } else {
        cell
    }
}

fn verdict_cell(verdict: &ReportValue) -> Cell {
    match verdict {
        ReportValue::Bool(true) => Cell::new("true")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        ReportValue::Bool(false) => dim_cell("false"),
        other => value_cell(other),
    }
}

fn value_cell(value: &ReportValue) -> Cell {
    if value.is_null() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn column_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
