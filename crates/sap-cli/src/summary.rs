use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use sap_model::{EndpointType, Issue, Severity};

use crate::pipeline::PlanOutcome;

pub fn print_summary(outcome: &PlanOutcome) {
    println!("{}", render_summary(outcome));
}

/// Summary tables as text: policy line, endpoint table, issue table.
pub fn render_summary(outcome: &PlanOutcome) -> String {
    let mut out = format!("Study: {}\n", outcome.study_id);
    out.push_str(&format!(
        "Policy: min power {:.2}, Fisher below {} expected per cell, nonparametric below {} per arm, stratified events by {}\n",
        outcome.policy.min_power,
        outcome.policy.min_expected_cell_count,
        outcome.policy.small_sample_per_arm,
        outcome.policy.stratified_event_policy
    ));
    out.push_str(&format!("{}\n", endpoint_table(outcome)));
    if let Some(table) = issue_table(outcome) {
        out.push_str(&format!("\nIssues:\n{table}\n"));
    }
    let populations = outcome
        .analysis_sets
        .iter()
        .map(|set| set.abbreviation.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("Analysis sets: {populations}"));
    out
}

fn endpoint_table(outcome: &PlanOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Endpoint"),
        header_cell("Type"),
        header_cell("Data"),
        header_cell("Test"),
        header_cell("Rule"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);

    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for result in &outcome.results {
        let errors = result.validation.error_count();
        let warnings = result.validation.warning_count();
        total_errors += errors;
        total_warnings += warnings;
        table.add_row(vec![
            endpoint_cell(&result.endpoint.name, result.endpoint.endpoint_type),
            Cell::new(result.endpoint.endpoint_type.label()),
            Cell::new(result.endpoint.data_type.label()),
            Cell::new(&result.selection.analysis_label),
            dim_cell(&result.selection.rule_id),
            count_cell(errors, Color::Red),
            count_cell(warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} endpoints", outcome.results.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(total_errors, Color::Red).add_attribute(Attribute::Bold),
        count_cell(total_warnings, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn issue_table(outcome: &PlanOutcome) -> Option<Table> {
    let mut issues: Vec<&Issue> = outcome.validation.issues().collect();
    if issues.is_empty() {
        return None;
    }
    // Stable: errors first, then in the order the checks produced them.
    issues.sort_by_key(|issue| issue.severity());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Category"),
        header_cell("Endpoint"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity()),
            Cell::new(issue.code()),
            Cell::new(issue.category().label()),
            issue.endpoint().map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(issue.message()),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::UpperBoundary(Width::Fixed(15)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn endpoint_cell(name: &str, endpoint_type: EndpointType) -> Cell {
    match endpoint_type {
        EndpointType::Primary => Cell::new(name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        EndpointType::Secondary => Cell::new(name),
        EndpointType::Exploratory => Cell::new(name).fg(Color::DarkGrey),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
