use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Table;
use tracing::info;

use sap_map::decision_table;
use sap_model::StatisticalTest;

use crate::cli::PlanArgs;
use crate::config::resolve_policy;
use crate::pipeline::{PlanOutcome, load_design, plan_trial};
use crate::summary::apply_table_style;

pub fn run_tests() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Rule", "Condition", "Selects"]);
    apply_table_style(&mut table);
    for (index, rule) in decision_table().enumerate() {
        let selects = rule
            .candidates
            .iter()
            .map(StatisticalTest::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            (index + 1).to_string(),
            rule.id.to_string(),
            rule.condition.to_string(),
            selects,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_plan(args: &PlanArgs) -> Result<PlanOutcome> {
    let design = load_design(&args.design)?;
    let policy = resolve_policy(design.policy, &args.policy_overrides())
        .context("resolve planning policy")?;
    let outcome = plan_trial(&design, policy);

    let document = outcome.render_document(Utc::now());
    match &args.output {
        Some(path) => {
            fs::write(path, document)
                .with_context(|| format!("write plan to {}", path.display()))?;
            info!(path = %path.display(), "wrote analysis plan");
        }
        None => print!("{document}"),
    }
    Ok(outcome)
}
