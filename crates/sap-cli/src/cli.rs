//! CLI argument definitions for the statistical analysis planner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sap_model::StratifiedEventPolicy;

use crate::config::PolicyOverrides;

#[derive(Parser)]
#[command(
    name = "sap",
    version,
    about = "Statistical methodology planner - map trial endpoints to analysis methods",
    long_about = "Select a primary statistical test for every endpoint of a trial design,\n\
                  generate the standard analysis populations, check the design for\n\
                  consistency, and assemble the statistical analysis plan sections."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan the statistical methodology for a trial design.
    Plan(PlanArgs),

    /// Print the test-selection decision table.
    Tests,
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Path to the trial design (JSON).
    #[arg(value_name = "DESIGN")]
    pub design: PathBuf,

    /// Write the assembled plan here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Apply strict thresholds.
    ///
    /// Raises the minimum acceptable power to at least 90% and the
    /// small-sample cutoff to at least 50 subjects per arm. Explicit
    /// threshold flags still win.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Minimum acceptable power before a LOW_POWER warning.
    #[arg(long = "min-power", value_name = "FRACTION")]
    pub min_power: Option<f64>,

    /// Expected cell count below which binary endpoints use Fisher's exact test.
    #[arg(long = "min-expected-cell-count", value_name = "COUNT")]
    pub min_expected_cell_count: Option<f64>,

    /// Subjects per arm below which continuous endpoints are analysed nonparametrically.
    #[arg(long = "small-sample-per-arm", value_name = "N")]
    pub small_sample_per_arm: Option<u32>,

    /// Test for stratified time-to-event endpoints without covariates.
    #[arg(long = "stratified-event-policy", value_enum)]
    pub stratified_event_policy: Option<StratifiedEventPolicyArg>,
}

impl PlanArgs {
    pub fn policy_overrides(&self) -> PolicyOverrides {
        PolicyOverrides {
            strict: self.strict,
            min_power: self.min_power,
            min_expected_cell_count: self.min_expected_cell_count,
            small_sample_per_arm: self.small_sample_per_arm,
            stratified_event_policy: self.stratified_event_policy.map(Into::into),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StratifiedEventPolicyArg {
    /// Stratified log-rank test.
    LogRank,
    /// Cochran-Mantel-Haenszel test on event status.
    Cmh,
}

impl From<StratifiedEventPolicyArg> for StratifiedEventPolicy {
    fn from(arg: StratifiedEventPolicyArg) -> Self {
        match arg {
            StratifiedEventPolicyArg::LogRank => StratifiedEventPolicy::LogRankCmh,
            StratifiedEventPolicyArg::Cmh => StratifiedEventPolicy::PureCmh,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_flags_become_policy_overrides() {
        let cli = Cli::parse_from([
            "sap",
            "plan",
            "design.json",
            "--strict",
            "--min-power",
            "0.85",
            "--stratified-event-policy",
            "cmh",
        ]);
        let Command::Plan(args) = cli.command else {
            panic!("expected plan command");
        };
        let overrides = args.policy_overrides();
        assert!(overrides.strict);
        assert_eq!(overrides.min_power, Some(0.85));
        assert_eq!(
            overrides.stratified_event_policy,
            Some(StratifiedEventPolicy::PureCmh)
        );
        assert_eq!(overrides.small_sample_per_arm, None);
    }
}
