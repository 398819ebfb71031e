use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;
use uastmap_core::{Classification, RuleClassifier};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Grammar rule names (e.g. if_statement)
    #[arg(required = true, value_name = "RULE")]
    rules: Vec<String>,

    /// Print JSON instead of one line per rule
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RuleClassification<'a> {
    rule: &'a str,
    #[serde(flatten)]
    classification: Classification,
}

pub fn run(args: ClassifyArgs) -> Result<ExitCode> {
    let classifier = RuleClassifier::default();
    let results: Vec<RuleClassification<'_>> = args
        .rules
        .iter()
        .map(|rule| RuleClassification {
            rule,
            classification: classifier.classify(rule),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(ExitCode::SUCCESS);
    }

    let width = args.rules.iter().map(String::len).max().unwrap_or(0);
    for result in &results {
        let c = &result.classification;
        println!(
            "{}  type: {}  token: {}  roles: [{}]",
            format!("{:width$}", result.rule).bold(),
            c.uast_type.cyan(),
            c.token_strategy,
            c.roles.join(", ")
        );
    }

    Ok(ExitCode::SUCCESS)
}
