//! `--list-issues` output

use colored::Colorize;
use serde::Serialize;

use super::colors::{SeveritySymbol, StructureColors};
use super::write_output;
use crate::analysis::registry::{IssueRegistry, Vendor};
use crate::analysis::{Family, IssueDefinition};
use crate::error::{InjectLintError, Result};

#[derive(Serialize)]
struct RegistryListing {
    family: Family,
    vendor: Vendor,
    api: u32,
    min_api: u32,
    issues: Vec<IssueDefinition>,
}

fn listings(registries: &[Box<dyn IssueRegistry>]) -> Vec<RegistryListing> {
    registries
        .iter()
        .map(|r| RegistryListing {
            family: r.family(),
            vendor: r.vendor(),
            api: r.api(),
            min_api: r.min_api(),
            issues: r.issues(),
        })
        .collect()
}

pub fn catalogue_json(registries: &[Box<dyn IssueRegistry>]) -> Result<String> {
    serde_json::to_string_pretty(&listings(registries)).map_err(|e| InjectLintError::Report {
        message: e.to_string(),
    })
}

pub fn print_catalogue_json(
    registries: &[Box<dyn IssueRegistry>],
    output: Option<&std::path::Path>,
) -> Result<()> {
    write_output(output, &catalogue_json(registries)?)
}

pub fn print_catalogue(registries: &[Box<dyn IssueRegistry>]) {
    for listing in listings(registries) {
        println!(
            "{} {}",
            StructureColors::category(&listing.family.as_str().to_uppercase()),
            format!(
                "({} issues, api {}, min api {})",
                listing.issues.len(),
                listing.api,
                listing.min_api
            )
            .dimmed()
        );
        for issue in &listing.issues {
            let state = if issue.enabled_by_default {
                String::new()
            } else {
                format!(" {}", "[off by default]".dimmed())
            };
            println!(
                "  {} {:<40} {}{}",
                SeveritySymbol::colored(&issue.severity),
                StructureColors::rule_code(issue.id),
                issue.brief,
                state
            );
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::registry::all_registries;

    #[test]
    fn test_json_catalogue() {
        let json = catalogue_json(&all_registries()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let families: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["family"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(families, vec!["dagger", "anvil", "hilt"]);
        assert_eq!(value[1]["issues"][0]["id"], "AnvilJavaUsage");
        assert_eq!(value[0]["vendor"]["name"], "injectlint");
    }
}
