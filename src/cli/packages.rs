//! Packages command for libscout.
//!
//! Lists the configured watch list: every package the monitor checks,
//! with its category and relevance tags.

use serde::Serialize;

use crate::core::RelevanceTag;
use crate::registry::PackageRegistry;

/// Options for the packages command.
#[derive(Debug, Clone, Default)]
pub struct PackagesOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// One row of the watch list.
#[derive(Debug, Clone, Serialize)]
pub struct PackageRow {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub relevance: Vec<RelevanceTag>,
}

/// Output format for the packages command.
#[derive(Debug, Clone, Serialize)]
pub struct PackagesOutput {
    /// Always true; packages is a read-only view.
    pub success: bool,
    /// The watch list, in registry order.
    pub packages: Vec<PackageRow>,
}

/// The packages command implementation.
pub struct PackagesCommand {
    registry: PackageRegistry,
}

impl PackagesCommand {
    /// Create a new packages command.
    pub fn new(registry: PackageRegistry) -> Self {
        Self { registry }
    }

    /// Run the packages command.
    pub fn run(&self, _options: &PackagesOptions) -> PackagesOutput {
        let packages = self
            .registry
            .iter()
            .map(|spec| PackageRow {
                name: spec.name.to_string(),
                display_name: spec.display_name.to_string(),
                category: spec.category.to_string(),
                relevance: spec.relevance.to_vec(),
            })
            .collect();

        PackagesOutput {
            success: true,
            packages,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &PackagesOutput, options: &PackagesOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            let mut lines = vec!["Monitored packages:".to_string(), String::new()];
            for (i, row) in output.packages.iter().enumerate() {
                let tags: Vec<&str> = row.relevance.iter().map(|t| t.label()).collect();
                lines.push(format!(
                    "{:>2}. {} ({}) [{}]",
                    i + 1,
                    row.display_name,
                    row.category,
                    tags.join(", ")
                ));
            }
            lines.push(String::new());
            lines.join("\n")
        }
    }
}
