//! Output formatting for the management commands
//!
//! JSON and YAML render the serde representation of the value; the human
//! format is a short aligned listing meant for a terminal.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::WrapperConfig;
use crate::plan::ExecPlan;
use crate::toolchain::KNOWN_COMMANDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// One row of the `names` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameEntry {
    pub name: &'static str,
    pub mode: Option<&'static str>,
    pub language: Option<&'static str>,
    pub overridable: bool,
}

/// Flattens the name table into one entry per invocation name.
pub fn name_entries() -> Vec<NameEntry> {
    KNOWN_COMMANDS
        .iter()
        .flat_map(|spec| {
            spec.names.iter().map(move |name| NameEntry {
                name,
                mode: spec.mode.map(|m| m.wire_name()),
                language: spec.language.map(|l| l.name()),
                overridable: spec.compiler_override.is_some(),
            })
        })
        .collect()
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_plan(&self, plan: &ExecPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_plan_human(plan)),
        }
    }

    pub fn format_names(&self, entries: &[NameEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(entries).context("Failed to serialize names to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(entries).context("Failed to serialize names to YAML")
            }
            OutputFormat::Human => Ok(self.format_names_human(entries)),
        }
    }

    pub fn format_config(&self, config: &WrapperConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(config).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_plan_human(&self, plan: &ExecPlan) -> String {
        let mut out = String::new();
        out.push_str(&format!("Invoked as: {}\n", plan.name));
        out.push_str(&format!("Mode:       {} ({})\n", plan.mode, plan.mode.wire_name()));
        out.push_str(&format!(
            "Language:   {}\n",
            plan.language.map(|l| l.name()).unwrap_or("-")
        ));
        out.push_str(&format!("Command:    {}\n", plan.command));
        if let Some(accelerator) = &plan.accelerator {
            out.push_str(&format!("Cache:      {}\n", accelerator.display()));
        }
        if let Some(rpath) = &plan.rpath {
            out.push_str(&format!("Rpath:      {}\n", rpath.display()));
        }
        if !plan.applied_groups.is_empty() {
            out.push_str(&format!("Injected:   {}\n", plan.applied_groups.join(", ")));
        }
        out.push_str(&format!("PATH:       {}\n", plan.search_path.to_string_lossy()));
        out.push('\n');
        out.push_str(&format!("BEFORE: {}\n", plan.before_line()));
        out.push_str(&format!("AFTER:  {}\n", plan.after_line()));
        out
    }

    fn format_names_human(&self, entries: &[NameEntry]) -> String {
        let mut out = format!("{:<10} {:<6} {:<9} {}\n", "NAME", "MODE", "LANGUAGE", "OVERRIDE");
        for entry in entries {
            out.push_str(&format!(
                "{:<10} {:<6} {:<9} {}\n",
                entry.name,
                entry.mode.unwrap_or("-"),
                entry.language.unwrap_or("-"),
                if entry.overridable { "yes" } else { "-" }
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SelfDirs;
    use crate::plan::{Invocation, Planner};
    use std::ffi::{OsStr, OsString};
    use std::path::PathBuf;

    fn sample_plan() -> ExecPlan {
        let config = WrapperConfig {
            cppflags: vec!["-I/p/include".to_string()],
            prefix: Some(PathBuf::from("/p")),
            ..Default::default()
        };
        Planner::new(&config)
            .plan(
                &Invocation::new("gcc", vec![OsString::from("-c"), OsString::from("x.c")]),
                OsStr::new("/usr/bin"),
                &SelfDirs::new([]),
            )
            .unwrap()
    }

    #[test]
    fn test_name_entries_cover_table() {
        let entries = name_entries();
        assert_eq!(entries.len(), 16);
        let ld = entries.iter().find(|e| e.name == "ld").unwrap();
        assert_eq!(ld.mode, Some("ld"));
        assert_eq!(ld.language, None);
        let cc = entries.iter().find(|e| e.name == "c99").unwrap();
        assert!(cc.overridable);
        assert_eq!(cc.language, Some("C"));
    }

    #[test]
    fn test_plan_json() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_plan(&sample_plan())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["mode"], "cc");
        assert_eq!(value["args"][0], "-I/p/include");
    }

    #[test]
    fn test_plan_yaml() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format_plan(&sample_plan())
            .unwrap();
        assert!(output.contains("mode: cc"));
        assert!(output.contains("command: gcc"));
    }

    #[test]
    fn test_plan_human() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_plan(&sample_plan())
            .unwrap();
        assert!(output.contains("Mode:       compile (cc)"));
        assert!(output.contains("AFTER:  gcc -I/p/include -c x.c"));
        assert!(output.contains("Injected:   preprocessor-flags"));
    }

    #[test]
    fn test_names_human_header() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_names(&name_entries())
            .unwrap();
        assert!(output.starts_with("NAME"));
        assert!(output.lines().any(|l| l.starts_with("gfortran")));
    }

    #[test]
    fn test_config_human_uses_display() {
        let config = WrapperConfig::default();
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert_eq!(output, config.to_string());
    }
}
