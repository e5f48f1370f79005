use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, RuleLevel},
    issues::{Report, UnusedDataIssue},
};

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    #[schemars(description = "Absolute path to the project root")]
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanUnusedDataParams {
    #[schemars(description = "Absolute path to the project root")]
    pub project_root_path: String,
    #[schemars(description = "Maximum number of items to return (default 20, max 100)")]
    pub limit: Option<u32>,
    #[schemars(description = "Number of items to skip (default 0)")]
    pub offset: Option<u32>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub ignore_test_files: bool,
    pub source_root: String,
    /// Level of the `no-unused-data` rule: `off`, `warn` or `error`
    pub no_unused_data: String,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        let level = match c.rules.no_unused_data {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        };
        Self {
            includes: c.includes,
            ignores: c.ignores,
            ignore_test_files: c.ignore_test_files,
            source_root: c.source_root,
            no_unused_data: level.to_string(),
        }
    }
}

// ============================================================
// Unused Data Types (scan_unused_data)
// ============================================================

/// Result of scan_unused_data operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnusedDataScanResult {
    pub total_count: usize,
    pub total_file_count: usize,
    /// Components skipped because they could not be parsed
    pub parse_error_count: usize,
    pub items: Vec<UnusedDataItem>,
    pub pagination: Pagination,
}

/// A single unused `data()` key
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnusedDataItem {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub name: String,
    pub message: String,
    pub severity: String,
}

impl From<&UnusedDataIssue> for UnusedDataItem {
    fn from(issue: &UnusedDataIssue) -> Self {
        Self {
            file_path: issue.context.file_path().to_string(),
            line: issue.context.line(),
            col: issue.context.col(),
            name: issue.name.clone(),
            message: issue.message(),
            severity: issue.severity.to_string(),
        }
    }
}

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
