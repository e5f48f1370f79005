use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    /// Why the config file was not written.
    pub error: Option<String>,
}

/// Result of running a vuedata command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found during the check, sorted by location.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of component files that failed to parse.
    pub parse_error_count: usize,
    /// Number of `.vue` files that were checked.
    pub files_checked: usize,
}
