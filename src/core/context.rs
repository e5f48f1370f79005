use std::{
    cell::OnceCell,
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        component::{ParsedComponent, parse_component},
        file_scanner::scan_files,
    },
    issues::ParseErrorIssue,
};

/// Shared state for one check run.
///
/// # Lazy Initialization Strategy
///
/// Components are parsed on first access via `parsed_components()`, so
/// commands that only need the configuration or file list never parse.
///
/// # Configuration Priority
///
/// 1. CLI arguments (`--source-root`)
/// 2. `.vuedatarc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    // ============================================================
    // Basic data (set at initialization)
    // ============================================================
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory that was scanned for components.
    pub root_dir: PathBuf,

    /// All `.vue` files to analyze.
    pub files: HashSet<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    // ============================================================
    // Lazily initialized pipeline data
    // ============================================================
    /// Parsed components, keyed by file path.
    parsed_components: OnceCell<HashMap<String, ParsedComponent>>,

    /// Files that could not be read or parsed.
    /// Populated alongside `parsed_components`.
    parse_errors: OnceCell<Vec<ParseErrorIssue>>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// The config file is searched from `--source-root` (or the current
    /// directory). Components are scanned under `--source-root` when given,
    /// otherwise under the config's `sourceRoot`.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the root path is not UTF-8.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let search_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&search_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let config = config_result.config;

        let root_dir = match &common_args.source_root {
            Some(root) => root.clone(),
            None => PathBuf::from(&config.source_root),
        };

        Self::with_config(config, root_dir, verbose)
    }

    /// Create a context for an explicit configuration and scan root.
    pub fn with_config(config: Config, root_dir: PathBuf, verbose: bool) -> Result<Self> {
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;
        if !Path::new(path).is_dir() {
            anyhow::bail!("Source root is not a directory: {}", path);
        }

        let scan_result = scan_files(
            path,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
            parsed_components: OnceCell::new(),
            parse_errors: OnceCell::new(),
        })
    }

    /// Get parsed components (lazy initialization).
    ///
    /// Files are read and parsed in parallel; each parse sets up its own swc
    /// globals and source map. Failures are collected separately and can be
    /// retrieved via `parse_errors()`.
    pub fn parsed_components(&self) -> &HashMap<String, ParsedComponent> {
        self.parsed_components.get_or_init(|| {
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let result = std::fs::read_to_string(file_path)
                        .map_err(|e| anyhow!("Failed to read file: {}", e))
                        .and_then(|code| parse_component(&code, file_path));
                    (file_path.clone(), result)
                })
                .collect();

            let mut parsed = HashMap::new();
            let mut errors = Vec::new();

            for (file_path, result) in results {
                match result {
                    Ok(component) => {
                        parsed.insert(file_path, component);
                    }
                    Err(e) => {
                        if self.verbose {
                            eprintln!("{} {} - {}", "warning:".bold().yellow(), file_path, e);
                        }
                        errors.push(ParseErrorIssue {
                            file_path,
                            error: e.to_string(),
                        });
                    }
                }
            }

            errors.sort_by(|a, b| a.file_path.cmp(&b.file_path));
            let _ = self.parse_errors.set(errors);
            parsed
        })
    }

    /// Files that could not be read or parsed.
    pub fn parse_errors(&self) -> &Vec<ParseErrorIssue> {
        self.parsed_components();
        self.parse_errors.get_or_init(Vec::new)
    }
}
