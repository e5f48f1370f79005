use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Extension of single-file components.
pub const COMPONENT_EXTENSION: &str = "vue";

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning for components.
pub struct ScanResult {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

/// Compiled `ignores` (+ test file patterns when enabled).
struct IgnoreRules {
    /// Literal paths, matched as prefixes.
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    fn new(base_dir: &Path, ignores: &[String], ignore_test_files: bool, verbose: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignores {
            if !is_glob_pattern(p) {
                literal_paths.push(base_dir.join(p));
                continue;
            }
            match Pattern::new(p) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) if verbose => eprintln!(
                    "{} Invalid ignore pattern '{}': {}",
                    "warning:".bold().yellow(),
                    p,
                    e
                ),
                Err(_) => {}
            }
        }

        if ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.literal_paths.iter().any(|p| path.starts_with(p))
            || self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Directories to walk: the base dir, or each entry of `includes`
/// (literal paths or glob patterns expanded to directories).
fn scan_roots(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in includes {
        let path = base_dir.join(inc);
        if !is_glob_pattern(inc) {
            if path.exists() {
                roots.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
            continue;
        }
        match glob(&path.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(e) if verbose => eprintln!(
                "{} Invalid glob pattern '{}': {}",
                "warning:".bold().yellow(),
                inc,
                e
            ),
            Err(_) => {}
        }
    }
    roots
}

/// Find every `.vue` component under `base_dir`.
pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let base = Path::new(base_dir);
    let ignore = IgnoreRules::new(base, ignore_patterns, ignore_test_files, verbose);
    let mut files = HashSet::new();
    let mut skipped_count = 0;

    for root in scan_roots(base, includes, verbose) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_component_file(path) && !ignore.is_ignored(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_component_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(COMPONENT_EXTENSION)
}
