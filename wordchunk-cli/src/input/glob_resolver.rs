//! File pattern resolution using glob

use glob::glob;
use std::path::PathBuf;

/// Whether an argument contains glob metacharacters
pub fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Resolve arguments to file paths, preserving argument order
///
/// Plain paths pass through untouched. A pattern expands to its matching
/// files in sorted order; a pattern that is invalid or matches no file is
/// kept as a literal path so that opening it reports the problem.
pub fn resolve_patterns(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for pattern in patterns {
        if !is_pattern(pattern) {
            files.push(PathBuf::from(pattern));
            continue;
        }

        let mut matched: Vec<PathBuf> = match glob(pattern) {
            Ok(paths) => paths
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(err) => {
                        log::warn!("Error resolving pattern {}: {}", pattern, err);
                        None
                    }
                })
                .filter(|path| path.is_file())
                .collect(),
            Err(err) => {
                log::warn!("Invalid glob pattern {}: {}", pattern, err);
                Vec::new()
            }
        };

        if matched.is_empty() {
            log::debug!("Pattern {} matched nothing, using it as a path", pattern);
            files.push(PathBuf::from(pattern));
        } else {
            matched.sort();
            log::debug!("Pattern {} matched {} file(s)", pattern, matched.len());
            files.append(&mut matched);
        }
    }

    files
}
