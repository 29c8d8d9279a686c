//! Opening command-line inputs as pipeline sources

use super::glob_resolver::resolve_patterns;
use std::io::Write;
use std::path::Path;
use wordchunk_core::{Source, SourceFailure};

/// Argument that names standard input
pub const STDIN_ARG: &str = "-";

/// Open every input in argument order
///
/// Inputs that cannot be opened are reported to `errors` and skipped.
/// Standard input is read where `-` appears; otherwise it is appended last
/// when `include_stdin` is set.
pub fn open_sources(
    inputs: &[String],
    include_stdin: bool,
    errors: &mut impl Write,
) -> Vec<Source> {
    let mut sources = Vec::with_capacity(inputs.len() + 1);
    let mut stdin_used = false;

    for path in resolve_patterns(inputs) {
        if path == Path::new(STDIN_ARG) {
            if !stdin_used {
                sources.push(Source::stdin());
                stdin_used = true;
            }
            continue;
        }

        match Source::open(&path) {
            Ok(source) => {
                log::trace!("Opened {}", path.display());
                sources.push(source);
            }
            Err(err) => {
                log::debug!("Cannot open {}: {}", path.display(), err);
                let _ = writeln!(errors, "Error opening {}: {}. Skipping.", path.display(), err);
            }
        }
    }

    if include_stdin && !stdin_used {
        sources.push(Source::stdin());
    }

    sources
}

/// Report sources abandoned mid-read
pub fn report_failures(failures: &[SourceFailure], errors: &mut impl Write) {
    for failure in failures {
        let _ = writeln!(
            errors,
            "Error reading {}: {}. Skipping.",
            failure.source_name, failure.error
        );
    }
}
