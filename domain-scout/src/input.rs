//! Collecting raw name inputs from arguments, files and stdin.

use domain_scout_lib::{parse_name_list, ScoutError};
use std::io::{BufRead, Write};
use std::path::Path;

/// File picked up from the working directory when no names are given.
pub const FALLBACK_FILE: &str = "domains.txt";

/// Where the names of a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Arguments,
    File(String),
    Interactive,
}

/// Read names from a newline-delimited file.
pub fn read_names_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ScoutError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScoutError::file_error(path.to_string_lossy(), "File not found"));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ScoutError::file_error(path.to_string_lossy(), e.to_string()))?;

    let names = parse_name_list(&content);
    if names.is_empty() {
        return Err(ScoutError::file_error(
            path.to_string_lossy(),
            "No domain names found in the file",
        ));
    }
    Ok(names)
}

/// Read names one per line until EOF. On a terminal an empty line also
/// ends the list.
pub fn read_interactive<R: BufRead, W: Write>(
    reader: R,
    prompt: Option<&mut W>,
) -> Result<Vec<String>, ScoutError> {
    let interactive = prompt.is_some();
    if let Some(out) = prompt {
        writeln!(out, "Enter domain names, one per line (empty line to finish):")?;
        out.flush()?;
    }

    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() {
            if interactive {
                break;
            }
            continue;
        }
        names.push(entry.to_string());
    }
    Ok(names)
}

/// Gather raw names: positional arguments, then `--file`, then
/// `./domains.txt`, then stdin.
pub fn collect_raw_names(
    positional: &[String],
    file: Option<&str>,
) -> Result<(Vec<String>, InputSource), ScoutError> {
    if !positional.is_empty() {
        let mut names = positional.to_vec();
        if let Some(path) = file {
            names.extend(read_names_file(path)?);
        }
        return Ok((names, InputSource::Arguments));
    }

    if let Some(path) = file {
        return Ok((read_names_file(path)?, InputSource::File(path.to_string())));
    }

    if Path::new(FALLBACK_FILE).exists() {
        return Ok((
            read_names_file(FALLBACK_FILE)?,
            InputSource::File(FALLBACK_FILE.to_string()),
        ));
    }

    let stdin = std::io::stdin();
    let names = if std::io::IsTerminal::is_terminal(&stdin) {
        let mut stderr = std::io::stderr();
        read_interactive(stdin.lock(), Some(&mut stderr))?
    } else {
        read_interactive(stdin.lock(), None::<&mut std::io::Stderr>)?
    };
    Ok((names, InputSource::Interactive))
}
