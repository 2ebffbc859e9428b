//! Text-file patching primitives.
//! Each edit comes in two forms: a pure function over file content, and a
//! wrapper that reads the file, applies it and writes the result back.

use crate::error::{Error, Result};
use log::{debug, info, warn};
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the quoted value assigned to `name`, if any.
///
/// Matches `name = "value"` or `name = 'value'` at the start of a line.
pub fn get_value(content: &str, name: &str) -> Result<Option<String>> {
    let pattern = format!(r#"(?m)^[ \t]*{}\s*=\s*["'](.*?)["']"#, regex::escape(name));
    let re = Regex::new(&pattern)?;
    Ok(re.captures(content).map(|caps| caps[1].to_string()))
}

/// Replaces the first `name = ...` assignment with `name = new_value`.
///
/// Leading indentation is kept. The new value is inserted literally; string
/// values must be quoted by the caller. Returns `None` if no assignment
/// matched.
pub fn replace_value(content: &str, name: &str, new_value: &str) -> Result<Option<String>> {
    let pattern = format!(r"(?m)^([ \t]*){}[ \t]*=.*$", regex::escape(name));
    let re = Regex::new(&pattern)?;
    if !re.is_match(content) {
        return Ok(None);
    }
    let replaced = re.replacen(content, 1, |caps: &Captures| {
        format!("{}{name} = {new_value}", &caps[1])
    });
    Ok(Some(replaced.into_owned()))
}

/// Appends `'entry'` to every bracketed list on lines starting with `prefix`.
///
/// Lists that already contain the entry are left alone.
pub fn append_list_entry(content: &str, prefix: &str, entry: &str) -> String {
    let quoted = format!("'{entry}'");
    let double_quoted = format!("\"{entry}\"");

    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            let trimmed = line.trim_end();
            if !trimmed.starts_with(prefix) || !trimmed.ends_with(']') {
                return line.to_string();
            }
            if trimmed.contains(&quoted) || trimmed.contains(&double_quoted) {
                return line.to_string();
            }
            let head = trimmed.trim_end_matches(']');
            let inner = head.rsplit_once('[').map(|(_, inner)| inner).unwrap_or_default();
            if inner.trim().is_empty() {
                format!("{}{quoted}]", head.trim_end())
            } else {
                format!("{}, {quoted}]", head.trim_end().trim_end_matches(','))
            }
        })
        .collect();

    if content.ends_with('\n') {
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Reads the quoted value of `name` from a file.
///
/// # Errors
/// * `Error::NotFoundError` if the file has no such assignment
pub fn get_var_val<P: AsRef<Path>>(file_path: P, name: &str) -> Result<String> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)?;
    get_value(&content, name)?.ok_or_else(|| Error::NotFoundError {
        name: name.to_string(),
        file: file_path.display().to_string(),
    })
}

/// Replaces the value of `name` in a file and writes it back.
///
/// The file is rewritten even when nothing matched. Returns whether an
/// assignment was replaced.
pub fn replace_var_val<P: AsRef<Path>>(file_path: P, name: &str, new_value: &str) -> Result<bool> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)?;
    let (updated, replaced) = match replace_value(&content, name, new_value)? {
        Some(updated) => (updated, true),
        None => {
            warn!("No '{}' assignment in {}", name, file_path.display());
            (content, false)
        }
    };
    fs::write(file_path, updated)?;
    debug!("Set {} = {} in {}", name, new_value, file_path.display());
    Ok(replaced)
}

/// Appends an entry to the list assigned on lines starting with `prefix`.
pub fn append_list_entry_in_file<P: AsRef<Path>>(
    file_path: P,
    prefix: &str,
    entry: &str,
) -> Result<()> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)?;
    fs::write(file_path, append_list_entry(&content, prefix, entry))?;
    Ok(())
}

/// Moves a file into `new_directory`, keeping its name.
///
/// # Errors
/// * `Error::IoError` if the source or the destination directory is missing
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(file_path: P, new_directory: Q) -> Result<PathBuf> {
    let file_path = file_path.as_ref();
    let new_directory = new_directory.as_ref();
    let file_name = file_path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{}' has no file name", file_path.display()),
        )
    })?;
    if !new_directory.is_dir() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("directory '{}' does not exist", new_directory.display()),
        )));
    }

    let new_file_path = new_directory.join(file_name);
    if fs::rename(file_path, &new_file_path).is_err() {
        // rename fails across file systems
        fs::copy(file_path, &new_file_path)?;
        fs::remove_file(file_path)?;
    }

    info!(
        "File '{}' has been moved to '{}'",
        file_name.to_string_lossy(),
        new_file_path.display()
    );
    Ok(new_file_path)
}
