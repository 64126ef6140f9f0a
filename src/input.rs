use std::fs;
use std::path::Path;

use anyhow::Context;

/// Read a listing into memory. Failures name the offending path.
pub fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("unable to read listing {}", path.display()))
}
