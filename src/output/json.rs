//! JSON report persistence

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Serialize `data` to `output_dir/filename` and return the written path.
///
/// Creates `output_dir` if needed and overwrites any existing file. Output is
/// UTF-8 with 2-space indentation; non-ASCII text is written as-is.
pub fn save_to_json<T: Serialize + ?Sized>(
    data: &T,
    filename: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let path = output_dir.join(filename);
    let mut contents = serde_json::to_string_pretty(data)?;
    contents.push('\n');
    fs::write(&path, contents)?;

    Ok(path)
}
