use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find spreadsheet files in a directory. If recursive is true, use walkdir; otherwise list files.
pub fn find_spreadsheet_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if super::filter::is_spreadsheet_path(path) {
                files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if super::filter::is_spreadsheet_path(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
