use std::path::Path;

/// Suffixes admitted for spreadsheet decoding
pub const SPREADSHEET_SUFFIXES: &[&str] = &[".xlsx", ".xls"];

/// Return true if the file name ends in `.xlsx` or `.xls` (any case)
pub fn is_spreadsheet_file(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SPREADSHEET_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Return true if the path is an existing spreadsheet file
pub fn is_spreadsheet_path(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_spreadsheet_file)
}
