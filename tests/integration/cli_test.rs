//! Integration tests for the sheetconv binary

#[cfg(test)]
mod cli_tests {
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::process::{Command, Stdio};
    use tempfile::tempdir;

    struct RunOutput {
        success: bool,
        stdout: String,
        stderr: String,
    }

    fn run_sheetconv(args: &[&str], stdin: Option<&str>) -> RunOutput {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sheetconv"));
        cmd.args(args)
            .env("RUST_LOG", "off")
            .env("NO_COLOR", "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("Failed to run sheetconv");
        if let Some(input) = stdin {
            child
                .stdin
                .take()
                .unwrap()
                .write_all(input.as_bytes())
                .unwrap();
        }
        let output = child.wait_with_output().unwrap();

        RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    fn sample_workbook(dir: &Path, name: &str) {
        let bytes = sheetconv::json_to_xlsx(r#"[{"sku":"A-1","qty":3}]"#).unwrap();
        fs::write(dir.join(name), bytes).unwrap();
    }

    #[test]
    fn test_to_sheet_sample_writes_both_downloads() {
        let out = tempdir().unwrap();
        let result = run_sheetconv(
            &["to-sheet", "--sample", "--format", "both", "--instant", "--out-dir", path_arg(out.path())],
            None,
        );

        assert!(result.success, "stderr: {}", result.stderr);
        assert!(result.stdout.contains("✓ Sample data loaded successfully!"));
        assert!(result.stdout.contains("✓ Excel preview generated successfully!"));
        assert!(result.stdout.contains("✓ Excel file downloaded successfully!"));
        assert!(result.stdout.contains("✓ CSV file downloaded successfully!"));

        assert!(out.path().join("data.xlsx").exists());
        let csv = fs::read_to_string(out.path().join("data.csv")).unwrap();
        assert_eq!(csv.lines().count(), 6);
    }

    #[test]
    fn test_to_sheet_from_stdin_with_preview() {
        let out = tempdir().unwrap();
        let result = run_sheetconv(
            &["to-sheet", "--stdin", "--preview", "--instant", "--out-dir", path_arg(out.path())],
            Some(r#"[{"city":"Oslo","pop":709000}]"#),
        );

        assert!(result.success, "stderr: {}", result.stderr);
        assert!(result.stdout.contains("city | pop"));
        assert!(result.stdout.contains("Oslo | 709000"));
        assert!(out.path().join("data.xlsx").exists());
    }

    #[test]
    fn test_to_sheet_invalid_json_exits_nonzero() {
        let out = tempdir().unwrap();
        let result = run_sheetconv(
            &["to-sheet", "[{oops", "--instant", "--out-dir", path_arg(out.path())],
            None,
        );

        assert!(!result.success);
        assert!(result.stderr.contains("✗ Invalid JSON format. Please check your input."));
        assert!(!out.path().join("data.xlsx").exists());
    }

    #[test]
    fn test_to_json_single_file_prints_and_saves() {
        let input = tempdir().unwrap();
        let out = tempdir().unwrap();
        sample_workbook(input.path(), "stock.xlsx");

        let result = run_sheetconv(
            &[
                "to-json",
                path_arg(&input.path().join("stock.xlsx")),
                "--print",
                "--instant",
                "--out-dir",
                path_arg(out.path()),
            ],
            None,
        );

        assert!(result.success, "stderr: {}", result.stderr);
        assert!(result.stdout.contains("\"sku\": \"A-1\""));
        let saved = fs::read_to_string(out.path().join("data.json")).unwrap();
        assert_eq!(saved, "[\n  {\n    \"sku\": \"A-1\",\n    \"qty\": 3\n  }\n]");
    }

    #[test]
    fn test_to_json_rejects_non_excel_file() {
        let input = tempdir().unwrap();
        let file = input.path().join("notes.txt");
        fs::write(&file, "hello").unwrap();

        let result = run_sheetconv(&["to-json", path_arg(&file), "--instant"], None);
        assert!(!result.success);
        assert!(result
            .stderr
            .contains("Please select a valid Excel file (.xlsx or .xls)"));
    }

    #[test]
    fn test_to_json_directory_mirrors_structure() {
        let input = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir_all(input.path().join("sub")).unwrap();
        sample_workbook(input.path(), "a.xlsx");
        sample_workbook(&input.path().join("sub"), "b.xlsx");

        let result = run_sheetconv(
            &[
                "to-json",
                path_arg(input.path()),
                "--recursive",
                "--instant",
                "--out-dir",
                path_arg(out.path()),
            ],
            None,
        );

        assert!(result.success, "stderr: {}", result.stderr);
        assert!(result.stdout.contains("Found 2 Excel files"));
        assert!(out.path().join("a.json").exists());
        assert!(out.path().join("sub/b.json").exists());
    }

    #[test]
    fn test_directory_continue_on_error() {
        let input = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(input.path().join("a_bad.xlsx"), b"not a workbook").unwrap();
        sample_workbook(input.path(), "b_good.xlsx");

        let aborted = run_sheetconv(
            &["to-json", path_arg(input.path()), "--instant", "--out-dir", path_arg(out.path())],
            None,
        );
        assert!(!aborted.success);
        assert!(!out.path().join("b_good.json").exists());

        let continued = run_sheetconv(
            &[
                "to-json",
                path_arg(input.path()),
                "--continue-on-error",
                "--instant",
                "--out-dir",
                path_arg(out.path()),
            ],
            None,
        );
        assert!(!continued.success);
        assert!(continued.stderr.contains("Error converting a_bad.xlsx"));
        assert!(out.path().join("b_good.json").exists());
    }

    #[test]
    fn test_validate_reports_records() {
        let ok = run_sheetconv(&["validate", r#"[{"a":1,"b":2},{"a":3}]"#], None);
        assert!(ok.success);
        assert!(ok.stdout.contains("Valid JSON: 2 records, 2 columns"));

        let bad = run_sheetconv(&["validate", "[]"], None);
        assert!(!bad.success);
        assert!(bad.stderr.contains("✗"));
    }

    #[test]
    fn test_max_input_size_is_enforced() {
        let out = tempdir().unwrap();
        let big = format!(r#"[{{"blob":"{}"}}]"#, "x".repeat(4096));
        let result = run_sheetconv(
            &[
                "to-sheet",
                "--stdin",
                "--instant",
                "--max-input-size",
                "2KB",
                "--out-dir",
                path_arg(out.path()),
            ],
            Some(&big),
        );
        assert!(!result.success);
    }

    #[test]
    fn test_guide_lists_steps() {
        let result = run_sheetconv(&["guide", "--mode", "sheet-to-json"], None);
        assert!(result.success);
        assert!(result.stdout.contains("How to use: Excel to JSON"));
        assert!(result.stdout.contains("1. Upload an Excel file (.xlsx or .xls)"));
    }
}
