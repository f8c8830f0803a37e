//! Integration tests for the JSON to spreadsheet workflow

#[cfg(test)]
mod json_to_sheet_tests {
    use std::io::Cursor;
    use std::time::Duration;

    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use pretty_assertions::assert_eq;
    use sheetconv::io::{MemorySink, CSV_FILE_NAME, XLSX_FILE_NAME, XLSX_MIME};
    use sheetconv::progress::ManualClock;
    use sheetconv::{ConverterConfig, JsonToSheetPanel, ToastKind};

    fn panel_with(input: &str) -> JsonToSheetPanel {
        let mut panel = JsonToSheetPanel::new(&ConverterConfig::default());
        panel.set_input(input);
        panel
    }

    fn sheet_cells(bytes: &[u8]) -> (String, Vec<Vec<Data>>) {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).unwrap();
        let name = workbook.sheet_names()[0].clone();
        let range = workbook.worksheet_range(&name).unwrap();
        (name, range.rows().map(|row| row.to_vec()).collect())
    }

    #[test]
    fn test_preview_then_download_xlsx() {
        let mut panel = panel_with(r#"[{"name":"Ann","age":41,"member":true},{"name":"Ben","age":37}]"#);
        panel.preview(&mut ManualClock::new());

        let mut sink = MemorySink::new();
        let id = panel.download_xlsx(&mut sink).unwrap();
        assert_eq!(panel.toasts().get(id).unwrap().kind, ToastKind::Success);

        let file = sink.file(XLSX_FILE_NAME).unwrap();
        assert_eq!(file.mime_type, XLSX_MIME);

        let (name, rows) = sheet_cells(&file.content);
        assert_eq!(name, "Sheet1");
        assert_eq!(
            rows[0],
            vec![
                Data::String("name".into()),
                Data::String("age".into()),
                Data::String("member".into())
            ]
        );
        assert_eq!(rows[1][1], Data::Float(41.0));
        assert_eq!(rows[1][2], Data::Bool(true));
        assert_eq!(rows[2][2], Data::Empty);
    }

    #[test]
    fn test_keys_missing_from_first_row_are_not_columns() {
        let mut panel = panel_with(r#"[{"a":1},{"a":2,"b":3}]"#);
        panel.preview(&mut ManualClock::new());

        let mut sink = MemorySink::new();
        panel.download_csv(&mut sink);
        let csv = String::from_utf8(sink.file(CSV_FILE_NAME).unwrap().content.clone()).unwrap();
        assert_eq!(csv, "a\n1\n2\n");
    }

    #[test]
    fn test_csv_quotes_and_booleans() {
        let mut panel = panel_with(r#"[{"text":"a, \"b\"","flag":false,"none":null}]"#);
        panel.preview(&mut ManualClock::new());

        let mut sink = MemorySink::new();
        panel.download_csv(&mut sink);
        let csv = String::from_utf8(sink.file(CSV_FILE_NAME).unwrap().content.clone()).unwrap();
        assert_eq!(csv, "text,flag,none\n\"a, \"\"b\"\"\",FALSE,\n");
    }

    #[test]
    fn test_rejections_produce_exactly_one_error_toast() {
        for (input, message) in [
            ("", "Please enter JSON data"),
            ("   \n", "Please enter JSON data"),
            ("[]", "Please provide a valid JSON array with at least one object"),
            (r#"{"a":1}"#, "Please provide a valid JSON array with at least one object"),
            ("[1,2", "Invalid JSON format. Please check your input."),
        ] {
            let mut panel = panel_with(input);
            let mut clock = ManualClock::new();
            panel.preview(&mut clock);

            assert_eq!(panel.toasts().len(), 1, "input {:?}", input);
            let toast = panel.toasts().latest().unwrap();
            assert_eq!(toast.kind, ToastKind::Error);
            assert_eq!(toast.message, message);
            // Validation happens before any progress is played
            assert_eq!(clock.sleeps(), 0);
        }
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let config = ConverterConfig::default().with_max_input_bytes(1024);
        let mut panel = JsonToSheetPanel::new(&config);
        panel.set_input(format!(r#"[{{"blob":"{}"}}]"#, "x".repeat(2048)));

        panel.preview(&mut ManualClock::new());
        assert_eq!(panel.toasts().latest().unwrap().kind, ToastKind::Error);
        assert!(!panel.is_preview_shown());
    }

    #[test]
    fn test_time_scale_shortens_progress() {
        let config = ConverterConfig::default().with_time_scale(0.5);
        let mut panel = JsonToSheetPanel::new(&config);
        panel.set_input(r#"[{"a":1}]"#);

        let mut clock = ManualClock::new();
        panel.preview(&mut clock);
        assert_eq!(sheetconv::progress::Clock::now(&clock), Duration::from_millis(1500));
    }

    #[test]
    fn test_success_toast_expires() {
        let mut panel = panel_with(r#"[{"a":1}]"#);
        panel.preview(&mut ManualClock::new());
        assert_eq!(panel.toasts().len(), 1);

        panel.advance(Duration::from_millis(4000));
        assert!(!panel.toasts().toasts()[0].visible);
        panel.advance(Duration::from_millis(300));
        assert!(panel.toasts().is_empty());
    }
}
