//! Integration tests for the spreadsheet to JSON workflow

#[cfg(test)]
mod sheet_to_json_tests {
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
    use serde_json::{json, Value};
    use sheetconv::io::{MemorySink, UploadedFile, JSON_FILE_NAME};
    use sheetconv::progress::ManualClock;
    use sheetconv::{ConversionEngine, ConverterConfig, SheetToJsonPanel, ToastKind};

    fn workbook_bytes(build: impl FnOnce(&mut Worksheet)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(workbook.add_worksheet());
        workbook.save_to_buffer().unwrap()
    }

    fn convert(name: &str, bytes: Vec<u8>, config: &ConverterConfig) -> SheetToJsonPanel {
        let mut panel = SheetToJsonPanel::new(config);
        panel.upload(UploadedFile::new(name, bytes));
        panel.convert_to_json(&mut ManualClock::new());
        panel
    }

    fn output_value(panel: &SheetToJsonPanel) -> Value {
        serde_json::from_str(panel.json_output()).unwrap()
    }

    #[test]
    fn test_headers_blank_rows_and_empty_cells() {
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "name").unwrap();
            sheet.write_string(0, 2, "name").unwrap();
            sheet.write_string(1, 0, "Ann").unwrap();
            sheet.write_number(1, 1, 3).unwrap();
            sheet.write_string(1, 2, "Lee").unwrap();
            // row 2 left blank
            sheet.write_string(3, 0, "Ben").unwrap();
        });

        let panel = convert("people.xlsx", bytes, &ConverterConfig::default());
        assert_eq!(panel.record_count(), 2);
        assert_eq!(
            output_value(&panel),
            json!([
                {"name": "Ann", "__EMPTY": 3, "name_1": "Lee"},
                {"name": "Ben"}
            ])
        );
    }

    #[test]
    fn test_numbers_and_booleans_keep_types() {
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "qty").unwrap();
            sheet.write_string(0, 1, "price").unwrap();
            sheet.write_string(0, 2, "stocked").unwrap();
            sheet.write_number(1, 0, 4).unwrap();
            sheet.write_number(1, 1, 2.75).unwrap();
            sheet.write_boolean(1, 2, true).unwrap();
        });

        let panel = convert("stock.xlsx", bytes, &ConverterConfig::default());
        assert_eq!(
            output_value(&panel),
            json!([{"qty": 4, "price": 2.75, "stocked": true}])
        );
        assert!(panel.json_output().contains("\n    \"qty\": 4"));
    }

    #[test]
    fn test_dates_as_serial_or_iso() {
        let build = |sheet: &mut Worksheet| {
            let format = Format::new().set_num_format("yyyy-mm-dd");
            let date = ExcelDateTime::from_ymd(2024, 1, 1).unwrap();
            sheet.write_string(0, 0, "start").unwrap();
            sheet.write_datetime_with_format(1, 0, &date, &format).unwrap();
        };

        let serial = convert("dates.xlsx", workbook_bytes(build), &ConverterConfig::default());
        assert_eq!(output_value(&serial), json!([{"start": 45292}]));

        let iso_config = ConverterConfig::default().with_dates_as_iso(true);
        let iso = convert("dates.xlsx", workbook_bytes(build), &iso_config);
        assert_eq!(output_value(&iso), json!([{"start": "2024-01-01"}]));
    }

    #[test]
    fn test_only_first_sheet_is_used() {
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.write_string(0, 0, "k").unwrap();
        first.write_string(1, 0, "first").unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "k").unwrap();
        second.write_string(1, 0, "second").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let panel = convert("two.xlsx", bytes, &ConverterConfig::default());
        assert_eq!(output_value(&panel), json!([{"k": "first"}]));
    }

    #[test]
    fn test_header_only_sheet_gives_empty_array() {
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "lonely").unwrap();
        });

        let panel = convert("empty.xlsx", bytes, &ConverterConfig::default());
        assert_eq!(panel.toasts().latest().unwrap().kind, ToastKind::Success);
        assert_eq!(panel.record_count(), 0);
        assert_eq!(panel.json_output(), "[]");
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "a").unwrap();
            sheet.write_string(1, 0, "b").unwrap();
        });
        let panel = convert("REPORT.XLSX", bytes, &ConverterConfig::default());
        assert_eq!(panel.record_count(), 1);
        assert_eq!(panel.file_name(), "REPORT.XLSX");
    }

    #[test]
    fn test_download_writes_data_json() {
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "a").unwrap();
            sheet.write_number(1, 0, 1).unwrap();
        });
        let mut panel = convert("a.xlsx", bytes, &ConverterConfig::default());

        let mut sink = MemorySink::new();
        let id = panel.download_json(&mut sink).unwrap();
        assert_eq!(
            panel.toasts().get(id).unwrap().message,
            "JSON file downloaded successfully!"
        );
        let saved = sink.file(JSON_FILE_NAME).unwrap();
        assert_eq!(saved.content, b"[\n  {\n    \"a\": 1\n  }\n]");
    }

    #[test]
    fn test_download_before_convert_is_silent() {
        let mut panel = SheetToJsonPanel::new(&ConverterConfig::default());
        let mut sink = MemorySink::new();
        assert!(panel.download_json(&mut sink).is_none());
        assert!(sink.files.is_empty());
    }

    #[test]
    fn test_engine_round_trip_of_flat_rows() {
        let engine = ConversionEngine::default();
        let rows = engine
            .json_text_to_rowset(r#"[{"id":1,"label":"x","ok":true},{"id":2,"label":"y","ok":false}]"#)
            .unwrap();
        let bytes = engine.rowset_to_spreadsheet_bytes(&rows).unwrap();
        assert_eq!(engine.spreadsheet_bytes_to_rowset(&bytes).unwrap(), rows);
    }
}
