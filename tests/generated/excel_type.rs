// Automatically generated by sheetgen from file excel_test.xlsx on 2023-08-03T14:42:38+02:00.
// Conversions: tracing. Do not edit by hand.

pub mod records {
    use sheetgen::chrono::NaiveDateTime;
    use std::collections::HashMap;
    use std::sync::LazyLock;
    use sheetgen::convert;

    #[derive(Debug, Clone, PartialEq)]
    #[allow(non_snake_case)]
    pub struct ExcelType {
        /// Source column "Integer Value" (integer).
        pub IntegerValue: i64,
        /// Source column "Date Value" (datetime).
        pub DateValue: NaiveDateTime,
        /// Source column "Float Value" (float).
        pub FloatValue: f64,
        /// Source column "Text" (string).
        pub Text: String,
    }

    /// Zero-based position of every source column, keyed by header text.
    pub static EXCEL_TYPE_COLUMNS: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
        HashMap::from([
            ("Integer Value", 0),
            ("Date Value", 1),
            ("Float Value", 2),
            ("Text", 3),
        ])
    });

    impl ExcelType {
        /// Builds a record from one row of raw cells in source column order.
        /// Missing trailing cells are read as empty text.
        pub fn from_row<S: AsRef<str>>(row: &[S]) -> Self {
            Self {
                IntegerValue: convert::trace_to_int(convert::cell(row, 0), "Integer Value"), // Integer Value
                DateValue: convert::trace_to_datetime(convert::cell(row, 1), "Date Value"), // Date Value
                FloatValue: convert::trace_to_float(convert::cell(row, 2), "Float Value"), // Float Value
                Text: convert::cell(row, 3).to_string(), // Text
            }
        }
    }
}
