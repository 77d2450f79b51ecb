// Automatically generated by sheetgen from file awkward.csv on 2023-08-03T14:42:38+02:00.
// Conversions: silent. Do not edit by hand.

pub mod awkward {
    use sheetgen::chrono::NaiveDateTime;
    use std::collections::HashMap;
    use std::sync::LazyLock;
    use sheetgen::convert;

    #[derive(Debug, Clone, PartialEq, serde::Serialize)]
    #[allow(non_snake_case)]
    pub struct Awkward {
        /// Source column "Order ID" (integer).
        #[serde(rename = "Order ID")]
        pub OrderId: i64,
        /// Source column "Notes" (string).
        #[serde(rename = "Notes")]
        pub Notes: String,
        /// Source column "Flag" (boolean).
        #[serde(rename = "Flag")]
        pub Flag: bool,
        /// Source column "Self" (float).
        #[serde(rename = "Self")]
        pub ColumnSelf: f64,
        /// Source column "type" (string).
        #[serde(rename = "type")]
        pub Type: String,
        /// Source column "Type" (boolean).
        #[serde(rename = "Type")]
        pub Type2: bool,
        /// Source column "Say \"hi\"" (string).
        #[serde(rename = "Say \"hi\"")]
        pub SayHi: String,
        /// Source column "When" (datetime).
        #[serde(rename = "When")]
        pub When: NaiveDateTime,
    }

    /// Zero-based position of every source column, keyed by header text.
    pub static AWKWARD_COLUMNS: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
        HashMap::from([
            ("Order ID", 0),
            ("Notes", 1),
            ("Flag", 2),
            ("Self", 3),
            ("type", 4),
            ("Type", 5),
            ("Say \"hi\"", 6),
            ("When", 7),
        ])
    });

    impl Awkward {
        /// Builds a record from one row of raw cells in source column order.
        /// Missing trailing cells are read as empty text.
        pub fn from_row<S: AsRef<str>>(row: &[S]) -> Self {
            Self {
                OrderId: convert::to_int(convert::cell(row, 0)), // Order ID
                Notes: convert::cell(row, 1).to_string(), // Notes
                Flag: convert::to_bool(convert::cell(row, 2)), // Flag
                ColumnSelf: convert::to_float(convert::cell(row, 3)), // Self
                Type: convert::cell(row, 4).to_string(), // type
                Type2: convert::to_bool(convert::cell(row, 5)), // Type
                SayHi: convert::cell(row, 6).to_string(), // Say "hi"
                When: convert::to_datetime(convert::cell(row, 7)), // When
            }
        }
    }
}
