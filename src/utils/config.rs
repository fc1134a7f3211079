//! Configuration and constants for the report pipeline.
//!
//! Everything here is fixed for the lifetime of the process. The two
//! categories, the positional column contract and the distance threshold
//! are part of the input contract, not user settings.

/// Current structured report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Sheet that holds the source records
pub const SOURCE_SHEET_NAME: &str = "Clock Detail Report";

// Positional input contract (0-based column indices)
pub const TIME_COLUMN_INDEX: usize = 4;
pub const DISTANCE_COLUMN_INDEX: usize = 5;
pub const CATEGORY_COLUMN_INDEX: usize = 8;
pub const MIN_COLUMN_COUNT: usize = 9;

// Hierarchy columns, resolved by name after header normalization
pub const COMPANY_COLUMN: &str = "Company";
pub const NAME_COLUMN: &str = "Name";
pub const ACCOUNT_COLUMN: &str = "Account";
pub const UNIT_ID_COLUMN: &str = "DU ID";
pub const HIERARCHY_COLUMNS: [&str; 4] = [COMPANY_COLUMN, NAME_COLUMN, ACCOUNT_COLUMN, UNIT_ID_COLUMN];

/// ECNB keeps only rows at or below this distance
pub const ECNB_MAX_DISTANCE: f64 = 500.0;

/// Display format for the earliest clock time
pub const TIME_DISPLAY_FORMAT: &str = "%H:%M:%S";

/// Shown when no record in a group carries a parseable time
pub const UNAVAILABLE_TIME: &str = "-";

/// Summary labels
pub const SUMMARY_COUNT_HEADER: &str = "Count of Name";
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

// Accepted textual timestamp layouts, tried in order
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d-%b-%Y %H:%M:%S",
];
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
pub const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

// Output layout
pub const PIVOT_HEADER_ROW: u32 = 2;
pub const SUMMARY_COMPANY_COL: u16 = 6;
pub const SUMMARY_COUNT_COL: u16 = 7;
pub const PIVOT_COLUMN_WIDTHS: [f64; 5] = [40.0, 30.0, 20.0, 25.0, 15.0];
pub const SUMMARY_COMPANY_WIDTH: f64 = 40.0;
pub const SUMMARY_COUNT_WIDTH: f64 = 15.0;
pub const HEADER_FILL: u32 = 0xD9E1F2;
pub const DUPLICATE_FILL: u32 = 0xFFC000;
pub const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Default name of the processed workbook
pub const DEFAULT_OUTPUT_FILE: &str = "Processed_ClockReport.xlsx";
