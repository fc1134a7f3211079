use clock_report::aggregator::{filter_category, Category, CategoryConfig, Threshold};
use clock_report::parser::{resolve_schema, Cell, Row, SourceWorkbook, Table};
use clock_report::pivot::StyleTag;
use clock_report::report::{build_category_reports, build_report};
use clock_report::utils::error::{ReportError, SchemaError};
use pretty_assertions::assert_eq;

const HEADERS: [&str; 9] = [
    "Company", "Name", "Account", "DU ID", "Clock In", "Distance", "Site", "Shift", "Category",
];

fn headers() -> Vec<String> {
    HEADERS.iter().map(|h| h.to_string()).collect()
}

fn record(
    company: &str,
    name: &str,
    account: &str,
    unit: &str,
    time: &str,
    distance: Cell,
    category: &str,
) -> Row {
    vec![
        Cell::from(company),
        Cell::from(name),
        Cell::from(account),
        Cell::from(unit),
        Cell::from(time),
        distance,
        Cell::from("North"),
        Cell::from("Day"),
        Cell::from(category),
    ]
}

fn source(rows: Vec<Row>) -> SourceWorkbook {
    SourceWorkbook::new(vec![Table::new("Clock Detail Report", headers(), rows)])
}

fn acme_rows() -> Vec<Row> {
    vec![
        record("Acme", "Jo", "A1", "D1", "2024-01-01 09:15:00", Cell::Number(300.0), "ECNB-East"),
        record("Acme", "Jo", "A1", "D1", "2024-01-01 08:00:00", Cell::Number(300.0), "ECNB-East"),
        record("Acme", "Ren", "A2", "D2", "2024-01-01 10:00:00", Cell::Number(600.0), "ECNB-East"),
    ]
}

#[test]
fn test_ecnb_scenario() {
    let rows = acme_rows();
    let report = build_report(&source(rows.clone())).unwrap();
    let ecnb = report.category("ECNB").unwrap();

    assert_eq!(ecnb.data.rows, rows[..2].to_vec());
    assert_eq!(ecnb.data.name, "Data ECNB");

    assert_eq!(ecnb.pivot.len(), 1);
    assert_eq!(ecnb.pivot[0].values(), vec!["Acme", "Jo", "A1", "D1", "08:00:00"]);
    assert!(ecnb.pivot[0].cells[0].has_tag(StyleTag::Bold));
    assert!(!ecnb.pivot[0].group_start);

    assert_eq!(ecnb.summary.rows.len(), 1);
    assert_eq!(ecnb.summary.rows[0].company, "Acme");
    assert_eq!(ecnb.summary.rows[0].distinct_names, 1);
    assert_eq!(ecnb.summary.grand_total, 1);

    let ecmw = report.category("ECMW").unwrap();
    assert!(ecmw.data.rows.is_empty());
    assert!(ecmw.pivot.is_empty());
    assert!(ecmw.summary.is_empty());
    assert_eq!(ecmw.summary.grand_total, 0);
}

#[test]
fn test_report_metadata() {
    let report = build_report(&source(acme_rows())).unwrap();

    assert_eq!(report.source_sheet, "Clock Detail Report");
    assert_eq!(report.time_column, "Clock In");
    let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["ECNB", "ECMW"]);
    assert_eq!(
        report.categories[0].pivot_columns,
        vec!["Company", "Name", "Account", "DU ID", "Clock In"]
    );
}

#[test]
fn test_ecmw_has_no_distance_constraint() {
    let rows = vec![
        record("Bolt", "Kim", "B1", "U1", "2024-01-01 07:00:00", Cell::Number(900.0), "ecmw"),
        record("Bolt", "Lee", "B2", "U2", "2024-01-01 07:30:00", Cell::from("n/a"), "West ECMW"),
        record("Bolt", "Max", "B3", "U3", "2024-01-01 07:45:00", Cell::Empty, "ECMW"),
        record("Bolt", "Ola", "B4", "U4", "2024-01-01 07:50:00", Cell::Number(10.0), "ECNB"),
    ];

    let report = build_report(&source(rows.clone())).unwrap();
    let ecmw = report.category("ECMW").unwrap();

    assert_eq!(ecmw.data.rows, rows[..3].to_vec());
    assert_eq!(ecmw.summary.rows[0].distinct_names, 3);
    assert_eq!(ecmw.warnings.unparseable_distance, 0);
}

#[test]
fn test_ecnb_counts_unparseable_distance() {
    let rows = vec![
        record("Bolt", "Kim", "B1", "U1", "2024-01-01 07:00:00", Cell::from("500"), "ECNB"),
        record("Bolt", "Lee", "B2", "U2", "2024-01-01 07:30:00", Cell::from("far"), "ECNB"),
        record("Bolt", "Max", "B3", "U3", "2024-01-01 07:45:00", Cell::Number(500.5), "ECNB"),
    ];

    let report = build_report(&source(rows.clone())).unwrap();
    let ecnb = report.category("ECNB").unwrap();

    assert_eq!(ecnb.data.rows, vec![rows[0].clone()]);
    assert_eq!(ecnb.warnings.unparseable_distance, 1);
}

#[test]
fn test_unparseable_times_show_placeholder() {
    let rows = vec![
        record("Acme", "Jo", "A1", "D1", "late", Cell::Number(1.0), "ECMW"),
        record("Acme", "Jo", "A1", "D1", "", Cell::Number(1.0), "ECMW"),
    ];

    let report = build_report(&source(rows)).unwrap();
    let ecmw = report.category("ECMW").unwrap();

    assert_eq!(ecmw.pivot.len(), 1);
    assert_eq!(ecmw.pivot[0].values()[4], "-");
    assert_eq!(ecmw.warnings.unparseable_time, 2);
}

#[test]
fn test_masking_and_boundary_tags() {
    let rows = vec![
        record("X", "Y", "A2", "U2", "2024-01-01 09:00:00", Cell::Number(1.0), "ECMW"),
        record("X", "Y", "A1", "U1", "2024-01-01 08:00:00", Cell::Number(1.0), "ECMW"),
        record("Z", "Y", "A1", "U1", "2024-01-01 08:30:00", Cell::Number(1.0), "ECMW"),
    ];

    let report = build_report(&source(rows)).unwrap();
    let pivot = &report.category("ECMW").unwrap().pivot;

    assert_eq!(pivot[0].values(), vec!["X", "Y", "A1", "U1", "08:00:00"]);
    assert_eq!(pivot[1].values(), vec!["", "", "A2", "U2", "09:00:00"]);
    assert_eq!(pivot[2].values(), vec!["Z", "Y", "A1", "U1", "08:30:00"]);

    assert!(!pivot[1].group_start);
    assert!(pivot[2].group_start);
    assert!(pivot[2].cells.iter().all(|c| c.has_tag(StyleTag::SubconBoundary)));

    // U1 occurs under two companies
    assert!(pivot[0].duplicate_leaf);
    assert!(!pivot[1].duplicate_leaf);
    assert!(pivot[2].cells[3].has_tag(StyleTag::DuplicateHighlight));
}

#[test]
fn test_header_whitespace_is_trimmed() {
    let mut labels = headers();
    labels[0] = "  Company ".to_string();
    labels[4] = " Clock In ".to_string();
    let table = Table::new("Clock Detail Report", labels, acme_rows());

    let report = build_report(&SourceWorkbook::new(vec![table])).unwrap();

    assert_eq!(report.time_column, "Clock In");
    assert_eq!(report.category("ECNB").unwrap().data.headers[0], "Company");
}

#[test]
fn test_missing_sheet() {
    let workbook = SourceWorkbook::new(vec![Table::new("Sheet1", headers(), acme_rows())]);

    match build_report(&workbook) {
        Err(ReportError::Schema(err)) => {
            assert_eq!(err, SchemaError::MissingSheet("Clock Detail Report".to_string()))
        }
        other => panic!("expected missing sheet, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_too_few_columns() {
    let labels: Vec<String> = headers().into_iter().take(8).collect();
    let workbook = SourceWorkbook::new(vec![Table::new("Clock Detail Report", labels, vec![])]);

    match build_report(&workbook) {
        Err(ReportError::Schema(err)) => {
            assert_eq!(err, SchemaError::TooFewColumns { found: 8, required: 9 })
        }
        other => panic!("expected too few columns, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_missing_columns_are_all_named() {
    let mut labels = headers();
    labels[1] = "Employee".to_string();
    labels[3] = "Unit".to_string();
    let workbook = SourceWorkbook::new(vec![Table::new("Clock Detail Report", labels, acme_rows())]);

    let err = build_report(&workbook).unwrap_err();

    assert!(err.is_schema());
    assert_eq!(err.to_string(), "Missing columns: Name, DU ID");
}

#[test]
fn test_filter_is_case_insensitive_substring() {
    let table = Table::new(
        "Clock Detail Report",
        headers(),
        vec![
            record("A", "B", "C", "D", "", Cell::Number(1.0), "zone-ecnb-2"),
            record("A", "B", "C", "D", "", Cell::Number(1.0), "ECN"),
        ],
    );
    let schema = resolve_schema(&table).unwrap();

    let outcome = filter_category(&table, &schema, &Category::Ecnb.config());

    assert_eq!(outcome.rows.len(), 1);
}

#[test]
fn test_custom_category_configs() {
    let table = Table::new("Clock Detail Report", headers(), acme_rows());
    let configs = vec![CategoryConfig::new("East").with_distance_constraint(Threshold::at_most(400.0))];

    let reports = build_category_reports(&table, &configs).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].category, "East");
    assert_eq!(reports[0].data.rows.len(), 2);
    assert_eq!(reports[0].data_sheet_name(), "Data East");
}

#[test]
fn test_empty_hierarchy_cell_stays_in_data_but_not_pivot() {
    let rows = vec![
        record("Acme", "Jo", "", "D1", "2024-01-01 08:00:00", Cell::Number(1.0), "ECMW"),
        record("Acme", "Ren", "A2", "D2", "2024-01-01 09:00:00", Cell::Number(1.0), "ECMW"),
    ];

    let report = build_report(&source(rows.clone())).unwrap();
    let ecmw = report.category("ECMW").unwrap();

    assert_eq!(ecmw.data.rows, rows);
    assert_eq!(ecmw.pivot.len(), 1);
    assert_eq!(ecmw.pivot[0].values(), vec!["Acme", "Ren", "A2", "D2", "09:00:00"]);
    assert_eq!(ecmw.warnings.incomplete_hierarchy, 1);
    // the summary still sees both names
    assert_eq!(ecmw.summary.rows[0].distinct_names, 2);
}

#[test]
fn test_whitespace_name_agrees_between_pivot_and_summary() {
    let rows = vec![record("Acme", "  ", "A1", "D1", "2024-01-01 08:00:00", Cell::Number(1.0), "ECMW")];

    let report = build_report(&source(rows)).unwrap();
    let ecmw = report.category("ECMW").unwrap();

    assert_eq!(ecmw.pivot[0].values()[1], "  ");
    assert_eq!(ecmw.summary.rows[0].company, "Acme");
    assert_eq!(ecmw.summary.rows[0].distinct_names, 1);
    assert_eq!(ecmw.summary.grand_total, 1);
}
