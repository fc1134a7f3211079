use crate::output::LayoutConfig;
use crate::utils::config::DEFAULT_OUTPUT_FILE;
use std::path::PathBuf;

/// Arguments for the process command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ProcessArgs {
    /// Clock Detail Report workbook to read
    pub input: PathBuf,

    /// Processed workbook to write
    pub output: PathBuf,

    /// Optional JSON dump of the structured report
    pub json_output: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Pivot sheet layout
    pub layout: LayoutConfig,
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            json_output: None,
            print_summary: false,
            layout: LayoutConfig::default(),
        }
    }
}
