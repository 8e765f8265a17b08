//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting (default)
    #[default]
    Pretty,
    /// Table format - one row per resource
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Whether output is meant for a person at a terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self, OutputFormat::Pretty)
    }
}
