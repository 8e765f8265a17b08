//! Table output for single records
//!
//! A record renders one field per row under a `FIELD`/`VALUE` header, using
//! the column names from its `Tabled` derive.

use tabled::{
    Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Placeholder for fields with no value
const EMPTY: &str = "-";

/// Render `record` as a rounded two-column table.
pub fn format_record<T: Tabled>(record: &T) -> String {
    let mut builder = Builder::default();
    builder.push_record(["FIELD".to_string(), "VALUE".to_string()]);

    for (header, value) in T::headers().into_iter().zip(record.fields()) {
        let value = if value.trim().is_empty() {
            EMPTY.to_string()
        } else {
            value.into_owned()
        };
        builder.push_record([header.into_owned(), value]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
