//! SQL for the login table
//!
//! Statements are generated from [`MaskedRecord::COLUMNS`] so the insert order
//! always matches [`MaskedRecord::values`].

use crate::config::schema::is_valid_identifier;
use crate::domain::{MaskedRecord, MaskloadError, Result};

/// Validated, quoted table reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTable {
    name: String,
    quoted: String,
}

impl LoginTable {
    /// Validate `name` and build its quoted form
    ///
    /// Accepts `table` or `schema.table`.
    ///
    /// # Errors
    ///
    /// Returns [`MaskloadError::Validation`] if `name` is not a plain SQL identifier.
    pub fn new(name: &str) -> Result<Self> {
        if !is_valid_identifier(name) {
            return Err(MaskloadError::Validation(format!(
                "'{name}' is not a valid table name"
            )));
        }

        let quoted = name
            .split('.')
            .map(|part| format!("\"{part}\""))
            .collect::<Vec<_>>()
            .join(".");

        Ok(Self {
            name: name.to_string(),
            quoted,
        })
    }

    /// Name as configured
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `CREATE TABLE IF NOT EXISTS` for the fixed column set
    pub fn create_sql(&self) -> String {
        let columns = MaskedRecord::COLUMNS
            .iter()
            .map(|column| format!("    {column} TEXT"))
            .collect::<Vec<_>>()
            .join(",\n");

        format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n)", self.quoted, columns)
    }

    /// Parameterized single-row insert, columns in output order
    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=MaskedRecord::COLUMNS.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quoted,
            MaskedRecord::COLUMNS.join(", "),
            placeholders
        )
    }

    /// Zero-row query used when table creation is disabled
    pub fn existence_check_sql(&self) -> String {
        format!("SELECT 1 FROM {} LIMIT 0", self.quoted)
    }
}
