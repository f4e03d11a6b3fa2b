use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::{debug, error, warn};

use crate::error::StorageError;
use crate::record::PurchaseRecord;

pub const PURCHASES_TABLE: &str = "anime_purchases";

/// Column types understood by the schema renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
    Real,
}

impl DataType {
    fn sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    NotNull,
}

impl ColumnConstraint {
    fn sql(self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::AutoIncrement => "AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn sql(&self) -> String {
        let mut parts = vec![self.name.clone(), self.data_type.sql().to_string()];
        parts.extend(self.constraints.iter().map(|c| c.sql().to_string()));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Idempotent DDL for this table
    pub fn create_if_not_exists_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }
}

/// The one table this application stores purchases in.
pub fn anime_purchases_table() -> TableDefinition {
    TableDefinition::new(PURCHASES_TABLE)
        .add_column(
            ColumnDefinition::new("id", DataType::Integer)
                .with_constraint(ColumnConstraint::PrimaryKey)
                .with_constraint(ColumnConstraint::AutoIncrement),
        )
        .add_column(
            ColumnDefinition::new("title", DataType::Text)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .add_column(ColumnDefinition::new("quantity", DataType::Integer))
        .add_column(ColumnDefinition::new("price", DataType::Real))
}

/// SQLite store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl SqliteConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

/// Storage operations the controller relies on.
///
/// `update` and `delete` report affected rows; an unknown id yields `Ok(0)`.
pub trait PurchaseRepository {
    fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Insert a row and return its assigned id
    fn insert(&self, title: &str, quantity: i32, price: f64) -> Result<i64, StorageError>;

    fn update(&self, id: i64, title: &str, quantity: i32, price: f64)
        -> Result<usize, StorageError>;

    fn delete(&self, id: i64) -> Result<usize, StorageError>;

    /// Every row, in whatever order SQLite returns them
    fn list_all(&self) -> Result<Vec<PurchaseRecord>, StorageError>;
}

/// File-backed purchase store.
///
/// Holds no open handle: each operation opens a connection and drops it
/// before returning, on success and error alike.
#[derive(Debug, Clone)]
pub struct PurchaseStore {
    config: SqliteConfig,
}

impl PurchaseStore {
    pub fn new(config: SqliteConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.db_path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        debug!("opening sqlite connection at {}", self.path().display());
        Connection::open(self.path()).map_err(|e| {
            warn!("failed to open {}: {}", self.path().display(), e);
            StorageError::Connection(e)
        })
    }
}

fn statement_error(e: rusqlite::Error) -> StorageError {
    warn!("statement failed: {}", e);
    StorageError::Statement(e)
}

impl PurchaseRepository for PurchaseStore {
    fn ensure_schema(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        let sql = anime_purchases_table().create_if_not_exists_sql();
        debug!("{}", sql);
        conn.execute_batch(&sql).map_err(|e| {
            error!("failed to create table {}: {}", PURCHASES_TABLE, e);
            StorageError::Statement(e)
        })
    }

    fn insert(&self, title: &str, quantity: i32, price: f64) -> Result<i64, StorageError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO anime_purchases (title, quantity, price) VALUES (?1, ?2, ?3)",
            params![title, quantity, price],
        )
        .map_err(statement_error)?;
        let id = conn.last_insert_rowid();
        debug!("inserted purchase {} ({})", id, title);
        Ok(id)
    }

    fn update(
        &self,
        id: i64,
        title: &str,
        quantity: i32,
        price: f64,
    ) -> Result<usize, StorageError> {
        let conn = self.connect()?;
        let affected = conn
            .execute(
                "UPDATE anime_purchases SET title = ?1, quantity = ?2, price = ?3 WHERE id = ?4",
                params![title, quantity, price, id],
            )
            .map_err(statement_error)?;
        debug!("updated purchase {}: {} row(s)", id, affected);
        Ok(affected)
    }

    fn delete(&self, id: i64) -> Result<usize, StorageError> {
        let conn = self.connect()?;
        let affected = conn
            .execute("DELETE FROM anime_purchases WHERE id = ?1", [id])
            .map_err(statement_error)?;
        debug!("deleted purchase {}: {} row(s)", id, affected);
        Ok(affected)
    }

    fn list_all(&self) -> Result<Vec<PurchaseRecord>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT id, title, quantity, price FROM anime_purchases")
            .map_err(statement_error)?;
        let rows = stmt
            .query_map([], |row| {
                // NULL quantity/price read back as zero.
                let quantity: Option<i32> = row.get(2)?;
                let price: Option<f64> = row.get(3)?;
                Ok(PurchaseRecord::loaded(
                    row.get(0)?,
                    row.get::<_, String>(1)?,
                    quantity.unwrap_or(0),
                    price.unwrap_or(0.0),
                ))
            })
            .map_err(statement_error)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(statement_error)?);
        }
        debug!("loaded {} purchase(s)", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchases_table_ddl() {
        assert_eq!(
            anime_purchases_table().create_if_not_exists_sql(),
            "CREATE TABLE IF NOT EXISTS anime_purchases (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             title TEXT NOT NULL, quantity INTEGER, price REAL)"
        );
    }

    #[test]
    fn test_column_without_constraints() {
        let column = ColumnDefinition::new("price", DataType::Real);
        assert_eq!(column.sql(), "price REAL");
    }
}
