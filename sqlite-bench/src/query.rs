//! SQL text generation for the benchmark table.
//!
//! Literal values are sampled when the statement text is built, not when it is
//! executed: running one built INSERT many times inserts the same row every
//! time. Sampled values are interpolated as double-quoted literals without
//! escaping; they only ever come from the benchmark's own value pool.

use crate::values::ValuePool;

pub const DEFAULT_TABLE: &str = "test";

/// Builds statements for a table of `id INTEGER PRIMARY KEY` followed by
/// `columns` TEXT columns named `value_0 .. value_{columns-1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    table: String,
    columns: usize,
}

impl QueryBuilder {
    pub fn new(columns: usize) -> Self {
        Self::with_table(DEFAULT_TABLE, columns)
    }

    pub fn with_table(table: impl Into<String>, columns: usize) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn column_name(index: usize) -> String {
        format!("value_{index}")
    }

    /// `CREATE TABLE test (id INTEGER PRIMARY KEY, value_0 TEXT, ...)`
    pub fn create_table(&self) -> String {
        let mut query = format!("CREATE TABLE {} (id INTEGER PRIMARY KEY", self.table);
        for i in 0..self.columns {
            query.push_str(", ");
            query.push_str(&Self::column_name(i));
            query.push_str(" TEXT");
        }
        query.push(')');
        query
    }

    /// `INSERT INTO test VALUES (NULL, "<v>", ...)` with one sampled value per column.
    pub fn insert(&self, pool: &mut ValuePool) -> String {
        let mut query = format!("INSERT INTO {} VALUES (NULL", self.table);
        for _ in 0..self.columns {
            query.push_str(", \"");
            query.push_str(pool.sample());
            query.push('"');
        }
        query.push(')');
        query
    }

    /// `SELECT * FROM test WHERE value_0="<v>" AND ...` with one sampled
    /// equality predicate per column. Without columns there is no WHERE clause.
    pub fn select(&self, pool: &mut ValuePool) -> String {
        let mut query = format!("SELECT * FROM {}", self.table);
        for i in 0..self.columns {
            query.push_str(if i == 0 { " WHERE " } else { " AND " });
            query.push_str(&Self::column_name(i));
            query.push_str("=\"");
            query.push_str(pool.sample());
            query.push('"');
        }
        query
    }

    pub fn drop_table(&self) -> String {
        format!("DROP TABLE {}", self.table)
    }

    pub fn count_rows(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::QueryBuilder;
    use crate::values::ValuePool;

    #[test]
    fn create_table_two_columns() {
        assert_eq!(
            QueryBuilder::new(2).create_table(),
            "CREATE TABLE test (id INTEGER PRIMARY KEY, value_0 TEXT, value_1 TEXT)"
        );
    }

    #[test]
    fn create_table_has_one_text_column_per_value() {
        for columns in [0, 1, 5, 68] {
            let sql = QueryBuilder::new(columns).create_table();
            assert_eq!(sql.matches(" TEXT").count(), columns, "columns={columns}");
            assert_eq!(sql.matches("INTEGER PRIMARY KEY").count(), 1);
        }
    }

    #[test]
    fn create_table_without_value_columns() {
        assert_eq!(
            QueryBuilder::new(0).create_table(),
            "CREATE TABLE test (id INTEGER PRIMARY KEY)"
        );
    }

    #[test]
    fn insert_two_columns_single_value_pool() {
        let mut pool = ValuePool::new("val1");
        assert_eq!(
            QueryBuilder::new(2).insert(&mut pool),
            r#"INSERT INTO test VALUES (NULL, "val1", "val1")"#
        );
    }

    #[test]
    fn select_two_columns_single_value_pool() {
        let mut pool = ValuePool::new("val1");
        assert_eq!(
            QueryBuilder::new(2).select(&mut pool),
            r#"SELECT * FROM test WHERE value_0="val1" AND value_1="val1""#
        );
    }

    #[test]
    fn zero_columns_degrade_to_valid_sql() {
        let mut pool = ValuePool::new("val1");
        let builder = QueryBuilder::new(0);
        assert_eq!(builder.insert(&mut pool), "INSERT INTO test VALUES (NULL)");
        assert_eq!(builder.select(&mut pool), "SELECT * FROM test");
    }

    #[test]
    fn insert_only_uses_pool_values() {
        let mut pool = ValuePool::with_seed("val1", 3);
        pool.push("val2");
        pool.push("val3");

        let sql = QueryBuilder::new(68).insert(&mut pool);
        let literals: Vec<&str> = sql.split('"').skip(1).step_by(2).collect();
        assert_eq!(literals.len(), 68);
        assert!(literals.iter().all(|v| pool.contains(v)));
    }

    #[test]
    fn custom_table_name_is_used_everywhere() {
        let mut pool = ValuePool::new("v");
        let builder = QueryBuilder::with_table("bench", 1);
        assert!(builder.create_table().starts_with("CREATE TABLE bench "));
        assert!(builder.insert(&mut pool).starts_with("INSERT INTO bench "));
        assert!(builder.select(&mut pool).starts_with("SELECT * FROM bench "));
        assert_eq!(builder.drop_table(), "DROP TABLE bench");
        assert_eq!(builder.count_rows(), "SELECT COUNT(*) FROM bench");
    }
}
