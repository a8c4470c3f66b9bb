//! Table schemas, column definitions and the lookup interface records validate against.

mod column;
mod provider;
mod schema_file;
mod table_schema;
pub(crate) mod validation;

pub use column::Column;
pub use provider::ColumnSchema;
pub use schema_file::{SchemaFile, TableDefinition, SCHEMA_VERSION};
pub use table_schema::TableSchema;
