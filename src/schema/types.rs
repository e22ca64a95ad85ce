//! Schema type definitions
//!
//! A schema declares tables and, per table, the indexes that can be queried.
//! Record bodies are not validated against it; only index fields are typed.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{DbError, DbResult};
use crate::index::IndexKey;

/// Name of the primary index every table must declare
pub const ID_INDEX: &str = "id";

/// Indexable field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
        }
    }
}

/// One field of an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexField {
    /// Record field the value is read from
    pub name: String,
    /// Declared value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl IndexField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int)
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Bool)
    }
}

/// Index declaration
///
/// The lookup key of an index is the concatenated encoding of its field
/// values, in declaration order. Entries of a non-unique index additionally
/// end with the encoded primary id, so duplicates stay distinct and are
/// ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSchema {
    /// Index name, unique within its table
    pub name: String,
    /// Indexed fields, in key order
    pub fields: Vec<IndexField>,
    /// Whether at most one record may hold a given value
    #[serde(default)]
    pub unique: bool,
    /// Whether records lacking an indexed field are left out of the index
    #[serde(default)]
    pub allow_missing: bool,
}

impl IndexSchema {
    /// Create a non-unique index
    pub fn new(name: impl Into<String>, fields: Vec<IndexField>) -> Self {
        Self {
            name: name.into(),
            fields,
            unique: false,
            allow_missing: false,
        }
    }

    /// Create a unique index
    pub fn unique(name: impl Into<String>, fields: Vec<IndexField>) -> Self {
        Self {
            unique: true,
            ..Self::new(name, fields)
        }
    }

    /// Leave records lacking an indexed field out of this index
    pub fn allow_missing(mut self) -> Self {
        self.allow_missing = true;
        self
    }

    /// Encode a (possibly partial) tuple of index values into a lookup prefix.
    ///
    /// Values bind to the leading fields in order. An empty tuple encodes to
    /// the empty prefix, which covers the whole index.
    pub fn encode_values(&self, values: &[IndexKey]) -> DbResult<Vec<u8>> {
        if values.len() > self.fields.len() {
            return Err(DbError::encoding(
                &self.name,
                format!(
                    "expected at most {} values, got {}",
                    self.fields.len(),
                    values.len()
                ),
            ));
        }

        let mut out = Vec::new();
        for (field, value) in self.fields.iter().zip(values) {
            if value.field_type() != field.field_type {
                return Err(DbError::encoding(
                    &self.name,
                    format!(
                        "field '{}' expects {}, got {}",
                        field.name,
                        field.field_type.type_name(),
                        value.field_type().type_name()
                    ),
                ));
            }
            value.encode_into(&self.name, &mut out)?;
        }
        Ok(out)
    }

    /// Compute the key under which `record` is stored in this index.
    ///
    /// `primary` is appended for non-unique indexes. Returns `None` when the
    /// record lacks an indexed field and the index allows missing fields.
    pub fn record_key(&self, record: &Value, primary: Option<&[u8]>) -> DbResult<Option<Vec<u8>>> {
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let raw = match record.get(&field.name) {
                Some(v) if !v.is_null() => v,
                _ if self.allow_missing => return Ok(None),
                _ => {
                    return Err(DbError::MissingIndexField {
                        index: self.name.clone(),
                        field: field.name.clone(),
                    })
                }
            };
            let value = IndexKey::from_json(raw).ok_or_else(|| {
                DbError::encoding(
                    &self.name,
                    format!("field '{}' holds a non-indexable value", field.name),
                )
            })?;
            values.push(value);
        }

        let mut key = self.encode_values(&values)?;
        if !self.unique {
            if let Some(primary) = primary {
                key.extend_from_slice(primary);
            }
        }
        Ok(Some(key))
    }
}

/// Table declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Indexes by name
    pub indexes: BTreeMap<String, IndexSchema>,
}

impl TableSchema {
    /// Create a table with no indexes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indexes: BTreeMap::new(),
        }
    }

    /// Add an index declaration
    pub fn with_index(mut self, index: IndexSchema) -> Self {
        self.indexes.insert(index.name.clone(), index);
        self
    }

    /// Look up an index by name
    pub fn index(&self, name: &str) -> DbResult<&IndexSchema> {
        self.indexes.get(name).ok_or_else(|| DbError::UnknownIndex {
            table: self.name.clone(),
            index: name.to_string(),
        })
    }

    /// The primary index
    pub fn id_index(&self) -> DbResult<&IndexSchema> {
        self.index(ID_INDEX)
    }

    fn validate(&self) -> DbResult<()> {
        let id = self.indexes.get(ID_INDEX).ok_or_else(|| {
            DbError::InvalidSchema(format!("table '{}' has no '{}' index", self.name, ID_INDEX))
        })?;
        if !id.unique || id.allow_missing || id.fields.len() != 1 {
            return Err(DbError::InvalidSchema(format!(
                "'{}' index of table '{}' must be unique over a single required field",
                ID_INDEX, self.name
            )));
        }

        for (name, index) in &self.indexes {
            if name != &index.name {
                return Err(DbError::InvalidSchema(format!(
                    "index '{}' of table '{}' is registered as '{}'",
                    index.name, self.name, name
                )));
            }
            if index.fields.is_empty() {
                return Err(DbError::InvalidSchema(format!(
                    "index '{}' of table '{}' has no fields",
                    name, self.name
                )));
            }
            let mut seen = HashSet::new();
            for field in &index.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(DbError::InvalidSchema(format!(
                        "index '{}' of table '{}' repeats field '{}'",
                        name, self.name, field.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Database schema: all tables by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbSchema {
    /// Tables by name
    pub tables: BTreeMap<String, TableSchema>,
}

impl DbSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table declaration
    pub fn with_table(mut self, table: TableSchema) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// Parse a schema from JSON
    pub fn from_json(json: &str) -> DbResult<Self> {
        let schema: DbSchema =
            serde_json::from_str(json).map_err(|e| DbError::InvalidSchema(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> DbResult<&TableSchema> {
        self.tables
            .get(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))
    }

    /// Check the shape of every table and index declaration
    pub fn validate(&self) -> DbResult<()> {
        if self.tables.is_empty() {
            return Err(DbError::InvalidSchema("schema declares no tables".into()));
        }
        for (name, table) in &self.tables {
            if name != &table.name {
                return Err(DbError::InvalidSchema(format!(
                    "table '{}' is registered as '{}'",
                    table.name, name
                )));
            }
            table.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> TableSchema {
        TableSchema::new("people")
            .with_index(IndexSchema::unique(ID_INDEX, vec![IndexField::string("id")]))
            .with_index(IndexSchema::new(
                "name_age",
                vec![IndexField::string("name"), IndexField::int("age")],
            ))
            .with_index(IndexSchema::new("active", vec![IndexField::bool("active")]).allow_missing())
    }

    #[test]
    fn test_encode_partial_tuple() {
        let table = people();
        let index = table.index("name_age").unwrap();

        let full = index
            .encode_values(&[IndexKey::from("bob"), IndexKey::from(30i64)])
            .unwrap();
        let partial = index.encode_values(&[IndexKey::from("bob")]).unwrap();

        assert!(full.starts_with(&partial));
        assert!(index.encode_values(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_encode_too_many_values() {
        let table = people();
        let index = table.id_index().unwrap();
        let err = index
            .encode_values(&[IndexKey::from("a"), IndexKey::from("b")])
            .unwrap_err();
        assert!(matches!(err, DbError::Encoding { .. }));
    }

    #[test]
    fn test_encode_type_mismatch() {
        let table = people();
        let index = table.index("name_age").unwrap();
        let err = index
            .encode_values(&[IndexKey::from("bob"), IndexKey::from("thirty")])
            .unwrap_err();
        assert_eq!(err.code(), "MEMDB_ENCODING");
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_record_key_appends_primary_for_non_unique() {
        let table = people();
        let index = table.index("name_age").unwrap();
        let record = json!({"id": "1", "name": "bob", "age": 30});

        let key = index.record_key(&record, Some(&b"1\0"[..])).unwrap().unwrap();
        assert!(key.ends_with(b"1\0"));

        let id_key = table.id_index().unwrap().record_key(&record, Some(&b"zz"[..])).unwrap().unwrap();
        assert_eq!(id_key, b"1\0".to_vec());
    }

    #[test]
    fn test_record_key_missing_field() {
        let table = people();
        let record = json!({"id": "1", "name": "bob"});

        let err = table
            .index("name_age")
            .unwrap()
            .record_key(&record, None)
            .unwrap_err();
        assert!(matches!(err, DbError::MissingIndexField { .. }));

        let skipped = table.index("active").unwrap().record_key(&record, None).unwrap();
        assert!(skipped.is_none());
    }

    #[test]
    fn test_unknown_table_and_index() {
        let schema = DbSchema::new().with_table(people());
        assert!(matches!(schema.table("nope"), Err(DbError::UnknownTable(_))));
        assert!(matches!(
            schema.table("people").unwrap().index("nope"),
            Err(DbError::UnknownIndex { .. })
        ));
    }

    #[test]
    fn test_validate_requires_id_index() {
        let schema = DbSchema::new().with_table(
            TableSchema::new("t").with_index(IndexSchema::new("foo", vec![IndexField::string("foo")])),
        );
        assert!(matches!(schema.validate(), Err(DbError::InvalidSchema(_))));

        let schema = DbSchema::new().with_table(
            TableSchema::new("t").with_index(IndexSchema::new(ID_INDEX, vec![IndexField::string("id")])),
        );
        assert!(matches!(schema.validate(), Err(DbError::InvalidSchema(_))));
    }

    #[test]
    fn test_validate_rejects_empty_and_repeated_fields() {
        let base = people();
        let schema = DbSchema::new().with_table(base.clone().with_index(IndexSchema::new("none", vec![])));
        assert!(schema.validate().is_err());

        let schema = DbSchema::new().with_table(base.with_index(IndexSchema::new(
            "twice",
            vec![IndexField::string("a"), IndexField::int("a")],
        )));
        assert!(schema.validate().is_err());

        assert!(DbSchema::new().with_table(people()).validate().is_ok());
    }

    #[test]
    fn test_schema_from_json() {
        let schema = DbSchema::from_json(
            r#"{
                "tables": {
                    "main": {
                        "name": "main",
                        "indexes": {
                            "id": {"name": "id", "fields": [{"name": "id", "type": "string"}], "unique": true},
                            "foo": {"name": "foo", "fields": [{"name": "foo", "type": "string"}]}
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let foo = schema.table("main").unwrap().index("foo").unwrap();
        assert!(!foo.unique);
        assert!(!foo.allow_missing);
        assert_eq!(foo.fields[0].field_type, FieldType::String);
    }

    #[test]
    fn test_schema_from_invalid_json() {
        assert!(matches!(
            DbSchema::from_json("{not json"),
            Err(DbError::InvalidSchema(_))
        ));
    }
}
