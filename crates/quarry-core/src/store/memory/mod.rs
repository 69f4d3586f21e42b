pub(crate) mod eval;

use crate::{
    schema::{EntityTypeDescriptor, FieldKind},
    store::{
        NativeOutcome, StoreConnection, StoreError,
        criteria::{NativeProjection, NativeQuery},
        record::{NativeRow, NativeRows},
    },
    value::Value,
};
use std::collections::BTreeMap;

///
/// MemoryStore
///
/// Complete in-memory reference backend for the store seam. Its
/// metamodel indexes types by *qualified* name only, so logical-name
/// lookups miss the primary path and exercise the resolver fallback,
/// exactly like a store with a stricter naming convention.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    unit: String,
    closed: bool,
    tables: BTreeMap<String, Table>,
}

#[derive(Debug)]
struct Table {
    descriptor: EntityTypeDescriptor,
    rows: BTreeMap<Value, NativeRow>,
    next_key: u64,
}

impl Table {
    fn new(descriptor: EntityTypeDescriptor) -> Self {
        Self {
            descriptor,
            rows: BTreeMap::new(),
            next_key: 1,
        }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            closed: false,
            tables: BTreeMap::new(),
        }
    }

    /// Define one entity type ahead of opening a session, the way a
    /// relational store carries its schema before connections arrive.
    pub fn define_entity(&mut self, descriptor: EntityTypeDescriptor) -> Result<(), StoreError> {
        self.ensure_open()?;

        let qualified = descriptor.qualified_name().to_string();
        if self.tables.contains_key(&qualified) {
            return Err(StoreError::DuplicateEntityType { name: qualified });
        }

        self.tables.insert(qualified, Table::new(descriptor));
        Ok(())
    }

    const fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::ConnectionClosed);
        }
        Ok(())
    }

    fn table(&self, qualified_name: &str) -> Result<&Table, StoreError> {
        self.tables
            .get(qualified_name)
            .ok_or_else(|| StoreError::UnknownEntityType {
                name: qualified_name.to_string(),
            })
    }

    fn table_mut(&mut self, qualified_name: &str) -> Result<&mut Table, StoreError> {
        self.tables
            .get_mut(qualified_name)
            .ok_or_else(|| StoreError::UnknownEntityType {
                name: qualified_name.to_string(),
            })
    }

    fn table_by_logical(&self, logical_name: &str) -> Result<&Table, StoreError> {
        self.tables
            .values()
            .find(|table| table.descriptor.logical_name() == logical_name)
            .ok_or_else(|| StoreError::UnknownEntityType {
                name: logical_name.to_string(),
            })
    }

    // Every stored field must be declared, with a matching kind.
    // Stored nulls are legal for any declared field.
    fn validate_row(descriptor: &EntityTypeDescriptor, row: &NativeRow) -> Result<(), StoreError> {
        for (field, value) in row.iter() {
            let Some(kind) = descriptor.field(field) else {
                return Err(StoreError::UnknownField {
                    entity: descriptor.logical_name().to_string(),
                    field: field.clone(),
                });
            };

            if !value.is_null() && !kind.matches_value(value) {
                return Err(StoreError::FieldKindMismatch {
                    entity: descriptor.logical_name().to_string(),
                    field: field.clone(),
                    expected: kind,
                    found: value.kind(),
                });
            }
        }

        Ok(())
    }

    fn row_key(descriptor: &EntityTypeDescriptor, row: &NativeRow) -> Option<Value> {
        row.get(descriptor.id_field())
            .filter(|value| !value.is_null())
            .cloned()
    }

    // Minimal native grammar: `[select [alias]] from <Entity> [alias]`.
    fn parse_raw(text: &str) -> Result<&str, String> {
        let mut tokens = text.split_whitespace().peekable();

        if tokens
            .peek()
            .is_some_and(|token| token.eq_ignore_ascii_case("select"))
        {
            tokens.next();
            if tokens
                .peek()
                .is_some_and(|token| !token.eq_ignore_ascii_case("from"))
            {
                tokens.next(); // projection alias
            }
        }

        match tokens.next() {
            Some(token) if token.eq_ignore_ascii_case("from") => {}
            Some(token) => return Err(format!("expected 'from', found '{token}'")),
            None => return Err("expected 'from' clause".to_string()),
        }

        let name = tokens
            .next()
            .ok_or_else(|| "expected entity name after 'from'".to_string())?;

        // one optional alias after the entity name
        tokens.next();
        if let Some(extra) = tokens.next() {
            return Err(format!("unexpected trailing token '{extra}'"));
        }

        Ok(name)
    }
}

impl StoreConnection for MemoryStore {
    fn unit(&self) -> &str {
        &self.unit
    }

    fn entity_types(&self) -> Result<Vec<EntityTypeDescriptor>, StoreError> {
        self.ensure_open()?;

        Ok(self
            .tables
            .values()
            .map(|table| table.descriptor.clone())
            .collect())
    }

    fn metamodel_lookup(&self, type_name: &str) -> Result<EntityTypeDescriptor, StoreError> {
        self.ensure_open()?;

        self.table(type_name).map(|table| table.descriptor.clone())
    }

    fn execute(&self, query: &NativeQuery) -> Result<NativeOutcome, StoreError> {
        self.ensure_open()?;

        let table = self.table(query.entity())?;
        let matching = table.rows.values().filter(|row| {
            query
                .filter()
                .is_none_or(|predicate| eval::eval(row, predicate))
        });

        Ok(match query.projection() {
            NativeProjection::Rows => NativeOutcome::Rows(NativeRows {
                entity: table.descriptor.logical_name().to_string(),
                rows: matching.cloned().collect(),
            }),
            NativeProjection::Count => NativeOutcome::Count(matching.count() as u64),
        })
    }

    fn execute_raw(&self, text: &str) -> Result<NativeRows, StoreError> {
        self.ensure_open()?;

        let logical_name =
            Self::parse_raw(text).map_err(|reason| StoreError::RawQuerySyntax {
                query: text.to_string(),
                reason,
            })?;
        let table = self.table_by_logical(logical_name)?;

        Ok(NativeRows {
            entity: table.descriptor.logical_name().to_string(),
            rows: table.rows.values().cloned().collect(),
        })
    }

    fn find_by_key(
        &self,
        entity: &EntityTypeDescriptor,
        key: &Value,
    ) -> Result<Option<NativeRow>, StoreError> {
        self.ensure_open()?;

        let table = self.table(entity.qualified_name())?;
        Ok(table.rows.get(key).cloned())
    }

    fn insert(
        &mut self,
        entity: &EntityTypeDescriptor,
        mut row: NativeRow,
    ) -> Result<NativeRow, StoreError> {
        self.ensure_open()?;

        let table = self.table_mut(entity.qualified_name())?;
        Self::validate_row(&table.descriptor, &row)?;

        let key = match Self::row_key(&table.descriptor, &row) {
            Some(key) => {
                if table.rows.contains_key(&key) {
                    return Err(StoreError::DuplicateKey {
                        entity: table.descriptor.logical_name().to_string(),
                        key,
                    });
                }
                // keep the generator ahead of explicit keys
                if let Value::Uint(n) = &key {
                    table.next_key = table.next_key.max(n + 1);
                }
                key
            }
            None => {
                // generated identity is only defined for uint keys
                if table.descriptor.field(table.descriptor.id_field())
                    != Some(FieldKind::Uint)
                {
                    return Err(StoreError::MissingIdentifier {
                        entity: table.descriptor.logical_name().to_string(),
                    });
                }

                let key = Value::Uint(table.next_key);
                table.next_key += 1;
                row.insert(table.descriptor.id_field().to_string(), key.clone());
                key
            }
        };

        table.rows.insert(key, row.clone());
        Ok(row)
    }

    fn update(
        &mut self,
        entity: &EntityTypeDescriptor,
        row: NativeRow,
    ) -> Result<NativeRow, StoreError> {
        self.ensure_open()?;

        let table = self.table_mut(entity.qualified_name())?;
        Self::validate_row(&table.descriptor, &row)?;

        let Some(key) = Self::row_key(&table.descriptor, &row) else {
            return Err(StoreError::MissingIdentifier {
                entity: table.descriptor.logical_name().to_string(),
            });
        };

        if !table.rows.contains_key(&key) {
            return Err(StoreError::RowNotFound {
                entity: table.descriptor.logical_name().to_string(),
                key,
            });
        }

        table.rows.insert(key, row.clone());
        Ok(row)
    }

    fn close(&mut self) {
        self.closed = true;
        self.tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_descriptor() -> EntityTypeDescriptor {
        EntityTypeDescriptor::new(
            "Person",
            "demo.Person",
            "id",
            [
                ("id", FieldKind::Uint),
                ("name", FieldKind::Text),
                ("age", FieldKind::Uint),
            ],
        )
        .expect("descriptor should build")
    }

    fn store_with_person() -> (MemoryStore, EntityTypeDescriptor) {
        let mut store = MemoryStore::new("test-unit");
        let descriptor = person_descriptor();
        store
            .define_entity(descriptor.clone())
            .expect("definition should succeed");
        (store, descriptor)
    }

    #[test]
    fn metamodel_lookup_requires_qualified_names() {
        let (store, _) = store_with_person();

        assert!(store.metamodel_lookup("demo.Person").is_ok());
        let err = store
            .metamodel_lookup("Person")
            .expect_err("logical name should miss the metamodel");
        assert!(matches!(err, StoreError::UnknownEntityType { ref name } if name == "Person"));
    }

    #[test]
    fn insert_generates_uint_identifiers() {
        let (mut store, descriptor) = store_with_person();

        let stored = store
            .insert(&descriptor, NativeRow::new().with("name", "Jakarta"))
            .expect("insert should succeed");
        assert_eq!(stored.get("id"), Some(&Value::Uint(1)));

        let stored = store
            .insert(&descriptor, NativeRow::new().with("name", "Raki"))
            .expect("insert should succeed");
        assert_eq!(stored.get("id"), Some(&Value::Uint(2)));
    }

    #[test]
    fn generator_skips_past_explicit_keys() {
        let (mut store, descriptor) = store_with_person();

        store
            .insert(&descriptor, NativeRow::new().with("id", 10u64).with("name", "a"))
            .expect("insert should succeed");
        let stored = store
            .insert(&descriptor, NativeRow::new().with("name", "b"))
            .expect("insert should succeed");

        assert_eq!(stored.get("id"), Some(&Value::Uint(11)));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let (mut store, descriptor) = store_with_person();

        store
            .insert(&descriptor, NativeRow::new().with("id", 7u64))
            .expect("insert should succeed");
        let err = store
            .insert(&descriptor, NativeRow::new().with("id", 7u64))
            .expect_err("duplicate key should fail");

        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[test]
    fn writes_validate_declared_fields_and_kinds() {
        let (mut store, descriptor) = store_with_person();

        let err = store
            .insert(&descriptor, NativeRow::new().with("salary", 1u64))
            .expect_err("undeclared field should fail");
        assert!(matches!(err, StoreError::UnknownField { ref field, .. } if field == "salary"));

        let err = store
            .insert(&descriptor, NativeRow::new().with("age", "old"))
            .expect_err("kind mismatch should fail");
        assert!(matches!(err, StoreError::FieldKindMismatch { .. }));
    }

    #[test]
    fn update_requires_an_existing_row() {
        let (mut store, descriptor) = store_with_person();

        let err = store
            .update(&descriptor, NativeRow::new().with("name", "x"))
            .expect_err("identifier is required");
        assert!(matches!(err, StoreError::MissingIdentifier { .. }));

        let err = store
            .update(&descriptor, NativeRow::new().with("id", 9u64))
            .expect_err("missing row should fail");
        assert!(matches!(err, StoreError::RowNotFound { .. }));
    }

    #[test]
    fn raw_query_grammar() {
        let (mut store, descriptor) = store_with_person();
        store
            .insert(&descriptor, NativeRow::new().with("name", "Jakarta"))
            .expect("insert should succeed");

        for text in ["from Person", "FROM Person p", "select e from Person e"] {
            let rows = store.execute_raw(text).expect("raw query should parse");
            assert_eq!(rows.entity, "Person");
            assert_eq!(rows.rows.len(), 1);
        }

        let err = store
            .execute_raw("delete from Person")
            .expect_err("unknown clause should fail");
        assert!(matches!(err, StoreError::RawQuerySyntax { .. }));

        let err = store
            .execute_raw("from Ghost")
            .expect_err("unknown entity should fail");
        assert!(matches!(err, StoreError::UnknownEntityType { .. }));
    }

    #[test]
    fn closed_connections_fail_fast() {
        let (mut store, descriptor) = store_with_person();
        store.close();

        let err = store
            .insert(&descriptor, NativeRow::new())
            .expect_err("closed store should reject writes");
        assert!(matches!(err, StoreError::ConnectionClosed));
        assert!(matches!(
            store.entity_types(),
            Err(StoreError::ConnectionClosed)
        ));
    }
}
