//! Registration of every entity and schema the crate publishes.
//!
//! Both lists are written out by hand so that adding an entity or a schema is a
//! visible, reviewable change. Table creation reads [`ENTITIES`] and nothing else,
//! so an entity missing from it has no table and every test touching it fails.

use crate::entities::{category, receipt, receipt_edit, user};
use crate::schemas::{
    CategoryCreate, CategoryResponse, CategoryUpdate, ReceiptCreate, ReceiptEditResponse,
    ReceiptResponse, ReceiptStatusUpdate, ReceiptUpdate, UserCreate, UserPlanUpdate, UserResponse,
    ValidateInput, WireSchema,
};
use sea_orm::{EntityTrait, Schema, sea_query::TableCreateStatement};

/// A persisted entity known to table creation and migration tooling.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredEntity {
    /// Table the entity is stored in
    pub table_name: &'static str,
    /// Builds the `CREATE TABLE` statement from the entity definition
    pub create_table: fn(&Schema) -> TableCreateStatement,
}

/// Whether a schema parses requests or renders responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDirection {
    /// Built from untrusted input through `ValidateInput`
    Request,
    /// Built from an entity model through `From<&Model>`
    Response,
}

/// A wire schema known to API tooling.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredSchema {
    /// Published schema name
    pub name: &'static str,
    /// Request or response
    pub direction: SchemaDirection,
    /// Declared field allow-list
    pub fields: &'static [&'static str],
}

fn create_table_for<E>(schema: &Schema) -> TableCreateStatement
where
    E: EntityTrait + Default,
{
    schema.create_table_from_entity(E::default())
}

const fn request<S: ValidateInput>() -> RegisteredSchema {
    RegisteredSchema {
        name: S::NAME,
        direction: SchemaDirection::Request,
        fields: S::FIELDS,
    }
}

const fn response<S: WireSchema>() -> RegisteredSchema {
    RegisteredSchema {
        name: S::NAME,
        direction: SchemaDirection::Response,
        fields: S::FIELDS,
    }
}

/// Every entity, in foreign-key order (referenced tables first).
pub const ENTITIES: &[RegisteredEntity] = &[
    RegisteredEntity {
        table_name: "users",
        create_table: create_table_for::<user::Entity>,
    },
    RegisteredEntity {
        table_name: "categories",
        create_table: create_table_for::<category::Entity>,
    },
    RegisteredEntity {
        table_name: "receipts",
        create_table: create_table_for::<receipt::Entity>,
    },
    RegisteredEntity {
        table_name: "receipt_edits",
        create_table: create_table_for::<receipt_edit::Entity>,
    },
];

/// Every request and response schema.
pub const SCHEMAS: &[RegisteredSchema] = &[
    request::<UserCreate>(),
    request::<UserPlanUpdate>(),
    response::<UserResponse>(),
    request::<CategoryCreate>(),
    request::<CategoryUpdate>(),
    response::<CategoryResponse>(),
    request::<ReceiptCreate>(),
    request::<ReceiptUpdate>(),
    request::<ReceiptStatusUpdate>(),
    response::<ReceiptResponse>(),
    response::<ReceiptEditResponse>(),
];

/// Table names of all registered entities, in creation order.
#[must_use]
pub fn entity_table_names() -> Vec<&'static str> {
    ENTITIES.iter().map(|entity| entity.table_name).collect()
}

/// Names of all registered schemas.
#[must_use]
pub fn schema_names() -> Vec<&'static str> {
    SCHEMAS.iter().map(|schema| schema.name).collect()
}

/// Looks up a registered schema by name.
#[must_use]
pub fn find_schema(name: &str) -> Option<&'static RegisteredSchema> {
    SCHEMAS.iter().find(|schema| schema.name == name)
}

/// Registered schemas going in one direction.
pub fn schemas_by_direction(
    direction: SchemaDirection,
) -> impl Iterator<Item = &'static RegisteredSchema> {
    SCHEMAS
        .iter()
        .filter(move |schema| schema.direction == direction)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{
        json_keys, sample_category, sample_receipt, sample_receipt_edit, sample_user,
    };
    use sea_orm::{DatabaseBackend, EntityName};
    use std::collections::HashSet;

    fn table_name_of<E: EntityTrait + Default>() -> String {
        E::default().table_name().to_string()
    }

    #[test]
    fn test_every_entity_is_registered_under_its_table_name() {
        let declared = vec![
            table_name_of::<user::Entity>(),
            table_name_of::<category::Entity>(),
            table_name_of::<receipt::Entity>(),
            table_name_of::<receipt_edit::Entity>(),
        ];
        assert_eq!(entity_table_names(), declared);
    }

    #[test]
    fn test_registered_statements_target_their_tables() {
        let backend = DatabaseBackend::Sqlite;
        let schema = Schema::new(backend);
        for entity in ENTITIES {
            let sql = backend.build(&(entity.create_table)(&schema)).sql;
            assert!(
                sql.contains(&format!("\"{}\"", entity.table_name)),
                "{sql}"
            );
        }
    }

    #[test]
    fn test_schema_names_are_unique() {
        let names = schema_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_registry_exposes_trait_field_lists() {
        let create = find_schema("CategoryCreate").unwrap();
        assert_eq!(create.direction, SchemaDirection::Request);
        assert_eq!(create.fields, CategoryCreate::FIELDS);
        assert!(find_schema("Budget").is_none());

        assert_eq!(schemas_by_direction(SchemaDirection::Request).count(), 7);
        assert_eq!(schemas_by_direction(SchemaDirection::Response).count(), 4);
    }

    #[test]
    fn test_response_projections_match_registered_fields() {
        let projected = [
            ("UserResponse", json_keys(&UserResponse::from(&sample_user()))),
            (
                "CategoryResponse",
                json_keys(&CategoryResponse::from(&sample_category("c1"))),
            ),
            ("ReceiptResponse", json_keys(&ReceiptResponse::from(&sample_receipt()))),
            (
                "ReceiptEditResponse",
                json_keys(&ReceiptEditResponse::from(&sample_receipt_edit())),
            ),
        ];
        assert_eq!(
            projected.len(),
            schemas_by_direction(SchemaDirection::Response).count()
        );

        for (name, keys) in projected {
            let mut fields: Vec<String> = find_schema(name)
                .unwrap()
                .fields
                .iter()
                .map(ToString::to_string)
                .collect();
            fields.sort();
            assert_eq!(keys, fields, "{name}");
        }
    }
}
