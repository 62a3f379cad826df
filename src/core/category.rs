//! Category business logic - Handles creation, lookup, updates, deletion and seeding.
//!
//! Categories are referenced by receipts, never owned by them. Deletion follows a
//! restrict policy: a category with at least one receipt cannot be removed.

use crate::{
    config::categories::CategorySeed,
    entities::{Category, Receipt, category, receipt},
    errors::{Error, Result},
    schemas::{CategoryCreate, CategoryUpdate},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Creates a category from a validated payload.
///
/// # Errors
/// Returns [`Error::DuplicateCategory`] if the id is already taken.
#[instrument(skip(db), fields(category_id = %input.id))]
pub async fn create_category(
    db: &DatabaseConnection,
    input: CategoryCreate,
    sort_order: i32,
) -> Result<category::Model> {
    if get_category_by_id(db, &input.id).await?.is_some() {
        return Err(Error::DuplicateCategory { id: input.id });
    }

    let category = category::ActiveModel {
        id: Set(input.id),
        name: Set(input.name),
        name_en: Set(input.name_en),
        icon: Set(input.icon),
        color: Set(input.color),
        sort_order: Set(sort_order),
        created_at: Set(chrono::Utc::now()),
    };

    let created = category.insert(db).await?;
    info!(category_id = %created.id, "category created");
    Ok(created)
}

/// Finds a category by id, returning None if it does not exist.
pub async fn get_category_by_id<C>(db: &C, category_id: &str) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find_by_id(category_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all categories in display order.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::SortOrder)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update. An update that changes nothing does not touch the row.
#[instrument(skip(db))]
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: &str,
    update: CategoryUpdate,
) -> Result<category::Model> {
    let current = get_category_by_id(db, category_id)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            id: category_id.to_string(),
        })?;

    let updated = update.apply(&current);
    if updated == current {
        return Ok(current);
    }

    let saved = category::ActiveModel::from(updated)
        .reset_all()
        .update(db)
        .await?;
    info!(category_id, "category updated");
    Ok(saved)
}

/// Deletes a category that no receipt references.
///
/// # Errors
/// Returns [`Error::CategoryInUse`] when receipts still point at the category.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, category_id: &str) -> Result<()> {
    let current = get_category_by_id(db, category_id)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            id: category_id.to_string(),
        })?;

    let receipts = Receipt::find()
        .filter(receipt::Column::CategoryId.eq(category_id))
        .count(db)
        .await?;
    if receipts > 0 {
        return Err(Error::CategoryInUse {
            id: category_id.to_string(),
            receipts,
        });
    }

    current.delete(db).await?;
    info!(category_id, "category deleted");
    Ok(())
}

/// Inserts every configured category whose id does not exist yet. Existing
/// categories are left untouched. Returns the number of categories inserted.
///
/// All entries are validated before anything is written.
#[instrument(skip_all, fields(entries = seeds.len()))]
pub async fn seed_categories(db: &DatabaseConnection, seeds: &[CategorySeed]) -> Result<usize> {
    let validated = seeds
        .iter()
        .map(|seed| seed.to_create().map(|create| (create, seed.sort_order)))
        .collect::<Result<Vec<_>>>()?;

    let mut inserted = 0;
    for (create, sort_order) in validated {
        if get_category_by_id(db, &create.id).await?.is_some() {
            debug!(category_id = %create.id, "category already present, skipping");
            continue;
        }
        create_category(db, create, sort_order).await?;
        inserted += 1;
    }

    info!(inserted, "categories seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::categories::parse_config;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_category_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_category(&db, "c1").await?;
        assert_eq!(created.id, "c1");
        assert_eq!(created.name_en, "Dining");

        let found = get_category_by_id(&db, "c1").await?.unwrap();
        assert_eq!(found, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_duplicate() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_category(&db, "c1").await?;

        let result = create_test_category(&db, "c1").await;
        assert!(matches!(result, Err(Error::DuplicateCategory { id }) if id == "c1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_categories_in_display_order() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, category_create("b"), 2).await?;
        create_category(&db, category_create("a"), 2).await?;
        create_category(&db, category_create("z"), 1).await?;

        let ids: Vec<String> = list_categories(&db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, ["z", "a", "b"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_category() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_category(&db, "c1").await?;

        let updated = update_category(
            &db,
            "c1",
            CategoryUpdate {
                icon: Some("bowl".to_string()),
                ..CategoryUpdate::default()
            },
        )
        .await?;
        assert_eq!(updated.icon, "bowl");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.created_at, created.created_at);

        let stored = get_category_by_id(&db, "c1").await?.unwrap();
        assert_eq!(stored.icon, "bowl");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_category_never_writes() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<category::Model>::new()])
            .into_connection();

        let result = update_category(&db, "nope", CategoryUpdate::default()).await;
        assert!(matches!(result, Err(Error::CategoryNotFound { id }) if id == "nope"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unreferenced_category() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_category(&db, "c1").await?;

        delete_category(&db, "c1").await?;
        assert!(get_category_by_id(&db, "c1").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_referenced_category_is_restricted() -> Result<()> {
        let (db, _user, category, _receipt) = setup_with_receipt().await?;

        let result = delete_category(&db, &category.id).await;
        assert!(matches!(
            result,
            Err(Error::CategoryInUse { receipts: 1, .. })
        ));
        assert!(get_category_by_id(&db, &category.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_categories_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(
            r##"
            [[categories]]
            id = "c1"
            name = "餐饮"
            name_en = "Dining"
            icon = "food"
            color = "#FF0000"
            sort_order = 1

            [[categories]]
            id = "c2"
            name = "交通"
            name_en = "Transport"
            icon = "car"
            color = "#0000FF"
            sort_order = 2
            "##,
        )?;

        assert_eq!(seed_categories(&db, &config.categories).await?, 2);
        assert_eq!(seed_categories(&db, &config.categories).await?, 0);

        let categories = list_categories(&db).await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "餐饮");
        assert_eq!(categories[1].sort_order, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_invalid_entries_before_writing() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(
            r##"
            [[categories]]
            id = "c1"
            name = "餐饮"
            name_en = "Dining"
            icon = "food"
            color = "#FF0000"

            [[categories]]
            id = "c2"
            name = "交通"
            name_en = "Transport"
            icon = "car"
            color = "blue"
            "##,
        )?;

        let result = seed_categories(&db, &config.categories).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(list_categories(&db).await?.is_empty());
        Ok(())
    }
}
