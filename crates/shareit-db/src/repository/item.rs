//! # Item Repository
//!
//! Items are created by the item catalogue; bookings read owner and
//! availability from here.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use shareit_core::{Item, ItemId, UserId};

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: String,
    available: bool,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            available: row.available,
        }
    }
}

/// Repository for item lookups.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: ItemId) -> DbResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, owner_id, name, description, available
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Lists the items of one owner, by ID.
    pub async fn list_by_owner(&self, owner_id: UserId) -> DbResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, owner_id, name, description, available
            FROM items
            WHERE owner_id = ?1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Adds an item owned by `owner_id`.
    pub async fn insert(
        &self,
        owner_id: UserId,
        name: &str,
        description: &str,
        available: bool,
    ) -> DbResult<Item> {
        debug!(owner_id, name = %name, "Inserting item");

        let id = sqlx::query(
            "INSERT INTO items (owner_id, name, description, available) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(available)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_list_by_owner() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db.users().insert("Olga", "olga@example.com").await.unwrap();

        let drill = db
            .items()
            .insert(owner.id, "Drill", "Cordless, two batteries", true)
            .await
            .unwrap();
        assert!(drill.is_owned_by(owner.id));
        assert!(drill.available);

        let ladder = db
            .items()
            .insert(owner.id, "Ladder", "Three metres", false)
            .await
            .unwrap();
        assert!(!ladder.available);

        assert_eq!(
            db.items().list_by_owner(owner.id).await.unwrap(),
            vec![drill, ladder]
        );
        assert!(db.items().list_by_owner(owner.id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.items().get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_item_requires_existing_owner() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.items().insert(9, "Ladder", "", true).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
