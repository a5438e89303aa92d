use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY type
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, kind: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO categories (type) VALUES (?1)
        "#,
    )
    .bind(kind)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Inserts the categories, overwriting the label of any id that already exists.
pub async fn import_categories(
    conn: &mut SqliteConnection,
    categories: &[Category],
) -> sqlx::Result<()> {
    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(&category.kind)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{in_memory_pool, run_migrations};

    async fn pool() -> SqlitePool {
        let pool = in_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn categories_are_ordered_by_type() {
        let pool = pool().await;
        create_category(&pool, "Science").await.unwrap();
        create_category(&pool, "Art").await.unwrap();

        let names: Vec<String> = get_all_categories(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(names, vec!["Art", "Science"]);
    }

    #[tokio::test]
    async fn missing_category_is_row_not_found() {
        let pool = pool().await;
        let err = get_category(&pool, 7).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn import_overwrites_existing_labels() {
        let pool = pool().await;
        let id = create_category(&pool, "Sience").await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        import_categories(
            &mut conn,
            &[
                Category {
                    id,
                    kind: "Science".to_owned(),
                },
                Category {
                    id: 5,
                    kind: "Sports".to_owned(),
                },
            ],
        )
        .await
        .unwrap();
        drop(conn);

        assert_eq!(get_category(&pool, id).await.unwrap().kind, "Science");
        assert_eq!(get_category(&pool, 5).await.unwrap().kind, "Sports");
    }
}
