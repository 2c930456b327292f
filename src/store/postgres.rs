use async_trait::async_trait;
use sqlx::PgPool;

use super::PostStore;
use crate::{
    models::{BlogPost, NewPost, PostChanges, PostFilter},
    Error, Result,
};

const COLUMNS: &str =
    "id, title, content, author, summary, created_date, updated_date, is_published";

/// Post store backed by the `blog_posts` table.
#[derive(Clone)]
pub struct PgPostStore {
    db: PgPool,
}

impl PgPostStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, post: NewPost) -> Result<BlogPost> {
        post.validate()?;

        let record = sqlx::query_as::<_, BlogPost>(&format!(
            "INSERT INTO blog_posts (title, content, author, summary, created_date, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(post.title)
        .bind(post.content)
        .bind(post.author)
        .bind(post.summary)
        .bind(post.created_date)
        .bind(post.is_published)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {COLUMNS} FROM blog_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(post)
    }

    async fn find_all(&self, filter: PostFilter) -> Result<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {COLUMNS} FROM blog_posts WHERE ($1::BOOLEAN IS NULL OR is_published = $1)"
        ))
        .bind(filter.published)
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    async fn replace(&self, id: i64, changes: PostChanges) -> Result<BlogPost> {
        changes.validate()?;

        sqlx::query_as::<_, BlogPost>(&format!(
            "UPDATE blog_posts \
             SET title = $2, content = $3, author = $4, summary = $5, is_published = $6, \
                 updated_date = GREATEST($7, created_date) \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.author)
        .bind(changes.summary)
        .bind(changes.is_published)
        .bind(changes.updated_date)
        .fetch_optional(&self.db)
        .await?
        .ok_or(Error::NotFound)
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(&self.db)
            .await?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn setup_test_store() -> Option<PgPostStore> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL missing; skipping Postgres store tests");
                return None;
            }
        };

        let pool = crate::db::create_pool(&database_url)
            .await
            .expect("Failed to connect to test database");
        crate::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Some(PgPostStore::new(pool))
    }

    fn new_post(title: &str, is_published: bool) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "Test content".to_string(),
            author: "Tester".to_string(),
            summary: Some("Test summary".to_string()),
            created_date: Utc::now(),
            is_published,
        }
    }

    #[tokio::test]
    async fn test_insert_find_remove() -> anyhow::Result<()> {
        let Some(store) = setup_test_store().await else {
            return Ok(());
        };

        let first = store.insert(new_post("First", true)).await?;
        let second = store.insert(new_post("Second", true)).await?;
        assert!(second.id > first.id);
        assert_eq!(first.updated_date, None);

        let found = store.find_by_id(first.id).await?;
        assert_eq!(found.as_ref().map(|p| p.title.as_str()), Some("First"));

        assert!(store.remove(first.id).await?);
        assert!(!store.remove(first.id).await?);
        assert_eq!(store.find_by_id(first.id).await?, None);

        // Cleanup
        store.remove(second.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_replace() -> anyhow::Result<()> {
        let Some(store) = setup_test_store().await else {
            return Ok(());
        };

        let post = store.insert(new_post("Before", true)).await?;
        let updated = store
            .replace(
                post.id,
                PostChanges {
                    title: "After".to_string(),
                    content: "New content".to_string(),
                    author: "Editor".to_string(),
                    summary: None,
                    is_published: false,
                    updated_date: Utc::now(),
                },
            )
            .await?;

        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title, "After");
        assert_eq!(updated.summary, None);
        assert!(!updated.is_published);
        assert!(updated.updated_date.is_some_and(|u| u >= post.created_date));

        let published = store.find_all(PostFilter::published()).await?;
        assert!(published.iter().all(|p| p.id != post.id));

        // Cleanup
        store.remove(post.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_missing() -> anyhow::Result<()> {
        let Some(store) = setup_test_store().await else {
            return Ok(());
        };

        let result = store
            .replace(
                i64::MAX,
                PostChanges {
                    title: "T".to_string(),
                    content: "C".to_string(),
                    author: "A".to_string(),
                    summary: None,
                    is_published: true,
                    updated_date: Utc::now(),
                },
            )
            .await;
        assert!(matches!(result, Err(Error::NotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_invalid_is_rejected() -> anyhow::Result<()> {
        let Some(store) = setup_test_store().await else {
            return Ok(());
        };

        let title = "x".repeat(201);
        let result = store.insert(new_post(&title, true)).await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let all = store.find_all(PostFilter::all()).await?;
        assert!(all.iter().all(|p| p.title != title));
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_nul_character_is_validation_error() -> anyhow::Result<()> {
        let Some(store) = setup_test_store().await else {
            return Ok(());
        };

        let result = store.insert(new_post("a\u{0}b", true)).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        Ok(())
    }
}
