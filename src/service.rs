use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::{
    models::{BlogPost, PostDraft, PostFilter},
    store::PostStore,
    Error, Result,
};

/// Business rules over a [`PostStore`]. This is the only entry point the
/// web layer uses.
#[derive(Clone)]
pub struct BlogService {
    store: Arc<dyn PostStore>,
}

impl BlogService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn PostStore> {
        &self.store
    }

    /// Published posts, newest first. Equal timestamps fall back to the
    /// higher id first.
    pub async fn list_published(&self) -> Result<Vec<BlogPost>> {
        let mut posts = self.store.find_all(PostFilter::published()).await?;
        posts.sort_by(|a, b| {
            b.created_date
                .cmp(&a.created_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    /// Unpublished posts are reported as absent, same as missing ones.
    pub async fn get_published(&self, id: i64) -> Result<Option<BlogPost>> {
        let post = self.store.find_by_id(id).await?;
        Ok(post.filter(|p| p.is_published))
    }

    pub async fn create(&self, draft: PostDraft) -> Result<BlogPost> {
        draft.validate()?;

        let post = self.store.insert(draft.into_new_post(Utc::now())).await?;
        tracing::info!(post_id = post.id, published = post.is_published, "Created post");

        Ok(post)
    }

    /// Returns `None` when no post has this id.
    pub async fn update(&self, id: i64, draft: PostDraft) -> Result<Option<BlogPost>> {
        draft.validate()?;

        match self.store.replace(id, draft.into_changes(Utc::now())).await {
            Ok(post) => {
                tracing::info!(post_id = id, published = post.is_published, "Updated post");
                Ok(Some(post))
            }
            Err(Error::NotFound) => {
                tracing::debug!(post_id = id, "Update skipped, post not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let removed = self.store.remove(id).await?;
        if removed {
            tracing::info!(post_id = id, "Deleted post");
        }
        Ok(removed)
    }

    /// Inserts the welcome posts when the store is empty. Returns how many
    /// posts were added.
    pub async fn seed_defaults(&self) -> Result<usize> {
        if self.store.count().await? > 0 {
            return Ok(0);
        }

        let now = Utc::now();
        let seeds = [
            (
                PostDraft::new(
                    "Welcome to Our Blog",
                    "This is our first blog post. Welcome to our amazing blog platform where \
                     you can create, edit, and share your thoughts with the world!",
                    "Admin",
                )
                .with_summary("Welcome post introducing our blog platform"),
                now,
            ),
            (
                PostDraft::new(
                    "Getting Started with axum",
                    "axum is a fast, modular web framework built on tokio, tower and hyper \
                     for building modern, Internet-connected services in Rust. In this post, \
                     we'll explore the basics of building web applications with axum.",
                    "Developer",
                )
                .with_summary("Introduction to axum development"),
                now - Duration::days(1),
            ),
        ];

        let count = seeds.len();
        for (draft, created_date) in seeds {
            self.store.insert(draft.into_new_post(created_date)).await?;
        }
        tracing::info!("Seeded {} demo posts", count);

        Ok(count)
    }
}
