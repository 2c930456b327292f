use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::PostStore;
use crate::{
    models::{BlogPost, NewPost, PostChanges, PostFilter},
    Error, Result,
};

struct Inner {
    posts: BTreeMap<i64, BlogPost>,
    last_id: i64,
}

/// In-process post store. Data is lost on restart.
///
/// Ids come from a counter that only grows, so ids of deleted posts are
/// never handed out again.
pub struct MemoryPostStore {
    inner: RwLock<Inner>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                posts: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: NewPost) -> Result<BlogPost> {
        post.validate()?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let record = BlogPost {
            id: inner.last_id,
            title: post.title,
            content: post.content,
            author: post.author,
            summary: post.summary,
            created_date: post.created_date,
            updated_date: None,
            is_published: post.is_published,
        };
        inner.posts.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self, filter: PostFilter) -> Result<Vec<BlogPost>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }

    async fn replace(&self, id: i64, changes: PostChanges) -> Result<BlogPost> {
        changes.validate()?;

        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or(Error::NotFound)?;

        post.title = changes.title;
        post.content = changes.content;
        post.author = changes.author;
        post.summary = changes.summary;
        post.is_published = changes.is_published;
        post.updated_date = Some(changes.updated_date.max(post.created_date));

        Ok(post.clone())
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.posts.len())
    }
}
