use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::info;

use crate::data::post_store::PostStore;
use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post, PostIdGenerator, sort_newest_first};

pub(crate) struct BlogService {
    store: Arc<dyn PostStore>,
    ids: PostIdGenerator,
}

impl BlogService {
    pub(crate) fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            ids: PostIdGenerator::new(),
        }
    }

    pub(crate) async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        // Хранимая дата имеет миллисекундную точность, держим ту же в памяти.
        let now = Utc::now().trunc_subsecs(3);
        let post = Post::create(input, self.ids.next_id(now), now);

        self.store.put(&post).await?;
        info!(post_id = %post.post_id, "post stored");
        Ok(post)
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.store.scan_all().await?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }
}
