use leptos::prelude::*;

use crate::identity::Identity;
use crate::models::Post;

/// Состояние списка: ровно одно из трёх.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ListStatus {
    Loading,
    Failed(String),
    Loaded,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) user: RwSignal<Option<Identity>>,
    pub(crate) posts: RwSignal<Vec<Post>>,
    pub(crate) list_status: RwSignal<ListStatus>,
}

impl AppState {
    pub(crate) fn new(user: Option<Identity>) -> Self {
        Self {
            user: RwSignal::new(user),
            posts: RwSignal::new(Vec::new()),
            list_status: RwSignal::new(ListStatus::Loading),
        }
    }

    pub(crate) fn author_email(&self) -> Option<String> {
        self.user.with(|user| user.as_ref().map(|user| user.email.clone()))
    }
}
