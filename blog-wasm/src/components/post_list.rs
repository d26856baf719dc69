use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use crate::api;
use crate::models::{Post, merge_loaded};
use crate::state::{AppState, ListStatus};

/// Дата в локали браузера, как `Date.prototype.toLocaleDateString`.
fn localized_date(iso: &str) -> String {
    js_sys::Date::new(&JsValue::from_str(iso))
        .to_locale_date_string("default", &JsValue::UNDEFINED)
        .into()
}

/// Список загружается один раз при монтировании.
#[component]
pub(crate) fn PostList(state: AppState) -> impl IntoView {
    spawn_local(async move {
        match api::list_posts().await {
            Ok(loaded) => {
                state
                    .posts
                    .update(|posts| *posts = merge_loaded(std::mem::take(posts), loaded));
                state.list_status.set(ListStatus::Loaded);
            }
            Err(err) => state.list_status.set(ListStatus::Failed(err.to_string())),
        }
    });

    move || match state.list_status.get() {
        ListStatus::Loading => view! { <div class="loading">"Loading..."</div> }.into_any(),
        ListStatus::Failed(message) => {
            view! { <div class="error">"Error: " {message}</div> }.into_any()
        }
        ListStatus::Loaded => view! {
            <div class="posts">
                <For
                    each=move || state.posts.get()
                    key=|post| post.post_id.clone()
                    children=|post| view! { <PostArticle post=post /> }
                />
            </div>
        }
        .into_any(),
    }
}

#[component]
fn PostArticle(post: Post) -> impl IntoView {
    let byline = format!("By {} • {}", post.author, localized_date(&post.date_created));

    view! {
        <article class="post">
            <h2>{post.title}</h2>
            <div class="byline">{byline}</div>
            <p>{post.content}</p>
        </article>
    }
}
