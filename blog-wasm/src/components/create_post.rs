use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{CreatePostRequest, prepend_created};
use crate::state::AppState;

/// Автор поста всегда email вошедшего пользователя.
#[component]
pub(crate) fn CreatePost(state: AppState) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let Some(author) = state.author_email() else {
            error.set(Some("Sign in to create a post".to_string()));
            return;
        };

        let payload = CreatePostRequest {
            title: title.get(),
            content: content.get(),
            author,
        };

        error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match api::create_post(&payload).await {
                Ok(created) => {
                    state.posts.update(|posts| prepend_created(posts, created));
                    title.set(String::new());
                    content.set(String::new());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <form class="create-post" on:submit=on_submit>
            <h2>"Create New Post"</h2>
            <input
                placeholder="Title"
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Content"
                prop:value=move || content.get()
                on:input=move |ev| content.set(event_target_value(&ev))
            />
            <Show when=move || error.with(Option::is_some)>
                <div class="error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <button type="submit" disabled=move || submitting.get()>
                "Create Post"
            </button>
        </form>
    }
}
