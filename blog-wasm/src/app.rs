use std::sync::Arc;

use leptos::prelude::*;

use crate::components::create_post::CreatePost;
use crate::components::post_list::PostList;
use crate::components::shell::AuthenticatedShell;
use crate::identity::{HostedUiIdentity, IdentityProvider};
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let hosted = HostedUiIdentity::from_build_env();
    if let Err(err) = hosted.complete_sign_in() {
        leptos::logging::warn!("{err}");
    }

    let identity: Arc<dyn IdentityProvider> = Arc::new(hosted);
    let state = AppState::new(identity.current_user());

    view! {
        <AuthenticatedShell identity=identity state=state>
            <CreatePost state=state />
            <div class="posts-section">
                <PostList state=state />
            </div>
        </AuthenticatedShell>
    }
}
