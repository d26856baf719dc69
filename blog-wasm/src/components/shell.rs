use std::sync::Arc;

use leptos::prelude::*;

use crate::identity::IdentityProvider;
use crate::state::AppState;

/// Пока провайдер не сообщил о пользователе, приложение не рендерится.
#[component]
pub(crate) fn AuthenticatedShell(
    identity: Arc<dyn IdentityProvider>,
    state: AppState,
    children: ChildrenFn,
) -> impl IntoView {
    let sign_in_url = identity.sign_in_url();

    let on_sign_out = Callback::new(move |_: ()| {
        identity.sign_out();
        state.user.set(None);
    });

    move || match state.user.get() {
        Some(user) => view! {
            <div class="app">
                <header class="app-header">
                    <div>
                        <h1>"CCFS Blog"</h1>
                        <p>"Share Your Island Food Adventures!"</p>
                    </div>
                    <div class="app-user">
                        <span>{user.email}</span>
                        <button on:click=move |_| on_sign_out.run(())>"Sign Out"</button>
                    </div>
                </header>
                <main>{children()}</main>
                <footer class="app-footer">
                    <p>"© 2024 CCFS Blog - Island Food Stories"</p>
                </footer>
            </div>
        }
        .into_any(),
        None => view! { <LoginCard sign_in_url=sign_in_url.clone() /> }.into_any(),
    }
}

#[component]
fn LoginCard(sign_in_url: Option<String>) -> impl IntoView {
    let action = match sign_in_url {
        Some(url) => view! { <a class="sign-in" href=url>"Sign in"</a> }.into_any(),
        None => view! { <p class="error">"Sign-in is not configured"</p> }.into_any(),
    };

    view! {
        <div class="login">
            <h2>"CCFS Blog Login"</h2>
            <p>"Share your island food adventures"</p>
            {action}
        </div>
    }
}
