use crate::{
    access::{self, AccessContext, AccessDecision},
    components::layout::LoadingSpinner,
    state::auth::{sync_from_session, use_api_client, use_auth},
    utils::navigation,
};
use leptos::*;

/// Renders `children` only when the access policy allows `path` for the
/// current session; otherwise records the denial and redirects.
#[component]
pub fn RequireAccess(path: &'static str, children: ChildrenFn) -> impl IntoView {
    let (auth, set_auth) = use_auth();
    let api = store_value(use_api_client());

    // The session may have changed behind the auth signal (401, expiry).
    sync_from_session(&api.get_value(), set_auth);

    let context = create_memo(move |_| {
        auth.with(|_| ());
        AccessContext::from_session(api.get_value().session().as_ref())
    });
    let is_loading = create_memo(move |_| auth.get().loading);

    create_effect(move |_| {
        if is_loading.get() {
            return;
        }
        let api = api.get_value();
        let requested = access::requested_url(path, navigation::current_search().as_deref());
        if let AccessDecision::Redirect(target) =
            access::evaluate_and_record(&requested, &context.get(), api.audit())
        {
            navigation::redirect_to(&target);
        }
    });

    view! {
        <Show
            when=move || should_render_children(path, &context.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(path: &str, context: &AccessContext, is_loading: bool) -> bool {
    !is_loading && access::evaluate(path, context).is_allowed()
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RequireAccess;
    use crate::state::auth::AuthState;
    use crate::test_support::helpers::{admin_user, provide_auth, regular_user};
    use crate::test_support::ssr::render_signed_in;
    use leptos::*;

    #[test]
    fn renders_children_for_signed_in_employee() {
        let html = render_signed_in(Some(regular_user()), move || {
            provide_auth(Some(regular_user()));
            view! {
                <RequireAccess path="/leave-request">
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAccess>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn hides_children_without_session() {
        let html = render_signed_in(None, move || {
            provide_auth(None);
            view! {
                <RequireAccess path="/dashboard">
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAccess>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn hides_admin_children_from_employee() {
        let html = render_signed_in(Some(regular_user()), move || {
            provide_auth(Some(regular_user()));
            view! {
                <RequireAccess path="/admin/users">
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAccess>
            }
        });
        assert!(!html.contains("admin-protected"));
    }

    #[test]
    fn renders_admin_children_for_admin() {
        let html = render_signed_in(Some(admin_user()), move || {
            provide_auth(Some(admin_user()));
            view! {
                <RequireAccess path="/admin">
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAccess>
            }
        });
        assert!(html.contains("admin-protected"));
    }

    #[test]
    fn stale_auth_signal_is_corrected_from_session() {
        // The signal claims a user but the session store is empty.
        let html = render_signed_in(None, move || {
            let (auth, set_auth) = create_signal(AuthState {
                user: Some(regular_user()),
                is_authenticated: true,
                loading: false,
            });
            provide_context((auth, set_auth));
            view! {
                <RequireAccess path="/leave-history">
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAccess>
            }
        });
        assert!(!html.contains("protected-content"));
    }
}
