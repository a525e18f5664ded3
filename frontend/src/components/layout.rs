use crate::state::auth::{use_auth, use_logout};
use leptos::*;

const NAV_LINK: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";
const MOBILE_NAV_LINK: &str =
    "block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const EMPLOYEE_LINKS: &[NavLink] = &[
    NavLink {
        href: "/dashboard",
        label: "Dashboard",
    },
    NavLink {
        href: "/leave-request",
        label: "Request Leave",
    },
    NavLink {
        href: "/leave-history",
        label: "My Leaves",
    },
];

const ADMIN_LINKS: &[NavLink] = &[
    NavLink {
        href: "/admin",
        label: "Admin",
    },
    NavLink {
        href: "/admin/leaves",
        label: "All Leaves",
    },
    NavLink {
        href: "/admin/users",
        label: "Users",
    },
];

pub fn nav_links(is_admin: bool) -> Vec<NavLink> {
    let mut links = EMPLOYEE_LINKS.to_vec();
    if is_admin {
        links.extend_from_slice(ADMIN_LINKS);
    }
    links
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let links = create_memo(move |_| nav_links(auth.get().is_admin()));
    let greeting = move || {
        auth.get()
            .user
            .map(|user| user.full_name())
            .unwrap_or_default()
    };
    let on_logout = use_logout();
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/dashboard" class="text-xl font-semibold text-fg">"LeaveFlow"</a>
                    <div class="flex items-center">
                        <nav class="hidden lg:flex items-center space-x-4">
                            <For
                                each=move || links.get()
                                key=|link| link.href
                                children=move |link| view! {
                                    <a href=link.href class=NAV_LINK>{link.label}</a>
                                }
                            />
                            <span class="text-sm text-fg-muted">{greeting}</span>
                            <button
                                on:click=move |_| on_logout.call(())
                                class=NAV_LINK
                            >
                                "Logout"
                            </button>
                        </nav>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Close menu" } else { "Open menu" }}
                            </span>
                            <svg class="h-6 w-6" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"/>
                            </svg>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            <For
                                each=move || links.get()
                                key=|link| link.href
                                children=move |link| view! {
                                    <a
                                        href=link.href
                                        class=MOBILE_NAV_LINK
                                        on:click=move |_| set_menu_open.set(false)
                                    >
                                        {link.label}
                                    </a>
                                }
                            />
                            <button
                                on:click=move |_| on_logout.call(())
                                class="w-full text-left text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                            >
                                "Logout"
                            </button>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4" role="status">
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// Bulleted list of validation messages; renders nothing when empty.
#[component]
pub fn ValidationList(#[prop(into)] messages: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <Show when=move || !messages.get().is_empty()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
                <h4 class="font-semibold text-sm">"Please fix the following errors:"</h4>
                <ul class="list-disc list-inside text-sm mt-1">
                    {move || messages.get().into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                </ul>
            </div>
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, provide_auth, regular_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_renders_admin_links_for_admin() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_user()));
            view! { <Header /> }
        });
        assert!(html.contains("/admin/users"));
        assert!(html.contains("Ada Admin"));
    }

    #[test]
    fn header_hides_admin_links_for_employee() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! { <Header /> }
        });
        assert!(html.contains("/leave-history"));
        assert!(!html.contains("/admin/users"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            let messages = Signal::derive(|| vec!["End date must be after start date".to_string()]);
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error" />
                    <SuccessMessage message="ok" />
                    <ValidationList messages=messages />
                </div>
            }
        });
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
        assert!(html.contains("End date must be after start date"));
    }

    #[test]
    fn validation_list_is_empty_without_messages() {
        let html = render_to_string(move || {
            let messages = Signal::derive(Vec::<String>::new);
            view! { <ValidationList messages=messages /> }
        });
        assert!(!html.contains("Please fix"));
    }
}
