use leptos::*;

use crate::state::auth::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let (auth, _) = use_auth();
    let signed_in = move || auth.get().is_authenticated;

    view! {
        <div class="min-h-screen bg-surface">
            <div class="max-w-7xl mx-auto py-12 px-4 sm:px-6 lg:px-8">
                <div class="text-center">
                    <h1 class="text-4xl font-extrabold text-fg sm:text-5xl lg:text-6xl">
                        "LeaveFlow"
                    </h1>
                    <p class="mt-3 max-w-md mx-auto text-base text-fg-muted sm:text-lg lg:mt-5 lg:text-xl lg:max-w-3xl">
                        "Request time off, track your balances and review your team's leave in one place."
                    </p>
                    <div class="mt-5 max-w-md mx-auto sm:flex sm:justify-center gap-3 lg:mt-8">
                        <Show
                            when=signed_in
                            fallback=|| view! {
                                <a href="/login" class="flex items-center justify-center px-8 py-3 text-base font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover">
                                    "Sign In"
                                </a>
                                <a href="/register" class="mt-3 sm:mt-0 flex items-center justify-center px-8 py-3 text-base font-medium rounded-md text-fg bg-surface-elevated border border-border hover:bg-surface-muted">
                                    "Create Account"
                                </a>
                            }
                        >
                            <a href="/dashboard" class="flex items-center justify-center px-8 py-3 text-base font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover">
                                "Go to Dashboard"
                            </a>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
