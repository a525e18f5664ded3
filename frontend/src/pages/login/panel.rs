use crate::{components::error::InlineErrorMessage, pages::login::view_model::use_login_view_model};
use leptos::{ev::SubmitEvent, *};

const INPUT: &str = "appearance-none relative block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-md focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg sm:text-sm";

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let form = vm.form;
    let pending = vm.login_action.pending();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <a href="/" class="text-sm text-fg-muted hover:text-fg">"Back to home"</a>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"Sign in to LeaveFlow"</h2>
                </div>
                <form class="mt-8 space-y-6" on:submit=on_submit>
                    <div class="space-y-4">
                        <div>
                            <label for="email" class="block text-sm font-medium text-fg">"Email address"</label>
                            <input
                                id="email"
                                name="email"
                                type="email"
                                autocomplete="email"
                                required
                                class=INPUT
                                placeholder="Enter your email address"
                                prop:value=move || form.email.get()
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label for="password" class="block text-sm font-medium text-fg">"Password"</label>
                            <div class="relative">
                                <input
                                    id="password"
                                    name="password"
                                    type=move || if form.show_password.get() { "text" } else { "password" }
                                    autocomplete="current-password"
                                    required
                                    class=INPUT
                                    placeholder="Enter your password"
                                    prop:value=move || form.password.get()
                                    on:input=move |ev| form.password.set(event_target_value(&ev))
                                />
                                <button
                                    type="button"
                                    class="absolute right-3 top-1/2 -translate-y-1/2 text-xs text-fg-muted hover:text-fg"
                                    on:click=move |_| form.show_password.update(|show| *show = !*show)
                                >
                                    {move || if form.show_password.get() { "Hide" } else { "Show" }}
                                </button>
                            </div>
                        </div>
                    </div>

                    <InlineErrorMessage error=vm.error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    "Don't have an account? "
                    <a href="/register" class="font-semibold text-action-primary-bg">"Create one now"</a>
                </p>
            </div>
        </div>
    }
}
