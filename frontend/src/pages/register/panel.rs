use crate::{
    components::{error::InlineErrorMessage, layout::ValidationList},
    pages::register::{utils::RegisterForm, view_model::use_register_view_model},
};
use leptos::{ev::SubmitEvent, *};

const INPUT: &str = "appearance-none block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-md focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg sm:text-sm";

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    form: RwSignal<RegisterForm>,
    get: fn(&RegisterForm) -> String,
    set: fn(&mut RegisterForm, String),
) -> impl IntoView {
    view! {
        <div>
            <label for=id class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=id
                name=id
                type=input_type
                required
                class=INPUT
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|state| set(state, value));
                }
            />
        </div>
    }
}

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = use_register_view_model();
    let form = vm.form;
    let pending = vm.register_action.pending();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <a href="/" class="text-sm text-fg-muted hover:text-fg">"Back to home"</a>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"Create your account"</h2>
                </div>
                <form class="space-y-4" on:submit=on_submit>
                    <div class="grid grid-cols-2 gap-4">
                        <TextField id="firstName" label="First name" form=form
                            get=|f| f.first_name.clone() set=|f, v| f.first_name = v />
                        <TextField id="lastName" label="Last name" form=form
                            get=|f| f.last_name.clone() set=|f, v| f.last_name = v />
                    </div>
                    <TextField id="email" label="Email address" input_type="email" form=form
                        get=|f| f.email.clone() set=|f, v| f.email = v />
                    <TextField id="password" label="Password" input_type="password" form=form
                        get=|f| f.password.clone() set=|f, v| f.password = v />
                    <TextField id="confirmPassword" label="Confirm password" input_type="password" form=form
                        get=|f| f.confirm_password.clone() set=|f, v| f.confirm_password = v />
                    <label class="flex items-center gap-2 text-sm text-fg">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.agreed_to_terms)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| f.agreed_to_terms = checked);
                            }
                        />
                        "I agree to the Terms of Service and Privacy Policy"
                    </label>

                    <ValidationList messages=vm.problems />
                    <InlineErrorMessage error=vm.error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    "Already have an account? "
                    <a href="/login" class="font-semibold text-action-primary-bg">"Sign in here"</a>
                </p>
            </div>
        </div>
    }
}
