use crate::{
    api::{ApiClient, ApiError, LoginRequest, RegisterRequest, Role, User},
    state::session::SessionStore,
};
use leptos::*;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn from_session(store: &dyn SessionStore) -> Self {
        let is_authenticated = store.is_authenticated();
        Self {
            user: is_authenticated.then(|| store.get_current_user()).flatten(),
            is_authenticated,
            loading: false,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

fn create_auth_context() -> AuthContext {
    let api = use_api_client();
    let initial = AuthState::from_session(api.session().as_ref());
    if let Some(user) = &initial.user {
        api.audit().set_user_id(user.id);
    }
    create_signal(initial)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Re-reads the session, e.g. after the gateway cleared it on a 401.
pub fn sync_from_session(api: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    let fresh = AuthState::from_session(api.session().as_ref());
    set_auth_state.update(|state| {
        if *state != fresh {
            *state = fresh;
        }
    });
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<User, ApiError> {
    set_auth_state.update(|state| state.loading = true);
    match api.login(request).await {
        Ok(response) => {
            set_auth_state.set(AuthState::signed_in(response.user.clone()));
            Ok(response.user)
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn register_request(
    request: RegisterRequest,
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<User, ApiError> {
    set_auth_state.update(|state| state.loading = true);
    match api.register(request).await {
        Ok(response) => {
            set_auth_state.set(AuthState::signed_in(response.user.clone()));
            Ok(response.user)
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub fn logout(api: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    api.logout();
    set_auth_state.set(AuthState::default());
}

pub fn use_login_action() -> Action<LoginRequest, Result<User, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api_client();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_register_action() -> Action<RegisterRequest, Result<User, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api_client();

    create_action(move |request: &RegisterRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { register_request(payload, &api, set_auth).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_auth, set_auth) = use_auth();
    let api = store_value(use_api_client());
    Callback::new(move |_| {
        logout(&api.get_value(), set_auth);
        crate::utils::navigation::redirect_to("/login");
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::test_support::helpers::{client_with_session, user_json};

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(serde_json::json!({
                "token": "jwt",
                "tokenType": "Bearer",
                "user": user_json(1, "ADMIN")
            }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let (api, store, _) = client_with_session(&server.url("/api"), None);

        let user = login_request(
            LoginRequest {
                email: "emil@example.com".into(),
                password: "secret1".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap();
        assert_eq!(user.role, Role::Admin);

        let snapshot = state.get_untracked();
        assert!(snapshot.is_authenticated);
        assert!(snapshot.is_admin());
        assert!(store.is_authenticated());

        logout(&api, set_state);
        let snapshot = state.get_untracked();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        assert!(!store.is_authenticated());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_registration_clears_loading_flag() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/register");
            then.status(400)
                .json_body(serde_json::json!({ "message": "Email already registered" }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let (api, _, _) = client_with_session(&server.url("/api"), None);

        let err = register_request(
            RegisterRequest::new("Emil", "Employee", "emil@example.com", "secret1"),
            &api,
            set_state,
        )
        .await
        .unwrap_err();
        assert_eq!(err.error, "Email already registered");
        assert!(!state.get_untracked().loading);
        assert!(!state.get_untracked().is_authenticated);
        runtime.dispose();
    }
}
