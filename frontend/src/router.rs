use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use serde_json::json;

use crate::{
    api::ApiClient,
    components::guard::RequireAccess,
    pages::{
        admin::AdminPage,
        admin_leaves::AdminLeavesPage,
        admin_users::AdminUsersPage,
        dashboard::DashboardPage,
        home::HomePage,
        leave_history::LeaveHistoryPage,
        leave_request::LeaveRequestPage,
        login::LoginPage,
        register::RegisterPage,
    },
    state::auth::AuthProvider,
    telemetry::{provide_audit_logger, use_audit_logger, AuditCategory},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/home",
    "/login",
    "/register",
    "/dashboard",
    "/leave-request",
    "/leave-history",
    "/admin",
    "/admin/users",
    "/admin/leaves",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/dashboard",
    "/leave-request",
    "/leave-history",
    "/admin",
    "/admin/users",
    "/admin/leaves",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/home", "/login", "/register"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    let api = ApiClient::new();
    provide_audit_logger(api.audit().clone());
    provide_context(api);
    provide_meta_context();

    view! {
        <Title text="LeaveFlow"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/home" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/leave-request" view=ProtectedLeaveRequest/>
                    <Route path="/leave-history" view=ProtectedLeaveHistory/>
                    <Route path="/admin" view=ProtectedAdmin/>
                    <Route path="/admin/users" view=ProtectedAdminUsers/>
                    <Route path="/admin/leaves" view=ProtectedAdminLeaves/>
                    <Route path="/*any" view=UnknownRoute/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

/// Unknown paths fall back to the home page.
#[component]
fn UnknownRoute() -> impl IntoView {
    let path = use_location().pathname.get_untracked();
    use_audit_logger().debug(
        AuditCategory::Navigation,
        "Unknown Route",
        json!({ "path": path }),
    );
    view! { <HomePage/> }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAccess path="/dashboard"><DashboardPage/></RequireAccess> }
}

#[component]
fn ProtectedLeaveRequest() -> impl IntoView {
    view! { <RequireAccess path="/leave-request"><LeaveRequestPage/></RequireAccess> }
}

#[component]
fn ProtectedLeaveHistory() -> impl IntoView {
    view! { <RequireAccess path="/leave-history"><LeaveHistoryPage/></RequireAccess> }
}

#[component]
fn ProtectedAdmin() -> impl IntoView {
    view! { <RequireAccess path="/admin"><AdminPage/></RequireAccess> }
}

#[component]
fn ProtectedAdminUsers() -> impl IntoView {
    view! { <RequireAccess path="/admin/users"><AdminUsersPage/></RequireAccess> }
}

#[component]
fn ProtectedAdminLeaves() -> impl IntoView {
    view! { <RequireAccess path="/admin/leaves"><AdminLeavesPage/></RequireAccess> }
}
