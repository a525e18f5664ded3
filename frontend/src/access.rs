//! Route access policy. Pure functions over the path and a snapshot of the
//! session; the guard component applies the decision.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::json;

use crate::api::Role;
use crate::state::session::SessionStore;
use crate::telemetry::{AuditCategory, AuditLogger};

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_PREFIX: &str = "/admin";

pub const AUTHENTICATED_PATHS: &[&str] = &["/dashboard", "/leave-request", "/leave-history"];

// Same set `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRequirement {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessContext {
    pub is_authenticated: bool,
    pub role: Option<Role>,
}

impl AccessContext {
    /// Reads the live session; nothing is cached between navigations.
    pub fn from_session(store: &dyn SessionStore) -> Self {
        let is_authenticated = store.is_authenticated();
        let role = is_authenticated
            .then(|| store.get_current_user().map(|user| user.role))
            .flatten();
        Self {
            is_authenticated,
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(String),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

fn route_path(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// `base` itself or anything below it, segment by segment.
fn is_under(path: &str, base: &str) -> bool {
    path == base
        || path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn is_admin_path(path: &str) -> bool {
    is_under(route_path(path), ADMIN_PREFIX)
}

pub fn requirement_for(path: &str) -> RouteRequirement {
    if is_admin_path(path) {
        RouteRequirement::Admin
    } else if AUTHENTICATED_PATHS
        .iter()
        .any(|base| is_under(route_path(path), base))
    {
        RouteRequirement::Authenticated
    } else {
        RouteRequirement::Public
    }
}

/// The route plus whatever query string the browser is showing.
pub fn requested_url(path: &str, search: Option<&str>) -> String {
    match search.map(|s| s.trim_start_matches('?')) {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}

pub fn login_redirect(path: &str) -> String {
    format!(
        "{}?returnUrl={}",
        LOGIN_PATH,
        utf8_percent_encode(path, COMPONENT)
    )
}

pub fn evaluate(path: &str, ctx: &AccessContext) -> AccessDecision {
    let requirement = requirement_for(path);
    if requirement != RouteRequirement::Public && !ctx.is_authenticated {
        return AccessDecision::Redirect(login_redirect(path));
    }
    if requirement == RouteRequirement::Admin && ctx.role != Some(Role::Admin) {
        return AccessDecision::Redirect(DASHBOARD_PATH.to_string());
    }
    AccessDecision::Allow
}

/// Evaluates and records the attempt and its outcome.
pub fn evaluate_and_record(path: &str, ctx: &AccessContext, audit: &AuditLogger) -> AccessDecision {
    audit.info(
        AuditCategory::Navigation,
        "Route Access Attempt",
        json!({
            "url": path,
            "isAuthenticated": ctx.is_authenticated,
            "role": ctx.role.map(|role| role.as_str()),
        }),
    );
    let decision = evaluate(path, ctx);
    match &decision {
        AccessDecision::Allow => audit.info(
            AuditCategory::Navigation,
            "Route Access Granted",
            json!({ "url": path, "role": ctx.role.map(|role| role.as_str()) }),
        ),
        AccessDecision::Redirect(target) if !ctx.is_authenticated => audit.warn(
            AuditCategory::Auth,
            "Unauthorized Access Attempt",
            json!({ "attemptedUrl": path, "redirectTo": target }),
        ),
        AccessDecision::Redirect(target) => audit.warn(
            AuditCategory::Auth,
            "Admin Access Denied",
            json!({
                "attemptedUrl": path,
                "role": ctx.role.map(|role| role.as_str()),
                "redirectTo": target,
            }),
        ),
    }
    decision
}

/// Post-login destination: a same-origin absolute path or the dashboard.
pub fn resolve_return_target(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|target| {
            target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\')
                && route_path(target) != LOGIN_PATH
        })
        .map(str::to_string)
        .unwrap_or_else(|| DASHBOARD_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::MemorySessionStore;
    use crate::telemetry::{AuditLevel, RecordingAuditSink};
    use crate::test_support::helpers::{admin_user, regular_user};
    use std::rc::Rc;

    const ALL_PATHS: &[&str] = &[
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

    fn ctx(is_authenticated: bool, role: Option<Role>) -> AccessContext {
        AccessContext {
            is_authenticated,
            role,
        }
    }

    #[test]
    fn requirements_follow_route_table() {
        assert_eq!(requirement_for("/"), RouteRequirement::Public);
        assert_eq!(requirement_for("/register"), RouteRequirement::Public);
        assert_eq!(requirement_for("/leave-history"), RouteRequirement::Authenticated);
        assert_eq!(requirement_for("/dashboard?tab=1"), RouteRequirement::Authenticated);
        assert_eq!(requirement_for("/admin"), RouteRequirement::Admin);
        assert_eq!(requirement_for("/admin/leaves"), RouteRequirement::Admin);
        assert_eq!(requirement_for("/administrator"), RouteRequirement::Public);
        assert_eq!(requirement_for("/admin/"), RouteRequirement::Admin);
        for path in ["/dashboard/", "/leave-request/", "/leave-history/", "/leave-history/7"] {
            assert_eq!(requirement_for(path), RouteRequirement::Authenticated, "{}", path);
        }
        assert_eq!(requirement_for("/dashboards"), RouteRequirement::Public);
    }

    #[test]
    fn nested_protected_paths_redirect_anonymous_users() {
        let anon = ctx(false, None);
        for path in ["/dashboard/", "/leave-request/", "/leave-history/7"] {
            assert!(
                matches!(evaluate(path, &anon), AccessDecision::Redirect(ref target) if target.starts_with("/login?returnUrl=")),
                "{}",
                path
            );
        }
    }

    #[test]
    fn unauthenticated_users_go_to_login_with_return_target() {
        let anon = ctx(false, None);
        assert_eq!(
            evaluate("/leave-request", &anon),
            AccessDecision::Redirect("/login?returnUrl=%2Fleave-request".into())
        );
        assert_eq!(
            evaluate("/admin/users", &anon),
            AccessDecision::Redirect("/login?returnUrl=%2Fadmin%2Fusers".into())
        );
        assert!(evaluate("/", &anon).is_allowed());
        assert!(evaluate("/login", &anon).is_allowed());
    }

    #[test]
    fn return_target_keeps_query_string() {
        assert_eq!(requested_url("/leave-history", None), "/leave-history");
        assert_eq!(requested_url("/leave-history", Some("")), "/leave-history");
        let url = requested_url("/leave-history", Some("?status=PENDING"));
        assert_eq!(url, "/leave-history?status=PENDING");
        assert_eq!(
            evaluate(&url, &ctx(false, None)),
            AccessDecision::Redirect("/login?returnUrl=%2Fleave-history%3Fstatus%3DPENDING".into())
        );
        assert!(evaluate(&url, &ctx(true, Some(Role::Employee))).is_allowed());
    }

    #[test]
    fn employees_are_sent_to_dashboard_from_admin_paths() {
        let employee = ctx(true, Some(Role::Employee));
        for path in ["/admin", "/admin/users", "/admin/leaves"] {
            assert_eq!(
                evaluate(path, &employee),
                AccessDecision::Redirect(DASHBOARD_PATH.into())
            );
        }
        assert!(evaluate("/leave-history", &employee).is_allowed());
    }

    #[test]
    fn authenticated_without_cached_profile_is_not_admin() {
        assert_eq!(
            evaluate("/admin", &ctx(true, None)),
            AccessDecision::Redirect(DASHBOARD_PATH.into())
        );
    }

    #[test]
    fn admins_are_always_allowed() {
        let admin = ctx(true, Some(Role::Admin));
        for path in ALL_PATHS {
            assert!(evaluate(path, &admin).is_allowed(), "{path}");
        }
    }

    #[test]
    fn context_reads_live_session() {
        let store = MemorySessionStore::new();
        assert_eq!(AccessContext::from_session(&store), ctx(false, None));

        store.set_session("t", &admin_user()).unwrap();
        assert_eq!(
            AccessContext::from_session(&store),
            ctx(true, Some(Role::Admin))
        );

        store.set_session("t", &regular_user()).unwrap();
        assert_eq!(
            AccessContext::from_session(&store),
            ctx(true, Some(Role::Employee))
        );
    }

    #[test]
    fn return_target_accepts_only_same_origin_paths() {
        assert_eq!(resolve_return_target(Some("/leave-history")), "/leave-history");
        assert_eq!(resolve_return_target(Some("/admin/users?x=1")), "/admin/users?x=1");
        assert_eq!(resolve_return_target(None), DASHBOARD_PATH);
        assert_eq!(resolve_return_target(Some("")), DASHBOARD_PATH);
        assert_eq!(resolve_return_target(Some("//evil.test")), DASHBOARD_PATH);
        assert_eq!(resolve_return_target(Some("https://evil.test")), DASHBOARD_PATH);
        assert_eq!(resolve_return_target(Some("/\\evil.test")), DASHBOARD_PATH);
        assert_eq!(resolve_return_target(Some("/login")), DASHBOARD_PATH);
    }

    #[test]
    fn decisions_are_recorded() {
        let sink = Rc::new(RecordingAuditSink::default());
        let audit = AuditLogger::new(sink.clone());

        evaluate_and_record("/dashboard", &ctx(false, None), &audit);
        evaluate_and_record("/admin", &ctx(true, Some(Role::Employee)), &audit);
        evaluate_and_record("/admin", &ctx(true, Some(Role::Admin)), &audit);

        assert_eq!(
            sink.actions(),
            vec![
                "Route Access Attempt",
                "Unauthorized Access Attempt",
                "Route Access Attempt",
                "Admin Access Denied",
                "Route Access Attempt",
                "Route Access Granted",
            ]
        );
        let denied = &sink.events()[3];
        assert_eq!(denied.category, AuditCategory::Auth);
        assert_eq!(denied.level, AuditLevel::Warn);
    }
}
