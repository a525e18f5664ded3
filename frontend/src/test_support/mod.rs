#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use std::rc::Rc;

    use crate::api::{ApiClient, LeaveBalance, Role, User};
    use crate::state::auth::AuthState;
    use crate::state::session::{MemorySessionStore, SessionStore};
    use crate::telemetry::{AuditLogger, RecordingAuditSink};
    use leptos::*;

    fn user(id: i64, first: &str, last: &str, role: Role) -> User {
        User {
            id,
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@example.com", first.to_lowercase()),
            role,
            active: true,
            annual_leave_balance: Some(25),
            sick_leave_balance: Some(10),
            casual_leave_balance: Some(5),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn admin_user() -> User {
        user(1, "Ada", "Admin", Role::Admin)
    }

    pub fn regular_user() -> User {
        user(2, "Emil", "Employee", Role::Employee)
    }

    pub fn user_json(id: i64, role: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "firstName": "Emil",
            "lastName": "Employee",
            "email": "emil@example.com",
            "role": role,
            "active": true,
            "annualLeaveBalance": 25,
            "sickLeaveBalance": 10,
            "casualLeaveBalance": 5,
            "createdAt": "2024-01-02T08:00:00",
            "updatedAt": "2024-01-02T08:00:00"
        })
    }

    pub fn leave_json(id: i64, leave_type: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "userId": 2,
            "userName": "Emil Employee",
            "userEmail": "emil@example.com",
            "leaveType": leave_type,
            "startDate": "2024-03-04",
            "endDate": "2024-03-08",
            "duration": 5,
            "reason": "Family trip",
            "status": status,
            "createdAt": "2024-02-20T10:00:00",
            "updatedAt": "2024-02-21T10:00:00"
        })
    }

    pub fn balance(annual: i32, sick: i32, casual: i32) -> LeaveBalance {
        LeaveBalance {
            annual_remaining: annual,
            sick_remaining: sick,
            casual_remaining: casual,
            annual_used: 25 - annual,
            sick_used: 10 - sick,
            casual_used: 5 - casual,
        }
    }

    /// Client backed by an in-memory session and a recording audit sink.
    pub fn client_with_session(
        base_url: &str,
        session: Option<(&str, User)>,
    ) -> (ApiClient, Rc<MemorySessionStore>, Rc<RecordingAuditSink>) {
        let store = Rc::new(match session {
            Some((token, user)) => MemorySessionStore::with_session(token, user),
            None => MemorySessionStore::new(),
        });
        let sink = Rc::new(RecordingAuditSink::default());
        let client = ApiClient::new_with_base_url(base_url)
            .with_session(store.clone() as Rc<dyn SessionStore>)
            .with_audit(AuditLogger::new(sink.clone()));
        (client, store, sink)
    }

    pub fn provide_auth(user: Option<User>) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
