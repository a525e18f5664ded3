use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, Utc};
use leptos::*;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl AuditLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditLevel::Debug => "DEBUG",
            AuditLevel::Info => "INFO",
            AuditLevel::Warn => "WARN",
            AuditLevel::Error => "ERROR",
        }
    }

    fn log_level(&self) -> log::Level {
        match self {
            AuditLevel::Debug => log::Level::Debug,
            AuditLevel::Info => log::Level::Info,
            AuditLevel::Warn => log::Level::Warn,
            AuditLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditCategory {
    Auth,
    Form,
    Navigation,
    Api,
    UserAction,
    System,
}

impl AuditCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditCategory::Auth => "AUTH",
            AuditCategory::Form => "FORM",
            AuditCategory::Navigation => "NAVIGATION",
            AuditCategory::Api => "API",
            AuditCategory::UserAction => "USER_ACTION",
            AuditCategory::System => "SYSTEM",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    pub category: AuditCategory,
    pub action: String,
    pub details: Value,
    pub user_id: Option<i64>,
    pub session_id: String,
}

impl AuditEvent {
    pub fn headline(&self) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level.as_str(),
            self.category.as_str(),
            self.action
        )
    }
}

pub trait AuditSink {
    fn write(&self, event: &AuditEvent);
}

/// Emits every event through the `log` facade, which `console_log` routes to
/// the browser console.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAuditSink;

impl AuditSink for ConsoleAuditSink {
    fn write(&self, event: &AuditEvent) {
        log::log!(
            target: "leaveflow::audit",
            event.level.log_level(),
            "{} {}",
            event.headline(),
            json!({
                "details": event.details,
                "userId": event.user_id,
                "sessionId": event.session_id,
            })
        );
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingAuditSink {
    events: RefCell<Vec<AuditEvent>>,
}

#[cfg(test)]
impl RecordingAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.borrow().clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|event| event.action.clone())
            .collect()
    }
}

#[cfg(test)]
impl AuditSink for RecordingAuditSink {
    fn write(&self, event: &AuditEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

fn new_session_id() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}

struct LoggerInner {
    sink: Rc<dyn AuditSink>,
    session_id: RefCell<String>,
    user_id: Cell<Option<i64>>,
}

/// Shared handle stamping events with the current session and user before
/// handing them to the configured sink.
#[derive(Clone)]
pub struct AuditLogger {
    inner: Rc<LoggerInner>,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(Rc::new(ConsoleAuditSink))
    }
}

impl AuditLogger {
    pub fn new(sink: Rc<dyn AuditSink>) -> Self {
        Self {
            inner: Rc::new(LoggerInner {
                sink,
                session_id: RefCell::new(new_session_id()),
                user_id: Cell::new(None),
            }),
        }
    }

    pub fn session_id(&self) -> String {
        self.inner.session_id.borrow().clone()
    }

    pub fn set_user_id(&self, user_id: i64) {
        self.inner.user_id.set(Some(user_id));
        self.info(AuditCategory::Auth, "User ID Set", json!({ "userId": user_id }));
    }

    /// Drops the user and starts a fresh audit session.
    pub fn clear_user_id(&self) {
        let previous = self.inner.user_id.take();
        self.info(
            AuditCategory::Auth,
            "User ID Cleared",
            json!({ "previousUserId": previous }),
        );
        *self.inner.session_id.borrow_mut() = new_session_id();
    }

    pub fn record(
        &self,
        level: AuditLevel,
        category: AuditCategory,
        action: impl Into<String>,
        details: Value,
    ) {
        let event = AuditEvent {
            timestamp: Utc::now(),
            level,
            category,
            action: action.into(),
            details,
            user_id: self.inner.user_id.get(),
            session_id: self.session_id(),
        };
        self.inner.sink.write(&event);
    }

    pub fn debug(&self, category: AuditCategory, action: impl Into<String>, details: Value) {
        self.record(AuditLevel::Debug, category, action, details);
    }

    pub fn info(&self, category: AuditCategory, action: impl Into<String>, details: Value) {
        self.record(AuditLevel::Info, category, action, details);
    }

    pub fn warn(&self, category: AuditCategory, action: impl Into<String>, details: Value) {
        self.record(AuditLevel::Warn, category, action, details);
    }

    pub fn error(&self, category: AuditCategory, action: impl Into<String>, details: Value) {
        self.record(AuditLevel::Error, category, action, details);
    }

    pub fn api_call(
        &self,
        method: &str,
        url: &str,
        status: Option<u16>,
        elapsed_ms: f64,
        error: Option<&str>,
    ) {
        let level = match (error, status) {
            (Some(_), _) => AuditLevel::Error,
            (None, Some(code)) if code >= 400 => AuditLevel::Warn,
            _ => AuditLevel::Info,
        };
        self.record(
            level,
            AuditCategory::Api,
            format!("{} {}", method, url),
            json!({
                "statusCode": status,
                "responseTime": elapsed_ms,
                "error": error,
            }),
        );
    }

    pub fn auth_attempt(&self, action: &str, email: &str, success: bool, error: Option<&str>) {
        self.info(
            AuditCategory::Auth,
            action,
            json!({
                "email": mask_email(email),
                "success": success,
                "errorMessage": error,
            }),
        );
    }

    pub fn form_submission(&self, form: &str, fields: &[&str], is_valid: bool) {
        self.info(
            AuditCategory::Form,
            "Form Submission",
            json!({
                "formName": form,
                "isValid": is_valid,
                "fieldCount": fields.len(),
                "fields": fields,
                "hasErrors": !is_valid,
            }),
        );
    }

    pub fn user_action(&self, action: &str, component: &str, details: Value) {
        let mut payload = json!({ "component": component });
        if let (Value::Object(target), Value::Object(extra)) = (&mut payload, details) {
            target.extend(extra);
        }
        self.info(AuditCategory::UserAction, action, payload);
    }
}

/// Keeps the first two characters of the local part visible.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            let hidden = local.chars().count().saturating_sub(2);
            format!("{}{}@{}", visible, "*".repeat(hidden), domain)
        }
        None => email.to_string(),
    }
}

pub fn provide_audit_logger(logger: AuditLogger) {
    provide_context(logger);
}

pub fn use_audit_logger() -> AuditLogger {
    use_context::<AuditLogger>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> (Rc<RecordingAuditSink>, AuditLogger) {
        let sink = Rc::new(RecordingAuditSink::default());
        let logger = AuditLogger::new(sink.clone());
        (sink, logger)
    }

    #[test]
    fn mask_email_hides_local_part() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("al@example.com"), "al@example.com");
        assert_eq!(mask_email("not-an-email"), "not-an-email");
    }

    #[test]
    fn api_call_level_follows_status_and_error() {
        let (sink, logger) = recording();
        logger.api_call("GET", "/leaves/my", Some(200), 12.0, None);
        logger.api_call("GET", "/leaves/my", Some(404), 3.0, None);
        logger.api_call("GET", "/leaves/my", None, 1.0, Some("offline"));

        let levels: Vec<_> = sink.events().iter().map(|event| event.level).collect();
        assert_eq!(
            levels,
            vec![AuditLevel::Info, AuditLevel::Warn, AuditLevel::Error]
        );
        let first = &sink.events()[0];
        assert_eq!(first.category, AuditCategory::Api);
        assert_eq!(first.action, "GET /leaves/my");
        assert_eq!(first.details["statusCode"], json!(200));
    }

    #[test]
    fn user_id_is_stamped_and_clearing_rotates_session() {
        let (sink, logger) = recording();
        let before = logger.session_id();
        logger.set_user_id(42);
        logger.info(AuditCategory::System, "ping", Value::Null);
        logger.clear_user_id();

        let events = sink.events();
        assert_eq!(events[1].user_id, Some(42));
        assert_eq!(events[2].details["previousUserId"], json!(42));
        assert_ne!(logger.session_id(), before);
        assert!(logger.session_id().starts_with("session_"));
    }

    #[test]
    fn user_action_merges_details() {
        let (sink, logger) = recording();
        logger.user_action("Delete Leave", "LeaveHistory", json!({ "leaveId": 5 }));
        let event = &sink.events()[0];
        assert_eq!(event.category, AuditCategory::UserAction);
        assert_eq!(event.details, json!({ "component": "LeaveHistory", "leaveId": 5 }));
    }

    #[test]
    fn headline_matches_console_format() {
        let (sink, logger) = recording();
        logger.warn(AuditCategory::Auth, "Admin Access Denied", Value::Null);
        let headline = sink.events()[0].headline();
        assert!(headline.ends_with("[WARN] [AUTH] Admin Access Denied"));
        assert!(headline.starts_with('['));
    }
}
