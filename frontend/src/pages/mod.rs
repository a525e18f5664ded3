pub mod admin;
pub mod admin_leaves;
pub mod admin_users;
pub mod dashboard;
pub mod home;
pub mod leave_history;
pub mod leave_request;
pub mod login;
pub mod register;
