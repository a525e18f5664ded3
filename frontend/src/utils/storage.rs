use web_sys::{Storage, Window};

use crate::state::session::SessionError;

pub fn window() -> Result<Window, SessionError> {
    web_sys::window().ok_or(SessionError::Unavailable)
}

pub fn local_storage() -> Result<Storage, SessionError> {
    window()?
        .local_storage()
        .map_err(|_| SessionError::Unavailable)?
        .ok_or(SessionError::Unavailable)
}
