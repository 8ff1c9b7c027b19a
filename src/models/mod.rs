pub mod notification;
pub mod session;
pub mod session_state;
pub mod user;
