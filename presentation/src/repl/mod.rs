//! Interactive session: line editing, command dispatch, and event rendering

pub mod presenter;
pub mod session;
