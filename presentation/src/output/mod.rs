//! Output formatting for prediction results and session state

pub mod console;
