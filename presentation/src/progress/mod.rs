//! Terminal progress indicators

pub mod spinner;
