//! Integrity checks for campus map point data.
pub mod points;
