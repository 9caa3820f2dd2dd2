//! Pure helper functions

pub mod time;
pub mod title;
