pub mod local_search;
pub mod r#move;
pub mod penalty;
pub mod relocate;
pub mod swap;
pub mod two_opt;
