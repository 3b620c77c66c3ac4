pub mod fleet;
pub mod node;
pub mod routing_problem;
pub mod time_window;
pub mod travel_time_matrix;
pub mod week;

/// All solver-internal times are integer minutes since the start of the
/// planning week (Monday 00:00).
pub type Minutes = i64;

/// Planning horizon: one week.
pub const WEEK_MINUTES: Minutes = 7 * 24 * 60;
