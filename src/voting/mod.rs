pub mod aggregate;
pub mod audit;
pub mod precinct;
pub mod ranking;
pub mod winners;

pub use aggregate::{add_votes, count_or_zero, tally_votes, total_votes};
pub use audit::{AUDIT_WINDOW, recent_audit};
pub use precinct::precinct_results;
pub use ranking::{percentage, rank_results};
pub use winners::department_winners;
