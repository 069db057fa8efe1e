pub mod outcome;
pub mod position;
pub mod user_id;

pub use outcome::AnalysisOutcome;
pub use position::PositionKind;
pub use user_id::UserId;
