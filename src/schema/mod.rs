pub mod counts;
pub mod summary;
pub mod types;
pub mod write;

pub use counts::Counts;
pub use types::{ParticipantRecord, RaceDetail, YearStats};
pub use write::write_output;
