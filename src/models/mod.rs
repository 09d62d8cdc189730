// Core data models for the recruitment ledger
// These structs represent the domain entities

pub mod stage;
pub mod candidate;
pub mod job;
pub mod applicant;
pub mod offer;

pub use stage::*;
pub use candidate::*;
pub use job::*;
pub use applicant::*;
pub use offer::*;
