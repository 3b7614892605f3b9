pub mod types;

pub use types::{Goal, MedicalFlag, Sex, UserSafetyProfile};
