pub mod forms;
pub mod submission_summary;

pub use forms::EventRegistrationForm;
