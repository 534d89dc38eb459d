pub mod attachment;
pub mod quiz;

pub use attachment::Attachment;
pub use quiz::Quiz;
