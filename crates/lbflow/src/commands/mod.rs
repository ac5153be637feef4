pub mod attach;
pub mod provision;
