pub mod brief;
pub mod download;
pub mod form;
