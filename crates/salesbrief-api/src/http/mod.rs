//! HTTP surface: the single-page form, the download link and the JSON API.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod page;
pub mod response;
pub mod router;
