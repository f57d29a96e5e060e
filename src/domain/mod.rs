pub mod error;
pub mod keywords;
pub mod metrics;
pub mod table;
pub mod url;
