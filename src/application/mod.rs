pub mod use_cases;

pub use use_cases::classifier::KeywordClassifier;
pub use use_cases::url_dedup::remove_url_duplicates;
