pub mod brand_metrics;
pub mod classifier;
pub mod cvi_standardizer;
pub mod missing_posts;
pub mod normalizer;
pub mod platform_id;
pub mod post_matrix;
pub mod reference_fill;
pub mod similarity;
pub mod table_builder;
pub mod url_dedup;
pub mod username_extractor;
