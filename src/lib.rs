pub mod analytics;
pub mod labels;
pub mod models;
