pub mod expression_csv;
pub mod results;

pub use expression_csv::read_expression_csv;
pub use results::{write_scored_features, write_ttest_results};
