pub mod lasso;
pub mod linear_svc;
pub mod model_trait;
pub mod random_forest;

pub use lasso::Lasso;
pub use linear_svc::{LinearSvc, LinearSvcParams};
pub use model_trait::ImportanceModel;
pub use random_forest::RandomForest;
