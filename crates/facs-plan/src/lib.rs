pub mod augment;
pub mod calculator;
pub mod pipeline;

pub use augment::augment_with_cross_class_fmo;
pub use calculator::compute_plan;
pub use pipeline::build_class_plans;
