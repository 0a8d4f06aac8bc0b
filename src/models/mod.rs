pub mod condition;
pub mod loaders;
pub mod record;

pub use condition::ConditionConfig;
pub use loaders::load_condition_config;
pub use record::{FieldValue, OutcomeCategory, OutcomeMeasure, TrialRecord};
