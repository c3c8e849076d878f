pub mod classify;
pub mod compose;
pub mod name_normalizer;
pub mod predicate;

pub use classify::{StatusPattern, default_status_code};
pub use compose::expand_all_of;
pub use name_normalizer::{operation_id, to_camel, to_lower_camel};
