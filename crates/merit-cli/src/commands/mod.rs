pub mod batch;
pub mod completions;
pub mod dispatch;
pub mod validate;
