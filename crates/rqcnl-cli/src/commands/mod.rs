//! Command implementations.

pub mod batch;
pub mod config;
pub mod input;
pub mod patterns;
pub mod template;

pub use self::batch::{execute_batch, run_batch};
pub use self::config::execute_config;
pub use self::input::{collect_questions, read_input};
pub use self::patterns::{execute_patterns, PatternReport};
pub use self::template::execute_template;
