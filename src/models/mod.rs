pub mod language;
pub mod record;

pub use language::Language;
pub use record::{Priority, Record};
