pub mod resolver;
pub mod table;

pub use resolver::{canonical_key, resolve, resolve_symbol, KEY_SEPARATOR};
pub use table::{Rule, RuleBook, RuleError, RuleTable};
