//! Rule lookup by canonical key. Pure functions, no side effects.

use crate::api::types::Mode;
use crate::rules::table::{Rule, RuleBook};

/// Joins sorted symbols into a canonical key.
pub const KEY_SEPARATOR: &str = "-";

/// Sort a copy of `symbols` ascending (byte-wise, case-sensitive) and join
/// them with `-`. The input order never affects the result.
pub fn canonical_key<S: AsRef<str>>(symbols: &[S]) -> String {
    let mut sorted: Vec<&str> = symbols.iter().map(|s| s.as_ref()).collect();
    sorted.sort_unstable();
    sorted.join(KEY_SEPARATOR)
}

/// Find the rule whose reactants exactly match `symbols` in `mode`.
/// Fewer than two symbols never match.
pub fn resolve<'a, S: AsRef<str>>(book: &'a RuleBook, symbols: &[S], mode: Mode) -> Option<&'a Rule> {
    if symbols.len() < 2 {
        return None;
    }
    book.table(mode).get(&canonical_key(symbols))
}

/// Like [`resolve`], returning only the outcome symbol.
pub fn resolve_symbol<'a, S: AsRef<str>>(book: &'a RuleBook, symbols: &[S], mode: Mode) -> Option<&'a str> {
    resolve(book, symbols, mode).map(|rule| rule.product.as_str())
}
