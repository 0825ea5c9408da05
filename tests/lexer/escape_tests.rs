//! Escaping tests.

use parley_lexer::{escape_string, tokenize};
use proptest::prelude::*;

#[test]
fn escape_wraps_and_doubles_quotes() {
    assert_eq!(escape_string("a \"b\""), "\"a \"\"b\"\"\"");
}

#[test]
fn escaped_string_is_one_token_in_a_line() {
    let line = format!("set {} after", escape_string("x # \"y\" 'z'"));
    let texts: Vec<String> = tokenize(line.as_str())
        .into_iter()
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(texts, ["set", "x # \"y\" 'z'", "after"]);
}

proptest! {
    #[test]
    fn escape_round_trips_any_printable_string(s in "\\PC*") {
        let tokens = tokenize(escape_string(&s).as_str());
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].text(), s.as_str());
    }
}
