//! Tokenizer tests.

use parley_lexer::{Lexer, Token, tokenize};

fn texts(line: &str) -> Vec<String> {
    tokenize(line).into_iter().map(Token::into_text).collect()
}

#[test]
fn no_tokens_for_missing_or_empty_input() {
    assert!(tokenize(None::<&str>).is_empty());
    assert!(tokenize("").is_empty());
    assert!(tokenize(Some("")).is_empty());
}

#[test]
fn tokens_carry_start_offsets() {
    let tokens = tokenize("a b c");
    let pairs: Vec<(usize, &str)> = tokens.iter().map(|t| (t.index(), t.text())).collect();
    assert_eq!(pairs, [(0, "a"), (2, "b"), (4, "c")]);
}

#[test]
fn token_equality_ignores_index() {
    assert_eq!(Token::new(0, "x"), Token::new(9, "x"));
    assert_ne!(Token::new(0, "x"), Token::new(0, "y"));
}

#[test]
fn double_quotes_group_words() {
    assert_eq!(texts("say \"hello world\""), ["say", "hello world"]);
}

#[test]
fn doubled_quote_in_word_is_literal() {
    assert_eq!(texts("it\"\"s"), ["it\"s"]);
}

#[test]
fn comment_discards_rest_of_line() {
    assert_eq!(texts("cmd # a comment"), ["cmd"]);
    assert_eq!(texts("cmd \"quoted\"# trailing"), ["cmd", "quoted"]);
}

#[test]
fn leading_hash_is_not_a_comment() {
    assert_eq!(texts("#notacomment"), ["#notacomment"]);
}

#[test]
fn whitespace_variants_separate_tokens() {
    assert_eq!(texts("a\tb\n c\r\nd"), ["a", "b", "c", "d"]);
}

#[test]
fn quotes_join_adjacent_text() {
    assert_eq!(texts("--name='Ada Lovelace'"), ["--name=Ada Lovelace"]);
    assert_eq!(texts("\"a\"'b'c"), ["abc"]);
}

#[test]
fn unterminated_quote_keeps_accumulated_text() {
    assert_eq!(texts("note 'half a thought"), ["note", "half a thought"]);
}

#[test]
fn lexer_is_restartable() {
    let line = "greet \"Alice Smith\" 3";
    let first: Vec<Token> = Lexer::new(line).collect();
    let second = Lexer::tokenize_all(line);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
