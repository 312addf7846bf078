use super::{Token, TokenType, Tokenizer};

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    let mut tokens = tokenizer.write(input);
    tokens.extend(tokenizer.finalize());
    tokens
}

fn kinds(tokens: &[Token]) -> Vec<TokenType> {
    tokens.iter().map(|t| t.kind).collect()
}

fn rebuild(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.raw.as_str()).collect()
}

#[test]
fn classify_simple_statement() {
    let tokens = tokenize("SELECT x FROM t;");
    assert_eq!(
        vec![
            TokenType::Identifier,
            TokenType::Whitespace,
            TokenType::Identifier,
            TokenType::Whitespace,
            TokenType::Identifier,
            TokenType::Whitespace,
            TokenType::Identifier,
            TokenType::Symbol,
        ],
        kinds(&tokens)
    );
    assert_eq!("SELECT x FROM t;", rebuild(&tokens));
}

#[test]
fn text_mirrors_raw() {
    for token in tokenize("SELECT 'a', x'0F', 1.5 -- done\n;") {
        assert_eq!(token.text, token.raw);
    }
}

#[test]
fn doubled_quote_does_not_close() {
    let tokens = tokenize("'it''s'");
    assert_eq!(1, tokens.len());
    assert_eq!(TokenType::StringLiteral, tokens[0].kind);
    assert_eq!("'it''s'", tokens[0].raw);
}

#[test]
fn double_quoted_text_is_a_string() {
    // quoted identifiers are not distinguished at this layer
    let tokens = tokenize("\"name\"");
    assert_eq!(vec![TokenType::StringLiteral], kinds(&tokens));
}

#[test]
fn string_spans_chunks() {
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("'abc").is_empty());
    let tokens = tokenizer.write("def'");
    assert_eq!(1, tokens.len());
    assert_eq!(TokenType::StringLiteral, tokens[0].kind);
    assert_eq!("'abcdef'", tokens[0].raw);
    assert!(tokenizer.finalize().is_empty());
}

#[test]
fn escaped_quote_in_continuation_stays_open() {
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("'a").is_empty());
    assert!(tokenizer.write("''b").is_empty());
    let tokens = tokenizer.finalize();
    assert_eq!(1, tokens.len());
    assert_eq!(TokenType::StringLiteral, tokens[0].kind);
    assert_eq!("'a''b", tokens[0].raw);
}

#[test]
fn quote_at_chunk_end_closes_open_string() {
    // the doubled-quote lookahead never crosses a chunk boundary, so a
    // quote that is the last byte of a chunk closes the string even if the
    // next chunk starts with another quote
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("'a").is_empty());
    let first = tokenizer.write("'");
    assert_eq!(1, first.len());
    assert_eq!("'a'", first[0].raw);
    let rest = tokenizer.write("'b'");
    assert_eq!(1, rest.len());
    assert_eq!("'b'", rest[0].raw);
}

#[test]
fn block_comment_spans_chunks() {
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("/* a").is_empty());
    let tokens = tokenizer.write(" b */x");
    assert_eq!(
        vec![TokenType::Comment, TokenType::Identifier],
        kinds(&tokens)
    );
    assert_eq!("/* a b */", tokens[0].raw);
}

#[test]
fn split_block_terminator_is_not_recognized() {
    // "*/" cut by the boundary does not close the comment; the scan only
    // sees a terminator that appears whole within one chunk
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("/* x *").is_empty());
    let tokens = tokenizer.write("/ y */");
    assert_eq!(1, tokens.len());
    assert_eq!(TokenType::Comment, tokens[0].kind);
    assert_eq!("/* x */ y */", tokens[0].raw);
}

#[test]
fn unterminated_block_comment_flushed_at_end() {
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("/* never closed").is_empty());
    let tokens = tokenizer.finalize();
    assert_eq!(1, tokens.len());
    assert_eq!(TokenType::Comment, tokens[0].kind);
    assert_eq!("/* never closed", tokens[0].raw);
}

#[test]
fn unterminated_string_flushed_at_end() {
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("'oops").is_empty());
    let tokens = tokenizer.finalize();
    assert_eq!(1, tokens.len());
    assert_eq!(TokenType::StringLiteral, tokens[0].kind);
    assert_eq!("'oops", tokens[0].raw);
}

#[test]
fn line_comment_stops_at_newline() {
    let tokens = tokenize("-- c\nx");
    assert_eq!(
        vec![
            TokenType::Comment,
            TokenType::Whitespace,
            TokenType::Identifier
        ],
        kinds(&tokens)
    );
    assert_eq!("-- c", tokens[0].raw);
}

#[test]
fn line_comment_is_not_buffered_across_chunks() {
    let mut tokenizer = Tokenizer::new();
    let first = tokenizer.write("-- c");
    assert_eq!(vec![TokenType::Comment], kinds(&first));
    assert_eq!("-- c", first[0].raw);
    let second = tokenizer.write("d\n");
    assert_eq!(
        vec![TokenType::Identifier, TokenType::Whitespace],
        kinds(&second)
    );
}

#[test]
fn blob_literal() {
    let tokens = tokenize("x'CAFE'");
    assert_eq!(vec![TokenType::BlobLiteral], kinds(&tokens));
    assert_eq!("x'CAFE'", tokens[0].raw);
    let tokens = tokenize("X'01'");
    assert_eq!(vec![TokenType::BlobLiteral], kinds(&tokens));
}

#[test]
fn blob_truncated_at_chunk_end() {
    // no cross-chunk continuation for blobs: the truncated span is emitted
    // as-is and the next chunk is scanned fresh
    let mut tokenizer = Tokenizer::new();
    let first = tokenizer.write("x'CA");
    assert_eq!(vec![TokenType::BlobLiteral], kinds(&first));
    assert_eq!("x'CA", first[0].raw);
    let second = tokenizer.write("FE'");
    assert_eq!(vec![TokenType::Identifier], kinds(&second));
    assert_eq!("FE", second[0].raw);
    let rest = tokenizer.finalize();
    assert_eq!(vec![TokenType::StringLiteral], kinds(&rest));
    assert_eq!("'", rest[0].raw);
}

#[test]
fn loose_number_scan() {
    let tokens = tokenize("1-2");
    assert_eq!(vec![TokenType::Number], kinds(&tokens));
    assert_eq!("1-2", tokens[0].raw);
    let tokens = tokenize("1.5e+3");
    assert_eq!(vec![TokenType::Number], kinds(&tokens));
}

#[test]
fn no_operator_grouping() {
    let tokens = tokenize("a<=b");
    assert_eq!(
        vec![
            TokenType::Identifier,
            TokenType::Symbol,
            TokenType::Symbol,
            TokenType::Identifier,
        ],
        kinds(&tokens)
    );
    assert_eq!("<", tokens[1].raw);
    assert_eq!("=", tokens[2].raw);
}

#[test]
fn multibyte_character_is_one_symbol() {
    let tokens = tokenize("é;");
    assert_eq!(vec![TokenType::Symbol, TokenType::Symbol], kinds(&tokens));
    assert_eq!("é", tokens[0].raw);
}

#[test]
fn whitespace_split_by_boundary_yields_two_tokens() {
    let mut tokenizer = Tokenizer::new();
    let mut tokens = tokenizer.write("a ");
    tokens.extend(tokenizer.write(" b"));
    tokens.extend(tokenizer.finalize());
    assert_eq!(
        vec![
            TokenType::Identifier,
            TokenType::Whitespace,
            TokenType::Whitespace,
            TokenType::Identifier,
        ],
        kinds(&tokens)
    );
    assert_eq!("a  b", rebuild(&tokens));
}

#[test]
fn empty_chunk_is_a_no_op() {
    let mut tokenizer = Tokenizer::new();
    assert!(tokenizer.write("'open").is_empty());
    assert!(tokenizer.write("").is_empty());
    let tokens = tokenizer.write("ed'");
    assert_eq!(1, tokens.len());
    assert_eq!("'opened'", tokens[0].raw);
}

#[test]
fn reconstruction_holds_at_every_split_point() {
    let input = "INSERT INTO t VALUES (x'AB', 'it''s', \"q\", 1.5e-3); /* c */ -- l\né;";
    let mut cuts: Vec<usize> = input.char_indices().map(|(i, _)| i).collect();
    cuts.push(input.len());
    for cut in cuts {
        let mut tokenizer = Tokenizer::new();
        let mut tokens = tokenizer.write(&input[..cut]);
        tokens.extend(tokenizer.write(&input[cut..]));
        tokens.extend(tokenizer.finalize());
        assert_eq!(input, rebuild(&tokens), "split at byte {cut}");
    }
}
