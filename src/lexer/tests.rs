use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).map(|t| t.kind).collect()
}

fn int() -> LiteralKind {
    LiteralKind::Int {
        base: Base::Decimal,
        empty_int: false,
    }
}

#[test]
fn token_examples() {
    const EX_1: &str = "ident./@ \t\nA[]";
    let stream = tokenize(EX_1).collect::<Vec<_>>();
    assert_eq!(
        stream,
        vec![
            Token::new(TokenKind::Ident, 5),
            Token::new(TokenKind::Dot, 1),
            Token::new(TokenKind::Slash, 1),
            Token::new(TokenKind::At, 1),
            Token::new(TokenKind::Whitespace, 3),
            Token::new(TokenKind::Ident, 1),
            Token::new(TokenKind::OpenBracket, 1),
            Token::new(TokenKind::CloseBracket, 1),
        ]
    );

    const EX_2: &str = "123, ;#\n// A \t\nident";
    let stream = tokenize(EX_2).collect::<Vec<_>>();
    assert_eq!(
        stream,
        vec![
            Token::new(
                TokenKind::Literal {
                    kind: int(),
                    suffix_start: 3,
                },
                3
            ),
            Token::new(TokenKind::Comma, 1),
            Token::new(TokenKind::Whitespace, 1),
            Token::new(TokenKind::Semi, 1),
            Token::new(TokenKind::Pound, 1),
            Token::new(TokenKind::Whitespace, 1),
            Token::new(TokenKind::Comment, 6),
            Token::new(TokenKind::Whitespace, 1),
            Token::new(TokenKind::Ident, 5),
        ]
    );
}

#[test]
fn token_lex_literal() {
    let token = tokenize("1234").next().unwrap();
    assert_eq!(
        token,
        Token {
            kind: TokenKind::Literal {
                kind: int(),
                suffix_start: 4
            },
            len: 4,
        }
    );

    let token = tokenize("0xa1234").next().unwrap();
    assert_eq!(
        token,
        Token {
            kind: TokenKind::Literal {
                kind: LiteralKind::Int {
                    base: Base::Hexadecimal,
                    empty_int: false
                },
                suffix_start: 7
            },
            len: 7,
        }
    );

    let token = tokenize("0x").next().unwrap();
    assert_eq!(
        token.kind,
        TokenKind::Literal {
            kind: LiteralKind::Int {
                base: Base::Hexadecimal,
                empty_int: true
            },
            suffix_start: 2
        }
    );
    assert!(!token.kind.valid());

    let token = tokenize("1231231230.01231231236").next().unwrap();
    assert_eq!(
        token,
        Token {
            kind: TokenKind::Literal {
                kind: LiteralKind::Float,
                suffix_start: 22
            },
            len: 22,
        }
    );

    let token = tokenize("2.5E-3").next().unwrap();
    assert_eq!(token.len, 6);
    assert_eq!(
        token.kind,
        TokenKind::Literal {
            kind: LiteralKind::Float,
            suffix_start: 6
        }
    );

    let token = tokenize("1e3").next().unwrap();
    assert_eq!(token.len, 3);
    assert!(matches!(
        token.kind,
        TokenKind::Literal {
            kind: LiteralKind::Float,
            ..
        }
    ));
}

#[test]
fn token_lex_quantity() {
    // # Case 1
    // chained units form one token
    let stream = tokenize("3h20min").collect::<Vec<_>>();
    assert_eq!(
        stream,
        vec![Token::new(
            TokenKind::Literal {
                kind: int(),
                suffix_start: 1
            },
            7
        )]
    );

    // # Case 2
    let stream = tokenize("1.5s").collect::<Vec<_>>();
    assert_eq!(
        stream,
        vec![Token::new(
            TokenKind::Literal {
                kind: LiteralKind::Float,
                suffix_start: 3
            },
            4
        )]
    );

    // # Case 3
    // a unit named like an exponent
    let stream = tokenize("1em").collect::<Vec<_>>();
    assert_eq!(
        stream,
        vec![Token::new(
            TokenKind::Literal {
                kind: int(),
                suffix_start: 1
            },
            3
        )]
    );

    // # Case 4
    // whitespace separates tokens
    assert_eq!(
        kinds("1h 30min"),
        vec![
            TokenKind::Literal {
                kind: int(),
                suffix_start: 1
            },
            TokenKind::Whitespace,
            TokenKind::Literal {
                kind: int(),
                suffix_start: 2
            },
        ]
    );
}

#[test]
fn token_lex_ranges() {
    assert_eq!(
        kinds("1..3"),
        vec![
            TokenKind::Literal {
                kind: int(),
                suffix_start: 1
            },
            TokenKind::Dot,
            TokenKind::Dot,
            TokenKind::Literal {
                kind: int(),
                suffix_start: 1
            },
        ]
    );

    assert_eq!(
        kinds(".5"),
        vec![
            TokenKind::Dot,
            TokenKind::Literal {
                kind: int(),
                suffix_start: 1
            },
        ]
    );
}

#[test]
fn token_lex_strings() {
    let token = tokenize(r#""a \"quoted\" string""#).next().unwrap();
    assert_eq!(token.len, 21);
    assert_eq!(
        token.kind,
        TokenKind::Literal {
            kind: LiteralKind::Str { terminated: true },
            suffix_start: 21
        }
    );

    let token = tokenize("\"unterminated\n").next().unwrap();
    assert_eq!(token.len, 14);
    assert!(!token.kind.valid());

    let token = tokenize("'<root a=\"b\"/>'").next().unwrap();
    assert_eq!(
        token.kind,
        TokenKind::Literal {
            kind: LiteralKind::Xml { terminated: true },
            suffix_start: 15
        }
    );
}

#[test]
fn token_lex_comments() {
    // # Case 1
    // continued by a trailing backslash
    let stream = tokenize("// a \\\n b\nc").collect::<Vec<_>>();
    assert_eq!(
        stream,
        vec![
            Token::new(TokenKind::Comment, 9),
            Token::new(TokenKind::Whitespace, 1),
            Token::new(TokenKind::Ident, 1),
        ]
    );

    // # Case 2
    let stream = tokenize("a // comment").collect::<Vec<_>>();
    assert_eq!(stream.last(), Some(&Token::new(TokenKind::Comment, 10)));
}

#[test]
fn token_lex_annotations() {
    // # Case 1
    assert_eq!(
        kinds(r#"@display("i=block/app;p=10,20")"#),
        vec![
            TokenKind::Annotation,
            TokenKind::TagList { terminated: true }
        ]
    );

    // # Case 2
    let stream = tokenize("@statistic[rtt*](record=max)").collect::<Vec<_>>();
    assert_eq!(stream[0], Token::new(TokenKind::Annotation, 16));
    assert_eq!(stream[1], Token::new(TokenKind::TagList { terminated: true }, 12));

    // # Case 3
    // empty index brackets are not part of the name
    assert_eq!(
        kinds("@foo[]"),
        vec![
            TokenKind::Annotation,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket
        ]
    );

    // # Case 4
    // nested parens and closing parens in strings
    let stream = tokenize(r#"@a(x=(1,2); y=")") z"#).collect::<Vec<_>>();
    assert_eq!(stream[1], Token::new(TokenKind::TagList { terminated: true }, 16));

    // # Case 5
    assert_eq!(
        kinds("@a (b"),
        vec![
            TokenKind::Annotation,
            TokenKind::Whitespace,
            TokenKind::TagList { terminated: false }
        ]
    );
}

#[test]
fn token_lex_invalid() {
    assert_eq!(kinds("a€"), vec![TokenKind::Ident, TokenKind::Unknown]);
    assert_eq!(kinds("äbc"), vec![TokenKind::InvalidIdent]);
    assert_eq!(kinds("abä"), vec![TokenKind::InvalidIdent]);
    assert!(!TokenKind::Unknown.valid());
    assert!(TokenKind::Ident.valid());
}

#[test]
fn ident_checks() {
    assert!(is_ident("abc_1"));
    assert!(is_ident("_x"));
    assert!(!is_ident("1x"));
    assert!(!is_ident(""));
}
