//!
//! The raw lexer.
//!
//! Splits a source buffer into flat tokens that only know their kind
//! and their byte length. Positions, keywords and literal values
//! are resolved when the tokens are cooked into a [`TokenStream`](crate::ast::TokenStream).
//!

use self::LiteralKind::*;
use self::TokenKind::*;
use cursor::Cursor;

mod cursor;

#[cfg(test)]
mod tests;

/// Creates an iterator that produces tokens from the input string.
pub fn tokenize(input: &str) -> impl Iterator<Item = Token> + '_ {
    let mut cursor = Cursor::new(input);
    let mut pending_tags = false;
    std::iter::from_fn(move || {
        if cursor.is_eof() {
            None
        } else {
            cursor.reset_len_consumed();
            let token = if pending_tags && cursor.first() == '(' {
                cursor.tag_list()
            } else {
                cursor.advance_token()
            };

            // A tag list may be separated from its property by whitespace
            pending_tags = match token.kind {
                Annotation => true,
                Whitespace => pending_tags,
                _ => false,
            };
            Some(token)
        }
    })
}

///
/// A raw syntactical element of a source asset.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The type of token encountered.
    pub kind: TokenKind,
    /// The number of bytes of the token.
    pub len: usize,
}

impl Token {
    pub fn new(kind: TokenKind, len: usize) -> Self {
        Self { kind, len }
    }
}

///
/// The tokens type.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TokenKind {
    /// A single line comment, possibly continued by a trailing backslash.
    Comment,
    /// Any whitespace characters sequence.
    Whitespace,
    /// Any token that can be either a name or a keyword.
    Ident,
    /// An identifier containing non-ASCII characters.
    InvalidIdent,
    /// A literal value.
    Literal {
        kind: LiteralKind,
        suffix_start: usize,
    },
    /// A property name "@name" or "@name[index]".
    Annotation,
    /// The raw parenthesized tag list directly following an annotation.
    TagList { terminated: bool },

    /// ";"
    Semi,
    /// ","
    Comma,
    /// "."
    Dot,
    /// "("
    OpenParen,
    /// ")"
    CloseParen,
    /// "{"
    OpenBrace,
    /// "}"
    CloseBrace,
    /// "["
    OpenBracket,
    /// "]"
    CloseBracket,
    /// "@" without a property name
    At,
    /// "#"
    Pound,
    /// "~"
    Tilde,
    /// "?"
    Question,
    /// ":"
    Colon,
    /// "$"
    Dollar,
    /// "="
    Eq,
    /// "!"
    Bang,
    /// "<"
    Lt,
    /// ">"
    Gt,
    /// "-"
    Minus,
    /// "&"
    And,
    /// "|"
    Or,
    /// "+"
    Plus,
    /// "*"
    Star,
    /// "/"
    Slash,
    /// "^"
    Caret,
    /// "%"
    Percent,

    /// Unknown token, not expected by the lexer, e.g. "â„–"
    Unknown,
}

impl TokenKind {
    ///
    /// Indicates whether this token carries no meaning for the parser.
    ///
    pub fn is_trivia(&self) -> bool {
        matches!(self, Comment | Whitespace)
    }

    ///
    /// Indicates whether the token is valid in a NED file.
    /// Invalid tokens are reported as lexical errors.
    ///
    pub fn valid(&self) -> bool {
        !matches!(
            self,
            InvalidIdent
                | Unknown
                | At
                | TagList { terminated: false }
                | Literal {
                    kind: Str { terminated: false }
                        | Xml { terminated: false }
                        | Int { empty_int: true, .. },
                    ..
                }
        )
    }
}

///
/// A literal value definition token.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LiteralKind {
    /// "12", "0xff"
    Int { base: Base, empty_int: bool },
    /// "1.5", "2e-3"
    Float,
    /// "\"abc\""
    Str { terminated: bool },
    /// "'<xml/>'"
    Xml { terminated: bool },
}

///
/// The numeric bases numbers can be written in.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Base {
    Hexadecimal,
    Decimal,
}

impl Base {
    pub fn radix(&self) -> u32 {
        match self {
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }
}

/// True if `c` is considered a whitespace.
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        // Usual ASCII suspects
        '\u{0009}'   // \t
        | '\u{000A}' // \n
        | '\u{000B}' // vertical tab
        | '\u{000C}' // form feed
        | '\u{000D}' // \r
        | '\u{0020}' // space

        // NEXT LINE from latin1
        | '\u{0085}'

        // Bidi markers
        | '\u{200E}' // LEFT-TO-RIGHT MARK
        | '\u{200F}' // RIGHT-TO-LEFT MARK

        // Dedicated whitespace characters from Unicode
        | '\u{2028}' // LINE SEPARATOR
        | '\u{2029}' // PARAGRAPH SEPARATOR
    )
}

/// True if `c` is valid as a first character of an identifier.
pub fn is_id_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// True if `c` is valid as a non-first character of an identifier.
pub fn is_id_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// True if `c` would be part of an identifier in a unicode-aware language.
fn is_foreign_id_char(c: char) -> bool {
    !c.is_ascii()
        && (unicode_xid::UnicodeXID::is_xid_continue(c)
            || unic_emoji_char::is_emoji(c)
            || c == '\u{200d}')
}

/// True if `c` may continue a property name.
fn is_prop_continue(c: char) -> bool {
    is_id_continue(c) || matches!(c, ':' | '.' | '-')
}

/// True if `c` may continue a property index.
fn is_prop_index_continue(c: char) -> bool {
    is_prop_continue(c) || matches!(c, '*' | '?' | '{' | '}')
}

/// The passed string is lexically a plain identifier.
pub fn is_ident(string: &str) -> bool {
    let mut chars = string.chars();
    if let Some(start) = chars.next() {
        is_id_start(start) && chars.all(is_id_continue)
    } else {
        false
    }
}

impl Cursor<'_> {
    /// Parses a token from the input string.
    fn advance_token(&mut self) -> Token {
        let Some(first_char) = self.bump() else {
            return Token::new(Whitespace, 0);
        };
        let token_kind = match first_char {
            // Slash or comment.
            '/' => match self.first() {
                '/' => self.line_comment(),
                _ => Slash,
            },

            c if is_id_start(c) => self.ident_or_invalid(),
            c if is_whitespace(c) => self.whitespace(),
            c if is_foreign_id_char(c) => self.fake_ident(),

            // Numeric literal.
            c @ '0'..='9' => {
                let literal_kind = self.number(c);
                let suffix_start = self.len_consumed();
                self.eat_literal_suffix();
                TokenKind::Literal {
                    kind: literal_kind,
                    suffix_start,
                }
            }

            '"' => {
                let terminated = self.double_quoted_string();
                let suffix_start = self.len_consumed();
                TokenKind::Literal {
                    kind: Str { terminated },
                    suffix_start,
                }
            }
            '\'' => {
                let terminated = self.single_quoted_string();
                let suffix_start = self.len_consumed();
                TokenKind::Literal {
                    kind: Xml { terminated },
                    suffix_start,
                }
            }

            '@' => self.annotation(),

            // One-symbol tokens.
            ';' => Semi,
            ',' => Comma,
            '.' => Dot,
            '(' => OpenParen,
            ')' => CloseParen,
            '{' => OpenBrace,
            '}' => CloseBrace,
            '[' => OpenBracket,
            ']' => CloseBracket,
            '#' => Pound,
            '~' => Tilde,
            '?' => Question,
            ':' => Colon,
            '$' => Dollar,
            '=' => Eq,
            '!' => Bang,
            '<' => Lt,
            '>' => Gt,
            '-' => Minus,
            '&' => And,
            '|' => Or,
            '+' => Plus,
            '*' => Star,
            '^' => Caret,
            '%' => Percent,

            _ => Unknown,
        };

        Token::new(token_kind, self.len_consumed())
    }

    fn line_comment(&mut self) -> TokenKind {
        debug_assert!(self.prev() == '/' && self.first() == '/');
        self.bump();

        let mut last = '/';
        loop {
            while !self.is_eof() && self.first() != '\n' {
                if let Some(c) = self.bump() {
                    if c != '\r' {
                        last = c;
                    }
                }
            }

            // A trailing backslash continues the comment on the next line
            if last == '\\' && self.first() == '\n' {
                self.bump();
                last = '\n';
                continue;
            }
            break;
        }
        Comment
    }

    fn whitespace(&mut self) -> TokenKind {
        debug_assert!(is_whitespace(self.prev()));
        self.eat_while(is_whitespace);
        Whitespace
    }

    fn ident_or_invalid(&mut self) -> TokenKind {
        debug_assert!(is_id_start(self.prev()));
        // Start is already eaten, eat the rest of identifier.
        self.eat_while(is_id_continue);
        if is_foreign_id_char(self.first()) {
            self.fake_ident()
        } else {
            Ident
        }
    }

    fn fake_ident(&mut self) -> TokenKind {
        self.eat_while(|c| is_id_continue(c) || is_foreign_id_char(c));
        InvalidIdent
    }

    fn annotation(&mut self) -> TokenKind {
        debug_assert!(self.prev() == '@');
        if !is_id_start(self.first()) {
            return At;
        }

        self.eat_while(is_prop_continue);

        // An index needs at least one char, "@name[]" is left to the parser.
        if self.first() == '[' && is_id_start(self.second()) {
            let mut n = 2;
            while is_prop_index_continue(self.nth_char(n)) {
                n += 1;
            }
            if self.nth_char(n) == ']' {
                for _ in 0..=n {
                    self.bump();
                }
            }
        }

        Annotation
    }

    fn tag_list(&mut self) -> Token {
        debug_assert!(self.first() == '(');
        self.bump();

        let mut depth = 1usize;
        let mut terminated = false;
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '"' => {
                    self.double_quoted_string();
                }
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        terminated = true;
                        break;
                    }
                }
                _ => {}
            }
        }

        Token::new(TagList { terminated }, self.len_consumed())
    }

    fn double_quoted_string(&mut self) -> bool {
        debug_assert!(self.prev() == '"');
        while let Some(c) = self.bump() {
            match c {
                '"' => return true,
                '\\' => {
                    // Bump again to skip the escaped character.
                    self.bump();
                }
                _ => (),
            }
        }
        // End of file reached.
        false
    }

    fn single_quoted_string(&mut self) -> bool {
        debug_assert!(self.prev() == '\'');
        while let Some(c) = self.bump() {
            if c == '\'' {
                return true;
            }
        }
        false
    }

    fn number(&mut self, first_digit: char) -> LiteralKind {
        debug_assert!('0' <= self.prev() && self.prev() <= '9');
        if first_digit == '0' && matches!(self.first(), 'x' | 'X') {
            self.bump();
            let has_digits = self.eat_hexadecimal_digits();
            return Int {
                base: Base::Hexadecimal,
                empty_int: !has_digits,
            };
        }

        self.eat_decimal_digits();
        self.fraction_and_exponent()
    }

    ///
    /// Eats an optional fraction and exponent after the integral digits.
    /// Neither is greedy: "1..3" and "1.foo" keep their dots, "1em" has
    /// the unit "em".
    ///
    fn fraction_and_exponent(&mut self) -> LiteralKind {
        let mut is_float = false;
        if self.first() == '.' && self.second().is_ascii_digit() {
            self.bump();
            self.eat_decimal_digits();
            is_float = true;
        }

        if matches!(self.first(), 'e' | 'E') {
            let has_exp = match self.second() {
                '+' | '-' => self.nth_char(2).is_ascii_digit(),
                c => c.is_ascii_digit(),
            };
            if has_exp {
                self.bump();
                self.eat_float_exponent();
                is_float = true;
            }
        }

        if is_float {
            Float
        } else {
            Int {
                base: Base::Decimal,
                empty_int: false,
            }
        }
    }

    fn eat_decimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        while self.first().is_ascii_digit() {
            has_digits = true;
            self.bump();
        }
        has_digits
    }

    fn eat_hexadecimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        while self.first().is_ascii_hexdigit() {
            has_digits = true;
            self.bump();
        }
        has_digits
    }

    fn eat_float_exponent(&mut self) -> bool {
        debug_assert!(self.prev() == 'e' || self.prev() == 'E');
        if self.first() == '-' || self.first() == '+' {
            self.bump();
        }
        self.eat_decimal_digits()
    }

    ///
    /// Eats a chain of units and numbers, so that "3h20min" forms
    /// one token.
    ///
    fn eat_literal_suffix(&mut self) {
        loop {
            if !self.first().is_ascii_alphabetic() && self.first() != '_' {
                return;
            }
            self.eat_while(|c| c.is_ascii_alphabetic() || c == '_');

            let number_follows = self.first().is_ascii_digit()
                || (self.first() == '.' && self.second().is_ascii_digit());
            if !number_follows {
                return;
            }
            self.eat_decimal_digits();
            self.fraction_and_exponent();
        }
    }
}
