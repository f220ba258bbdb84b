use crate::ast::{Keyword, TokenKind};
use serde::Serialize;
use std::fmt;

/// The precedence of the conditional operator `?:`.
pub(crate) const PREC_TERNARY: u8 = 1;
/// The precedence of prefix operators.
pub(crate) const PREC_UNARY: u8 = 11;
/// The precedence of literals, names, calls and other atoms.
pub(crate) const PREC_ATOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    /// "-"
    Neg,
    /// "!"
    Not,
    /// "~"
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    /// "^"
    Pow,
    /// "*"
    Mul,
    /// "/"
    Div,
    /// "%"
    Rem,
    /// "+"
    Add,
    /// "-"
    Sub,
    /// "<<"
    Shl,
    /// ">>"
    Shr,
    /// "&"
    BitAnd,
    /// "#"
    BitXor,
    /// "|"
    BitOr,
    /// "=="
    Eq,
    /// "!="
    Ne,
    /// ">"
    Gt,
    /// ">="
    Ge,
    /// "<"
    Lt,
    /// "<="
    Le,
    /// "<=>"
    Cmp,
    /// "match"
    Match,
    /// "&&"
    And,
    /// "^^"
    Xor,
    /// "||"
    Or,
}

impl UnaryOp {
    pub(crate) fn from_token(kind: &TokenKind) -> Option<UnaryOp> {
        match kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

impl BinOp {
    pub(crate) fn from_token(kind: &TokenKind) -> Option<BinOp> {
        use BinOp::*;
        Some(match kind {
            TokenKind::Caret => Pow,
            TokenKind::Star => Mul,
            TokenKind::Slash => Div,
            TokenKind::Percent => Rem,
            TokenKind::Plus => Add,
            TokenKind::Minus => Sub,
            TokenKind::Shl => Shl,
            TokenKind::Shr => Shr,
            TokenKind::And => BitAnd,
            TokenKind::Pound => BitXor,
            TokenKind::Or => BitOr,
            TokenKind::EqEq => Eq,
            TokenKind::Ne => Ne,
            TokenKind::Gt => Gt,
            TokenKind::Ge => Ge,
            TokenKind::Lt => Lt,
            TokenKind::Le => Le,
            TokenKind::Spaceship => Cmp,
            TokenKind::Keyword(Keyword::Match) => Match,
            TokenKind::AndAnd => And,
            TokenKind::CaretCaret => Xor,
            TokenKind::OrOr => Or,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        use BinOp::*;
        match self {
            Pow => "^",
            Mul => "*",
            Div => "/",
            Rem => "%",
            Add => "+",
            Sub => "-",
            Shl => "<<",
            Shr => ">>",
            BitAnd => "&",
            BitXor => "#",
            BitOr => "|",
            Eq => "==",
            Ne => "!=",
            Gt => ">",
            Ge => ">=",
            Lt => "<",
            Le => "<=",
            Cmp => "<=>",
            Match => "match",
            And => "&&",
            Xor => "^^",
            Or => "||",
        }
    }

    /// Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        use BinOp::*;
        match self {
            Pow => 10,
            Mul | Div | Rem => 9,
            Add | Sub => 8,
            Shl | Shr => 7,
            BitAnd => 6,
            BitXor => 5,
            BitOr => 4,
            Eq | Ne | Gt | Ge | Lt | Le | Cmp | Match => 3,
            And | Xor | Or => 2,
        }
    }

    pub fn is_right_assoc(&self) -> bool {
        matches!(self, BinOp::Pow)
    }

    /// The binding powers to the left and to the right of the operator.
    pub(crate) fn binding_power(&self) -> (u8, u8) {
        let p = self.precedence() * 2;
        if self.is_right_assoc() {
            (p, p)
        } else {
            (p, p + 1)
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
