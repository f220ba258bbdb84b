use crate::{
    ast::{
        parse::*, parse_expr_with, parse_items, Assign, Body, Comment, CommentBlock, Delimited,
        Delimiter, DotDot, Expr, Ident, Keyword, Restrictions, Semi, TokenKind, TypeRef,
    },
    error::{Error, ErrorKind, Result},
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A connection such as `a.out[i] --> Eth100M --> b.in++ for i=0..n-1;`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    /// The endpoint written left of the arrow.
    pub lhs: GateRef,
    pub arrow: Arrow,
    pub arrow_span: Span,
    pub channel: Option<ChannelSpec>,
    /// The endpoint written right of the arrow.
    pub rhs: GateRef,
    pub modifiers: Vec<Modifier>,
    pub doc: Option<CommentBlock>,
    pub trailing: Option<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arrow {
    /// `-->`
    Right,
    /// `<--`
    Left,
    /// `<-->`
    Bidir,
}

///
/// The channel between the two arrows of a connection,
/// e.g. `link: Ethernet { length = 10m; }`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSpec {
    pub name: Option<Ident>,
    pub ty: Option<TypeRef>,
    pub body: Option<Body>,
    pub second_arrow: Span,
    pub span: Span,
}

///
/// A connection endpoint. The module path is empty for gates
/// of the enclosing module.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateRef {
    pub module: Vec<PathSegment>,
    pub gate: GatePart,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSegment {
    pub name: Ident,
    pub index: Option<Expr>,
    pub span: Span,
}

///
/// The gate itself: `name[i]$o`, `name$i[j]` or `name++`. The index may
/// follow the name, the subgate, or both.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatePart {
    pub name: Ident,
    pub index: Option<Expr>,
    pub subgate: Option<Subgate>,
    pub subgate_index: Option<Expr>,
    pub plusplus: bool,
    pub span: Span,
}

impl GatePart {
    /// The indices given, in source order.
    pub fn indices(&self) -> impl Iterator<Item = &Expr> {
        self.index.iter().chain(self.subgate_index.iter())
    }

    pub fn is_indexed(&self) -> bool {
        self.indices().next().is_some()
    }
}

/// The half of an inout gate, `$i` or `$o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Subgate {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Modifier {
    Loop(LoopClause),
    Condition(Expr),
}

/// `for i=0..n-1`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopClause {
    pub var: Ident,
    pub from: Expr,
    pub to: Expr,
    pub span: Span,
}

///
/// A block of connections guarded by a condition or repeated by loops.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionGroup {
    pub header: GroupHeader,
    pub items: Vec<ConnectionItem>,
    pub doc: Option<CommentBlock>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GroupHeader {
    If(Expr),
    For(Vec<LoopClause>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConnectionItem {
    Connection(Connection),
    Group(ConnectionGroup),
    Error(ErrorNode),
}

impl Connection {
    /// The endpoint the arrow points away from.
    pub fn source(&self) -> &GateRef {
        match self.arrow {
            Arrow::Left => &self.rhs,
            Arrow::Right | Arrow::Bidir => &self.lhs,
        }
    }

    /// The endpoint the arrow points to.
    pub fn destination(&self) -> &GateRef {
        match self.arrow {
            Arrow::Left => &self.lhs,
            Arrow::Right | Arrow::Bidir => &self.rhs,
        }
    }

    pub fn is_bidirectional(&self) -> bool {
        self.arrow == Arrow::Bidir
    }
}

impl Arrow {
    pub fn from_token(kind: &TokenKind) -> Option<Arrow> {
        match kind {
            TokenKind::RSingleArrow => Some(Arrow::Right),
            TokenKind::LSingleArrow => Some(Arrow::Left),
            TokenKind::LSingleArrowR => Some(Arrow::Bidir),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arrow::Right => "-->",
            Arrow::Left => "<--",
            Arrow::Bidir => "<-->",
        }
    }
}

impl Subgate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subgate::In => "i",
            Subgate::Out => "o",
        }
    }
}

fn parse_arrow(input: ParseStream<'_>) -> Result<(Arrow, Span)> {
    match input.peek_kind().and_then(Arrow::from_token) {
        Some(arrow) => {
            let span = input.peek_span();
            input.ts.bump();
            Ok((arrow, span))
        }
        None => Err(input.expected("connection arrow")),
    }
}

/// Whether another arrow follows before the end of the statement.
fn has_second_arrow(input: ParseStream<'_>) -> bool {
    let mut n = 0;
    while input.ts.peek_nth(n).is_some() {
        match input.peek_nth_kind(n) {
            Some(TokenKind::Semi) => return false,
            Some(kind) if Arrow::from_token(kind).is_some() => return true,
            _ => n += 1,
        }
    }
    false
}

impl Parse for Connection {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let lhs = GateRef::parse(input)?;
        let (arrow, arrow_span) = parse_arrow(input)?;

        let channel = if has_second_arrow(input) {
            let channel = ChannelSpec::parse(input)?;
            let second = parse_arrow(input)?;
            if second.0 != arrow {
                return Err(Error::new(
                    ErrorKind::MismatchedArrows,
                    format!(
                        "mismatched arrows '{}' and '{}'",
                        arrow.as_str(),
                        second.0.as_str()
                    ),
                    second.1,
                ));
            }
            Some(ChannelSpec {
                second_arrow: second.1,
                span: Span::fromto(channel.span, second.1),
                ..channel
            })
        } else {
            None
        };

        let rhs = GateRef::parse(input)?;
        let modifiers = parse_modifiers(input)?;
        let semi = Semi::parse(input)?;
        let trailing = input.trailing();

        Ok(Connection {
            span: Span::fromto(lhs.span, semi.span),
            lhs,
            arrow,
            arrow_span,
            channel,
            rhs,
            modifiers,
            doc,
            trailing,
        })
    }
}

fn parse_modifiers(input: ParseStream<'_>) -> Result<Vec<Modifier>> {
    let starts_modifier = |n: usize| {
        input.peek_nth_keyword(n, Keyword::For) || input.peek_nth_keyword(n, Keyword::If)
    };

    let mut modifiers = Vec::new();
    if input.peek_is(&TokenKind::Comma) && starts_modifier(1) {
        input.ts.bump();
    }
    if !starts_modifier(0) {
        return Ok(modifiers);
    }

    loop {
        if input.eat_keyword(Keyword::If).is_some() {
            modifiers.push(Modifier::Condition(Expr::parse(input)?));
        } else if input.peek_keyword(Keyword::For) {
            modifiers.push(Modifier::Loop(LoopClause::parse(input)?));
        } else {
            return Err(input.expected("'for' or 'if'"));
        }

        if input.eat(&TokenKind::Comma).is_none() {
            return Ok(modifiers);
        }
    }
}

impl Parse for ChannelSpec {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let start = input.peek_span();

        let name = if input.peek_ident() && input.peek_nth_kind(1) == Some(&TokenKind::Colon) {
            let name = Ident::parse(input)?;
            input.ts.bump();
            Some(name)
        } else {
            None
        };

        let ty = if input.peek_is(&TokenKind::Lt) || input.peek_ident() {
            Some(TypeRef::parse(input)?)
        } else {
            None
        };

        let body = if input.peek_delim() == Some(Delimiter::Brace) {
            Some(Body::parse(input)?)
        } else {
            None
        };

        if name.is_none() && ty.is_none() && body.is_none() {
            return Err(input.expected("channel specification"));
        }

        Ok(ChannelSpec {
            name,
            ty,
            body,
            second_arrow: Span::default(),
            span: Span::fromto(start, input.prev_span()),
        })
    }
}

impl Parse for GateRef {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let start = input.peek_span();
        let mut module = Vec::new();

        loop {
            let name = Ident::parse(input)?;
            let index = parse_index(input)?;

            let is_module = !input.peek_is(&TokenKind::Dollar)
                && !input.peek_is(&TokenKind::PlusPlus)
                && input.peek_is(&TokenKind::Dot)
                && matches!(input.peek_nth_kind(1), Some(TokenKind::Ident(_)));

            if is_module {
                module.push(PathSegment {
                    span: Span::fromto(name.span, input.prev_span()),
                    name,
                    index,
                });
                input.ts.bump();
                continue;
            }

            let gate = parse_gate_part(input, name, index)?;
            return Ok(GateRef {
                module,
                gate,
                span: Span::fromto(start, input.prev_span()),
            });
        }
    }
}

fn parse_index(input: ParseStream<'_>) -> Result<Option<Expr>> {
    if input.peek_delim() == Some(Delimiter::Bracket) {
        Ok(Some(
            Delimited::<Expr>::parse_from(Delimiter::Bracket, input)?.inner,
        ))
    } else {
        Ok(None)
    }
}

fn parse_gate_part(input: ParseStream<'_>, name: Ident, index: Option<Expr>) -> Result<GatePart> {
    let mut subgate_index = None;
    let subgate = if input.eat(&TokenKind::Dollar).is_some() {
        let ident = Ident::parse(input)?;
        let subgate = match ident.as_str() {
            "i" => Subgate::In,
            "o" => Subgate::Out,
            other => {
                return Err(Error::new(
                    ErrorKind::UnexpectedToken,
                    format!("expected subgate 'i' or 'o', found '{}'", other),
                    ident.span,
                ))
            }
        };
        subgate_index = parse_index(input)?;
        Some(subgate)
    } else {
        None
    };

    // "name$i[0]++" has no production
    let plusplus = subgate_index.is_none() && input.eat(&TokenKind::PlusPlus).is_some();

    Ok(GatePart {
        span: Span::fromto(name.span, input.prev_span()),
        name,
        index,
        subgate,
        subgate_index,
        plusplus,
    })
}

impl Parse for LoopClause {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let Some(start) = input.eat_keyword(Keyword::For) else {
            return Err(input.expected("keyword 'for'"));
        };
        let var = Ident::parse(input)?;
        Assign::parse(input)?;
        let from = parse_expr_with(input, Restrictions::CONDITION)?;
        DotDot::parse(input)?;
        let to = parse_expr_with(input, Restrictions::CONDITION)?;

        Ok(LoopClause {
            span: Span::fromto(start, input.prev_span()),
            var,
            from,
            to,
        })
    }
}

impl Parse for ConnectionGroup {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let start = input.peek_span();

        let header = if input.eat_keyword(Keyword::If).is_some() {
            GroupHeader::If(parse_expr_with(input, Restrictions::CONDITION)?)
        } else {
            let mut loops = vec![LoopClause::parse(input)?];
            while input.eat(&TokenKind::Comma).is_some() {
                loops.push(LoopClause::parse(input)?);
            }
            GroupHeader::For(loops)
        };

        let delim = Delimited::parse_with(Delimiter::Brace, input, |inner| {
            parse_items(inner, SyncPoint::Body, ConnectionItem::Error)
        })?;
        let end = input
            .eat(&TokenKind::Semi)
            .unwrap_or(delim.delim_span.close);

        Ok(ConnectionGroup {
            header,
            items: delim.inner,
            doc,
            span: Span::fromto(start, end),
        })
    }
}

impl Parse for ConnectionItem {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek_keyword(Keyword::If) || input.peek_keyword(Keyword::For) {
            ConnectionGroup::parse(input).map(ConnectionItem::Group)
        } else {
            Connection::parse(input).map(ConnectionItem::Connection)
        }
    }
}

impl Spanned for Connection {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for ConnectionGroup {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for ConnectionItem {
    fn span(&self) -> Span {
        match self {
            ConnectionItem::Connection(conn) => conn.span,
            ConnectionItem::Group(group) => group.span,
            ConnectionItem::Error(node) => node.span,
        }
    }
}

impl Spanned for GateRef {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for GateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.module {
            write!(f, "{}", segment.name)?;
            if let Some(index) = &segment.index {
                write!(f, "[{}]", index)?;
            }
            write!(f, ".")?;
        }

        let gate = &self.gate;
        write!(f, "{}", gate.name)?;
        if let Some(index) = &gate.index {
            write!(f, "[{}]", index)?;
        }
        if let Some(subgate) = gate.subgate {
            write!(f, "${}", subgate.as_str())?;
        }
        if let Some(index) = &gate.subgate_index {
            write!(f, "[{}]", index)?;
        }
        if gate.plusplus {
            write!(f, "++")?;
        }
        Ok(())
    }
}

impl fmt::Display for LoopClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for {}={}..{}", self.var, self.from, self.to)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Loop(clause) => write!(f, "{}", clause),
            Modifier::Condition(cond) => write!(f, "if {}", cond),
        }
    }
}

impl fmt::Display for GroupHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupHeader::If(cond) => write!(f, "if {}", cond),
            GroupHeader::For(loops) => {
                for (i, clause) in loops.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", clause)?;
                }
                Ok(())
            }
        }
    }
}
