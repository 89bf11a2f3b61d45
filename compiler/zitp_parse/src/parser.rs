//! Recursive descent parser producing the typed syntax tree.

use tracing::debug;
use zitp_ir::{
    BinaryOp, Block, CallExpr, Expr, ExprKind, FunctionDef, Name, Program, Span, Stmt, StmtKind,
};
use zitp_lexer::{Token, TokenKind, TokenList};

use crate::{ErrorContext, ParseError};

/// Parser state.
pub struct Parser<'t> {
    /// Token list from lexer, terminated by `Eof`.
    tokens: &'t [Token],
    /// Current token index.
    pos: usize,
    /// Function table being filled as definitions are parsed.
    program: Program,
    /// Innermost construct being parsed, for error messages.
    context: ErrorContext,
}

impl<'t> Parser<'t> {
    /// Create a new parser.
    pub fn new(tokens: &'t TokenList) -> Self {
        Parser {
            tokens: &tokens.tokens,
            pos: 0,
            program: Program::default(),
            context: ErrorContext::Program,
        }
    }

    /// Parse a complete program.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let start = self.current_span();
        let mut stmts = Vec::new();
        while !self.at_end() {
            stmts.push(self.parse_stmt()?);
        }
        let span = start.merge(self.current_span());
        self.program.body = Block::new(stmts, span);

        debug!(
            statements = self.program.body.stmts.len(),
            functions = self.program.functions.len(),
            "parsed program"
        );
        Ok(self.program)
    }

    // ===== Token access =====

    fn current(&self) -> Option<&Token> {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
    }

    fn current_kind(&self) -> &TokenKind {
        self.current().map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn current_span(&self) -> Span {
        self.current().map_or(Span::DUMMY, |t| t.span)
    }

    fn peek_kind(&self, offset: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Step past the current token, returning its span.
    fn advance(&mut self) -> Span {
        let span = self.current_span();
        if !self.at_end() {
            self.pos += 1;
        }
        span
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consume `kind` if present.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected(kind.describe()))
        }
    }

    fn consume_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match *self.current_kind() {
            TokenKind::Ident(name) => Ok((name, self.advance())),
            _ => Err(self.expected("identifier")),
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        let found = self.current_kind();
        let message = if *found == TokenKind::Error {
            "unrecognized input".to_string()
        } else {
            format!("expected {what}, found {}", found.describe())
        };
        ParseError::new(message, self.current_span(), self.context)
    }

    /// Run `f` with `context` as the innermost construct.
    fn in_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    // ===== Statements =====

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.in_context(ErrorContext::Block, |p| {
            let start = p.consume(&TokenKind::LBrace)?;
            let mut stmts = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                if p.at_end() {
                    return Err(p.expected("`}`"));
                }
                stmts.push(p.parse_stmt()?);
            }
            let end = p.advance();
            Ok(Block::new(stmts, start.merge(end)))
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::Var => self.parse_declaration(),
            TokenKind::Fun => self.parse_function(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_keyword_expr(StmtKind::Return),
            TokenKind::Print => self.parse_keyword_expr(StmtKind::Print),
            TokenKind::Read => self.parse_read(),
            TokenKind::Call => {
                let start = self.advance();
                self.parse_call_stmt(start)
            }
            TokenKind::Ident(_) => {
                let start = self.current_span();
                match self.peek_kind(1) {
                    TokenKind::LParen => self.parse_call_stmt(start),
                    TokenKind::Assign => self.parse_assign(),
                    _ => self.in_context(ErrorContext::Statement, |p| {
                        p.advance();
                        Err(p.expected("`=` or `(`"))
                    }),
                }
            }
            _ => self.in_context(ErrorContext::Statement, |p| Err(p.expected("statement"))),
        }
    }

    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::Declaration, |p| {
            let start = p.advance();
            let mut names = vec![p.consume_ident()?.0];
            while p.eat(&TokenKind::Comma) {
                names.push(p.consume_ident()?.0);
            }
            let end = p.consume(&TokenKind::Semicolon)?;
            Ok(Stmt::new(StmtKind::Declaration(names), start.merge(end)))
        })
    }

    fn parse_function(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::FunctionDef, |p| {
            let start = p.advance();
            let (name, _) = p.consume_ident()?;
            p.consume(&TokenKind::LParen)?;
            let mut params = Vec::new();
            if !p.check(&TokenKind::RParen) {
                params.push(p.consume_ident()?.0);
                while p.eat(&TokenKind::Comma) {
                    params.push(p.consume_ident()?.0);
                }
            }
            p.consume(&TokenKind::RParen)?;
            let body = p.parse_block()?;
            let span = start.merge(body.span);
            let id = p.program.push_function(FunctionDef {
                name,
                params,
                body,
                span,
            });
            Ok(Stmt::new(StmtKind::Function(id), span))
        })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::IfStatement, |p| {
            let start = p.advance();
            let cond = p.parse_expr()?;
            let then_branch = p.parse_block()?;
            let else_branch = if p.eat(&TokenKind::Else) {
                if p.check(&TokenKind::If) {
                    let nested = p.parse_if()?;
                    let span = nested.span;
                    Block::new(vec![nested], span)
                } else {
                    p.parse_block()?
                }
            } else {
                Block::empty(Span::point(then_branch.span.end))
            };
            let span = start.merge(then_branch.span).merge(else_branch.span);
            Ok(Stmt::new(
                StmtKind::If {
                    cond,
                    then_branch,
                    else_branch,
                },
                span,
            ))
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::WhileLoop, |p| {
            let start = p.advance();
            let cond = p.parse_expr()?;
            let body = p.parse_block()?;
            let span = start.merge(body.span);
            Ok(Stmt::new(StmtKind::While { cond, body }, span))
        })
    }

    /// `return expr;` and `print expr;`.
    fn parse_keyword_expr(&mut self, make: fn(Expr) -> StmtKind) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::Statement, |p| {
            let start = p.advance();
            let value = p.parse_expr()?;
            let end = p.consume(&TokenKind::Semicolon)?;
            Ok(Stmt::new(make(value), start.merge(end)))
        })
    }

    fn parse_read(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::Statement, |p| {
            let start = p.advance();
            let (target, _) = p.consume_ident()?;
            let end = p.consume(&TokenKind::Semicolon)?;
            Ok(Stmt::new(StmtKind::Read(target), start.merge(end)))
        })
    }

    fn parse_assign(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::Statement, |p| {
            let (target, start) = p.consume_ident()?;
            p.consume(&TokenKind::Assign)?;
            let value = p.parse_expr()?;
            let end = p.consume(&TokenKind::Semicolon)?;
            Ok(Stmt::new(StmtKind::Assign { target, value }, start.merge(end)))
        })
    }

    fn parse_call_stmt(&mut self, start: Span) -> Result<Stmt, ParseError> {
        let call = self.parse_call()?;
        let end = self.in_context(ErrorContext::Statement, |p| {
            p.consume(&TokenKind::Semicolon)
        })?;
        Ok(Stmt::new(StmtKind::Call(call), start.merge(end)))
    }

    /// `IDENT '(' [expr (',' expr)*] ')'`
    fn parse_call(&mut self) -> Result<CallExpr, ParseError> {
        self.in_context(ErrorContext::FunctionCall, |p| {
            let (callee, start) = p.consume_ident()?;
            p.consume(&TokenKind::LParen)?;
            let mut args = Vec::new();
            if !p.check(&TokenKind::RParen) {
                args.push(p.parse_expr()?);
                while p.eat(&TokenKind::Comma) {
                    args.push(p.parse_expr()?);
                }
            }
            let end = p.consume(&TokenKind::RParen)?;
            Ok(CallExpr {
                callee,
                args,
                span: start.merge(end),
            })
        })
    }

    // ===== Expressions =====

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.in_context(ErrorContext::Expression, Self::parse_or)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_not()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Not) {
            let start = self.advance();
            let operand = self.parse_not()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(ExprKind::Not(Box::new(operand)), span));
        }
        self.parse_comparison()
    }

    /// Comparisons do not chain: `a < b < c` is a syntax error.
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_sum()?;
        let op = match self.current_kind() {
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::EqEq => BinaryOp::Eq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_sum()?;
        Ok(binary(op, left, right))
    }

    fn parse_sum(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_term()?;
            left = binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
    }

    /// Unary minus folds into an integer literal; elsewhere it is `0 - operand`.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if !self.check(&TokenKind::Minus) {
            return self.parse_primary();
        }
        let start = self.advance();
        if let TokenKind::Int(n) = *self.current_kind() {
            let end = self.current_span();
            let value = self.int_literal(-n, start.merge(end))?;
            self.advance();
            return Ok(Expr::new(ExprKind::Number(value), start.merge(end)));
        }
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span);
        let zero = Expr::new(ExprKind::Number(0), Span::point(start.start));
        Ok(Expr::new(
            ExprKind::Binary {
                op: BinaryOp::Sub,
                left: Box::new(zero),
                right: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        match *self.current_kind() {
            TokenKind::Int(n) => {
                let value = self.int_literal(n, span)?;
                self.advance();
                Ok(Expr::new(ExprKind::Number(value), span))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(true), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(false), span))
            }
            TokenKind::Ident(name) => {
                if *self.peek_kind(1) == TokenKind::LParen {
                    let call = self.parse_call()?;
                    let span = call.span;
                    return Ok(Expr::new(ExprKind::Apply(call), span));
                }
                self.advance();
                Ok(Expr::new(ExprKind::Var(name), span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                let end = self.consume(&TokenKind::RParen)?;
                Ok(Expr::new(inner.kind, span.merge(end)))
            }
            _ => Err(self.expected("expression")),
        }
    }

    fn int_literal(&self, value: i64, span: Span) -> Result<i32, ParseError> {
        i32::try_from(value).map_err(|_| {
            ParseError::new(
                format!("integer literal {value} does not fit in 32 bits"),
                span,
                self.context,
            )
        })
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

#[cfg(test)]
mod tests;
