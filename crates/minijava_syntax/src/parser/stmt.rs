//! Statement Parser
//!
//! 语句以 `;` 结束，块语句以 `{ }` 界定。`else` 总是归属于最近的、
//! 尚未配对的 `if`：内层 `if` 的解析会先把紧随其后的 `else` 吃掉。

use super::Parser;
use crate::ast::{Expr, Recur, Stmt};
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::TokenKind;

/// 语句开头可以出现的 token
const STATEMENT_START: &[&str] = &[
    "`{`",
    "`if`",
    "`while`",
    "`System.out.println`",
    "identifier",
    "`recur`",
];

pub(crate) const MISPLACED_RECUR: &str = "`recur` may only replace a method's trailing `return`";

impl Parser {
    /// 单条语句；出错时向上传播
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Println => self.parse_print(),
            TokenKind::Ident => self.parse_assignment(),
            TokenKind::Recur => self.parse_recur().map(Stmt::Recur),
            _ => Err(SyntaxError::unexpected(self.current(), STATEMENT_START)),
        }
    }

    /// 恢复点：出错时记录诊断，跳到下一个边界，返回占位语句
    pub(crate) fn parse_statement_recovering(&mut self) -> Stmt {
        let from = self.pos;
        let start = self.current().span.start;
        match self.parse_statement() {
            Ok(stmt) => stmt,
            Err(err) => {
                self.report(err);
                self.synchronize(from);
                Stmt::Error {
                    span: self.span_from(start),
                }
            }
        }
    }

    /// 语句列表，停在 `}`、文件结束或新的声明之前
    pub(crate) fn parse_statement_list(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.at_statement_list_end() {
            statements.push(self.parse_statement_recovering());
        }
        statements
    }

    pub(crate) fn at_statement_list_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::RBrace | TokenKind::Eof | TokenKind::Class | TokenKind::Public
        )
    }

    fn parse_block(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::LBrace)?.span.start;
        let statements = self.parse_statement_list();
        self.expect(TokenKind::RBrace)?;
        Ok(Stmt::Block {
            span: self.span_from(start),
            statements,
        })
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::If)?.span.start;
        let condition = self.parse_parenthesized()?;
        let then_branch = self.parse_statement()?;

        let else_branch = if self.eat(TokenKind::Else) {
            self.parse_statement()?
        } else {
            // 两个分支都是必需的：报告后以占位分支继续，保留已解析的结构
            let err = SyntaxError::unexpected(self.current(), &["`else`"])
                .with_note("both branches of an `if` statement are required");
            self.report(err);
            let at = self.current().span.start;
            Stmt::Error { span: at..at }
        };

        Ok(Stmt::If {
            span: self.span_from(start),
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::While)?.span.start;
        let condition = self.parse_parenthesized()?;
        let body = self.parse_statement()?;
        Ok(Stmt::While {
            span: self.span_from(start),
            condition,
            body: Box::new(body),
        })
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Println)?.span.start;
        let value = self.parse_parenthesized()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Print {
            span: self.span_from(start),
            value,
        })
    }

    /// `x = e;` 或 `a[i] = e;`
    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let start = self.current().span.start;
        let name = self.expect_ident()?;

        match self.current_kind() {
            TokenKind::Assign => {
                self.advance();
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Assign {
                    span: self.span_from(start),
                    name,
                    value,
                })
            }
            TokenKind::LBracket => {
                self.advance();
                let index = self.parse_expr()?;
                self.expect(TokenKind::RBracket)?;
                self.expect(TokenKind::Assign)?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::ArrayAssign {
                    span: self.span_from(start),
                    name,
                    index,
                    value,
                })
            }
            _ => Err(SyntaxError::unexpected(self.current(), &["`=`", "`[`"])),
        }
    }

    /// `recur ( cond ) ? ( a, b, ... ) : fallback ;`
    pub(crate) fn parse_recur(&mut self) -> ParseResult<Recur> {
        let start = self.expect(TokenKind::Recur)?.span.start;
        let condition = self.parse_parenthesized()?;
        self.expect(TokenKind::Question)?;
        self.expect(TokenKind::LParen)?;
        let args = self.parse_expr_list(TokenKind::RParen)?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Colon)?;
        let fallback = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Recur {
            span: self.span_from(start),
            condition,
            args,
            fallback,
        })
    }

    fn parse_parenthesized(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(expr)
    }

    /// 报告出现在方法结果位置以外的 `recur`
    pub(crate) fn report_misplaced_recur(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Recur(recur) => self.report_span(MISPLACED_RECUR, recur.span.clone()),
            Stmt::Block { statements, .. } => {
                for s in statements {
                    self.report_misplaced_recur(s);
                }
            }
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.report_misplaced_recur(then_branch);
                self.report_misplaced_recur(else_branch);
            }
            Stmt::While { body, .. } => self.report_misplaced_recur(body),
            Stmt::Print { .. }
            | Stmt::Assign { .. }
            | Stmt::ArrayAssign { .. }
            | Stmt::Error { .. } => {}
        }
    }
}
