//! Declaration Parser
//!
//! 顶层结构：主类、普通类、字段、方法与类型。

use super::Parser;
use crate::ast::{
    ClassDecl, Expr, MainClass, MethodDecl, MethodResult, Param, Program, Stmt, Type, VarDecl,
};
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::TokenKind;

const TYPE_START: &[&str] = &["`int`", "`boolean`", "identifier"];

impl Parser {
    /// 编译单元：主类，随后零个或多个类，直到输入结束
    pub(crate) fn parse_program(&mut self) -> Program {
        let start = self.current().span.start;

        let main = match self.parse_main_class() {
            Ok(main) => main,
            Err(err) => {
                let from = self.pos;
                self.report(err);
                self.synchronize_toplevel(from);
                MainClass {
                    span: self.span_from(start),
                    name: String::new(),
                    args_name: String::new(),
                    body: Stmt::Error {
                        span: self.span_from(start),
                    },
                }
            }
        };

        let mut classes = Vec::new();
        while !self.at_end() {
            let from = self.pos;
            if !self.check(TokenKind::Class) {
                let err = SyntaxError::unexpected(self.current(), &["`class`", "end of input"]);
                self.report(err);
                self.synchronize_toplevel(from);
                continue;
            }
            match self.parse_class() {
                Ok(class) => classes.push(class),
                Err(err) => {
                    self.report(err);
                    self.synchronize_toplevel(from);
                }
            }
        }

        Program {
            span: self.span_from(start),
            main,
            classes,
        }
    }

    /// `class N { public static void main ( String [ ] a ) { stmt } }`
    fn parse_main_class(&mut self) -> ParseResult<MainClass> {
        let start = self.expect(TokenKind::Class)?.span.start;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LBrace)?;
        self.expect(TokenKind::Public)?;
        self.expect(TokenKind::Static)?;
        self.expect(TokenKind::Void)?;

        // `main` 在词法上是普通标识符
        if !(self.check(TokenKind::Ident) && self.current().lexeme == "main") {
            return Err(SyntaxError::unexpected(self.current(), &["`main`"]));
        }
        self.advance();

        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::StringType)?;
        self.expect(TokenKind::LBracket)?;
        self.expect(TokenKind::RBracket)?;
        let args_name = self.expect_ident()?;
        self.expect(TokenKind::RParen)?;

        let body_start = self.expect(TokenKind::LBrace)?.span.start;
        let mut statements = self.parse_statement_list();
        // 缺少 `}` 时保留已解析的方法体
        if let Err(err) = self.expect(TokenKind::RBrace) {
            self.report(err);
        }
        let body_span = self.span_from(body_start);
        if let Err(err) = self.expect(TokenKind::RBrace) {
            self.report(err);
        }

        let body = if statements.len() == 1 {
            statements.remove(0)
        } else {
            self.report_span(
                "the main method body must hold exactly one statement",
                body_span.clone(),
            );
            Stmt::Block {
                span: body_span,
                statements,
            }
        };
        self.report_misplaced_recur(&body);

        Ok(MainClass {
            span: self.span_from(start),
            name,
            args_name,
            body,
        })
    }

    /// `class N [extends M] { field* method* }`
    fn parse_class(&mut self) -> ParseResult<ClassDecl> {
        let start = self.expect(TokenKind::Class)?.span.start;
        let name = self.expect_ident()?;
        let superclass = if self.eat(TokenKind::Extends) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        let mut methods: Vec<MethodDecl> = Vec::new();
        while !matches!(
            self.current_kind(),
            TokenKind::RBrace | TokenKind::Eof | TokenKind::Class
        ) {
            let from = self.pos;
            if self.check(TokenKind::Public) {
                match self.parse_method() {
                    Ok(method) => methods.push(method),
                    Err(err) => {
                        self.report(err);
                        self.synchronize_member(from);
                    }
                }
                continue;
            }
            match self.parse_var_decl() {
                Ok(field) => {
                    if !methods.is_empty() {
                        self.report_span(
                            "field declarations must precede method declarations",
                            field.span.clone(),
                        );
                    }
                    fields.push(field);
                }
                Err(err) => {
                    self.report(err);
                    self.synchronize_member(from);
                }
            }
        }
        // 缺少 `}` 时保留已解析的成员
        if let Err(err) = self.expect(TokenKind::RBrace) {
            self.report(err);
        }

        Ok(ClassDecl {
            span: self.span_from(start),
            name,
            superclass,
            fields,
            methods,
        })
    }

    /// `public T m ( T a, ... ) { local* stmt* (return e ; | recur ...) }`
    fn parse_method(&mut self) -> ParseResult<MethodDecl> {
        let start = self.expect(TokenKind::Public)?.span.start;
        let return_type = self.parse_type()?;
        let name = self.expect_ident()?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;

        let (locals, mut body) = self.parse_method_body();
        let result = self.parse_method_result(&mut body);

        // 结果之后不允许再有语句
        if !self.at_statement_list_end() {
            let err = SyntaxError::unexpected(self.current(), &["`}`"])
                .with_note("`return` or `recur` must be the last statement of a method");
            self.report(err);
            self.parse_statement_list();
        }
        if let Err(err) = self.expect(TokenKind::RBrace) {
            self.report(err);
        }

        for stmt in &body {
            self.report_misplaced_recur(stmt);
        }

        Ok(MethodDecl {
            span: self.span_from(start),
            name,
            return_type,
            params,
            locals,
            body,
            result,
        })
    }

    /// 局部变量与语句；声明出现在语句之后时照常保留，但报告顺序错误
    fn parse_method_body(&mut self) -> (Vec<VarDecl>, Vec<Stmt>) {
        let mut locals = Vec::new();
        let mut body = Vec::new();

        while !self.at_statement_list_end() && !self.check(TokenKind::Return) {
            if !self.at_var_decl() {
                body.push(self.parse_statement_recovering());
                continue;
            }
            let from = self.pos;
            match self.parse_var_decl() {
                Ok(local) => {
                    if !body.is_empty() {
                        self.report_span(
                            "local declarations must precede statements",
                            local.span.clone(),
                        );
                    }
                    locals.push(local);
                }
                Err(err) => {
                    self.report(err);
                    self.synchronize(from);
                }
            }
        }
        (locals, body)
    }

    /// `return e ;`，或把末尾的 `recur` 语句提升为方法结果
    fn parse_method_result(&mut self, body: &mut Vec<Stmt>) -> MethodResult {
        if self.check(TokenKind::Return) {
            let from = self.pos;
            let start = self.current().span.start;
            return match self.parse_return() {
                Ok(value) => MethodResult::Return {
                    span: self.span_from(start),
                    value,
                },
                Err(err) => {
                    self.report(err);
                    self.synchronize(from);
                    let span = self.span_from(start);
                    MethodResult::Return {
                        value: Expr::error(span.clone()),
                        span,
                    }
                }
            };
        }

        match body.last() {
            Some(Stmt::Recur(_)) => {
                if let Some(Stmt::Recur(recur)) = body.pop() {
                    return MethodResult::Recur(recur);
                }
            }
            // 末尾的 `recur` 本身解析失败，已经报告过
            Some(Stmt::Error { span }) if self.kind_at(span.start) == Some(TokenKind::Recur) => {
                let span = span.clone();
                body.pop();
                return MethodResult::Return {
                    value: Expr::error(span.clone()),
                    span,
                };
            }
            _ => {}
        }

        let err = SyntaxError::unexpected(self.current(), &["`return`", "`recur`"])
            .with_note("a method ends with `return expr;` or a `recur` statement");
        self.report(err);
        let at = self.current().span.start;
        MethodResult::Return {
            span: at..at,
            value: Expr::error(at..at),
        }
    }

    fn parse_return(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::Return)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(value)
    }

    /// 局部变量声明的开头：`int`、`boolean`，或者 `Ident Ident`
    fn at_var_decl(&self) -> bool {
        match self.current_kind() {
            TokenKind::Int | TokenKind::Boolean => true,
            TokenKind::Ident => self.peek_kind(1) == TokenKind::Ident,
            _ => false,
        }
    }

    /// `T x ;` (字段与局部变量)
    fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
        let start = self.current().span.start;
        let ty = self.parse_type()?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(VarDecl {
            span: self.span_from(start),
            name,
            ty,
        })
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        let start = self.current().span.start;
        let ty = self.parse_type()?;
        let name = self.expect_ident()?;
        Ok(Param {
            span: self.span_from(start),
            name,
            ty,
        })
    }

    /// `int[]`、`boolean`、`int` 或类名；一个 token 的前瞻即可区分
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        match self.current_kind() {
            TokenKind::Int => {
                self.advance();
                if self.eat(TokenKind::LBracket) {
                    self.expect(TokenKind::RBracket)?;
                    Ok(Type::IntArray)
                } else {
                    Ok(Type::Int)
                }
            }
            TokenKind::Boolean => {
                self.advance();
                Ok(Type::Boolean)
            }
            TokenKind::Ident => Ok(Type::Class(self.advance().lexeme)),
            _ => Err(SyntaxError::unexpected(self.current(), TYPE_START)),
        }
    }
}
