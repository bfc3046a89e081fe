//! Expression Parser
//!
//! Precedence climbing：先解析 primary，然后在循环中查 [`precedence`] 表，
//! 只要运算符的左结合力不低于当前门槛，就把它折叠进左操作数。

use super::precedence::{self, Operator};
use super::Parser;
use crate::ast::{Expr, ExprKind};
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::TokenKind;

/// primary 位置可以出现的 token
const PRIMARY_START: &[&str] = &[
    "integer literal",
    "`true`",
    "`false`",
    "identifier",
    "`this`",
    "`new`",
    "`(`",
    "`!`",
];

impl Parser {
    /// 完整表达式
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(0)
    }

    /// 解析结合力不低于 `min_bp` 的表达式
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut left = self.parse_primary()?;

        while let Some(op) = precedence::lookup(self.current_kind(), self.peek_kind(1)) {
            let bp = op.binding_power();
            if bp.left < min_bp {
                break;
            }
            let start = left.span.start;

            left = match op {
                Operator::Binary(bin_op) => {
                    self.advance();
                    let right = self.parse_expr_bp(bp.right)?;
                    ExprKind::Binary(Box::new(left), bin_op, Box::new(right))
                        .at(self.span_from(start))
                }
                Operator::Index => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    ExprKind::ArrayIndex {
                        array: Box::new(left),
                        index: Box::new(index),
                    }
                    .at(self.span_from(start))
                }
                Operator::Length => {
                    self.advance(); // .
                    self.advance(); // length
                    ExprKind::ArrayLength(Box::new(left)).at(self.span_from(start))
                }
                Operator::Call => {
                    self.advance(); // .
                    let method = self.expect_ident()?;
                    let args = self.parse_call_args()?;
                    ExprKind::MethodCall {
                        receiver: Box::new(left),
                        method,
                        args,
                    }
                    .at(self.span_from(start))
                }
            };
        }

        Ok(left)
    }

    /// `( expr, expr, ... )`，允许为空
    fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(TokenKind::LParen)?;
        let args = self.parse_expr_list(TokenKind::RParen)?;
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// 逗号分隔的表达式列表，遇到 `close` 时结束 (不消费 `close`)
    pub(crate) fn parse_expr_list(&mut self, close: TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let start = self.current().span.start;

        let kind = match self.current_kind() {
            TokenKind::IntLiteral(value) => {
                self.advance();
                ExprKind::IntLiteral(value)
            }
            TokenKind::True => {
                self.advance();
                ExprKind::BoolLiteral(true)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::BoolLiteral(false)
            }
            TokenKind::Ident => ExprKind::Identifier(self.advance().lexeme),
            TokenKind::This => {
                self.advance();
                ExprKind::This
            }
            // `!` 只作用于紧随其后的 primary
            TokenKind::Bang => {
                self.advance();
                let operand = self.parse_primary()?;
                ExprKind::Not(Box::new(operand))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                ExprKind::Paren(Box::new(inner))
            }
            TokenKind::New => {
                self.advance();
                self.parse_new()?
            }
            _ => return Err(SyntaxError::unexpected(self.current(), PRIMARY_START)),
        };

        Ok(kind.at(self.span_from(start)))
    }

    /// `new` 之后: `int [ expr ]` 或 `Name ( )`
    fn parse_new(&mut self) -> ParseResult<ExprKind> {
        match self.current_kind() {
            TokenKind::Int => {
                self.advance();
                self.expect(TokenKind::LBracket)?;
                let size = self.parse_expr()?;
                self.expect(TokenKind::RBracket)?;
                Ok(ExprKind::NewArray(Box::new(size)))
            }
            TokenKind::Ident => {
                let name = self.advance().lexeme;
                self.expect(TokenKind::LParen)?;
                self.expect(TokenKind::RParen)?;
                Ok(ExprKind::NewObject(name))
            }
            _ => Err(SyntaxError::unexpected(
                self.current(),
                &["`int`", "identifier"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Expr, ExprKind};
    use crate::parser::parse_expression;

    fn expr(source: &str) -> Expr {
        let (expr, diagnostics) = parse_expression(source);
        assert!(diagnostics.is_empty(), "{}: {:?}", source, diagnostics);
        expr
    }

    /// 以 S 表达式形式展示树结构，便于断言
    fn sexp(expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::IntLiteral(n) => n.to_string(),
            ExprKind::BoolLiteral(b) => b.to_string(),
            ExprKind::Identifier(name) => name.clone(),
            ExprKind::This => "this".to_string(),
            ExprKind::NewArray(size) => format!("(new-array {})", sexp(size)),
            ExprKind::NewObject(name) => format!("(new {})", name),
            ExprKind::ArrayIndex { array, index } => {
                format!("(index {} {})", sexp(array), sexp(index))
            }
            ExprKind::ArrayLength(array) => format!("(length {})", sexp(array)),
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                let mut out = format!("(call {} {}", sexp(receiver), method);
                for arg in args {
                    out.push(' ');
                    out.push_str(&sexp(arg));
                }
                out.push(')');
                out
            }
            ExprKind::Not(inner) => format!("(! {})", sexp(inner)),
            ExprKind::Binary(left, op, right) => {
                format!("({} {} {})", op.symbol(), sexp(left), sexp(right))
            }
            ExprKind::Paren(inner) => format!("[{}]", sexp(inner)),
            ExprKind::Error => "<error>".to_string(),
        }
    }

    #[test]
    fn test_times_binds_tighter_than_plus() {
        let e = expr("1 + 2 * 3");
        match &e.kind {
            ExprKind::Binary(left, BinaryOp::Plus, right) => {
                assert_eq!(left.kind, ExprKind::IntLiteral(1));
                assert!(matches!(right.kind, ExprKind::Binary(_, BinaryOp::Times, _)));
            }
            other => panic!("expected Plus at the root, got {:?}", other),
        }
        assert_eq!(sexp(&expr("1 * 2 + 3")), "(+ (* 1 2) 3)");
    }

    #[test]
    fn test_minus_is_left_associative() {
        assert_eq!(sexp(&expr("10 - 3 - 2")), "(- (- 10 3) 2)");
        assert_eq!(sexp(&expr("1 + 2 - 3 + 4")), "(+ (- (+ 1 2) 3) 4)");
    }

    #[test]
    fn test_precedence_ladder() {
        assert_eq!(
            sexp(&expr("a && b < c + d * e[0]")),
            "(&& a (< b (+ c (* d (index e 0)))))"
        );
        assert_eq!(sexp(&expr("a < b && c < d")), "(&& (< a b) (< c d))");
    }

    #[test]
    fn test_less_than_does_not_chain_specially() {
        assert_eq!(sexp(&expr("a < b < c")), "(< (< a b) c)");
    }

    #[test]
    fn test_postfix_chaining() {
        assert_eq!(sexp(&expr("a[1].length")), "(length (index a 1))");
        assert_eq!(sexp(&expr("a.m(1,2).length")), "(length (call a m 1 2))");
        assert_eq!(
            sexp(&expr("new A().b().c(x)[0]")),
            "(index (call (call (new A) b) c x) 0)"
        );
    }

    #[test]
    fn test_method_call_arguments_are_full_expressions() {
        assert_eq!(
            sexp(&expr("this.f(a + 1, b && c, x.g())")),
            "(call this f (+ a 1) (&& b c) (call x g))"
        );
    }

    #[test]
    fn test_empty_argument_list() {
        assert_eq!(sexp(&expr("x.run()")), "(call x run)");
    }

    #[test]
    fn test_not_binds_to_the_nearest_primary() {
        assert_eq!(sexp(&expr("!a && b")), "(&& (! a) b)");
        assert_eq!(sexp(&expr("!!a")), "(! (! a))");
        assert_eq!(sexp(&expr("!(a && b)")), "(! [(&& a b)])");
        // 后缀形式作用在 `!a` 整体之上
        assert_eq!(sexp(&expr("!a.m()")), "(call (! a) m)");
    }

    #[test]
    fn test_parentheses_are_kept() {
        assert_eq!(sexp(&expr("(1 + 2) * 3")), "(* [(+ 1 2)] 3)");
    }

    #[test]
    fn test_new_forms() {
        assert_eq!(sexp(&expr("new int[n + 1]")), "(new-array (+ n 1))");
        assert_eq!(sexp(&expr("new Tree()")), "(new Tree)");
        assert_eq!(sexp(&expr("new int[3].length")), "(length (new-array 3))");
    }

    #[test]
    fn test_spans_cover_the_whole_expression() {
        let e = expr("a + bb * 3");
        assert_eq!(e.span, 0..10);
        if let ExprKind::Binary(_, _, right) = &e.kind {
            assert_eq!(right.span, 4..10);
        }
        assert_eq!(expr("  x.length").span, 2..10);
    }

    #[test]
    fn test_unary_minus_is_not_an_expression() {
        let (e, diagnostics) = parse_expression("-1");
        assert_eq!(e.kind, ExprKind::Error);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].found.as_deref(), Some("`-`"));
        assert!(diagnostics[0].expected.contains(&"integer literal".to_string()));
    }

    #[test]
    fn test_missing_operand() {
        let (_, diagnostics) = parse_expression("1 +");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].found.as_deref(), Some("end of input"));
    }

    #[test]
    fn test_dot_requires_method_name() {
        let (_, diagnostics) = parse_expression("a.1");
        assert_eq!(diagnostics[0].expected, vec!["identifier".to_string()]);
    }

    #[test]
    fn test_new_requires_int_or_class() {
        let (_, diagnostics) = parse_expression("new boolean[1]");
        assert_eq!(
            diagnostics[0].expected,
            vec!["`int`".to_string(), "identifier".to_string()]
        );
    }
}
