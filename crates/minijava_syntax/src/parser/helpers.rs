//! Parser Helper Functions
//!
//! token 游标、期望匹配与错误恢复 (重新同步)。

use super::Parser;
use crate::ast::Span;
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::{Token, TokenKind};
use minijava_diagnostics::Position;
use tracing::trace;

impl Parser {
    /// 当前 token (到达末尾后一直是 `Eof`)
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// 向前看 `n` 个 token
    pub(crate) fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// 消费当前 token 并返回它；`Eof` 不会被越过
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
            self.prev_end = token.span.end;
        }
        token
    }

    /// 当前 token 是 `kind` 时消费它
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 必须是 `kind`，否则报告期望与实际
    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(SyntaxError::unexpected(self.current(), &[&kind.to_string()]))
        }
    }

    /// 必须是标识符，返回其名字
    pub(crate) fn expect_ident(&mut self) -> ParseResult<String> {
        self.expect(TokenKind::Ident).map(|token| token.lexeme)
    }

    /// 从 `start` 到最近一个已消费 token 的区间
    pub(crate) fn span_from(&self, start: usize) -> Span {
        start..self.prev_end.max(start)
    }

    pub(crate) fn position_of(&self, offset: usize) -> Position {
        self.line_index.position(offset)
    }

    /// 记录一个语法错误，继续解析
    pub(crate) fn report(&mut self, error: SyntaxError) {
        self.sink.add(error.to_diagnostic());
    }

    /// 针对一段区间报告错误
    pub(crate) fn report_span(&mut self, message: &str, span: Span) {
        let position = self.position_of(span.start);
        self.report(SyntaxError::spanning(message, span, position));
    }

    /// 错误恢复：跳到下一个语句/声明边界
    ///
    /// 消费到 `;` 为止 (含)，或停在 `}`、`Eof` 以及开启新语句/声明的关键字之前。
    /// `from` 是出错结构的起始 token 下标；若尚未越过任何 token，至少前进一步，
    /// 保证调用方的循环总能推进。
    pub(crate) fn synchronize(&mut self, from: usize) {
        let before = self.pos;
        loop {
            match self.current_kind() {
                TokenKind::Eof | TokenKind::RBrace => break,
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                kind if is_boundary_keyword(kind) && self.pos > from => break,
                _ => {
                    self.advance();
                }
            }
        }
        trace!(skipped = self.pos - before, "resynchronized");
    }

    /// 类体恢复：跳过出错的成员
    ///
    /// 记录 `{`/`}` 嵌套深度，方法体内的语句关键字与分号都不算边界。
    /// 深度归零的 `}` 被消费后停下；深度为 0 时吃掉 `;` 停下，
    /// 或停在 `public`、`class`、类体的 `}` 之前。
    pub(crate) fn synchronize_member(&mut self, from: usize) {
        let before = self.pos;
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::Eof => break,
                TokenKind::LBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RBrace if depth == 0 => break,
                TokenKind::RBrace => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::Public | TokenKind::Class if depth == 0 && self.pos > from => break,
                _ => {
                    self.advance();
                }
            }
        }
        trace!(skipped = self.pos - before, "resynchronized in class body");
    }

    /// 起始于 `offset` 的 token 的种类
    pub(crate) fn kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens
            .binary_search_by_key(&offset, |token| token.span.start)
            .ok()
            .map(|i| self.tokens[i].kind)
    }

    /// 顶层恢复：跳到下一个 `class`
    pub(crate) fn synchronize_toplevel(&mut self, from: usize) {
        let before = self.pos;
        while !self.at_end() {
            if self.check(TokenKind::Class) && self.pos > from {
                break;
            }
            self.advance();
        }
        trace!(skipped = self.pos - before, "resynchronized at top level");
    }
}

/// 可以作为恢复落脚点的关键字
fn is_boundary_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Class
            | TokenKind::Public
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Println
            | TokenKind::Return
            | TokenKind::Recur
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_stops_at_eof() {
        let mut parser = Parser::new("x");
        assert_eq!(parser.advance().kind, TokenKind::Ident);
        assert_eq!(parser.advance().kind, TokenKind::Eof);
        assert_eq!(parser.advance().kind, TokenKind::Eof);
        assert!(parser.at_end());
        assert_eq!(parser.prev_end, 1);
    }

    #[test]
    fn test_peek_past_end_is_eof() {
        let parser = Parser::new("a b");
        assert_eq!(parser.peek_kind(1), TokenKind::Ident);
        assert_eq!(parser.peek_kind(2), TokenKind::Eof);
        assert_eq!(parser.peek_kind(10), TokenKind::Eof);
    }

    #[test]
    fn test_expect_reports_expected_and_found() {
        let mut parser = Parser::new("x");
        let err = parser.expect(TokenKind::Semicolon).unwrap_err();
        assert_eq!(err.expected, vec!["`;`".to_string()]);
        assert_eq!(err.found, "identifier `x`");
    }

    #[test]
    fn test_synchronize_consumes_semicolon() {
        let mut parser = Parser::new("a b c ; d");
        parser.synchronize(0);
        assert_eq!(parser.current().lexeme, "d");
    }

    #[test]
    fn test_synchronize_stops_before_brace_and_keyword() {
        let mut parser = Parser::new("a b } c");
        parser.synchronize(0);
        assert!(parser.check(TokenKind::RBrace));

        let mut parser = Parser::new("a b while");
        parser.synchronize(0);
        assert!(parser.check(TokenKind::While));
    }

    #[test]
    fn test_synchronize_always_makes_progress() {
        let mut parser = Parser::new("return x ; y");
        parser.synchronize(0);
        assert_eq!(parser.current().lexeme, "y");
    }

    #[test]
    fn test_synchronize_member_skips_whole_method_body() {
        let mut parser = Parser::new("public int f(int n { if (n < 1) { return n; } return 0; } public");
        // 停在出错的 `{` 处
        parser.pos = 6;
        parser.synchronize_member(0);
        assert!(parser.check(TokenKind::Public));
        assert_eq!(parser.pos, parser.tokens.len() - 2);
    }

    #[test]
    fn test_synchronize_member_stops_at_field_end_and_class_brace() {
        let mut parser = Parser::new("void x ; int y ;");
        parser.synchronize_member(0);
        assert!(parser.check(TokenKind::Int));

        let mut parser = Parser::new("int x } class");
        parser.synchronize_member(0);
        assert!(parser.check(TokenKind::RBrace));

        let mut parser = Parser::new("public public");
        parser.synchronize_member(0);
        assert_eq!(parser.pos, 1);
    }

    #[test]
    fn test_kind_at_offset() {
        let parser = Parser::new("recur (x)");
        assert_eq!(parser.kind_at(0), Some(TokenKind::Recur));
        assert_eq!(parser.kind_at(6), Some(TokenKind::LParen));
        assert_eq!(parser.kind_at(3), None);
    }

    #[test]
    fn test_synchronize_toplevel_skips_to_next_class() {
        let mut parser = Parser::new("class } } class B");
        parser.synchronize_toplevel(0);
        assert!(parser.check(TokenKind::Class));
        assert_eq!(parser.pos, 3);
    }
}
