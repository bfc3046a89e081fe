//! Parser Module
//!
//! 手写递归下降 + 优先级爬升。按语法层次拆分：
//! - `expr`: 表达式 (precedence climbing，见 [`precedence`])
//! - `stmt`: 语句与语句列表
//! - `decl`: 主类、类、字段、方法与类型
//! - `helpers`: token 游标与错误恢复
//!
//! 内部函数返回 [`ParseResult`](crate::error::ParseResult) 并用 `?` 传播；语句列表、类体和顶层是恢复点，
//! 在那里记录诊断、重新同步并插入占位节点。

pub mod decl;
pub mod expr;
pub mod helpers;
pub mod precedence;
pub mod stmt;

use crate::ast::{Expr, Program, Stmt};
use crate::error::SyntaxError;
use crate::lexer::{Lexer, Token, TokenKind};
use minijava_diagnostics::{Diagnostic, DiagnosticSink, LineIndex};
use tracing::debug;

/// 一次解析的结果：语法树 (可能含占位节点) 与按位置排序的诊断
///
/// 诊断非空时语法树不应被视为语义有效。
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// 无诊断时给出语法树，否则给出全部诊断
    pub fn into_result(self) -> Result<Program, Vec<Diagnostic>> {
        if self.diagnostics.is_empty() {
            Ok(self.program)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// 主入口：解析整个编译单元
pub fn parse(source: &str) -> ParseOutput {
    let mut parser = Parser::new(source);
    debug!(tokens = parser.tokens.len(), "parsing compilation unit");

    let program = parser.parse_program();
    let diagnostics = parser.finish();

    debug!(
        classes = program.classes.len() + 1,
        diagnostics = diagnostics.len(),
        "parse finished"
    );
    ParseOutput {
        program,
        diagnostics,
    }
}

/// 单独解析一个表达式 (必须占满输入)
pub fn parse_expression(source: &str) -> (Expr, Vec<Diagnostic>) {
    let mut parser = Parser::new(source);
    let start = parser.current().span.start;
    let expr = match parser.parse_expr() {
        Ok(expr) => expr,
        Err(err) => {
            parser.report(err);
            Expr::error(start..parser.prev_end)
        }
    };
    parser.expect_end_of_input();
    (expr, parser.finish())
}

/// 单独解析一条语句 (必须占满输入)
pub fn parse_statement(source: &str) -> (Stmt, Vec<Diagnostic>) {
    let mut parser = Parser::new(source);
    let stmt = parser.parse_statement_recovering();
    parser.expect_end_of_input();
    (stmt, parser.finish())
}

/// 解析器状态：一次性拥有 token 流与诊断
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// 最近一个已消费 token 的结束偏移
    prev_end: usize,
    line_index: LineIndex,
    sink: DiagnosticSink,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let mut tokens: Vec<Token> = lexer.by_ref().collect();
        let mut sink = DiagnosticSink::new();
        sink.extend(lexer.errors().iter().map(|e| e.to_diagnostic()));

        // Lexer 总以 Eof 结尾；保险起见补齐
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = source.len();
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                span: end..end,
                position: lexer.line_index().position(end),
            });
        }

        Self {
            tokens,
            pos: 0,
            prev_end: 0,
            line_index: lexer.line_index().clone(),
            sink,
        }
    }

    /// 结束解析，返回按位置排序的全部诊断
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.sink.sort_by_position();
        self.sink.into_vec()
    }

    fn expect_end_of_input(&mut self) {
        if !self.at_end() {
            let err = SyntaxError::unexpected(self.current(), &["end of input"]);
            self.report(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijava_diagnostics::DiagnosticKind;

    const FACTORIAL: &str = r#"
class Factorial {
    public static void main(String[] a) {
        System.out.println(new Fac().ComputeFac(10));
    }
}

class Fac {
    public int ComputeFac(int num) {
        int num_aux;
        if (num < 1)
            num_aux = 1;
        else
            num_aux = num * (this.ComputeFac(num - 1));
        return num_aux;
    }
}
"#;

    #[test]
    fn test_parse_factorial() {
        let output = parse(FACTORIAL);
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);

        let program = output.program;
        assert_eq!(program.main.name, "Factorial");
        assert_eq!(program.main.args_name, "a");
        assert_eq!(program.classes.len(), 1);
        assert_eq!(program.classes[0].methods[0].name, "ComputeFac");
        assert_eq!(program.classes[0].methods[0].locals.len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert!(parse(FACTORIAL).into_result().is_ok());

        let errors = parse("class A {").into_result().unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_lexical_and_syntax_diagnostics_are_merged_in_order() {
        let source = "class M { public static void main(String[] a) { x = 1 # } }";
        let output = parse(source);
        assert_eq!(output.diagnostics.len(), 2);
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::Lexical);
        assert!(output.diagnostics[0].span.start <= output.diagnostics[1].span.start);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(FACTORIAL);
        let second = parse(FACTORIAL);
        assert_eq!(first.program, second.program);
        assert_eq!(first.diagnostics, second.diagnostics);
    }

    #[test]
    fn test_parse_expression_rejects_trailing_tokens() {
        let (_, diagnostics) = parse_expression("1 + 2 )");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].expected, vec!["end of input".to_string()]);
    }

    #[test]
    fn test_empty_input_reports_missing_main_class() {
        let output = parse("");
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].found.as_deref(), Some("end of input"));
    }
}
