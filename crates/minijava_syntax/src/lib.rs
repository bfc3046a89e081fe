//! MiniJava Syntax
//!
//! 前端：词法分析、优先级爬升表达式解析、语句与声明解析、错误恢复，
//! 以及规范格式打印。
//!
//! ```rust
//! use minijava_syntax::{parse, print_program};
//!
//! let source = "class Main { public static void main(String[] a) { System.out.println(1 + 2 * 3); } }";
//! let output = parse(source);
//! assert!(output.diagnostics.is_empty());
//! assert!(print_program(&output.program).contains("1 + 2 * 3"));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use error::{LexicalError, ParseResult, SyntaxError};
pub use lexer::{tokenize, Lexer, Token, TokenCategory, TokenKind};
pub use parser::{parse, parse_expression, parse_statement, ParseOutput};
pub use printer::{print_expr, print_program, print_stmt};
