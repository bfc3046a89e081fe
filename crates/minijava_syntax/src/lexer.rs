//! Lexer - 词法分析
//!
//! `TokenKind` 由 logos 生成状态机；[`Lexer`] 在其上补充位置信息、
//! 错误恢复 (跳过非法字符) 以及结尾的 `Eof` token。

use crate::error::LexicalError;
use logos::{FilterResult, Logos};
use minijava_diagnostics::{LineIndex, Position, Span};
use std::fmt;

/// logos 层面的错误原因
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    UnrecognizedCharacter,
    IntegerOutOfRange,
    UnterminatedComment,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\r\n]*")]
pub enum TokenKind {
    // --- 关键字 (Keywords) ---
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("public")]
    Public,
    #[token("static")]
    Static,
    #[token("void")]
    Void,
    #[token("String")]
    StringType,
    #[token("int")]
    Int,
    #[token("boolean")]
    Boolean,
    #[token("length")]
    Length,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("this")]
    This,
    #[token("new")]
    New,
    #[token("return")]
    Return,
    #[token("recur")]
    Recur,
    /// `System.out.println`，由 [`Lexer`] 将 `System` 与其后缀拼接而成
    Println,

    // --- 运算符 (Operators) ---
    #[token("&&")]
    AndAnd,
    #[token("<")]
    Lt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("!")]
    Bang,
    #[token("=")]
    Assign,

    // --- 标点 (Punctuation) ---
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    // --- 数据 (Data) ---
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i32>().map_err(|_| LexErrorKind::IntegerOutOfRange))]
    IntLiteral(i32),

    #[token("/*", block_comment)]
    BlockComment,

    /// 输入结束 (由 [`Lexer`] 追加，logos 不会产生)
    Eof,
}

/// 块注释整体跳过；找不到 `*/` 时报错并吞掉剩余输入
fn block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

/// `System` 之后构成打印语句的固定后缀
const PRINTLN_TAIL: &str = ".out.println";

/// Token 的粗粒度分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    IntegerLiteral,
    Operator,
    Punctuation,
    EndOfInput,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        use TokenKind::*;
        match self {
            Class | Extends | Public | Static | Void | StringType | Int | Boolean | Length | If
            | Else | While | True | False | This | New | Return | Recur | Println => {
                TokenCategory::Keyword
            }
            AndAnd | Lt | Plus | Minus | Star | Bang | Assign => TokenCategory::Operator,
            LBrace | RBrace | LParen | RParen | LBracket | RBracket | Comma | Semicolon | Dot
            | Question | Colon => TokenCategory::Punctuation,
            Ident => TokenCategory::Identifier,
            IntLiteral(_) => TokenCategory::IntegerLiteral,
            // 块注释永远不会作为 token 产出
            BlockComment | Eof => TokenCategory::EndOfInput,
        }
    }

    /// 关键字、运算符与标点的固定拼写
    pub fn spelling(&self) -> Option<&'static str> {
        use TokenKind::*;
        let text = match self {
            Class => "class",
            Extends => "extends",
            Public => "public",
            Static => "static",
            Void => "void",
            StringType => "String",
            Int => "int",
            Boolean => "boolean",
            Length => "length",
            If => "if",
            Else => "else",
            While => "while",
            True => "true",
            False => "false",
            This => "this",
            New => "new",
            Return => "return",
            Recur => "recur",
            Println => "System.out.println",
            AndAnd => "&&",
            Lt => "<",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Bang => "!",
            Assign => "=",
            LBrace => "{",
            RBrace => "}",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            Comma => ",",
            Semicolon => ";",
            Dot => ".",
            Question => "?",
            Colon => ":",
            Ident | IntLiteral(_) | BlockComment | Eof => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spelling() {
            Some(text) => write!(f, "`{}`", text),
            None => match self {
                TokenKind::Ident => write!(f, "identifier"),
                TokenKind::IntLiteral(_) => write!(f, "integer literal"),
                _ => write!(f, "end of input"),
            },
        }
    }
}

/// 带位置的 token，产生后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    pub position: Position,
}

impl Token {
    /// 诊断中使用的描述，例如 "identifier `foo`"、"`;`"
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ident => format!("identifier `{}`", self.lexeme),
            TokenKind::IntLiteral(_) => format!("integer literal `{}`", self.lexeme),
            kind => kind.to_string(),
        }
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }
}

/// 惰性 token 流
///
/// 错误不会中断迭代：非法字符被跳过，越界整数被替换为 `0`，
/// 错误收集在 [`Lexer::errors`] 中。最后一个 token 总是 `Eof`。
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    line_index: LineIndex,
    errors: Vec<LexicalError>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            line_index: LineIndex::new(source),
            errors: Vec::new(),
            finished: false,
        }
    }

    /// 回到输入开头重新开始
    pub fn restart(&mut self) {
        self.inner = TokenKind::lexer(self.source);
        self.errors.clear();
        self.finished = false;
    }

    /// 到目前为止遇到的词法错误
    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    fn make_token(&self, kind: TokenKind, span: Span) -> Token {
        Token {
            kind,
            lexeme: self.source[span.clone()].to_string(),
            position: self.line_index.position(span.start),
            span,
        }
    }

    /// `System.out.println` 作为单个关键字 token
    fn glue_println(&mut self, kind: TokenKind) -> TokenKind {
        if kind != TokenKind::Ident || self.inner.slice() != "System" {
            return kind;
        }
        match self.inner.remainder().strip_prefix(PRINTLN_TAIL) {
            Some(after) if !after.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') => {
                self.inner.bump(PRINTLN_TAIL.len());
                TokenKind::Println
            }
            _ => kind,
        }
    }

    fn record_error(&mut self, kind: LexErrorKind, span: Span) {
        let position = self.line_index.position(span.start);
        let error = match kind {
            LexErrorKind::UnrecognizedCharacter => LexicalError::UnrecognizedCharacter {
                ch: self
                    .source
                    .get(span.clone())
                    .and_then(|text| text.chars().next())
                    .unwrap_or('\u{FFFD}'),
                span,
                position,
            },
            LexErrorKind::IntegerOutOfRange => LexicalError::IntegerOutOfRange {
                literal: self.source.get(span.clone()).unwrap_or_default().to_string(),
                span,
                position,
            },
            LexErrorKind::UnterminatedComment => {
                LexicalError::UnterminatedComment { span, position }
            }
        };
        self.errors.push(error);
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let kind = self.glue_println(kind);
                    let span = self.inner.span();
                    return Some(self.make_token(kind, span));
                }
                Some(Err(LexErrorKind::IntegerOutOfRange)) => {
                    let span = self.inner.span();
                    self.record_error(LexErrorKind::IntegerOutOfRange, span.clone());
                    return Some(self.make_token(TokenKind::IntLiteral(0), span));
                }
                Some(Err(kind)) => {
                    let span = self.inner.span();
                    self.record_error(kind, span);
                }
                None => {
                    self.finished = true;
                    let end = self.source.len();
                    return Some(self.make_token(TokenKind::Eof, end..end));
                }
            }
        }
    }
}

/// 一次性词法分析：返回全部 token (以 `Eof` 结尾) 与词法错误
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexicalError>) {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.errors)
}
