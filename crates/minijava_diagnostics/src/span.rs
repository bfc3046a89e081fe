//! Span - 源码位置信息
//!
//! 字节区间 [`Span`] 用于 AST 与诊断，[`Position`] 是面向用户的行列坐标，
//! [`LineIndex`] 负责二者之间的换算。

use std::fmt;

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;

/// Span 辅助函数
pub trait SpanExt {
    /// 创建一个新的 Span
    fn new(start: usize, end: usize) -> Self;

    /// 获取起始位置
    fn start(&self) -> usize;

    /// 获取结束位置
    fn end(&self) -> usize;

    /// 获取长度
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool;

    /// 覆盖两个 Span 的最小区间
    fn merge(&self, other: &Self) -> Self;
}

impl SpanExt for Span {
    fn new(start: usize, end: usize) -> Self {
        start..end
    }

    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }

    fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn merge(&self, other: &Self) -> Self {
        self.start.min(other.start)..self.end.max(other.end)
    }
}

/// 行列坐标 (行、列均从 1 开始，列按字符计数)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    /// 字节偏移
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// 行起始偏移表
///
/// 对 `\n`、`\r\n` 与单独的 `\r` 一视同仁。
#[derive(Debug, Clone)]
pub struct LineIndex {
    source: String,
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(i + 1),
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    line_starts.push(i + 2);
                    i += 1;
                }
                b'\r' => line_starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }

        Self {
            source: source.to_string(),
            line_starts,
        }
    }

    /// 将字节偏移换算为行列坐标；越界偏移会被钳制到源码末尾
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count() + 1;

        Position::new(line + 1, column, offset)
    }

    /// 行数
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 获取某一行 (从 1 开始) 的文本，不含换行符
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches(['\n', '\r']))
    }
}
