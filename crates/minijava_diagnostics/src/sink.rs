//! DiagnosticSink - 诊断收集器
//!
//! 收集一次解析过程中的所有诊断信息，保持产生顺序

use crate::diagnostic::Diagnostic;
use crate::kind::DiagnosticKind;

/// 诊断收集器
#[derive(Debug, Default, Clone)]
pub struct DiagnosticSink {
    /// 收集的诊断列表
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// 创建新的诊断收集器
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// 添加诊断
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 批量添加
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// 是否有错误 (任何诊断都是错误)
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// 获取所有诊断
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// 按源码位置排序 (稳定排序，同一位置保持产生顺序)
    pub fn sort_by_position(&mut self) {
        self.diagnostics.sort_by_key(|d| d.span.start);
    }

    /// 获取某一种类的数量
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// 清空所有诊断
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// 获取诊断数量
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 取出全部诊断
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_creation() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert_eq!(sink.len(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_add_diagnostic() {
        let mut sink = DiagnosticSink::new();

        sink.add(Diagnostic::syntax("error 1"));
        assert!(sink.has_errors());
        assert_eq!(sink.count(DiagnosticKind::Syntax), 1);

        sink.add(Diagnostic::lexical("error 2"));
        assert_eq!(sink.count(DiagnosticKind::Lexical), 1);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_sort_by_position_is_stable() {
        let mut sink = DiagnosticSink::new();
        sink.add(Diagnostic::syntax("late").span(30..31));
        sink.add(Diagnostic::syntax("first").span(2..3));
        sink.add(Diagnostic::lexical("second").span(2..3));

        sink.sort_by_position();

        let messages: Vec<_> = sink.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "late"]);
    }

    #[test]
    fn test_clear() {
        let mut sink = DiagnosticSink::new();
        sink.add(Diagnostic::syntax("e"));
        sink.clear();
        assert!(sink.is_empty());
        assert!(!sink.has_errors());
    }
}
