//! MiniJava Diagnostics
//!
//! 统一的诊断系统，为 MiniJava 前端提供清晰的错误报告。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体 (种类、消息、位置、期望/实际 token)
//! - [`DiagnosticKind`] - 诊断种类 (Lexical/Syntax)
//! - [`DiagnosticSink`] - 诊断收集器
//! - [`Emitter`] - 诊断输出器
//! - [`Span`] / [`Position`] / [`LineIndex`] - 源码位置信息
//!
//! # 示例
//!
//! ```rust
//! use minijava_diagnostics::{Diagnostic, DiagnosticSink, Emitter, LineIndex};
//!
//! let source = "class A { int x }";
//! let index = LineIndex::new(source);
//! let mut sink = DiagnosticSink::new();
//!
//! sink.add(
//!     Diagnostic::syntax("unexpected token")
//!         .span(16..17)
//!         .at(index.position(16))
//!         .expected(["`;`"])
//!         .found("`}`"),
//! );
//!
//! if sink.has_errors() {
//!     let emitter = Emitter::without_colors();
//!     emitter.emit_all(sink.diagnostics()).unwrap();
//! }
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod kind;
pub mod sink;
pub mod span;

// 重新导出核心类型
pub use diagnostic::Diagnostic;
pub use emitter::Emitter;
pub use kind::DiagnosticKind;
pub use sink::DiagnosticSink;
pub use span::{LineIndex, Position, Span, SpanExt};
