//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化输出：紧凑格式 (带或不带颜色)，
//! 或者在源码可用时通过 ariadne 输出带源码片段的报告。

use crate::diagnostic::Diagnostic;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use colored::*;
use std::io::{self, Write};

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// 创建新的输出器
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断到 stderr
    pub fn emit(&self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.emit_to(diagnostic, &mut io::stderr().lock())
    }

    /// 输出所有诊断到 stderr
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        let mut err = io::stderr().lock();
        for diagnostic in diagnostics {
            self.emit_to(diagnostic, &mut err)?;
            writeln!(err)?; // 诊断之间空行
        }
        Ok(())
    }

    /// 输出紧凑格式的诊断
    pub fn emit_to<W: Write>(&self, diagnostic: &Diagnostic, out: &mut W) -> io::Result<()> {
        if self.use_colors {
            self.emit_colored(diagnostic, out)
        } else {
            self.emit_plain(diagnostic, out)
        }
    }

    /// 输出带颜色的诊断
    fn emit_colored<W: Write>(&self, diagnostic: &Diagnostic, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{}: {}",
            diagnostic.kind.colored_header(),
            diagnostic.message.bold()
        )?;
        writeln!(out, "  {} {}", "-->".blue().bold(), diagnostic.position)?;

        if let Some(summary) = diagnostic.expected_summary() {
            let found = diagnostic.found.as_deref().unwrap_or("nothing");
            writeln!(
                out,
                "  {} {}",
                "=".blue().bold(),
                format!("{}, found {}", summary, found).bright_black()
            )?;
        }

        for note in &diagnostic.notes {
            writeln!(
                out,
                "  {} {}",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            )?;
        }
        Ok(())
    }

    /// 输出纯文本诊断
    fn emit_plain<W: Write>(&self, diagnostic: &Diagnostic, out: &mut W) -> io::Result<()> {
        writeln!(out, "error[{}]: {}", diagnostic.kind, diagnostic.message)?;
        writeln!(out, "  --> {}", diagnostic.position)?;

        if let Some(summary) = diagnostic.expected_summary() {
            let found = diagnostic.found.as_deref().unwrap_or("nothing");
            writeln!(out, "  = {}, found {}", summary, found)?;
        }

        for note in &diagnostic.notes {
            writeln!(out, "  = note: {}", note)?;
        }
        Ok(())
    }

    /// 输出带源码片段的诊断 (ariadne)
    pub fn emit_with_source<W: Write>(
        &self,
        diagnostic: &Diagnostic,
        file_name: &str,
        source: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let label_message = match (diagnostic.expected_summary(), &diagnostic.found) {
            (Some(summary), Some(found)) => format!("{}, found {}", summary, found),
            (Some(summary), None) => summary,
            (None, _) => diagnostic.message.clone(),
        };

        let mut report = Report::build(ReportKind::Error, file_name, diagnostic.span.start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_code(diagnostic.kind.name())
            .with_message(&diagnostic.message)
            .with_label(
                Label::new((file_name, diagnostic.span.clone()))
                    .with_message(label_message)
                    .with_color(Color::Red),
            );

        for note in &diagnostic.notes {
            report = report.with_note(note);
        }

        report
            .finish()
            .write((file_name, Source::from(source)), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn sample() -> Diagnostic {
        Diagnostic::syntax("unexpected token")
            .span(10..11)
            .at(Position::new(2, 5, 10))
            .expected(["`;`"])
            .found("identifier `y`")
            .with_note("statements end with `;`")
    }

    #[test]
    fn test_emitter_creation() {
        let emitter = Emitter::new();
        assert!(emitter.use_colors);

        let emitter_no_color = Emitter::without_colors();
        assert!(!emitter_no_color.use_colors);
    }

    #[test]
    fn test_emit_plain() {
        let mut out = Vec::new();
        Emitter::without_colors()
            .emit_to(&sample(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "error[syntax]: unexpected token\n  --> 2:5\n  = expected `;`, found identifier `y`\n  = note: statements end with `;`\n"
        );
    }

    #[test]
    fn test_emit_with_source_mentions_file_and_message() {
        let source = "x = 1\ny = 2;\n";
        let diag = Diagnostic::syntax("unexpected token")
            .span(6..7)
            .at(Position::new(2, 1, 6))
            .expected(["`;`"])
            .found("identifier `y`");

        let mut out = Vec::new();
        Emitter::without_colors()
            .emit_with_source(&diag, "Main.java", source, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("unexpected token"));
        assert!(text.contains("Main.java"));
        assert!(text.contains("expected `;`, found identifier `y`"));
    }
}
