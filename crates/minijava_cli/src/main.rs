use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use minijava_diagnostics::{Diagnostic, Emitter};
use minijava_syntax::{parse, print_program, tokenize, Token, TokenKind};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minijavac")]
#[command(about = "MiniJava 前端 - 词法、语法分析与诊断", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 关闭彩色输出
    #[arg(long, global = true)]
    no_color: bool,

    /// 使用紧凑格式输出诊断 (不带源码片段)
    #[arg(long, global = true)]
    plain: bool,

    /// 提高日志详细程度 (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 输出 token 流
    Tokens {
        /// 输入文件
        input: String,
    },

    /// 解析并以规范格式打印程序
    Parse {
        /// 输入文件
        input: String,

        /// 打印语法树结构而不是源码
        #[arg(long)]
        ast: bool,
    },

    /// 只检查词法与语法错误
    Check {
        /// 输入文件
        input: String,
    },
}

/// 诊断的输出方式
struct Reporter {
    emitter: Emitter,
    plain: bool,
}

impl Reporter {
    fn new(use_colors: bool, plain: bool) -> Self {
        let emitter = if use_colors {
            Emitter::new()
        } else {
            Emitter::without_colors()
        };
        Self { emitter, plain }
    }

    fn report<W: Write>(
        &self,
        diagnostics: &[Diagnostic],
        file_name: &str,
        source: &str,
        out: &mut W,
    ) -> io::Result<()> {
        for diagnostic in diagnostics {
            if self.plain {
                self.emitter.emit_to(diagnostic, out)?;
            } else {
                self.emitter
                    .emit_with_source(diagnostic, file_name, source, out)?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }
    let reporter = Reporter::new(!cli.no_color, cli.plain);

    let clean = match cli.command {
        Commands::Tokens { input } => cmd_tokens(&input, &reporter)?,
        Commands::Parse { input, ast } => cmd_parse(&input, ast, &reporter)?,
        Commands::Check { input } => cmd_check(&input, &reporter)?,
    };

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbose))),
        )
        .with_writer(io::stderr)
        .init();
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "minijava_cli=warn,minijava_syntax=warn",
        1 => "minijava_cli=debug,minijava_syntax=debug",
        _ => "minijava_cli=trace,minijava_syntax=trace",
    }
}

fn read_source(input: &str) -> Result<String> {
    debug!(path = input, "reading source");
    fs::read_to_string(input).with_context(|| format!("无法读取 {}", input))
}

/// token 命令
fn cmd_tokens(input: &str, reporter: &Reporter) -> Result<bool> {
    let source = read_source(input)?;
    let (tokens, errors) = tokenize(&source);

    let mut out = io::stdout().lock();
    for token in &tokens {
        writeln!(out, "{}", format_token(token))?;
    }

    let diagnostics: Vec<Diagnostic> = errors.iter().map(|e| e.to_diagnostic()).collect();
    reporter.report(&diagnostics, input, &source, &mut io::stderr().lock())?;
    Ok(diagnostics.is_empty())
}

/// 解析命令
fn cmd_parse(input: &str, ast: bool, reporter: &Reporter) -> Result<bool> {
    let source = read_source(input)?;
    let output = parse(&source);

    let mut out = io::stdout().lock();
    if ast {
        writeln!(out, "{:#?}", output.program)?;
    } else {
        write!(out, "{}", print_program(&output.program))?;
    }

    reporter.report(&output.diagnostics, input, &source, &mut io::stderr().lock())?;
    Ok(!output.has_errors())
}

/// 检查命令
fn cmd_check(input: &str, reporter: &Reporter) -> Result<bool> {
    let source = read_source(input)?;
    let output = parse(&source);
    info!(diagnostics = output.diagnostics.len(), "check finished");

    if output.has_errors() {
        reporter.report(&output.diagnostics, input, &source, &mut io::stderr().lock())?;
        eprintln!(
            "{} {} error(s) in {}",
            "✗".red().bold(),
            output.diagnostics.len(),
            input
        );
        Ok(false)
    } else {
        println!("{} {}: no errors", "✓".green().bold(), input);
        Ok(true)
    }
}

/// `line:col  category  kind  lexeme`
fn format_token(token: &Token) -> String {
    let lexeme = if token.kind == TokenKind::Eof {
        String::new()
    } else {
        format!("{:?}", token.lexeme)
    };
    format!(
        "{:<8} {:<15} {:<24} {}",
        token.position.to_string(),
        format!("{:?}", token.category()),
        token.kind.to_string(),
        lexeme
    )
    .trim_end()
    .to_string()
}
