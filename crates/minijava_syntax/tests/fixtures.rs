//! 对 `tests/fixtures/` 下的示例程序做端到端解析

use minijava_diagnostics::DiagnosticKind;
use minijava_syntax::ast::{ExprKind, MethodResult, Program, Stmt, Type};
use minijava_syntax::{parse, print_program};

const FACTORIAL: &str = include_str!("fixtures/factorial.java");
const LINKED_LIST: &str = include_str!("fixtures/linked_list.java");
const ARRAYS: &str = include_str!("fixtures/arrays.java");
const CLASSES: &str = include_str!("fixtures/classes.java");
const MISSING_SEMICOLON: &str = include_str!("fixtures/missing_semicolon.java");

fn parse_clean(source: &str) -> Program {
    let output = parse(source);
    assert!(
        output.diagnostics.is_empty(),
        "unexpected diagnostics: {:#?}",
        output.diagnostics
    );
    output.program
}

fn assert_round_trip(source: &str) {
    let program = parse_clean(source);
    let printed = print_program(&program);
    let reparsed = parse_clean(&printed);

    assert!(
        program.structurally_eq(&reparsed),
        "round trip changed the tree:\n{}",
        printed
    );
    assert_eq!(print_program(&reparsed), printed);
}

#[test]
fn test_all_valid_fixtures_round_trip() {
    for source in [FACTORIAL, LINKED_LIST, ARRAYS, CLASSES] {
        assert_round_trip(source);
    }
}

#[test]
fn test_factorial_fixture() {
    let program = parse_clean(FACTORIAL);
    assert_eq!(program.main.name, "Factorial");

    let fac = &program.classes[0];
    let names: Vec<_> = fac.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["all", "iterative", "recursive", "tail"]);

    let tail = &fac.methods[3];
    assert!(tail.body.is_empty());
    match &tail.result {
        MethodResult::Recur(recur) => {
            assert_eq!(recur.args.len(), tail.params.len());
            assert_eq!(
                recur.fallback.kind,
                ExprKind::Identifier("result".to_string())
            );
        }
        other => panic!("expected recur, got {:?}", other),
    }

    let recursive = &fac.methods[2];
    assert!(matches!(recursive.body[0], Stmt::If { .. }));
}

#[test]
fn test_linked_list_fixture() {
    let program = parse_clean(LINKED_LIST);
    let node = &program.classes[1];
    assert_eq!(node.name, "Node");
    assert_eq!(node.fields[1].ty, Type::Class("Node".to_string()));
    assert_eq!(node.fields[2].ty, Type::Boolean);

    // `int _;` 与 `_ = ...;`
    let builder = &program.classes[0];
    assert_eq!(builder.methods[0].locals[1].name, "_");
    assert_eq!(builder.methods[0].locals[2].ty, Type::Class("Node".to_string()));
}

#[test]
fn test_arrays_fixture() {
    let program = parse_clean(ARRAYS);
    let sorter = &program.classes[0];
    assert_eq!(sorter.fields[0].ty, Type::IntArray);

    // 主方法体是单个块语句
    assert!(matches!(program.main.body, Stmt::Block { ref statements, .. } if statements.len() == 1));

    let run = &sorter.methods[0];
    assert!(run
        .body
        .iter()
        .any(|stmt| matches!(stmt, Stmt::While { .. })));
    assert!(matches!(sorter.methods[2].result, MethodResult::Recur(_)));
}

#[test]
fn test_classes_fixture() {
    let program = parse_clean(CLASSES);
    let parents: Vec<_> = program
        .classes
        .iter()
        .map(|c| c.superclass.as_deref())
        .collect();
    assert_eq!(parents, vec![None, Some("Shape"), Some("Square")]);

    let marker = &program.classes[2];
    assert!(marker.methods.is_empty());
    assert_eq!(marker.fields[1].ty, Type::IntArray);
}

#[test]
fn test_missing_semicolon_reports_once_and_keeps_going() {
    let output = parse(MISSING_SEMICOLON);

    assert_eq!(output.diagnostics.len(), 1, "{:#?}", output.diagnostics);
    let diagnostic = &output.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
    assert_eq!(diagnostic.expected, vec!["`;`".to_string()]);
    assert_eq!(diagnostic.found.as_deref(), Some("`while`"));
    assert_eq!(diagnostic.position.line, 11);
    assert_eq!(diagnostic.position.column, 9);

    // 出错语句被占位，后续语句与类照常解析
    let counter = &output.program.classes[0];
    let body = &counter.methods[0].body;
    assert!(matches!(body[0], Stmt::Error { .. }));
    assert!(matches!(body[1], Stmt::While { .. }));
    assert!(matches!(
        counter.methods[0].result,
        MethodResult::Return { .. }
    ));

    let fine = &output.program.classes[1];
    assert_eq!(fine.name, "Fine");
    assert_eq!(fine.methods[0].name, "get");
}

#[test]
fn test_fixtures_parse_identically_twice() {
    for source in [FACTORIAL, LINKED_LIST, ARRAYS, CLASSES, MISSING_SEMICOLON] {
        let first = parse(source);
        let second = parse(source);
        assert_eq!(first.program, second.program);
        assert_eq!(first.diagnostics, second.diagnostics);
    }
}
