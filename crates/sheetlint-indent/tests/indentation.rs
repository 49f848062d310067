//! End-to-end tests for the indentation rule.

use std::fs;

use sheetlint_indent::prelude::*;
use tempfile::tempdir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn check(options: IndentationOptions, css: &str) -> Vec<Violation> {
    init_tracing();
    Indentation::new(options).check_source(css).unwrap()
}

fn messages(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(|v| v.message.clone()).collect()
}

fn no_exceptions() -> IndentationOptions {
    IndentationOptions::default().without_exceptions()
}

#[test]
fn depth_determines_indentation() {
    let css = "\
@media screen {
  .a {
    .b {
      color: red;
    }
  }
}
";
    assert!(check(no_exceptions(), css).is_empty());

    let wrong = css.replace("      color", "    color");
    assert_eq!(
        messages(&check(no_exceptions(), &wrong)),
        vec!["Expected indentation of 6 spaces at line 4"]
    );
}

#[test]
fn four_space_indent() {
    let options = IndentationOptions::new("4".parse().unwrap()).without_exceptions();
    let css = "a {\n    b {\n        top: 0;\n    }\n}\n";
    assert!(check(options.clone(), css).is_empty());

    let violations = check(options, "a {\n  top: 0;\n}\n");
    assert_eq!(messages(&violations), vec!["Expected indentation of 4 spaces at line 2"]);
}

#[test]
fn declaration_in_nested_block_off_by_one_space() {
    let css = "a {\n  b {\n   color: red;\n  }\n}\n";
    let violations = check(no_exceptions(), css);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "Expected indentation of 4 spaces at line 3");
    assert_eq!(violations[0].line, 3);
    assert_eq!(violations[0].rule, "indentation");
}

#[test]
fn block_exception_keeps_nested_blocks_flush() {
    let options = IndentationOptions::default().with_exceptions([Exception::Block]);
    let css = "\
a {
  color: red;
b {
  color: blue;
}
}
";
    assert!(check(options.clone(), css).is_empty());

    // The closing brace of `b` is checked with `b` itself, before its children.
    let nested = "a {\n  color: red;\n  b {\n    color: blue;\n  }\n}\n";
    assert_eq!(
        messages(&check(options, nested)),
        vec![
            "Expected indentation of 0 spaces at line 3",
            "Expected indentation of 0 spaces at line 5",
            "Expected indentation of 2 spaces at line 4",
        ]
    );
}

#[test]
fn value_exception_controls_continuation_lines() {
    let css = "a {\n  transition: opacity 1s,\n  color 1s;\n}\n";
    let with = IndentationOptions::default().with_exceptions([Exception::Value]);
    assert!(check(with, css).is_empty());

    assert_eq!(
        messages(&check(no_exceptions(), css)),
        vec!["Expected indentation of 4 spaces at line 3"]
    );
}

#[test]
fn under_indented_value_line() {
    let css = "a {\n  transition: opacity 1s,\ncolor 1s;\n}\n";
    let violations = check(IndentationOptions::default(), css);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, 3);
    assert_eq!(violations[0].message, "Expected indentation of 2 spaces at line 3");
}

#[test]
fn multi_line_selector() {
    let css = "a,\nb,\n  c {\n  top: 0;\n}\n";
    assert_eq!(
        messages(&check(IndentationOptions::default(), css)),
        vec!["Expected indentation of 0 spaces at line 3"]
    );
}

#[test]
fn tab_closing_brace() {
    let options = IndentationOptions::new(IndentSize::Tab);
    let violations = check(options, "a {\n\tcolor: red;\n }\n");

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "Expected indentation of 0 tabs at line 3");
    assert_eq!(violations[0].line, 3);
}

#[test]
fn tab_expects_one_tab_per_level() {
    let options = IndentationOptions::new(IndentSize::Tab).without_exceptions();
    let css = "a {\n\tb {\n\t\ttop: 0;\n\t}\n}\n";
    assert!(check(options.clone(), css).is_empty());

    let spaces = "a {\n\tb {\n    top: 0;\n\t}\n}\n";
    assert_eq!(
        messages(&check(options, spaces)),
        vec!["Expected indentation of 2 tabs at line 3"]
    );
}

#[test]
fn hierarchical_selector_levels() {
    let options = IndentationOptions::default()
        .with_exceptions([Exception::Value])
        .hierarchical_selectors(true);
    let css = "\
A {
  top: 0;
}
  A B {
    top: 0;
  }
    A B C {
      top: 0;
    }
  A D {
    top: 0;
  }
";
    assert!(check(options.clone(), css).is_empty());

    // Flat indentation is wrong once the hierarchy is inferred.
    let flat = "A {}\nA B {}\nA B C {}\nA D {}\n";
    assert_eq!(
        messages(&check(options, flat)),
        vec![
            "Expected indentation of 2 spaces at line 2",
            "Expected indentation of 4 spaces at line 3",
            "Expected indentation of 2 spaces at line 4",
        ]
    );
}

#[test]
fn hierarchical_unrelated_selector_keeps_tree_level() {
    let options = IndentationOptions::default()
        .without_exceptions()
        .hierarchical_selectors(true);
    let css = ".nav {}\n  .nav .item {}\n.footer {}\n";
    assert!(check(options, css).is_empty());
}

#[test]
fn hierarchical_prefix_is_literal() {
    let options = IndentationOptions::default().hierarchical_selectors(true);
    let css = ".foo {}\n  .foobar {}\n";
    assert!(check(options, css).is_empty());
}

#[test]
fn hierarchical_disabled_ignores_selectors() {
    let css = ".nav {}\n.nav .item {}\n";
    assert!(check(IndentationOptions::default(), css).is_empty());
}

#[test]
fn repeated_checks_are_identical() {
    init_tracing();
    let options = IndentationOptions::default().hierarchical_selectors(true);
    let rule = Indentation::new(options);

    let first_sheet = parse("A {}\nA B {}\nA B C {}\nA D {}\n").unwrap();
    let second_sheet = parse("A B {}\n  A B C {\n  top: 0;\n}\n").unwrap();

    let first = rule.check(&first_sheet).unwrap();
    let second = rule.check(&first_sheet).unwrap();
    assert_eq!(first, second);

    // A run over another tree starts from scratch as well.
    let other = rule.check(&second_sheet).unwrap();
    let fresh = Indentation::new(rule.options().clone())
        .check(&second_sheet)
        .unwrap();
    assert_eq!(other, fresh);
    assert_eq!(first, rule.check(&first_sheet).unwrap());
}

#[test]
fn comments_and_at_rules() {
    let css = "\
/* header */
@import \"base.css\";
@media print {
  /* print only */
  a {
    color: black;
  }
}
";
    assert!(check(no_exceptions(), css).is_empty());

    let wrong = css.replace("  /* print only */", "/* print only */");
    assert_eq!(
        messages(&check(no_exceptions(), &wrong)),
        vec!["Expected indentation of 2 spaces at line 4"]
    );
}

#[test]
fn closing_brace_after_last_declaration_without_semicolon() {
    let with_semicolon = check(IndentationOptions::default(), "a {\n  top: 0;\n    }\n");
    let without = check(IndentationOptions::default(), "a {\n  top: 0\n    }\n");
    assert_eq!(messages(&without), vec!["Expected indentation of 0 spaces at line 3"]);
    assert_eq!(messages(&with_semicolon), messages(&without));

    let nested = "a {\n  b {\n    top: 0\n      }\n}\n";
    assert_eq!(
        messages(&check(no_exceptions(), nested)),
        vec!["Expected indentation of 2 spaces at line 4"]
    );
}

#[test]
fn first_node_checked_without_newline() {
    assert_eq!(
        messages(&check(IndentationOptions::default(), "  a {}\n")),
        vec!["Expected indentation of 0 spaces at line 1"]
    );
}

#[test]
fn check_file_reads_from_disk() {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.css");
    fs::write(&path, "a {\n    top: 0;\n}\n").unwrap();

    let violations = Indentation::default().check_file(&path).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, 2);

    let missing = Indentation::default().check_file(dir.path().join("missing.css"));
    assert!(matches!(missing, Err(sheetlint_indent::Error::Syntax(_))));
}
