//! A worked example printer (a JSON-ish array literal) exercising the full round trip: signals,
//! conditions, infos, and the look-ahead machinery that resolves a condition depending on text
//! not yet printed.

use std::rc::Rc;

use inkline_core::*;

#[derive(Clone)]
struct Position {
  line_number: u32,
}

#[derive(Clone)]
struct ArrayElement {
  position: Position,
  text: String,
}

struct ArrayLiteralExpression {
  position: Position,
  elements: Vec<ArrayElement>,
}

fn do_test(expr: &ArrayLiteralExpression, expected_text: &str) {
  let result = format(
    || gen_array_literal_expression(expr),
    PrintOptions {
      indent_width: 2,
      max_width: 40,
      use_tabs: false,
      new_line_text: "\n",
    },
  );
  assert_eq!(result, expected_text);
}

#[test]
fn formats_on_one_line_when_it_fits() {
  let expr = ArrayLiteralExpression {
    position: Position { line_number: 0 },
    elements: vec![
      ArrayElement {
        position: Position { line_number: 0 },
        text: "test".to_string(),
      },
      ArrayElement {
        position: Position { line_number: 0 },
        text: "other".to_string(),
      },
    ],
  };
  do_test(&expr, "[test, other]");
}

#[test]
fn formats_multi_line_when_the_first_element_starts_on_a_new_line_in_the_source() {
  let expr = ArrayLiteralExpression {
    position: Position { line_number: 0 },
    elements: vec![ArrayElement {
      position: Position { line_number: 1 },
      text: "test".to_string(),
    }],
  };
  do_test(&expr, "[\n  test\n]");
}

#[test]
fn stays_on_one_line_even_past_the_width_when_theres_only_one_element() {
  let long_text = "asdfasdfasdfasdfasdfasdfasdfasdfasdfasdfasdfsadfasdf";
  let expr = ArrayLiteralExpression {
    position: Position { line_number: 0 },
    elements: vec![ArrayElement {
      position: Position { line_number: 0 },
      text: long_text.to_string(),
    }],
  };
  do_test(&expr, &format!("[{long_text}]"));
}

#[test]
fn breaks_onto_multiple_lines_once_the_elements_would_overflow_the_width() {
  let expr = ArrayLiteralExpression {
    position: Position { line_number: 0 },
    elements: vec![
      ArrayElement {
        position: Position { line_number: 0 },
        text: "test".to_string(),
      },
      ArrayElement {
        position: Position { line_number: 0 },
        text: "other".to_string(),
      },
      ArrayElement {
        position: Position { line_number: 0 },
        text: "asdfasdfasdfasdfasdfasdfasdf".to_string(),
      },
    ],
  };
  do_test(&expr, "[\n  test,\n  other,\n  asdfasdfasdfasdfasdfasdfasdf\n]");
}

#[test]
fn empty_array_prints_with_no_inner_space() {
  let expr = ArrayLiteralExpression {
    position: Position { line_number: 0 },
    elements: vec![],
  };
  do_test(&expr, "[]");
}

fn gen_array_literal_expression(expr: &ArrayLiteralExpression) -> PrintItems {
  let mut items = PrintItems::new();
  let start_info = Info::new("arrayStart");
  let end_info = Info::new("arrayEnd");
  let is_multiple_lines = multiple_lines_resolver(
    expr.position.clone(),
    expr.elements.iter().map(|e| e.position.clone()).collect(),
    start_info,
    end_info,
  );

  items.push_info(start_info);
  items.push_str("[");

  items.push_condition(Condition::new(
    "arrayStartNewLine",
    ConditionProperties {
      condition: is_multiple_lines.clone(),
      true_path: Some(Signal::NewLine.into()),
      false_path: None,
    },
  ));

  let generated_elements = gen_elements(&expr.elements, &is_multiple_lines);
  items.push_condition(Condition::new(
    "indentIfMultipleLines",
    ConditionProperties {
      condition: is_multiple_lines.clone(),
      true_path: Some(ir_helpers::with_indent(generated_elements.clone())),
      false_path: Some(generated_elements),
    },
  ));

  items.push_condition(Condition::new(
    "arrayEndNewLine",
    ConditionProperties {
      condition: is_multiple_lines,
      true_path: Some(Signal::NewLine.into()),
      false_path: None,
    },
  ));
  items.push_str("]");
  items.push_info(end_info);
  items
}

fn gen_elements(elements: &[ArrayElement], is_multiple_lines: &ConditionResolver) -> PrintItems {
  let mut items = PrintItems::new();
  let elements_len = elements.len();

  for (i, element) in elements.iter().enumerate() {
    items.push_string(element.text.clone());

    if i < elements_len - 1 {
      items.push_str(",");
      items.push_condition(Condition::new(
        "afterCommaSeparator",
        ConditionProperties {
          condition: is_multiple_lines.clone(),
          true_path: Some(Signal::NewLine.into()),
          false_path: Some(Signal::SpaceOrNewLine.into()),
        },
      ));
    }
  }

  items
}

/// Mirrors a typical language printer's multi-line heuristic: trust the source positions first
/// (did the author already put this on its own line?), and only fall back on asking the printer
/// whether the formatted output ended up spanning multiple lines once printed.
fn multiple_lines_resolver(parent_position: Position, child_positions: Vec<Position>, start_info: Info, end_info: Info) -> ConditionResolver {
  Rc::new(move |context| {
    if child_positions.is_empty() {
      return Some(false);
    }
    if parent_position.line_number < child_positions[0].line_number {
      return Some(true);
    }
    condition_helpers::is_multiple_lines(context, start_info, end_info)
  })
}
