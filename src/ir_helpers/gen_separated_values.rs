use std::rc::Rc;

use crate::condition_helpers;
use crate::ir::{Condition, ConditionProperties, ConditionResolver, Info, PrintItems, Signal};
use crate::ir_helpers::with_indent;

/// Options for [`gen_separated_values`].
pub struct SeparatedValuesOptions {
  /// Whether the last value gets the separator too when the list prints multi-line (ex. a
  /// trailing comma in an array literal).
  pub trailing_separator: bool,
}

/// Builds a single- or multi-line separated list, the way a language printer builds an array
/// literal's elements or a call expression's arguments: on one line the values are joined by
/// `separator` followed by a space (via `Signal::SpaceOrNewLine`, so it can still give way to a
/// narrower line); once the list doesn't fit, each value moves to its own line, indented, with
/// `separator` trailing it instead of a following space.
///
/// Whether the list is "multi-line" is itself a forward-referencing condition -- see
/// [`crate::ir_helpers::surround_with_newlines_indented_if_multi_line`] for the same pattern --
/// so a single overflowing `SpaceOrNewLine` partway through the list is enough to flip every
/// earlier separator over to a newline on the following print of this same condition.
pub fn gen_separated_values(values: Vec<PrintItems>, separator: &'static str, options: SeparatedValuesOptions) -> PrintItems {
  let mut values: Vec<PrintItems> = values.into_iter().filter(|value| !value.is_empty()).collect();
  if values.is_empty() {
    return PrintItems::new();
  }
  if values.len() == 1 {
    return values.remove(0);
  }

  let start_info = Info::new("separatedValuesStart");
  let end_info = Info::new("separatedValuesEnd");
  let is_multi_line: ConditionResolver = Rc::new(move |context| condition_helpers::is_multiple_lines(context, start_info, end_info));

  let values_len = values.len();
  let mut inner = PrintItems::new();
  for (i, value) in values.into_iter().enumerate() {
    let is_last = i == values_len - 1;
    inner.extend(value);
    if !is_last {
      inner.push_str(separator);
      inner.push_condition(Condition::new(
        "separatedValueBreak",
        ConditionProperties {
          condition: is_multi_line.clone(),
          true_path: Some(Signal::NewLine.into()),
          false_path: Some(Signal::SpaceOrNewLine.into()),
        },
      ));
    } else if options.trailing_separator {
      inner.push_condition(Condition::new(
        "separatedValuesTrailingSeparator",
        ConditionProperties {
          condition: is_multi_line.clone(),
          true_path: Some(separator.into()),
          false_path: None,
        },
      ));
    }
  }

  let mut items = PrintItems::new();
  items.push_info(start_info);
  items.push_condition(Condition::new(
    "separatedValuesIndentIfMultiLine",
    ConditionProperties {
      condition: is_multi_line,
      true_path: Some(with_indent(inner.clone())),
      false_path: Some(inner),
    },
  ));
  items.push_info(end_info);
  items
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::print::{print, PrintOptions};

  fn values(strs: &[&str]) -> Vec<PrintItems> {
    strs.iter().map(|s| PrintItems::from(*s)).collect()
  }

  #[test]
  fn joins_on_one_line_when_it_fits() {
    let items = gen_separated_values(values(&["a", "b", "c"]), ",", SeparatedValuesOptions { trailing_separator: false });
    let result = print(items, PrintOptions { max_width: 80, ..PrintOptions::default() });
    assert_eq!(result, "a, b, c");
  }

  #[test]
  fn wraps_one_value_per_line_indented_once_it_overflows() {
    let items = gen_separated_values(
      values(&["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]),
      ",",
      SeparatedValuesOptions { trailing_separator: false },
    );
    let result = print(items, PrintOptions { max_width: 15, ..PrintOptions::default() });
    assert_eq!(result, "aaaaaaaaaa,\n  bbbbbbbbbb,\n  cccccccccc");
  }

  #[test]
  fn adds_a_trailing_separator_only_when_wrapped() {
    let one_line = gen_separated_values(values(&["a", "b"]), ",", SeparatedValuesOptions { trailing_separator: true });
    assert_eq!(print(one_line, PrintOptions { max_width: 80, ..PrintOptions::default() }), "a, b");

    let wrapped = gen_separated_values(values(&["aaaaaaaaaa", "bbbbbbbbbb"]), ",", SeparatedValuesOptions { trailing_separator: true });
    assert_eq!(
      print(wrapped, PrintOptions { max_width: 15, ..PrintOptions::default() }),
      "aaaaaaaaaa,\n  bbbbbbbbbb,"
    );
  }

  #[test]
  fn skips_empty_values_without_leaving_a_dangling_separator() {
    let items = gen_separated_values(
      vec!["a".into(), PrintItems::new(), "b".into(), "c".into()],
      ",",
      SeparatedValuesOptions { trailing_separator: false },
    );
    let result = print(items, PrintOptions::default());
    assert_eq!(result, "a, b, c");
  }

  #[test]
  fn a_single_value_prints_with_no_separator() {
    let items = gen_separated_values(values(&["only"]), ",", SeparatedValuesOptions { trailing_separator: true });
    assert_eq!(print(items, PrintOptions::default()), "only");
  }
}
