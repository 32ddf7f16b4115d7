use std::rc::Rc;

use crate::condition_helpers;
use crate::conditions;
use crate::ir::{Condition, ConditionProperties, Info, PrintItems, Signal};

/// Wraps `item` with a `NewLine` before and after it. Returns `item` unchanged if it's empty,
/// since an empty surround would just be two newlines with nothing between them.
pub fn surround_with_new_lines(item: PrintItems) -> PrintItems {
  if item.is_empty() {
    return item;
  }

  let mut items = PrintItems::new();
  items.push_signal(Signal::NewLine);
  items.extend(item);
  items.push_signal(Signal::NewLine);
  items
}

/// Indents `item` by one level.
pub fn with_indent(item: PrintItems) -> PrintItems {
  with_indent_times(item, 1)
}

/// Indents `item` by `times` levels.
pub fn with_indent_times(item: PrintItems, times: u8) -> PrintItems {
  if item.is_empty() {
    return item;
  }

  let mut items = PrintItems::new();
  for _ in 0..times {
    items.push_signal(Signal::StartIndent);
  }
  items.extend(item);
  for _ in 0..times {
    items.push_signal(Signal::FinishIndent);
  }
  items
}

/// Marks `item` as a single group for the purposes of `SpaceOrNewLine`/`PossibleNewLine`
/// precedence -- an unresolved break inside `item` won't fire until any shallower group does.
pub fn new_line_group(item: PrintItems) -> PrintItems {
  if item.is_empty() {
    return item;
  }

  let mut items = PrintItems::new();
  items.push_signal(Signal::StartNewLineGroup);
  items.extend(item);
  items.push_signal(Signal::FinishNewLineGroup);
  items
}

/// Generates IR from a string, turning `\n` into `Signal::NewLine` and `\t` into `Signal::Tab`
/// so the printer's width/indent tracking stays accurate.
pub fn gen_from_string(text: &str) -> PrintItems {
  gen_string_lines(text, gen_from_string_line)
}

/// Same as [`gen_from_string`] but trims trailing whitespace off of each line first.
pub fn gen_from_string_trim_line_ends(text: &str) -> PrintItems {
  gen_string_lines(text, |line| gen_from_string_line(line.trim_end()))
}

fn gen_string_lines(text: &str, gen_line: impl Fn(&str) -> PrintItems) -> PrintItems {
  let mut items = PrintItems::new();

  for (i, line) in text.lines().enumerate() {
    if i > 0 {
      items.push_signal(Signal::NewLine);
    }
    items.extend(gen_line(line));
  }

  // str::lines() drops a trailing newline, so add it back if the source had one
  if text.ends_with('\n') {
    items.push_signal(Signal::NewLine);
  }

  items
}

fn gen_from_string_line(line: &str) -> PrintItems {
  let mut items = PrintItems::new();
  for (i, piece) in line.split('\t').enumerate() {
    if i > 0 {
      items.push_signal(Signal::Tab);
    }
    if !piece.is_empty() {
      items.push_str(piece);
    }
  }
  items
}

/// Generates IR from text that should be passed through verbatim, ignoring its own indentation
/// and without the printer re-measuring every line inside it. See [`crate::ir::RawStringContainer`].
pub fn gen_from_raw_string(text: &str) -> PrintItems {
  let mut items = PrintItems::new();
  if !text.is_empty() {
    items.push_raw_str(text);
  }
  items
}

/// Surrounds `inner_items` with newlines and indentation only if it ends up spanning more than
/// one line; otherwise leaves a possible newline in place so it can still break if the line
/// gets too long. This is the canonical example of a condition whose resolver depends on
/// something that hasn't been printed yet -- `is_multiple_lines` can't answer until the writer
/// reaches `end_info`, so the printer installs a look-ahead save point and revisits this
/// condition once that happens.
pub fn surround_with_newlines_indented_if_multi_line(inner_items: PrintItems, indent_width: u8) -> PrintItems {
  if inner_items.is_empty() {
    return inner_items;
  }

  let start_info = Info::new("surroundWithNewLinesIndentedIfMultiLineStart");
  let end_info = Info::new("surroundWithNewLinesIndentedIfMultiLineEnd");

  let mut false_path = PrintItems::new();
  false_path.push_condition(conditions::if_above_width(indent_width, Signal::PossibleNewLine.into()));
  false_path.extend(inner_items.clone());

  let mut items = PrintItems::new();
  items.push_info(start_info);
  items.push_condition(Condition::new(
    "newLineIfMultiLine",
    ConditionProperties {
      condition: Rc::new(move |context| condition_helpers::is_multiple_lines(context, start_info, end_info)),
      true_path: Some(surround_with_new_lines(with_indent(inner_items))),
      false_path: Some(false_path),
    },
  ));
  items.push_info(end_info);
  items
}

/// Indents `item` by one level only if it ends up spanning more than one line.
pub fn with_indent_if_multi_line(inner_items: PrintItems, indent_width: u8) -> PrintItems {
  if inner_items.is_empty() {
    return inner_items;
  }

  let start_info = Info::new("withIndentIfMultiLineStart");
  let end_info = Info::new("withIndentIfMultiLineEnd");

  let mut items = PrintItems::new();
  items.push_info(start_info);
  items.push_condition(Condition::new(
    "indentIfMultiLine",
    ConditionProperties {
      condition: Rc::new(move |context| condition_helpers::is_multiple_lines(context, start_info, end_info)),
      true_path: Some(with_indent(inner_items)),
      false_path: None,
    },
  ));
  items.push_info(end_info);
  items
}
