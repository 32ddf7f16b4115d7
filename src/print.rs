//! The two public entry points into the print engine, plus the options that configure a run.

use crate::arena;
use crate::ir::PrintItems;
use crate::printer::Printer;

/// Configuration for a single print run. `max_width` and `indent_width` are measured in
/// characters, not bytes.
#[derive(Clone, Copy, Debug)]
pub struct PrintOptions {
  pub indent_width: u8,
  pub max_width: u32,
  pub use_tabs: bool,
  pub new_line_text: &'static str,
}

impl Default for PrintOptions {
  fn default() -> Self {
    Self {
      indent_width: 2,
      max_width: 80,
      use_tabs: false,
      new_line_text: "\n",
    }
  }
}

/// Prints an already-built [`PrintItems`] tree to a string.
///
/// Prefer [`format`] when the tree is being constructed specifically for this call -- it also
/// isolates the `Info`/`Condition` id space, which matters if a language printer calls back
/// into this crate recursively (ex. formatting an embedded code block from within a condition
/// resolver).
pub fn print(items: PrintItems, options: PrintOptions) -> String {
  let depth = arena::enter_format();
  debug_assert!(depth >= 1);
  let start_node = items.first_node_id();
  let printer = Printer::new(start_node, &options);
  let result = printer.print(&options);
  if arena::exit_format() {
    arena::reset_arenas();
  }
  result
}

/// Builds and prints a [`PrintItems`] tree in one call, giving the builder closure its own
/// `Info`/`Condition` id space so nested `format()` calls (ex. a sub-formatter invoked from a
/// condition resolver) can't collide with ids minted by the caller.
pub fn format(get_print_items: impl FnOnce() -> PrintItems, options: PrintOptions) -> String {
  let saved_counts = arena::take_counts();
  let items = get_print_items();
  let result = print(items, options);
  arena::set_counts(saved_counts);
  result
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::ir::{Condition, ConditionProperties, Info, Signal};
  use std::rc::Rc;

  #[test]
  fn prints_plain_text_unchanged() {
    let mut items = PrintItems::new();
    items.push_str("hello world");
    let result = print(items, PrintOptions::default());
    assert_eq!(result, "hello world");
  }

  #[test]
  fn space_or_newline_breaks_once_the_line_overflows() {
    let mut items = PrintItems::new();
    items.push_str("aaaaaaaaaa");
    items.push_signal(Signal::SpaceOrNewLine);
    items.push_str("bbbbbbbbbb");
    let result = print(items, PrintOptions { max_width: 15, ..PrintOptions::default() });
    assert_eq!(result, "aaaaaaaaaa\nbbbbbbbbbb");
  }

  #[test]
  fn space_or_newline_stays_a_space_when_it_fits() {
    let mut items = PrintItems::new();
    items.push_str("short");
    items.push_signal(Signal::SpaceOrNewLine);
    items.push_str("line");
    let result = print(items, PrintOptions::default());
    assert_eq!(result, "short line");
  }

  #[test]
  fn format_in_format_isolates_id_counters() {
    fn build_inner() -> PrintItems {
      let info = Info::new("innerInfo");
      assert_eq!(info.unique_id(), 0, "a nested format() call should start its own id counter at zero");
      let mut items = PrintItems::new();
      items.push_info(info);
      items.push_str("inner");
      items
    }

    let first_info = Info::new("first");
    assert_eq!(first_info.unique_id(), 0);

    let mut outer_items = PrintItems::new();
    outer_items.push_info(first_info);
    let mut condition = Condition::new(
      "runsNestedFormat",
      ConditionProperties {
        condition: Rc::new(|_| {
          let inner = format(build_inner, PrintOptions::default());
          assert_eq!(inner, "inner");
          Some(true)
        }),
        true_path: Some("outer".into()),
        false_path: None,
      },
    );
    condition.get_reference();
    outer_items.push_condition(condition);

    let result = print(outer_items, PrintOptions::default());
    assert_eq!(result, "outer");

    let after_info = Info::new("after");
    assert_eq!(
      after_info.unique_id(),
      1,
      "the outer id counter resumes from where it left off once the nested format() call restores it, unaffected by the inner call's own 0-based ids"
    );
  }

  #[test]
  fn condition_true_path_prints_when_resolver_returns_true() {
    let mut items = PrintItems::new();
    let mut condition = Condition::new(
      "alwaysTrue",
      ConditionProperties {
        condition: Rc::new(|_| Some(true)),
        true_path: Some("yes".into()),
        false_path: Some("no".into()),
      },
    );
    condition.get_reference();
    items.push_condition(condition);
    let result = print(items, PrintOptions::default());
    assert_eq!(result, "yes");
  }
}
