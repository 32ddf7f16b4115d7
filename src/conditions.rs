//! Ready-made [`Condition`] constructors for patterns that come up across language printers.

use std::rc::Rc;

use crate::ir::{Condition, ConditionProperties, PrintItems};

/// A condition that takes `true_path` only once the writer's current column has already
/// reached `width` -- handy for guarding a `PossibleNewLine` so it isn't registered while still
/// at the start of a line (where breaking would accomplish nothing).
pub fn if_above_width(width: u8, true_path: PrintItems) -> Condition {
  Condition::new(
    "ifAboveWidth",
    ConditionProperties {
      condition: Rc::new(move |context| Some(context.writer_info.column_number >= width as u32)),
      true_path: Some(true_path),
      false_path: None,
    },
  )
}

/// A condition with a resolver that doesn't need to inspect any printer state.
pub fn if_true(name: &'static str, resolve: impl Fn() -> Option<bool> + 'static, true_path: PrintItems) -> Condition {
  Condition::new(
    name,
    ConditionProperties {
      condition: Rc::new(move |_| resolve()),
      true_path: Some(true_path),
      false_path: None,
    },
  )
}
