//! Small, reusable [`ConditionResolver`]s that don't need their own one-off closure at each
//! call site. Resolvers that only look at `writer_info` are cheap to construct on demand, but
//! caching the common ones in thread-locals avoids re-allocating an `Rc` for every condition a
//! language printer creates.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ir::ConditionResolver;

thread_local! {
  static IS_START_OF_LINE: RefCell<Option<ConditionResolver>> = RefCell::new(None);
  static IS_START_OF_LINE_INDENTED: RefCell<Option<ConditionResolver>> = RefCell::new(None);
}

fn cached(cell: &'static std::thread::LocalKey<RefCell<Option<ConditionResolver>>>, build: impl FnOnce() -> ConditionResolver) -> ConditionResolver {
  cell.with(|slot| {
    let mut slot = slot.borrow_mut();
    if slot.is_none() {
      *slot = Some(build());
    }
    slot.as_ref().unwrap().clone()
  })
}

/// Resolves to whether the writer is currently positioned at the very start of a line.
pub fn is_start_of_line() -> ConditionResolver {
  cached(&IS_START_OF_LINE, || Rc::new(|context| Some(context.writer_info.is_start_of_line())))
}

/// Resolves to whether the writer is at the start of a line that has been indented (ie. the
/// line is not column `0` of the document, just the start of an indented line).
pub fn is_start_of_line_indented() -> ConditionResolver {
  cached(&IS_START_OF_LINE_INDENTED, || {
    Rc::new(|context| Some(context.writer_info.is_start_of_line_indented()))
  })
}
