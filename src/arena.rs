//! Thread-local storage backing the print-item graph and the writer's output graph.
//!
//! A single-threaded arena that nodes are pushed into and never individually freed until the
//! outermost `format()` call finishes, addressed by plain `u32` indices into a `Vec` rather than
//! shared references. Nothing here is `unsafe`.

use std::cell::RefCell;

use crate::ir::PrintNode;
use crate::write_items::WriteGraphNode;

/// An index into the thread-local print-item arena.
pub type NodeId = u32;

/// An index into the thread-local writer-output arena.
pub type WriteNodeId = u32;

#[derive(Default, Clone, Copy)]
struct Counts {
  info_id: u32,
  condition_id: u32,
}

thread_local! {
  static NODES: RefCell<Vec<PrintNode>> = RefCell::new(Vec::new());
  static WRITE_NODES: RefCell<Vec<WriteGraphNode>> = RefCell::new(Vec::new());
  static COUNTS: RefCell<Counts> = RefCell::new(Counts::default());
  static FORMATTING_DEPTH: RefCell<u32> = RefCell::new(0);
}

pub(crate) fn alloc_node(node: PrintNode) -> NodeId {
  NODES.with(|nodes| {
    let mut nodes = nodes.borrow_mut();
    let id = nodes.len() as u32;
    nodes.push(node);
    id
  })
}

pub(crate) fn node_next(id: NodeId) -> Option<NodeId> {
  NODES.with(|nodes| nodes.borrow()[id as usize].next)
}

pub(crate) fn set_node_next(id: NodeId, next: Option<NodeId>) {
  NODES.with(|nodes| nodes.borrow_mut()[id as usize].next = next);
}

pub(crate) fn with_node<R>(id: NodeId, f: impl FnOnce(&PrintNode) -> R) -> R {
  NODES.with(|nodes| f(&nodes.borrow()[id as usize]))
}

pub(crate) fn alloc_write_node(node: WriteGraphNode) -> WriteNodeId {
  WRITE_NODES.with(|nodes| {
    let mut nodes = nodes.borrow_mut();
    let id = nodes.len() as u32;
    nodes.push(node);
    id
  })
}

pub(crate) fn with_write_node<R>(id: WriteNodeId, f: impl FnOnce(&WriteGraphNode) -> R) -> R {
  WRITE_NODES.with(|nodes| f(&nodes.borrow()[id as usize]))
}

pub(crate) fn next_info_id() -> u32 {
  COUNTS.with(|counts| {
    let mut counts = counts.borrow_mut();
    let id = counts.info_id;
    counts.info_id += 1;
    id
  })
}

pub(crate) fn next_condition_id() -> u32 {
  COUNTS.with(|counts| {
    let mut counts = counts.borrow_mut();
    let id = counts.condition_id;
    counts.condition_id += 1;
    id
  })
}

/// Takes the current id counters, resetting them to zero. Paired with [`set_counts`] so that a
/// nested `format()` call gets its own id space and the outer call's counters resume afterwards
/// (see `print::format`'s `test_format_in_format`).
pub(crate) fn take_counts() -> (u32, u32) {
  COUNTS.with(|counts| {
    let taken = std::mem::take(&mut *counts.borrow_mut());
    (taken.info_id, taken.condition_id)
  })
}

pub(crate) fn set_counts(counts: (u32, u32)) {
  COUNTS.with(|cell| {
    *cell.borrow_mut() = Counts {
      info_id: counts.0,
      condition_id: counts.1,
    }
  });
}

/// Marks entry into a `format()` call, returning the new nesting depth.
pub(crate) fn enter_format() -> u32 {
  FORMATTING_DEPTH.with(|depth| {
    let mut depth = depth.borrow_mut();
    *depth += 1;
    *depth
  })
}

/// Marks exit from a `format()` call. Returns `true` when this was the outermost call, meaning
/// the arenas are now safe to clear.
pub(crate) fn exit_format() -> bool {
  FORMATTING_DEPTH.with(|depth| {
    let mut depth = depth.borrow_mut();
    *depth -= 1;
    *depth == 0
  })
}

pub(crate) fn is_formatting() -> bool {
  FORMATTING_DEPTH.with(|depth| *depth.borrow() > 0)
}

/// Clears both arenas. Only valid to call once the outermost `format()` call has finished --
/// any node ids handed out before this point become dangling.
pub(crate) fn reset_arenas() {
  NODES.with(|nodes| nodes.borrow_mut().clear());
  WRITE_NODES.with(|nodes| nodes.borrow_mut().clear());
}
