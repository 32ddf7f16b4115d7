//! The writer's own output representation: a reverse-linked graph of already-decided pieces of
//! text, built up as the printer walks the IR. Keeping this separate from `Writer` (rather than
//! appending straight into a `String`) is what makes save-point restoration `O(1)`: restoring a
//! save point is just resetting a `WriteNodeId` cursor back to an earlier node. Nodes written
//! after the restored point are simply never visited again when the final string is assembled.

use std::rc::Rc;

use crate::arena::{self, WriteNodeId};
use crate::writer::WriterOptions;

#[derive(Clone)]
pub(crate) enum WriteItem {
  String(Rc<str>),
  RawString(Rc<str>),
  Indent(u8),
  NewLine,
  Tab,
  Space,
}

pub(crate) struct WriteGraphNode {
  pub item: WriteItem,
  pub previous: Option<WriteNodeId>,
}

/// Walks backwards from `tail` to the start of the chain, then assembles the final text
/// forwards, expanding each `Indent` marker into the configured indentation string.
pub(crate) fn write_items_to_string(tail: Option<WriteNodeId>, options: &WriterOptions) -> String {
  let mut nodes = Vec::new();
  let mut current = tail;
  while let Some(id) = current {
    let (item, previous) = arena::with_write_node(id, |node| (node.item.clone(), node.previous));
    nodes.push(item);
    current = previous;
  }
  nodes.reverse();

  let single_indent: Rc<str> = if options.use_tabs {
    Rc::from("\t")
  } else {
    Rc::from(" ".repeat(options.indent_width as usize).as_str())
  };

  let mut result = String::new();
  for item in nodes {
    match item {
      WriteItem::String(text) | WriteItem::RawString(text) => result.push_str(&text),
      WriteItem::Indent(level) => {
        for _ in 0..level {
          result.push_str(&single_indent);
        }
      }
      WriteItem::NewLine => result.push_str(options.new_line_text),
      WriteItem::Tab => result.push('\t'),
      WriteItem::Space => result.push(' '),
    }
  }
  result
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::arena;

  #[test]
  fn assembles_items_in_order_with_tabs_expanded() {
    let a = arena::alloc_write_node(WriteGraphNode {
      item: WriteItem::String(Rc::from("fn main()")),
      previous: None,
    });
    let b = arena::alloc_write_node(WriteGraphNode { item: WriteItem::NewLine, previous: Some(a) });
    let c = arena::alloc_write_node(WriteGraphNode {
      item: WriteItem::Indent(1),
      previous: Some(b),
    });
    let d = arena::alloc_write_node(WriteGraphNode {
      item: WriteItem::String(Rc::from("ok();")),
      previous: Some(c),
    });

    let options = WriterOptions {
      indent_width: 2,
      use_tabs: false,
      new_line_text: "\n",
    };
    let result = write_items_to_string(Some(d), &options);
    assert_eq!(result, "fn main()\n  ok();");
  }
}
