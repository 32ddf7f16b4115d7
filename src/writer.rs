//! Tracks the line/column/indent position of the text produced so far and appends to the
//! write-item graph (see `write_items.rs`). The printer is the only thing that drives this --
//! it never inspects `Writer`'s internals directly, only through `writer_info()` and the
//! opaque `WriterState` snapshots used for save points.

use crate::arena::{self, WriteNodeId};
use crate::ir::{RawStringContainer, StringContainer, WriterInfo};
use crate::write_items::{write_items_to_string, WriteGraphNode, WriteItem};

pub struct WriterOptions {
  pub indent_width: u8,
  pub use_tabs: bool,
  pub new_line_text: &'static str,
}

/// Everything a save point needs to restore the writer to an earlier point. All fields are
/// `Copy`, so cloning this (as every `SavePoint` does) is free.
#[derive(Clone, Copy)]
pub(crate) struct WriterState {
  indent_level: u8,
  line_number: u32,
  column_number: u32,
  line_start_indent_level: u8,
  line_start_column_number: u32,
  ignore_indent_count: u8,
  has_indented_this_line: bool,
  expect_new_line_next: bool,
  items: Option<WriteNodeId>,
}

pub(crate) struct Writer {
  state: WriterState,
  indent_width: u8,
}

impl Writer {
  pub fn new(indent_width: u8) -> Self {
    Self {
      indent_width,
      state: WriterState {
        indent_level: 0,
        line_number: 0,
        column_number: 0,
        line_start_indent_level: 0,
        line_start_column_number: 0,
        ignore_indent_count: 0,
        has_indented_this_line: false,
        expect_new_line_next: false,
        items: None,
      },
    }
  }

  pub fn start_indent(&mut self) {
    self.state.indent_level += 1;
  }

  pub fn finish_indent(&mut self) {
    debug_assert!(self.state.indent_level > 0, "finish_indent called without a matching start_indent");
    self.state.indent_level = self.state.indent_level.saturating_sub(1);
  }

  pub fn start_ignoring_indent(&mut self) {
    self.state.ignore_indent_count += 1;
  }

  pub fn finish_ignoring_indent(&mut self) {
    debug_assert!(self.state.ignore_indent_count > 0, "finish_ignoring_indent called without a matching start");
    self.state.ignore_indent_count = self.state.ignore_indent_count.saturating_sub(1);
  }

  pub fn mark_expect_new_line(&mut self) {
    self.state.expect_new_line_next = true;
  }

  pub fn write_new_line(&mut self) {
    self.push(WriteItem::NewLine);
    self.state.line_number += 1;
    self.state.column_number = 0;
    self.state.line_start_column_number = 0;
    self.state.has_indented_this_line = false;
    self.state.expect_new_line_next = false;
  }

  pub fn write_tab(&mut self) {
    self.force_expected_new_line_if_needed();
    self.write_indent_if_necessary();
    self.push(WriteItem::Tab);
    self.state.column_number += self.indent_width as u32;
  }

  pub fn write_single_indent(&mut self) {
    self.force_expected_new_line_if_needed();
    self.write_indent_if_necessary();
    self.push(WriteItem::Indent(1));
    self.state.column_number += self.indent_width as u32;
  }

  pub fn write_space(&mut self) {
    self.force_expected_new_line_if_needed();
    self.write_indent_if_necessary();
    self.push(WriteItem::Space);
    self.state.column_number += 1;
  }

  pub fn write_string(&mut self, text: &StringContainer) {
    self.force_expected_new_line_if_needed();
    self.write_indent_if_necessary();
    self.push(WriteItem::String(text.text.clone()));
    self.state.column_number += text.char_count;
  }

  pub fn write_raw(&mut self, text: &RawStringContainer) {
    self.force_expected_new_line_if_needed();
    self.write_indent_if_necessary();
    self.push(WriteItem::RawString(text.text.clone()));

    let newline_count = text.text.matches('\n').count() as u32;
    if newline_count == 0 {
      self.state.column_number += text.first_line_char_count;
    } else {
      self.state.line_number += newline_count;
      let last_line_char_count = text.text.rsplit('\n').next().unwrap_or("").chars().count() as u32;
      self.state.column_number = last_line_char_count;
      self.state.line_start_column_number = 0;
      self.state.line_start_indent_level = self.state.indent_level;
      self.state.has_indented_this_line = true;
    }
  }

  fn force_expected_new_line_if_needed(&mut self) {
    if self.state.expect_new_line_next && self.state.column_number != 0 {
      self.write_new_line();
    }
    self.state.expect_new_line_next = false;
  }

  fn write_indent_if_necessary(&mut self) {
    if self.state.has_indented_this_line || self.state.ignore_indent_count > 0 {
      return;
    }
    self.state.has_indented_this_line = true;
    self.state.line_start_indent_level = self.state.indent_level;
    if self.state.indent_level > 0 {
      self.push(WriteItem::Indent(self.state.indent_level));
      self.state.column_number += self.indent_width as u32 * self.state.indent_level as u32;
    }
    self.state.line_start_column_number = self.state.column_number;
  }

  fn push(&mut self, item: WriteItem) {
    let id = arena::alloc_write_node(WriteGraphNode { item, previous: self.state.items });
    self.state.items = Some(id);
  }

  pub fn writer_info(&self) -> WriterInfo {
    WriterInfo {
      line_number: self.state.line_number,
      column_number: self.state.column_number,
      indent_level: self.state.indent_level,
      line_start_indent_level: self.state.line_start_indent_level,
      line_start_column_number: self.state.line_start_column_number,
    }
  }

  pub(crate) fn state(&self) -> WriterState {
    self.state
  }

  pub(crate) fn restore_state(&mut self, state: WriterState) {
    self.state = state;
  }

  pub fn into_string(self, new_line_text: &'static str, use_tabs: bool) -> String {
    write_items_to_string(
      self.state.items,
      &WriterOptions {
        indent_width: self.indent_width,
        use_tabs,
        new_line_text,
      },
    )
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn tracks_column_and_line_across_a_newline() {
    let mut writer = Writer::new(2);
    writer.write_string(&StringContainer::new("abc"));
    assert_eq!(writer.writer_info().column_number, 3);
    writer.write_new_line();
    writer.start_indent();
    writer.write_string(&StringContainer::new("d"));
    let info = writer.writer_info();
    assert_eq!(info.line_number, 1);
    assert_eq!(info.column_number, 3); // 2 for the indent + 1 char
    assert!(info.is_start_of_line_indented());
  }

  #[test]
  fn expect_new_line_forces_a_break_before_the_next_write() {
    let mut writer = Writer::new(2);
    writer.write_string(&StringContainer::new("// comment"));
    writer.mark_expect_new_line();
    writer.write_string(&StringContainer::new("next"));
    let text = writer.into_string("\n", false);
    assert_eq!(text, "// comment\nnext");
  }

  #[test]
  fn raw_string_advances_line_and_column_by_its_contents() {
    let mut writer = Writer::new(2);
    writer.write_raw(&RawStringContainer::new("abc\ndefgh"));
    let info = writer.writer_info();
    assert_eq!(info.line_number, 1);
    assert_eq!(info.column_number, 5);
  }

  #[test]
  fn save_point_restore_discards_writes_after_it() {
    let mut writer = Writer::new(2);
    writer.write_string(&StringContainer::new("abc"));
    let saved = writer.state();
    writer.write_string(&StringContainer::new("def"));
    assert_eq!(writer.writer_info().column_number, 6);
    writer.restore_state(saved);
    assert_eq!(writer.writer_info().column_number, 3);
    assert_eq!(writer.into_string("\n", false), "abc");
  }
}
