//! Walks the IR graph built by a language printer, writing output through [`crate::writer::Writer`]
//! and resolving conditions/infos as it goes -- backtracking via save points whenever a layout
//! decision depends on something not yet printed. This is the single mutator of `Writer`; nothing
//! else is allowed to touch it.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::arena::{self, NodeId};
use crate::collections::RcStack;
use crate::ir::{Condition, ConditionResolverContext, Info, PrintItemKind, RawStringContainer, Signal, StringContainer, WriterInfo};
use crate::print::PrintOptions;
use crate::writer::Writer;

/// Everything needed to rewind the printer to an earlier point and resume from there. Cloning
/// the pieces that make this up is cheap: `writer_state` is `Copy`, and `possible_new_line_save_point`
/// / `next_node_stack` are reference-counted.
struct SavePoint {
  #[cfg(debug_assertions)]
  name: &'static str,
  new_line_group_depth: u16,
  writer_state: crate::writer::WriterState,
  possible_new_line_save_point: Option<Rc<SavePoint>>,
  node: Option<NodeId>,
  next_node_stack: RcStack<NodeId>,
}

pub(crate) struct Printer {
  current_node: Option<NodeId>,
  writer: Writer,
  possible_new_line_save_point: Option<Rc<SavePoint>>,
  new_line_group_depth: u16,
  next_node_stack: RcStack<NodeId>,
  resolved_conditions: FxHashMap<u32, Option<bool>>,
  resolved_infos: FxHashMap<u32, WriterInfo>,
  look_ahead_condition_save_points: FxHashMap<u32, Rc<SavePoint>>,
  look_ahead_info_save_points: FxHashMap<u32, Rc<SavePoint>>,
  max_width: u32,
  skip_moving_next: bool,
}

impl Printer {
  pub(crate) fn new(start_node: Option<NodeId>, options: &PrintOptions) -> Self {
    Self {
      current_node: start_node,
      writer: Writer::new(options.indent_width),
      possible_new_line_save_point: None,
      new_line_group_depth: 0,
      next_node_stack: RcStack::new(),
      resolved_conditions: FxHashMap::default(),
      resolved_infos: FxHashMap::default(),
      look_ahead_condition_save_points: FxHashMap::default(),
      look_ahead_info_save_points: FxHashMap::default(),
      max_width: options.max_width,
      skip_moving_next: false,
    }
  }

  pub(crate) fn print(mut self, options: &PrintOptions) -> String {
    while let Some(node_id) = self.current_node {
      self.skip_moving_next = false;
      self.print_node(node_id);

      if !self.skip_moving_next {
        self.current_node = arena::node_next(node_id);
      }

      if self.current_node.is_none() {
        let (popped, rest) = self.next_node_stack.pop();
        self.next_node_stack = rest;
        self.current_node = popped;
      }
    }

    debug_assert!(
      self.look_ahead_condition_save_points.is_empty(),
      "a condition's look-ahead save point was never resolved -- the condition that created it must never have been reached again"
    );
    debug_assert!(
      self.look_ahead_info_save_points.is_empty(),
      "an info's look-ahead save point was never resolved -- the info that created it must never have been reached again"
    );
    debug_assert_eq!(self.new_line_group_depth, 0, "a StartNewLineGroup signal was never matched by FinishNewLineGroup");

    self.writer.into_string(options.new_line_text, options.use_tabs)
  }

  fn print_node(&mut self, node_id: NodeId) {
    enum Action {
      Signal(Signal),
      Str(StringContainer),
      Raw(RawStringContainer),
      Info(Info),
      Condition(Condition),
    }

    let action = arena::with_node(node_id, |node| match &node.item {
      PrintItemKind::Signal(signal) => Action::Signal(*signal),
      PrintItemKind::Str(text) => Action::Str(text.clone()),
      PrintItemKind::Raw(text) => Action::Raw(text.clone()),
      PrintItemKind::Info(info) => Action::Info(*info),
      PrintItemKind::Condition(condition) => Action::Condition(condition.clone()),
    });

    match action {
      Action::Signal(signal) => self.handle_signal(node_id, signal),
      Action::Str(text) => {
        self.writer.write_string(&text);
        self.check_line_width();
      }
      Action::Raw(text) => {
        self.writer.write_raw(&text);
        self.check_line_width();
      }
      Action::Info(info) => self.handle_info(&info),
      Action::Condition(condition) => {
        let next = arena::node_next(node_id);
        self.handle_condition(&condition, next);
      }
    }
  }

  fn handle_signal(&mut self, node_id: NodeId, signal: Signal) {
    match signal {
      Signal::NewLine => {
        self.writer.write_new_line();
        self.possible_new_line_save_point = None;
      }
      Signal::Tab => {
        self.writer.write_tab();
        self.check_line_width();
      }
      Signal::PossibleNewLine => self.mark_possible_new_line_if_able(node_id, "possibleNewLine"),
      Signal::SpaceOrNewLine => {
        self.mark_possible_new_line_if_able(node_id, "spaceOrNewLine");
        self.writer.write_space();
        self.check_line_width();
      }
      Signal::ExpectNewLine => self.writer.mark_expect_new_line(),
      Signal::StartIndent => self.writer.start_indent(),
      Signal::FinishIndent => self.writer.finish_indent(),
      Signal::StartNewLineGroup => self.new_line_group_depth += 1,
      Signal::FinishNewLineGroup => self.new_line_group_depth = self.new_line_group_depth.saturating_sub(1),
      Signal::SingleIndent => {
        self.writer.write_single_indent();
        self.check_line_width();
      }
      Signal::StartIgnoringIndent => self.writer.start_ignoring_indent(),
      Signal::FinishIgnoringIndent => self.writer.finish_ignoring_indent(),
    }
  }

  /// Registers (or leaves untouched) the pending soft-break candidate. A shallower newline
  /// group always wins over a deeper one, since breaking the outer group first is what lets
  /// the inner group possibly still fit on one line.
  fn mark_possible_new_line_if_able(&mut self, node_id: NodeId, name: &'static str) {
    if let Some(existing) = &self.possible_new_line_save_point {
      if existing.new_line_group_depth < self.new_line_group_depth {
        return;
      }
    }
    let next = arena::node_next(node_id);
    let save_point = Rc::new(SavePoint {
      #[cfg(debug_assertions)]
      name,
      new_line_group_depth: self.new_line_group_depth,
      writer_state: self.writer.state(),
      possible_new_line_save_point: self.possible_new_line_save_point.clone(),
      node: next,
      next_node_stack: self.next_node_stack.clone(),
    });
    self.possible_new_line_save_point = Some(save_point);
  }

  /// Converts the pending soft break into an actual newline if the line has grown past the
  /// configured width.
  fn check_line_width(&mut self) {
    if self.writer.writer_info().column_number <= self.max_width {
      return;
    }
    if let Some(save_point) = self.possible_new_line_save_point.take() {
      self.restore_save_point(save_point, true);
    }
  }

  fn restore_save_point(&mut self, save_point: Rc<SavePoint>, is_for_new_line: bool) {
    self.new_line_group_depth = save_point.new_line_group_depth;
    self.writer.restore_state(save_point.writer_state);
    self.possible_new_line_save_point = save_point.possible_new_line_save_point.clone();
    self.next_node_stack = save_point.next_node_stack.clone();
    if is_for_new_line {
      self.writer.write_new_line();
    }
    self.current_node = save_point.node;
    self.skip_moving_next = true;
  }

  fn look_ahead_save_point_at_current(&self, node_id: NodeId, name: &'static str) -> Rc<SavePoint> {
    Rc::new(SavePoint {
      #[cfg(debug_assertions)]
      name,
      new_line_group_depth: self.new_line_group_depth,
      writer_state: self.writer.state(),
      possible_new_line_save_point: self.possible_new_line_save_point.clone(),
      node: Some(node_id),
      next_node_stack: self.next_node_stack.clone(),
    })
  }

  fn handle_info(&mut self, info: &Info) {
    let id = info.unique_id();
    self.resolved_infos.insert(id, self.writer.writer_info());
    if let Some(save_point) = self.look_ahead_info_save_points.remove(&id) {
      self.restore_save_point(save_point, false);
    }
  }

  fn handle_condition(&mut self, condition: &Condition, next: Option<NodeId>) {
    let id = condition.unique_id();
    let value = {
      let writer_info = self.writer.writer_info();
      let mut context = ConditionResolverContext::new(self, writer_info);
      condition.resolve(&mut context)
    };

    if condition.is_stored {
      self.resolved_conditions.insert(id, value);
    }

    // A look-ahead save point at this id only ever comes from *another* resolver querying this
    // condition before it had a value (see `get_resolved_condition_value`). Once this condition
    // itself resolves to a definite value, that's the signal to replay whatever was waiting on
    // it -- an unresolved `None` here must never install a save point of its own.
    if value.is_some() {
      if let Some(save_point) = self.look_ahead_condition_save_points.remove(&id) {
        self.restore_save_point(save_point, false);
        return;
      }
    }

    // An unresolved condition is treated as false for the purpose of choosing a branch, so the
    // printer can keep making progress; if the condition later resolves differently, the
    // look-ahead save point installed by whoever queried it (if anyone did) replays this node.
    let branch = if value.unwrap_or(false) { condition.true_path } else { condition.false_path };
    if let Some(branch) = branch {
      if let Some(next) = next {
        self.next_node_stack = self.next_node_stack.push(next);
      }
      self.current_node = Some(branch);
      self.skip_moving_next = true;
    }
  }

  pub(crate) fn get_resolved_condition_value(&mut self, id: u32, name: &'static str) -> Option<bool> {
    if let Some(value) = self.resolved_conditions.get(&id) {
      return *value;
    }
    if !self.look_ahead_condition_save_points.contains_key(&id) {
      if let Some(node_id) = self.current_node {
        let save_point = self.look_ahead_save_point_at_current(node_id, name);
        self.look_ahead_condition_save_points.insert(id, save_point);
      }
    }
    None
  }

  pub(crate) fn get_resolved_info_value(&mut self, info: &Info) -> Option<WriterInfo> {
    let id = info.unique_id();
    if let Some(value) = self.resolved_infos.get(&id) {
      return Some(*value);
    }
    if !self.look_ahead_info_save_points.contains_key(&id) {
      if let Some(node_id) = self.current_node {
        let save_point = self.look_ahead_save_point_at_current(node_id, info.name());
        self.look_ahead_info_save_points.insert(id, save_point);
      }
    }
    None
  }
}
