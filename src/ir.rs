//! The intermediate representation that printers build and the print engine consumes: a
//! language-agnostic sequence of signals, text, and conditional branches (see `print_items.rs`
//! in the reference implementation, which this module replaces almost entirely).

use std::rc::Rc;

use crate::arena::{self, NodeId};
use crate::printer::Printer;

/// A layout directive that is not text. `Signal`s are how a language printer communicates
/// line-breaking and indentation intent without hard-coding what the final whitespace looks
/// like -- the printer and writer decide that based on available width and current state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
  /// Expects the printer to print a newline. If the printer is group-ed, the newline might
  /// not happen if the condition is the only thing stopping a node from fitting on one line.
  NewLine,
  /// Expects a tab character.
  Tab,
  /// Expects the printer to maybe print a newline depending on whether the provided number of
  /// characters fit on the line -- the best candidate among possible newlines on a line is
  /// chosen by the writer's column position at the time the line actually overflows.
  PossibleNewLine,
  /// Expects the printer to print a space, but if a line exceeds the max width, it will print
  /// a newline instead.
  SpaceOrNewLine,
  /// Expects the printer to ensure a newline happens next, even if it's not immediately after
  /// this signal (ex. in the case of comments).
  ExpectNewLine,
  /// Starts a new indentation level.
  StartIndent,
  /// Finishes the last created indentation level.
  FinishIndent,
  /// Starts a group of items that should all break together -- an unresolved
  /// `SpaceOrNewLine`/`PossibleNewLine` breaks the shallowest open group it's nested in first.
  StartNewLineGroup,
  /// Finishes the last created group.
  FinishNewLineGroup,
  /// Expects a single indent to occur (ex. for blocks).
  SingleIndent,
  /// Starts ignoring indentation -- useful for printing text verbatim (ex. multi-line strings).
  StartIgnoringIndent,
  /// Finishes ignoring indentation.
  FinishIgnoringIndent,
}

/// Cheap reference-counted text fragment. Must not contain `\n`, `\r`, or `\t` -- those are
/// expressed as `Signal`s so the printer can reason about width and indentation per character.
#[derive(Clone)]
pub struct StringContainer {
  pub text: Rc<str>,
  pub(crate) char_count: u32,
}

impl StringContainer {
  pub fn new(text: impl Into<Rc<str>>) -> Self {
    let text = text.into();
    debug_assert!(
      !text.contains('\n') && !text.contains('\r') && !text.contains('\t'),
      "a String print item must not contain newlines or tabs -- use Signal or RawString: {:?}",
      text
    );
    let char_count = text.chars().count() as u32;
    Self { text, char_count }
  }
}

/// Multi-line text passed through verbatim (ex. an embedded code block, a block comment body).
/// Only the first line's width is used when the printer decides whether a `PossibleNewLine`
/// fits -- the rest is assumed to already be formatted how the caller wants it.
#[derive(Clone)]
pub struct RawStringContainer {
  pub text: Rc<str>,
  pub(crate) first_line_char_count: u32,
}

impl RawStringContainer {
  pub fn new(text: impl Into<Rc<str>>) -> Self {
    let text = text.into();
    let first_line_char_count = text.split('\n').next().unwrap_or("").chars().count() as u32;
    Self { text, first_line_char_count }
  }
}

/// A position marker. Pushing the same `Info` value at two different points in the IR is a bug
/// in calling code -- create a fresh `Info` per position with [`Info::new`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Info {
  id: u32,
  #[cfg(debug_assertions)]
  name: &'static str,
}

impl Info {
  pub fn new(#[allow(unused_variables)] name: &'static str) -> Self {
    Self {
      id: arena::next_info_id(),
      #[cfg(debug_assertions)]
      name,
    }
  }

  pub fn unique_id(&self) -> u32 {
    self.id
  }

  pub fn name(&self) -> &'static str {
    #[cfg(debug_assertions)]
    {
      self.name
    }
    #[cfg(not(debug_assertions))]
    {
      "info"
    }
  }
}

/// A snapshot of writer state at the point an `Info` was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterInfo {
  pub line_number: u32,
  pub column_number: u32,
  pub indent_level: u8,
  pub line_start_indent_level: u8,
  pub line_start_column_number: u32,
}

impl WriterInfo {
  pub fn is_start_of_line(&self) -> bool {
    self.column_number == self.line_start_column_number
  }

  pub fn is_start_of_line_indented(&self) -> bool {
    self.is_start_of_line() && self.indent_level > self.line_start_indent_level
  }
}

/// Resolves a condition's value given the printer's state so far. Returns `None` when the
/// answer depends on something that has not been printed yet -- the printer will re-run this
/// resolver later once that dependency resolves.
pub type ConditionResolver = Rc<dyn Fn(&mut ConditionResolverContext) -> Option<bool>>;

/// Passed to a [`ConditionResolver`] so it can inspect the writer's current position and the
/// resolved value of other conditions/infos.
pub struct ConditionResolverContext<'a> {
  printer: &'a mut Printer,
  pub writer_info: WriterInfo,
}

impl<'a> ConditionResolverContext<'a> {
  pub(crate) fn new(printer: &'a mut Printer, writer_info: WriterInfo) -> Self {
    Self { printer, writer_info }
  }

  /// Gets the resolved value of another condition, installing a look-ahead save point if it
  /// has not resolved yet.
  pub fn get_resolved_condition(&mut self, condition: &ConditionReference) -> Option<bool> {
    self.printer.get_resolved_condition_value(condition.id, condition.name)
  }

  /// Same as [`Self::get_resolved_condition`] but returns `default` instead of `None` while
  /// unresolved.
  pub fn get_resolved_condition_or(&mut self, condition: &ConditionReference, default: bool) -> bool {
    self.get_resolved_condition(condition).unwrap_or(default)
  }

  /// Gets the resolved `WriterInfo` for an `Info`, installing a look-ahead save point if the
  /// printer has not reached it yet.
  pub fn get_resolved_info(&mut self, info: &Info) -> Option<WriterInfo> {
    self.printer.get_resolved_info_value(info)
  }
}

/// A stable handle to a [`Condition`] that was created elsewhere, usable from a resolver
/// closure without borrowing the original `Condition`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConditionReference {
  id: u32,
  #[cfg(debug_assertions)]
  name: &'static str,
}

impl ConditionReference {
  pub fn unique_id(&self) -> u32 {
    self.id
  }

  pub fn create_resolver(&self) -> ConditionResolver {
    let reference = *self;
    Rc::new(move |ctx| ctx.get_resolved_condition(&reference))
  }
}

pub struct ConditionProperties {
  pub condition: ConditionResolver,
  pub true_path: Option<PrintItems>,
  pub false_path: Option<PrintItems>,
}

/// A branch point in the IR. `condition` runs against the printer's current state to decide
/// whether `true_path` or `false_path` prints; an unresolved ([`None`]) result defers the
/// decision (see [`crate::printer::Printer`] for how that's resolved through save points).
#[derive(Clone)]
pub struct Condition {
  id: u32,
  #[cfg(debug_assertions)]
  name: &'static str,
  pub(crate) is_stored: bool,
  pub(crate) resolver: ConditionResolver,
  pub(crate) true_path: Option<NodeId>,
  pub(crate) false_path: Option<NodeId>,
}

impl Condition {
  pub fn new(#[allow(unused_variables)] name: &'static str, properties: ConditionProperties) -> Self {
    Self {
      id: arena::next_condition_id(),
      #[cfg(debug_assertions)]
      name,
      is_stored: false,
      resolver: properties.condition,
      true_path: properties.true_path.map(PrintItems::into_node_id),
      false_path: properties.false_path.map(PrintItems::into_node_id),
    }
  }

  /// A condition whose resolver always returns `true`/`false` without depending on printer
  /// state -- a convenience for constant conditions.
  pub fn new_with_resolver(name: &'static str, true_path: Option<PrintItems>, false_path: Option<PrintItems>, resolver: ConditionResolver) -> Self {
    Self::new(
      name,
      ConditionProperties {
        condition: resolver,
        true_path,
        false_path,
      },
    )
  }

  pub fn unique_id(&self) -> u32 {
    self.id
  }

  pub fn name(&self) -> &'static str {
    #[cfg(debug_assertions)]
    {
      self.name
    }
    #[cfg(not(debug_assertions))]
    {
      "condition"
    }
  }

  /// Returns a stable reference usable from other conditions' resolvers, and marks this
  /// condition's resolved value as one the printer must remember once it runs.
  pub fn get_reference(&mut self) -> ConditionReference {
    self.is_stored = true;
    ConditionReference {
      id: self.id,
      #[cfg(debug_assertions)]
      name: self.name,
    }
  }

  pub(crate) fn resolve(&self, context: &mut ConditionResolverContext) -> Option<bool> {
    (self.resolver)(context)
  }
}

pub(crate) enum PrintItemKind {
  Signal(Signal),
  Str(StringContainer),
  Raw(RawStringContainer),
  Info(Info),
  Condition(Condition),
}

pub(crate) struct PrintNode {
  pub(crate) item: PrintItemKind,
  pub(crate) next: Option<NodeId>,
}

/// A builder for a sequence of print items. Most printer code builds one of these per syntax
/// node and either returns it or `extend`s it into a parent's `PrintItems`.
pub struct PrintItems {
  first: Option<NodeId>,
  last: Option<NodeId>,
}

impl Default for PrintItems {
  fn default() -> Self {
    Self::new()
  }
}

impl PrintItems {
  pub fn new() -> Self {
    Self { first: None, last: None }
  }

  pub fn is_empty(&self) -> bool {
    self.first.is_none()
  }

  fn push_kind(&mut self, kind: PrintItemKind) {
    let id = arena::alloc_node(PrintNode { item: kind, next: None });
    if let Some(last) = self.last {
      arena::set_node_next(last, Some(id));
    } else {
      self.first = Some(id);
    }
    self.last = Some(id);
  }

  pub fn push_signal(&mut self, signal: Signal) {
    self.push_kind(PrintItemKind::Signal(signal));
  }

  pub fn push_str(&mut self, text: &str) {
    self.push_kind(PrintItemKind::Str(StringContainer::new(text)));
  }

  pub fn push_string(&mut self, text: String) {
    self.push_kind(PrintItemKind::Str(StringContainer::new(text)));
  }

  pub fn push_raw_str(&mut self, text: &str) {
    self.push_kind(PrintItemKind::Raw(RawStringContainer::new(text)));
  }

  pub fn push_raw_string(&mut self, text: String) {
    self.push_kind(PrintItemKind::Raw(RawStringContainer::new(text)));
  }

  pub fn push_info(&mut self, info: Info) {
    self.push_kind(PrintItemKind::Info(info));
  }

  pub fn push_condition(&mut self, condition: Condition) {
    self.push_kind(PrintItemKind::Condition(condition));
  }

  pub fn extend(&mut self, other: PrintItems) {
    if other.first.is_none() {
      return;
    }
    if let Some(last) = self.last {
      arena::set_node_next(last, other.first);
    } else {
      self.first = other.first;
    }
    self.last = other.last;
  }

  pub(crate) fn into_node_id(self) -> Option<NodeId> {
    self.first
  }

  pub(crate) fn first_node_id(&self) -> Option<NodeId> {
    self.first
  }

  /// Debug-only helper that renders the built IR as a readable string, mirroring the
  /// reference implementation's `get_as_text` used in failed-assertion messages.
  #[cfg(debug_assertions)]
  pub fn get_as_text(&self) -> String {
    fn write_node(id: NodeId, out: &mut String, depth: usize) {
      arena::with_node(id, |node| {
        let indent = "  ".repeat(depth);
        match &node.item {
          PrintItemKind::Signal(s) => out.push_str(&format!("{indent}[signal] {s:?}\n")),
          PrintItemKind::Str(s) => out.push_str(&format!("{indent}[str] {:?}\n", s.text)),
          PrintItemKind::Raw(s) => out.push_str(&format!("{indent}[raw] {:?}\n", s.text)),
          PrintItemKind::Info(i) => out.push_str(&format!("{indent}[info] {}\n", i.name())),
          PrintItemKind::Condition(c) => {
            out.push_str(&format!("{indent}[condition] {}\n", c.name()));
            if let Some(true_path) = c.true_path {
              out.push_str(&format!("{indent}  true:\n"));
              write_node(true_path, out, depth + 2);
            }
            if let Some(false_path) = c.false_path {
              out.push_str(&format!("{indent}  false:\n"));
              write_node(false_path, out, depth + 2);
            }
          }
        }
      });
      if let Some(next) = arena::node_next(id) {
        write_node(next, out, depth);
      }
    }

    let mut out = String::new();
    if let Some(first) = self.first {
      write_node(first, &mut out, 0);
    }
    out
  }
}

/// Deep-clones the whole chain (including condition branches) into fresh arena nodes, so the
/// clone and the original can diverge independently -- ex. `with_indent(items.clone())` next to
/// the original `items` in a condition's two branches. This replaces the reference-counted
/// subtree reuse the reference implementation relies on (`RcPath`); the tradeoff is an `O(n)`
/// copy instead of an `O(1)` reference bump. Note this reassigns nothing about a cloned
/// `Condition`'s identity -- cloning a subtree that contains a `Condition` whose
/// `ConditionReference` is also held elsewhere would duplicate that identity. Nothing in this
/// crate does that.
impl Clone for PrintItems {
  fn clone(&self) -> Self {
    fn clone_kind(kind: &PrintItemKind) -> PrintItemKind {
      match kind {
        PrintItemKind::Signal(s) => PrintItemKind::Signal(*s),
        PrintItemKind::Str(s) => PrintItemKind::Str(s.clone()),
        PrintItemKind::Raw(s) => PrintItemKind::Raw(s.clone()),
        PrintItemKind::Info(i) => PrintItemKind::Info(*i),
        PrintItemKind::Condition(c) => PrintItemKind::Condition(Condition {
          id: c.id,
          #[cfg(debug_assertions)]
          name: c.name,
          is_stored: c.is_stored,
          resolver: c.resolver.clone(),
          true_path: clone_chain(c.true_path).0,
          false_path: clone_chain(c.false_path).0,
        }),
      }
    }

    fn clone_chain(start: Option<NodeId>) -> (Option<NodeId>, Option<NodeId>) {
      let mut first = None;
      let mut last = None;
      let mut current = start;
      while let Some(id) = current {
        let cloned_kind = arena::with_node(id, |node| clone_kind(&node.item));
        let new_id = arena::alloc_node(PrintNode { item: cloned_kind, next: None });
        if let Some(last_id) = last {
          arena::set_node_next(last_id, Some(new_id));
        } else {
          first = Some(new_id);
        }
        last = Some(new_id);
        current = arena::node_next(id);
      }
      (first, last)
    }

    let (first, last) = clone_chain(self.first);
    Self { first, last }
  }
}

impl From<&'static str> for PrintItems {
  fn from(text: &'static str) -> Self {
    let mut items = Self::new();
    items.push_str(text);
    items
  }
}

impl From<String> for PrintItems {
  fn from(text: String) -> Self {
    let mut items = Self::new();
    items.push_string(text);
    items
  }
}

impl From<Signal> for PrintItems {
  fn from(signal: Signal) -> Self {
    let mut items = Self::new();
    items.push_signal(signal);
    items
  }
}

impl From<Condition> for PrintItems {
  fn from(condition: Condition) -> Self {
    let mut items = Self::new();
    items.push_condition(condition);
    items
  }
}

impl<T: Into<PrintItems>> From<Option<T>> for PrintItems {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(value) => value.into(),
      None => PrintItems::new(),
    }
  }
}
