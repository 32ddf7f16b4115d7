//! Pure predicates built out of resolved `Info` positions. These take a
//! [`ConditionResolverContext`] so they can participate in the look-ahead machinery like any
//! other resolver -- `None` propagates automatically if either `Info` hasn't been reached yet.

use crate::ir::{ConditionResolverContext, Info};

/// Whether the text between `start` and `end` spans more than one line.
pub fn is_multiple_lines(context: &mut ConditionResolverContext, start_info: Info, end_info: Info) -> Option<bool> {
  let start = context.get_resolved_info(&start_info)?;
  let end = context.get_resolved_info(&end_info)?;
  Some(end.line_number > start.line_number)
}

/// Whether `end` (or, if not given, the writer's current position) sits at a deeper indent
/// level than `start` -- useful for deciding whether a hanging indent actually kicked in.
pub fn is_hanging(context: &mut ConditionResolverContext, start_info: Info, end_info: Option<Info>) -> Option<bool> {
  let start = context.get_resolved_info(&start_info)?;
  let end = match end_info {
    Some(end_info) => context.get_resolved_info(&end_info)?,
    None => context.writer_info,
  };
  Some(end.indent_level > start.indent_level)
}

/// Whether `start` and `end` resolved to the exact same line and column, falling back to
/// `default` while either is still unresolved.
pub fn are_info_equal(context: &mut ConditionResolverContext, start_info: Info, end_info: Info, default: bool) -> bool {
  let (Some(start), Some(end)) = (context.get_resolved_info(&start_info), context.get_resolved_info(&end_info)) else {
    return default;
  };
  start.line_number == end.line_number && start.column_number == end.column_number
}

/// Whether `info` resolved to the writer's current line number.
pub fn is_on_same_line(context: &mut ConditionResolverContext, info: Info) -> Option<bool> {
  let resolved = context.get_resolved_info(&info)?;
  Some(resolved.line_number == context.writer_info.line_number)
}

/// Whether `info` resolved to a line number earlier than the writer's current line number.
pub fn is_on_different_line(context: &mut ConditionResolverContext, info: Info) -> Option<bool> {
  Some(!is_on_same_line(context, info)?)
}
