//! Small persistent data structures used by the printer.

use std::rc::Rc;

/// An immutable, `Rc`-linked stack. Cloning is `O(1)`, which matters because the printer clones
/// its "resume after this condition branch" stack into every save point it creates -- a plain
/// `Vec` would make each save point cost `O(depth)` to snapshot.
#[derive(Clone)]
pub struct RcStack<T> {
  top: Option<Rc<RcStackNode<T>>>,
}

struct RcStackNode<T> {
  value: T,
  previous: Option<Rc<RcStackNode<T>>>,
}

impl<T> Default for RcStack<T> {
  fn default() -> Self {
    Self { top: None }
  }
}

impl<T: Clone> RcStack<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, value: T) -> Self {
    Self {
      top: Some(Rc::new(RcStackNode {
        value,
        previous: self.top.clone(),
      })),
    }
  }

  pub fn pop(&self) -> (Option<T>, Self) {
    match &self.top {
      Some(node) => (Some(node.value.clone()), Self { top: node.previous.clone() }),
      None => (None, Self { top: None }),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.top.is_none()
  }
}

#[cfg(test)]
mod test {
  use super::RcStack;

  #[test]
  fn pushes_and_pops_in_order() {
    let stack = RcStack::new().push(1).push(2).push(3);
    let (value, stack) = stack.pop();
    assert_eq!(value, Some(3));
    let (value, stack) = stack.pop();
    assert_eq!(value, Some(2));
    let (value, stack) = stack.pop();
    assert_eq!(value, Some(1));
    assert!(stack.is_empty());
    assert_eq!(stack.pop().0, None);
  }

  #[test]
  fn sharing_a_prefix_does_not_mutate_the_original() {
    let base = RcStack::new().push(1).push(2);
    let branch_a = base.push(3);
    let branch_b = base.push(4);
    assert_eq!(branch_a.pop().0, Some(3));
    assert_eq!(branch_b.pop().0, Some(4));
    assert_eq!(base.pop().0, Some(2));
  }
}
