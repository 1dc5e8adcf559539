use allocator_api2::alloc::Allocator;
use crate::Link;
use crate::Node;

// Walking helpers. None of these allocate or free; they only hand out
// borrows into an existing chain.

#[inline(always)]
pub(crate) fn is_short<T, A: Allocator>(head: &Link<T, A>) -> bool {
  match head {
    Some(node) => node.next.is_none(),
    None => true,
  }
}

/// The empty link after the last node, or `head` itself if the list is empty.

#[inline(always)]
pub(crate) fn end<T, A: Allocator>(head: &mut Link<T, A>) -> &mut Link<T, A> {
  let mut link = head;

  while let Some(node) = link {
    link = &mut node.next;
  }

  link
}

#[inline(always)]
pub(crate) fn count<T, A: Allocator>(head: &Link<T, A>) -> usize {
  let mut n = 0;
  let mut node = head.as_deref();

  while let Some(x) = node {
    n = n + 1;
    node = x.next.as_deref();
  }

  n
}

#[inline(always)]
pub(crate) fn penultimate<T, A: Allocator>(head: &mut Link<T, A>) -> Option<&mut Node<T, A>> {
  // NB: Look ahead through a shared borrow. The mutable reborrow must be
  // unconditional or it outlives the loop.

  let mut node = head.as_deref_mut()?;

  while node.next.as_ref()?.next.is_some() {
    node = node.next.as_deref_mut()?;
  }

  Some(node)
}
