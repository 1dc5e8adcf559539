#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use allocator_api2::boxed::Box;
use core::alloc::Layout;
use core::fmt;

pub use allocator_api2::alloc::AllocError;
pub use allocator_api2::alloc::Allocator;
pub use allocator_api2::alloc::Global;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

mod link;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A list cell. It owns its value and, through `next`, the rest of the list.
///
/// Nodes have identity but no equality. Two nodes are the same node only if
/// they are at the same address; compare them with [`core::ptr::eq`].

pub struct Node<T, A: Allocator = Global> {
  /// The payload.
  pub value: T,
  /// The rest of the list. `None` marks the tail.
  pub next: Link<T, A>,
}

/// A head reference: the owner of the first node of a list, or `None` for the
/// empty list.
///
/// Operations that may change which node is first take a `&mut Link`.

pub type Link<T, A = Global> = Option<Box<Node<T, A>, A>>;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

enum Error {
  AllocatorFailed(Layout),
}

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(_: Error) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

#[inline(always)]
fn alloc_node<T, A, E>(value: T, allocator: A) -> Result<Box<Node<T, A>, A>, E>
where
  A: Allocator,
  E: Fail,
{
  // The node is allocated unlinked. Callers attach it only after this
  // succeeds, so a failed allocation never drops part of an existing list.

  match Box::try_new_in(Node::new(value), allocator) {
    Ok(x) => Ok(x),
    Err(_) => E::fail(Error::AllocatorFailed(Layout::new::<Node<T, A>>())),
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: Error) -> Result<T, Self> {
    match e {
      Error::AllocatorFailed(layout) =>
        alloc::alloc::handle_alloc_error(layout),
    }
  }
}

impl Fail for AllocError {
  #[inline(always)]
  fn fail<T>(_: Error) -> Result<T, Self> {
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Node                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<T, A: Allocator> Node<T, A> {
  /// A node with no successor.

  #[inline(always)]
  pub fn new(value: T) -> Self {
    Self { value, next: None }
  }

  /// A node that takes ownership of `next` as its successor.

  #[inline(always)]
  pub fn with_next(value: T, next: Link<T, A>) -> Self {
    Self { value, next }
  }
}

impl<T, A: Allocator> Drop for Node<T, A> {
  fn drop(&mut self) {
    // Unlink one node at a time. The derived drop glue would recurse once per
    // node and can exhaust the stack on long lists.

    let mut link = self.next.take();

    while let Some(mut node) = link {
      link = node.next.take();
    }
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Node<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut list = f.debug_list();
    let mut node = Some(self);

    while let Some(x) = node {
      let _ = list.entry(&x.value);
      node = x.next.as_deref();
    }

    list.finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Lookup                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// The number of nodes in the list. Takes time linear in the length.

pub fn len<T, A: Allocator>(head: &Link<T, A>) -> usize {
  link::count(head)
}

/// The node at position `index`, counting from zero at the head.

pub fn nth<T, A: Allocator>(head: &Link<T, A>, index: usize) -> Option<&Node<T, A>> {
  let mut node = head.as_deref()?;

  for _ in 0 .. index {
    node = node.next.as_deref()?;
  }

  Some(node)
}

/// The node at position `index`, counting from zero at the head.

pub fn nth_mut<T, A: Allocator>(head: &mut Link<T, A>, index: usize) -> Option<&mut Node<T, A>> {
  let mut node = head.as_deref_mut()?;

  for _ in 0 .. index {
    node = node.next.as_deref_mut()?;
  }

  Some(node)
}

/// The tail node, or `None` if the list is empty.

pub fn last_mut<T, A: Allocator>(head: &mut Link<T, A>) -> Option<&mut Node<T, A>> {
  let mut node = head.as_deref_mut()?;

  while node.next.is_some() {
    node = node.next.as_deref_mut()?;
  }

  Some(node)
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Head operations                                                            //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn head_insert_with<T, A, E>(head: &mut Link<T, A>, value: T, allocator: A) -> Result<(), E>
where
  A: Allocator,
  E: Fail,
{
  let mut node = alloc_node::<_, _, E>(value, allocator)?;
  node.next = head.take();
  *head = Some(node);
  Ok(())
}

/// Inserts `value` in a new node at the front of the list. The new node
/// becomes the head and the old head becomes its successor.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn head_insert<T, A>(head: &mut Link<T, A>, value: T)
where
  A: Allocator + Default,
{
  unwrap(head_insert_with(head, value, A::default()))
}

/// Inserts `value` in a new node at the front of the list.
///
/// # Errors
///
/// An error is returned on failure to allocate memory. The list is unchanged.

pub fn try_head_insert<T, A>(head: &mut Link<T, A>, value: T) -> Result<(), AllocError>
where
  A: Allocator + Default,
{
  head_insert_with(head, value, A::default())
}

/// Inserts `value` in a new node, allocated with `allocator`, at the front of
/// the list.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn head_insert_in<T, A>(head: &mut Link<T, A>, value: T, allocator: A)
where
  A: Allocator,
{
  unwrap(head_insert_with(head, value, allocator))
}

/// Inserts `value` in a new node, allocated with `allocator`, at the front of
/// the list.
///
/// # Errors
///
/// An error is returned on failure to allocate memory. The list is unchanged.

pub fn try_head_insert_in<T, A>(head: &mut Link<T, A>, value: T, allocator: A) -> Result<(), AllocError>
where
  A: Allocator,
{
  head_insert_with(head, value, allocator)
}

/// Removes and drops the head node, if any. The head advances to the old
/// head's successor. Does nothing on an empty list.

pub fn head_remove<T, A: Allocator>(head: &mut Link<T, A>) {
  if let Some(mut node) = head.take() {
    *head = node.next.take();
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Positional operations                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn insert_with<T, A, E>(prev: Option<&mut Node<T, A>>, value: T, allocator: A) -> Result<(), E>
where
  A: Allocator,
  E: Fail,
{
  let Some(prev) = prev else { return Ok(()) };

  let mut node = alloc_node::<_, _, E>(value, allocator)?;
  node.next = prev.next.take();
  prev.next = Some(node);
  Ok(())
}

/// Inserts `value` in a new node directly after `prev`. Does nothing if `prev`
/// is `None`.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn insert<T, A>(prev: Option<&mut Node<T, A>>, value: T)
where
  A: Allocator + Default,
{
  unwrap(insert_with(prev, value, A::default()))
}

/// Inserts `value` in a new node directly after `prev`. Does nothing if `prev`
/// is `None`.
///
/// # Errors
///
/// An error is returned on failure to allocate memory. The list is unchanged.

pub fn try_insert<T, A>(prev: Option<&mut Node<T, A>>, value: T) -> Result<(), AllocError>
where
  A: Allocator + Default,
{
  insert_with(prev, value, A::default())
}

/// Inserts `value` in a new node, allocated with `allocator`, directly after
/// `prev`. Does nothing if `prev` is `None`.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn insert_in<T, A>(prev: Option<&mut Node<T, A>>, value: T, allocator: A)
where
  A: Allocator,
{
  unwrap(insert_with(prev, value, allocator))
}

/// Inserts `value` in a new node, allocated with `allocator`, directly after
/// `prev`. Does nothing if `prev` is `None`.
///
/// # Errors
///
/// An error is returned on failure to allocate memory. The list is unchanged.

pub fn try_insert_in<T, A>(prev: Option<&mut Node<T, A>>, value: T, allocator: A) -> Result<(), AllocError>
where
  A: Allocator,
{
  insert_with(prev, value, allocator)
}

/// Removes and drops the node directly after `prev`, linking `prev` to the
/// removed node's successor. Does nothing if `prev` is `None` or is the tail.

pub fn remove<T, A: Allocator>(prev: Option<&mut Node<T, A>>) {
  let Some(prev) = prev else { return };
  let Some(mut condemned) = prev.next.take() else { return };

  prev.next = condemned.next.take();
}

/// Cuts the list after `split_at` and returns the detached remainder as a new
/// list. `split_at` becomes a tail.
///
/// Returns `None` if `split_at` is `None` or is already the tail.

pub fn split<T, A: Allocator>(split_at: Option<&mut Node<T, A>>) -> Link<T, A> {
  match split_at {
    Some(node) => node.next.take(),
    None => None,
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Whole list operations                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn copy_with<T, A, B, E>(source: Option<&Node<T, A>>, allocator: B) -> Result<Link<T, B>, E>
where
  T: Clone,
  A: Allocator,
  B: Allocator + Clone,
  E: Fail,
{
  let mut head: Link<T, B> = None;
  let mut tail = &mut head;
  let mut node = source;

  while let Some(x) = node {
    let y = tail.insert(alloc_node::<_, _, E>(x.value.clone(), allocator.clone())?);
    tail = &mut y.next;
    node = x.next.as_deref();
  }

  Ok(head)
}

/// Copies the list starting at `source` into newly allocated nodes. The copy
/// shares no nodes with the source.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn copy<T, A>(source: Option<&Node<T, A>>) -> Link<T, A>
where
  T: Clone,
  A: Allocator + Clone + Default,
{
  unwrap(copy_with(source, A::default()))
}

/// Copies the list starting at `source` into newly allocated nodes.
///
/// # Errors
///
/// An error is returned on failure to allocate memory.

pub fn try_copy<T, A>(source: Option<&Node<T, A>>) -> Result<Link<T, A>, AllocError>
where
  T: Clone,
  A: Allocator + Clone + Default,
{
  copy_with(source, A::default())
}

/// Copies the list starting at `source` into nodes allocated with
/// `allocator`, which need not be the allocator of the source.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn copy_in<T, A, B>(source: Option<&Node<T, A>>, allocator: B) -> Link<T, B>
where
  T: Clone,
  A: Allocator,
  B: Allocator + Clone,
{
  unwrap(copy_with(source, allocator))
}

/// Copies the list starting at `source` into nodes allocated with
/// `allocator`, which need not be the allocator of the source.
///
/// # Errors
///
/// An error is returned on failure to allocate memory.

pub fn try_copy_in<T, A, B>(source: Option<&Node<T, A>>, allocator: B) -> Result<Link<T, B>, AllocError>
where
  T: Clone,
  A: Allocator,
  B: Allocator + Clone,
{
  copy_with(source, allocator)
}

/// Drops every node of the list. The head is `None` afterwards.

pub fn clear<T, A: Allocator>(head: &mut Link<T, A>) {
  while head.is_some() {
    head_remove(head);
  }
}

/// Reverses the list in place by relinking its nodes. The old tail becomes the
/// head. Nothing is allocated or freed.

pub fn reverse<T, A: Allocator>(head: &mut Link<T, A>) {
  if link::is_short(head) { return; }

  let mut prev: Link<T, A> = None;
  let mut rest = head.take();

  while let Some(mut node) = rest {
    rest = node.next.take();
    node.next = prev;
    prev = Some(node);
  }

  *head = prev;
}

/// Appends the list `tail` to the end of the list `head`. If `head` is empty
/// it becomes `tail`.

pub fn join<T, A: Allocator>(head: &mut Link<T, A>, tail: Link<T, A>) {
  if tail.is_none() { return; }

  *link::end(head) = tail;
}

/// Moves the head node to the end of the list, so `1 2 3 4` becomes
/// `2 3 4 1`. Does nothing on lists with fewer than two nodes.

pub fn rotate_left<T, A: Allocator>(head: &mut Link<T, A>) {
  if link::is_short(head) { return; }

  let mut rest = split(head.as_deref_mut());
  join(&mut rest, head.take());
  *head = rest;
}

/// Moves the tail node to the front of the list, so `1 2 3 4` becomes
/// `4 1 2 3`. Does nothing on lists with fewer than two nodes.

pub fn rotate_right<T, A: Allocator>(head: &mut Link<T, A>) {
  if link::is_short(head) { return; }

  let mut last = split(link::penultimate(head));
  join(&mut last, head.take());
  *head = last;
}

#[inline(always)]
fn build_with<T, A, E>(values: &[T], n: usize, allocator: A) -> Result<Link<T, A>, E>
where
  T: Clone,
  A: Allocator + Clone,
  E: Fail,
{
  let mut head: Link<T, A> = None;

  for x in values[.. n].iter().rev() {
    head_insert_with::<_, _, E>(&mut head, x.clone(), allocator.clone())?;
  }

  Ok(head)
}

/// Builds a list holding the first `n` elements of `values`, in order.
/// Returns `None` if `n` is zero.
///
/// # Panics
///
/// Panics if `n > values.len()` or on failure to allocate memory.

pub fn build<T, A>(values: &[T], n: usize) -> Link<T, A>
where
  T: Clone,
  A: Allocator + Clone + Default,
{
  unwrap(build_with(values, n, A::default()))
}

/// Builds a list holding the first `n` elements of `values`, in order.
///
/// # Panics
///
/// Panics if `n > values.len()`.
///
/// # Errors
///
/// An error is returned on failure to allocate memory.

pub fn try_build<T, A>(values: &[T], n: usize) -> Result<Link<T, A>, AllocError>
where
  T: Clone,
  A: Allocator + Clone + Default,
{
  build_with(values, n, A::default())
}

/// Builds a list holding the first `n` elements of `values`, in order, with
/// nodes allocated by `allocator`.
///
/// # Panics
///
/// Panics if `n > values.len()` or on failure to allocate memory.

pub fn build_in<T, A>(values: &[T], n: usize, allocator: A) -> Link<T, A>
where
  T: Clone,
  A: Allocator + Clone,
{
  unwrap(build_with(values, n, allocator))
}

/// Builds a list holding the first `n` elements of `values`, in order, with
/// nodes allocated by `allocator`.
///
/// # Panics
///
/// Panics if `n > values.len()`.
///
/// # Errors
///
/// An error is returned on failure to allocate memory.

pub fn try_build_in<T, A>(values: &[T], n: usize, allocator: A) -> Result<Link<T, A>, AllocError>
where
  T: Clone,
  A: Allocator + Clone,
{
  build_with(values, n, allocator)
}
