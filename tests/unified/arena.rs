use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;
use bumpalo::Bump;
use chainkit::*;
use expect_test::expect;

// Lends out a fixed number of allocations from the global allocator, then
// refuses.

struct Budget(Cell<usize>);

unsafe impl<'a> Allocator for &'a Budget {
  fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
    let n = self.0.get();
    if n == 0 { return Err(AllocError); }
    self.0.set(n - 1);
    Global.allocate(layout)
  }

  unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
    unsafe { Global.deallocate(ptr, layout) }
  }
}

#[test]
fn test_bump_backed_list() {
  let bump = Bump::new();
  let mut x = build_in(&[1, 2, 3], 3, &bump);
  assert!(bump.allocated_bytes() > 0);
  head_insert_in(&mut x, 0, &bump);
  insert_in(nth_mut(&mut x, 2), 9, &bump);
  expect!["Some([0, 1, 2, 9, 3])"].assert_eq(&format!("{:?}", x));
  remove(nth_mut(&mut x, 2));
  head_remove(&mut x);
  expect!["Some([1, 2, 3])"].assert_eq(&format!("{:?}", x));
  rotate_left(&mut x);
  expect!["Some([2, 3, 1])"].assert_eq(&format!("{:?}", x));
  rotate_right(&mut x);
  rotate_right(&mut x);
  expect!["Some([3, 1, 2])"].assert_eq(&format!("{:?}", x));
  reverse(&mut x);
  expect!["Some([2, 1, 3])"].assert_eq(&format!("{:?}", x));
  let y = split(nth_mut(&mut x, 0));
  expect!["Some([1, 3])"].assert_eq(&format!("{:?}", y));
  join(&mut x, y);
  assert!(len(&x) == 3);
  clear(&mut x);
  assert!(x.is_none());
}

#[test]
fn test_copy_between_allocators() {
  let bump = Bump::new();
  let x = build_in(&[1, 2, 3], 3, &bump);
  let y = copy_in(x.as_deref(), Global);
  drop(x);
  expect!["Some([1, 2, 3])"].assert_eq(&format!("{:?}", y));
  let z = try_copy_in(y.as_deref(), &bump).unwrap();
  expect!["Some([1, 2, 3])"].assert_eq(&format!("{:?}", z));
}

#[test]
fn test_try_build_out_of_memory() {
  let budget = Budget(Cell::new(2));
  assert!(try_build_in(&[1, 2, 3], 3, &budget).is_err());
  assert!(budget.0.get() == 0);
}

#[test]
fn test_try_copy_out_of_memory() {
  let budget = Budget(Cell::new(3));
  let x = try_build_in(&[1, 2, 3], 3, &budget).unwrap();
  assert!(try_copy_in(x.as_deref(), &budget).is_err());
  expect!["Some([1, 2, 3])"].assert_eq(&format!("{:?}", x));
}

#[test]
fn test_failed_insert_leaves_list_unchanged() {
  let budget = Budget(Cell::new(2));
  let mut x = try_build_in(&[1, 2], 2, &budget).unwrap();
  assert!(try_head_insert_in(&mut x, 0, &budget).is_err());
  assert!(try_insert_in(x.as_deref_mut(), 0, &budget).is_err());
  expect!["Some([1, 2])"].assert_eq(&format!("{:?}", x));
  budget.0.set(1);
  try_insert_in(x.as_deref_mut(), 5, &budget).unwrap();
  expect!["Some([1, 5, 2])"].assert_eq(&format!("{:?}", x));
}

#[test]
fn test_insert_after_none_allocates_nothing() {
  let budget = Budget(Cell::new(1));
  let mut x: Link<i32, &Budget> = None;
  try_insert_in(x.as_deref_mut(), 0, &budget).unwrap();
  assert!(budget.0.get() == 1);
}
