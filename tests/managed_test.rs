use std::{cell::Cell, rc::Rc};

use anyhow::anyhow;
use rlx::resources::managed::Managed;

use crate::common::test_utils::Counted;
mod common;

#[test]
fn empty_handle_never_unloads() {
    let unloads = Rc::new(Cell::new(0));
    {
        let handle: Managed<Counted> = Managed::empty();
        assert!(!handle.is_loaded());
        assert!(handle.get().is_none());

        let defaulted: Managed<Counted> = Managed::default();
        assert!(!defaulted.is_loaded());
    }
    assert_eq!(unloads.get(), 0);
}

#[test]
fn loaded_handle_unloads_once_on_drop() {
    let unloads = Rc::new(Cell::new(0));
    {
        let handle = Managed::load(|| Ok(Counted::new(1, &unloads))).expect("loader succeeds");
        assert!(handle.is_loaded());
        assert_eq!(handle.get().map(|c| c.id), Some(1));
        assert_eq!(unloads.get(), 0);
    }
    assert_eq!(unloads.get(), 1);
}

#[test]
fn failed_load_passes_the_error_through() {
    let result = Managed::<Counted>::load(|| Err(anyhow!("no such file")));
    let err = result.expect_err("loader fails");
    assert_eq!(err.to_string(), "no such file");
}

#[test]
fn release_is_idempotent() {
    let unloads = Rc::new(Cell::new(0));
    {
        let mut handle = Managed::new(Counted::new(1, &unloads));
        handle.release();
        assert!(!handle.is_loaded());
        handle.release();
        assert_eq!(unloads.get(), 1);
    }
    assert_eq!(unloads.get(), 1);
}

#[test]
fn moving_transfers_ownership() {
    let unloads = Rc::new(Cell::new(0));
    {
        let mut source = Managed::new(Counted::new(1, &unloads));
        let destination = source.take();

        assert!(!source.is_loaded());
        assert!(destination.is_loaded());
        assert_eq!(destination.get().map(|c| c.id), Some(1));

        // plain Rust moves behave the same way
        let moved_again = destination;
        assert!(moved_again.is_loaded());
    }
    assert_eq!(unloads.get(), 1);
}

#[test]
fn move_assignment_unloads_the_overwritten_resource() {
    let unloads = Rc::new(Cell::new(0));
    {
        let mut destination = Managed::new(Counted::new(1, &unloads));
        let source = Managed::new(Counted::new(2, &unloads));

        destination.replace(source);
        assert_eq!(unloads.get(), 1);
        assert_eq!(destination.get().map(|c| c.id), Some(2));
    }
    assert_eq!(unloads.get(), 2);
}

#[test]
fn assignment_drops_the_previous_handle() {
    let unloads = Rc::new(Cell::new(0));
    {
        let mut handle = Managed::new(Counted::new(1, &unloads));
        handle = Managed::new(Counted::new(2, &unloads));
        assert_eq!(unloads.get(), 1);
        assert_eq!(handle.get().map(|c| c.id), Some(2));
    }
    assert_eq!(unloads.get(), 2);
}

#[test]
fn set_and_into_inner() {
    let unloads = Rc::new(Cell::new(0));

    let mut handle = Managed::empty();
    handle.set(Counted::new(1, &unloads));
    handle.set(Counted::new(2, &unloads));
    assert_eq!(unloads.get(), 1);

    let raw = handle.into_inner().expect("still loaded");
    assert_eq!(raw.id, 2);
    // ownership left the wrapper, so nothing was unloaded on the way out
    assert_eq!(unloads.get(), 1);
}
