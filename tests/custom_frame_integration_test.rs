// winit allows one event loop per process, so every windowed test gets its own file.

#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn custom_frame_replaces_layer_dispatch() {
    use std::{cell::Cell, rc::Rc};

    use rlx::{Application, window::WindowConfig};

    use crate::common::test_utils::{Recording, journal};

    let log = journal();
    let frames = Rc::new(Cell::new(0));
    let mut app = Application::new(WindowConfig::default().with_title("custom frame"));
    app.add_layer(Recording::new("idle", &log)).unwrap();

    let counter = frames.clone();
    app.run_with(move |ctx, _dt| {
        counter.set(counter.get() + 1);
        if counter.get() == 3 {
            ctx.request_exit();
        }
    })
    .expect("application runs to completion");

    assert_eq!(frames.get(), 3);
    assert_eq!(*log.borrow(), ["idle:show"]);
}
