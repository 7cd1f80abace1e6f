// winit allows one event loop per process, so every windowed test gets its own file.

#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn upscaled_frames_run_the_unscaled_hooks() {
    use rlx::{Application, window::WindowConfig};

    use crate::common::test_utils::{Recording, journal};

    let log = journal();
    let mut app = Application::new(WindowConfig::default().with_size(640, 480));
    app.set_upscale(2, 320, 240);
    app.add_layer(Recording::new("game", &log).exit_after(1)).unwrap();

    app.run().expect("application runs to completion");

    assert_eq!(
        *log.borrow(),
        [
            "game:show",
            "game:update",
            "game:render",
            "game:before_unscaled",
            "game:after_unscaled",
        ]
    );
}
