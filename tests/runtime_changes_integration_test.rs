// winit allows one event loop per process, so every windowed test gets its own file.

#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
mod switcher {
    use rlx::{Layer, context::Context};

    use crate::common::test_utils::{Journal, Recording};

    /// On its first update, swaps "hud" for "late" and turns upscaling off.
    pub struct Switcher {
        pub journal: Journal,
        pub switched: bool,
    }

    impl Layer for Switcher {
        fn identifier(&self) -> &str {
            "switcher"
        }

        fn on_update(&mut self, ctx: &mut Context, _dt: f32) {
            self.journal
                .borrow_mut()
                .push(format!("switcher:factor={}", ctx.upscale_factor()));
            if !self.switched {
                self.switched = true;
                ctx.remove_layer("hud");
                ctx.disable_upscale();
                ctx.add_layer(Recording::new("late", &self.journal));
            }
        }

        fn on_render(&mut self, _ctx: &Context, _pass: &mut wgpu::RenderPass<'_>) {}
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn layers_change_the_running_application() {
    use rlx::{Application, window::WindowConfig};

    use crate::{
        common::test_utils::{Recording, journal},
        switcher::Switcher,
    };

    let log = journal();
    let mut app = Application::new(WindowConfig::default().with_size(640, 480));
    app.set_upscale(2, 320, 240);
    app.add_layer(Switcher {
        journal: log.clone(),
        switched: false,
    })
    .unwrap();
    app.add_layer(Recording::new("game", &log).exit_after(2)).unwrap();
    app.add_layer(Recording::new("hud", &log)).unwrap();

    app.run().expect("application runs to completion");

    assert_eq!(
        *log.borrow(),
        [
            "game:show",
            "hud:show",
            // first frame, still upscaled
            "switcher:factor=2",
            "game:update",
            "hud:update",
            "game:render",
            "hud:render",
            "game:before_unscaled",
            "hud:before_unscaled",
            "game:after_unscaled",
            "hud:after_unscaled",
            // queued changes applied
            "late:show",
            // second frame, direct
            "switcher:factor=1",
            "game:update",
            "late:update",
            "game:render",
            "late:render",
        ]
    );
}
