use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use rlx::{context::Context, layer::Layer, resources::managed::Resource};

/// Fake resource that counts how often it was unloaded.
#[derive(Debug)]
pub struct Counted {
    pub id: u32,
    unloads: Rc<Cell<u32>>,
}

impl Counted {
    pub fn new(id: u32, unloads: &Rc<Cell<u32>>) -> Self {
        Self {
            id,
            unloads: unloads.clone(),
        }
    }
}

impl Resource for Counted {
    fn unload(&mut self) {
        self.unloads.set(self.unloads.get() + 1);
    }
}

pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Layer that writes every callback into a shared journal as `"<name>:<hook>"`.
pub struct Recording {
    name: String,
    journal: Journal,
    frames: u32,
    exit_after: Option<u32>,
}

impl Recording {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            journal: journal.clone(),
            frames: 0,
            exit_after: None,
        }
    }

    /// Request exit from `on_update` once `frames` frames were updated.
    pub fn exit_after(mut self, frames: u32) -> Self {
        self.exit_after = Some(frames);
        self
    }

    pub fn note(&self, hook: &str) {
        self.journal.borrow_mut().push(format!("{}:{}", self.name, hook));
    }
}

impl Layer for Recording {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn on_show(&mut self, _ctx: &mut Context) {
        self.note("show");
    }

    fn on_update(&mut self, ctx: &mut Context, _dt: f32) {
        self.note("update");
        self.frames += 1;
        if self.exit_after.is_some_and(|n| self.frames >= n) {
            ctx.request_exit();
        }
    }

    fn on_render(&mut self, _ctx: &Context, _pass: &mut wgpu::RenderPass<'_>) {
        self.note("render");
    }

    fn on_render_before_unscaled(&mut self, _ctx: &Context, _pass: &mut wgpu::RenderPass<'_>) {
        self.note("before_unscaled");
    }

    fn on_render_after_unscaled(&mut self, _ctx: &Context, _pass: &mut wgpu::RenderPass<'_>) {
        self.note("after_unscaled");
    }
}
