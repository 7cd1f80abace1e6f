//! Render pipelines owned by the application.

pub mod upscale;
