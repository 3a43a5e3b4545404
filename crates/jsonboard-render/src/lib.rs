//! Rendering utilities for terminals and Markdown surfaces.

#![forbid(unsafe_code)]

mod markdown;
mod text;

pub use markdown::{render_files_markdown, render_health_markdown};
pub use text::{
    format_size, render_file_list, render_health_text, render_shape, render_validation,
};
