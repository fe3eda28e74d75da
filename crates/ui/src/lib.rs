#![forbid(unsafe_code)]
#![allow(non_snake_case)]

pub mod paths;
pub mod render;
pub mod views;
pub mod vm;

pub use render::render_page;
pub use vm::{PageVm, map_page};
