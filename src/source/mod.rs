pub mod base;
pub mod vimeo;
