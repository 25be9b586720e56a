pub mod config;
pub mod consts;
pub mod debounce;
pub mod encode;
pub mod error;
pub mod source;
pub mod surface;
pub mod transform;
pub mod upload;
pub mod widget;
