//! Built-in hook bundles

pub mod stdlib;

pub use stdlib::StdlibHook;
