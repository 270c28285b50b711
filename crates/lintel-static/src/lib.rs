//! Post-build pass that injects head tags and preload hints into a static site.
//!
//! Calls the head template once per build and the preload policy once per
//! emitted asset, then rewrites every HTML page in the output directory.

pub mod assets;
pub mod injector;

pub use assets::{AssetKind, PreloadHint};
pub use injector::{
    HeadInjector, InjectConfig, InjectError, InjectResult, BLOCK_END, BLOCK_START, MANIFEST_FILE,
};
