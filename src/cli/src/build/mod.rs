/* src/cli/src/build/mod.rs */

mod hash;
mod html;
mod output;
mod run;

pub use run::{BuildMode, run_build};
