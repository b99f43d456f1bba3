pub mod command_ext;

pub use command_ext::*;

use std::path::PathBuf;

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pyward"))
}
