//! Build and sign unpacked APK directories.
//!
//! This library validates an external Java/apktool/jarsigner toolchain,
//! runs apktool to build an unsigned archive and jarsigner to sign it,
//! classifying each tool run by exit status and by its logged output.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod signer;

// Re-export commonly used types
pub use error::{Result, SignapkError};
