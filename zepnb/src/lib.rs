//! Library half of the `zepnb` binary: command line definition and the file
//! plumbing around [`zepnb_core`]. Exposed mainly so the CLI can be tested
//! and so `xtask` can render completions and the manpage.
pub mod cli;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;

pub use error::ZepnbError;
pub use pipeline::run;
