//! # gbafont command line tools
#![warn(missing_docs)]

pub mod cli;
