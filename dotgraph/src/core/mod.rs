//! A module that contains the error type, the parser options and other
//! utilities that are shared by the other modules.

pub mod error;
pub mod options;
pub mod utils;
