//! This is a collection of useful utilities.

use std::fs::File;
use std::io::{Error, Write};

pub fn save_to_file(filename: &str, content: &str) -> Result<(), Error> {
    let mut f = File::create(filename)?;
    write!(f, "{}", content)?;
    #[cfg(feature = "log")]
    log::info!("Wrote {}", filename);
    Result::Ok(())
}

pub fn load_file(filename: &str) -> Result<String, Error> {
    let content = std::fs::read_to_string(filename)?;
    #[cfg(feature = "log")]
    log::info!("Read {} ({} bytes)", filename, content.len());
    Result::Ok(content)
}
