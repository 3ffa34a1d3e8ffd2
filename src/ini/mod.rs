mod config;
mod error;
mod options;
mod parser;
mod util;


pub use {config::*, error::*, options::*, parser::*, util::*};
