mod ini;

pub use ini::*;
