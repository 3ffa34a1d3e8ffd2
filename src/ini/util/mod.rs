mod display_ini;
mod ini_string;

pub(crate) use {display_ini::*, ini_string::*};
