extern crate serde;
extern crate serde_json;

use anyhow::Result;

#[macro_use]
extern crate serde_derive;

mod carousel;
mod cli;
mod color;
mod common;
mod config;
mod projects;
mod source;
mod truncate;
mod web;
mod worker;

fn main() -> Result<()> {
    crate::cli::main()
}
