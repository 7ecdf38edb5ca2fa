#![cfg(unix)]

mod fixtures;
mod utils;
