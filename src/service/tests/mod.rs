pub mod common;

mod verification;
