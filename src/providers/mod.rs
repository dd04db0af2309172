pub mod fixer;
pub mod smtp;
pub mod util;
