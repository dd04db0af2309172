pub mod daily;
pub mod history;
pub mod setup;
pub mod ui;
