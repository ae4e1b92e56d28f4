use smartstring::{LazyCompact, SmartString};

pub mod change;
pub mod config;
pub mod document;
pub mod edit;
pub mod history;
pub mod host;
pub mod padding;
pub mod pairs;
pub mod position;
pub mod scanner;
pub mod selection;

pub type Tendril = SmartString<LazyCompact>;
