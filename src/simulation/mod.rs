pub mod confusion;
pub mod decision;
pub mod format;
pub mod splitter;
pub mod timing;
pub mod tokenization;
