mod streams;

pub use streams::read_lines;
pub use streams::LineStream;
