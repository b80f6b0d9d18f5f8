pub mod formatter;
pub mod simple_formatter;

pub use formatter::TableFormatter;
pub use simple_formatter::SimpleFormatter;
