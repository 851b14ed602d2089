pub mod department;
pub mod formatter;
pub mod suggestions;
