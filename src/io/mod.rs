mod format;
mod input;
mod table;

pub use format::DocumentFormat;
pub use input::{parse_document_str, read_document};
pub use table::{ColumnSpec, TableDocument, cell_text};
