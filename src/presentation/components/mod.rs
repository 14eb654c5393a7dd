mod footer;
mod table;

pub use footer::render_footer;
pub use table::render_table;
