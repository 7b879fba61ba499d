mod page;
mod tag;
mod viewer;

pub use page::*;
pub use tag::*;
pub use viewer::*;
