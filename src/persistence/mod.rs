//! Rate-limited, chunked write-back of verification results.

mod batch_writer;

pub use batch_writer::BatchWriter;
