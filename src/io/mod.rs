//! I/O layer for the rewrite: precondition checks on the target file
//! (`access`) and the in-place, atomic or check-only output step (`writer`).
pub mod access;
pub use access::check_access;

pub mod writer;
pub use writer::write_output;
