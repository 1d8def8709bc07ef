mod file_ops;

pub use file_ops::{copy_file, move_file};
