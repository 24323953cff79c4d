//! CSV reading utilities.

mod reader;

pub use reader::{
    check_file_size, read_csv_frame, validate_dataframe_shape, validate_encoding,
};
