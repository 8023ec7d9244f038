pub mod binary_cursor;
