pub mod san_filename;
