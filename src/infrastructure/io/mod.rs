pub mod csv_reader;
pub mod csv_writer;
pub mod excel_reader;
pub mod json_reader;
