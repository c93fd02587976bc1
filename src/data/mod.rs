mod point_reader;
mod prediction_writer;
mod traversal_io;

pub use {
    point_reader::{IngestReport, load_points, parse_point_record, read_points},
    prediction_writer::{format_prediction_line, save_prediction_set, write_prediction_set},
    traversal_io::{load_traversals, read_traversals, save_traversals, write_traversals},
};
