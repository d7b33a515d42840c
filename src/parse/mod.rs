pub mod path_data;
pub mod svg_document;

pub use path_data::{ParseError, ParseResult, parse_path_data};
pub use svg_document::{
    SvgDocumentError, collect_path_data, parse_svg_document, shape_from_path_data,
};
