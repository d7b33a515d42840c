//! Loader for SVG shape documents.
//!
//! Sigil outlines are authored as SVG files. Only the `d` attribute of each
//! `<path>` element matters here; styling, transforms and every other element
//! are ignored. Paths are kept in document order.

use quick_xml::events::Event;
use quick_xml::events::attributes::AttrError;
use quick_xml::reader::Reader;
use thiserror::Error;

use super::path_data::{ParseError, parse_path_data};
use crate::geom::Shape;

#[derive(Debug, Error)]
pub enum SvgDocumentError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("invalid XML attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("document contains no <path> elements with path data")]
    NoPaths,
    #[error("path {index}: {source}")]
    Path {
        index: usize,
        #[source]
        source: ParseError,
    },
}

/// Collects the raw `d` attribute of every `<path>` element.
///
/// # Errors
/// Fails on malformed XML.
pub fn collect_path_data(input: &str) -> Result<Vec<String>, SvgDocumentError> {
    let mut reader = Reader::from_str(input);
    let mut found = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"path" =>
            {
                for attribute in element.attributes() {
                    let attribute = attribute?;
                    if attribute.key.local_name().as_ref() == b"d" {
                        found.push(attribute.unescape_value()?.into_owned());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    log::debug!("found {} path elements", found.len());
    Ok(found)
}

/// Parses an SVG document into a [`Shape`] with one path per `<path>` element.
///
/// # Errors
/// [`SvgDocumentError::NoPaths`] when the document has no path data, and the
/// first XML or path-data error otherwise.
pub fn parse_svg_document(input: &str) -> Result<Shape, SvgDocumentError> {
    let sources = collect_path_data(input)?;
    shape_from_path_data(&sources)
}

/// Builds a [`Shape`] from already extracted path-data strings.
///
/// # Errors
/// See [`parse_svg_document`].
pub fn shape_from_path_data<S: AsRef<str>>(sources: &[S]) -> Result<Shape, SvgDocumentError> {
    if sources.is_empty() {
        return Err(SvgDocumentError::NoPaths);
    }
    let paths = sources
        .iter()
        .enumerate()
        .map(|(index, data)| {
            parse_path_data(data.as_ref())
                .map_err(|source| SvgDocumentError::Path { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Shape::new(paths))
}
