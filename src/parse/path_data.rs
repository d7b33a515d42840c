//! Parser for compact path data (`M 0 0 L 10 0 z`).
//!
//! Supported commands are `M m L l H h V v C c A a Z z`. Numbers are an
//! optional `-`, a run of digits and an optional fraction; exponents and a
//! leading `+` are rejected. Every y value is negated on the way in, turning
//! the top-down authoring space into the engine's y-up space.

use thiserror::Error;

use crate::geom::{EllipticalArc, Path, PathSegment, Point2, SegmentError, SegmentKind};

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown path segment type `{command}` at offset {offset}")]
    UnknownCommand { command: char, offset: usize },
    #[error("expected a number at offset {offset}")]
    ExpectedNumber { offset: usize },
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

/// Parses one path-data string into a [`Path`].
///
/// # Errors
/// Returns a [`ParseError`] for unknown commands, malformed numbers and
/// zero-radius arcs. Nothing is returned for partially parsed input.
pub fn parse_path_data(input: &str) -> ParseResult<Path> {
    let mut parser = PathDataParser::new(input);
    let segments = parser.parse()?;
    log::debug!("parsed path data into {} segments", segments.len());
    Ok(Path::new(segments))
}

struct PathDataParser<'a> {
    input: &'a str,
    position: usize,
    cursor: Point2,
    sub_path_start: Point2,
    segments: Vec<PathSegment>,
}

impl<'a> PathDataParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            cursor: Point2::ORIGIN,
            sub_path_start: Point2::ORIGIN,
            segments: Vec::new(),
        }
    }

    fn parse(&mut self) -> ParseResult<Vec<PathSegment>> {
        self.skip_separators();
        while let Some(command) = self.peek() {
            let offset = self.position;
            self.advance(command);
            self.skip_separators();
            self.parse_command(command, offset)?;
            self.skip_separators();
        }
        Ok(std::mem::take(&mut self.segments))
    }

    fn parse_command(&mut self, command: char, offset: usize) -> ParseResult<()> {
        match command {
            'M' | 'm' => self.parse_move(command == 'm'),
            'L' | 'l' => self.repeat(|p| p.parse_line(command == 'l')),
            'H' | 'h' => self.repeat(|p| p.parse_horizontal(command == 'h')),
            'V' | 'v' => self.repeat(|p| p.parse_vertical(command == 'v')),
            'C' | 'c' => self.repeat(|p| p.parse_cubic(command == 'c')),
            'A' | 'a' => self.repeat(|p| p.parse_arc(command == 'a')),
            'Z' | 'z' => {
                self.push(PathSegment::absolute(SegmentKind::Line {
                    to: self.sub_path_start,
                }));
                Ok(())
            }
            other => Err(ParseError::UnknownCommand {
                command: other,
                offset,
            }),
        }
    }

    /// Runs `group` for every argument group up to the next command letter.
    fn repeat(&mut self, mut group: impl FnMut(&mut Self) -> ParseResult<()>) -> ParseResult<()> {
        while self.at_argument() {
            group(self)?;
        }
        Ok(())
    }

    fn parse_move(&mut self, relative: bool) -> ParseResult<()> {
        let to = self.read_point()?;
        // A leading relative move has nothing to be relative to.
        let segment = if relative && !self.segments.is_empty() {
            PathSegment::relative(SegmentKind::Move { to })
        } else {
            PathSegment::absolute(SegmentKind::Move { to })
        };
        self.push(segment);
        self.sub_path_start = self.cursor;

        // Extra coordinate pairs are implicit line-tos.
        self.repeat(|p| p.parse_line(relative))
    }

    fn parse_line(&mut self, relative: bool) -> ParseResult<()> {
        let to = self.read_point()?;
        self.push(positioned(SegmentKind::Line { to }, relative));
        Ok(())
    }

    fn parse_horizontal(&mut self, relative: bool) -> ParseResult<()> {
        let x = self.read_number()?;
        self.push(positioned(SegmentKind::HorizontalLine { x }, relative));
        Ok(())
    }

    fn parse_vertical(&mut self, relative: bool) -> ParseResult<()> {
        let y = -self.read_number()?;
        self.push(positioned(SegmentKind::VerticalLine { y }, relative));
        Ok(())
    }

    fn parse_cubic(&mut self, relative: bool) -> ParseResult<()> {
        let control1 = self.read_point()?;
        let control2 = self.read_point()?;
        let to = self.read_point()?;
        self.push(positioned(
            SegmentKind::CubicBezier {
                control1,
                control2,
                to,
            },
            relative,
        ));
        Ok(())
    }

    fn parse_arc(&mut self, relative: bool) -> ParseResult<()> {
        let radius_x = self.read_number()?;
        let radius_y = self.read_number()?;
        let rotation = self.read_number()?;
        let large_arc = self.read_number()? != 0.0;
        // Flipping y mirrors the arc, which reverses both its rotation and sweep.
        let sweep = self.read_number()? == 0.0;
        let to = self.read_point()?;
        let arc = EllipticalArc::new(radius_x, radius_y, -rotation, large_arc, sweep)?;
        self.push(positioned(SegmentKind::EllipticalArc { arc, to }, relative));
        Ok(())
    }

    fn push(&mut self, segment: PathSegment) {
        self.cursor = segment.end_point(self.cursor);
        self.segments.push(segment);
    }

    // ───────────────────────────── tokens ─────────────────────────────

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self, c: char) {
        self.position += c.len_utf8();
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if !matches!(c, ' ' | '\r' | '\n' | '\t' | ',') {
                break;
            }
            self.advance(c);
        }
    }

    /// True while the next token belongs to the current command.
    fn at_argument(&self) -> bool {
        self.peek().is_some_and(|c| !c.is_alphabetic())
    }

    fn read_point(&mut self) -> ParseResult<Point2> {
        let x = self.read_number()?;
        let y = self.read_number()?;
        Ok(Point2::new(x, -y))
    }

    fn read_number(&mut self) -> ParseResult<f64> {
        let start = self.position;
        let mut digits_from = start;
        if self.peek() == Some('-') {
            self.advance('-');
            digits_from = self.position;
        }
        self.skip_digits();
        if self.position == digits_from {
            return Err(ParseError::ExpectedNumber { offset: start });
        }
        if self.peek() == Some('.') {
            self.advance('.');
            self.skip_digits();
        }

        let value = self.input[start..self.position]
            .parse::<f64>()
            .map_err(|_| ParseError::ExpectedNumber { offset: start })?;
        self.skip_separators();
        Ok(value)
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            self.advance(c);
        }
    }
}

fn positioned(kind: SegmentKind, relative: bool) -> PathSegment {
    if relative {
        PathSegment::relative(kind)
    } else {
        PathSegment::absolute(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Positioning;

    fn kinds(input: &str) -> Vec<SegmentKind> {
        parse_path_data(input)
            .unwrap()
            .segments
            .into_iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn parses_move_and_lines_with_y_flip() {
        assert_eq!(
            kinds("M 1 2 L 3 4"),
            vec![
                SegmentKind::Move {
                    to: Point2::new(1.0, -2.0)
                },
                SegmentKind::Line {
                    to: Point2::new(3.0, -4.0)
                },
            ]
        );
    }

    #[test]
    fn extra_move_pairs_become_lines() {
        let path = parse_path_data("m 1,1 2,0 0,2").unwrap();
        let positioning: Vec<Positioning> = path.segments.iter().map(|s| s.positioning).collect();
        assert_eq!(
            positioning,
            vec![Positioning::Absolute, Positioning::Relative, Positioning::Relative]
        );
        assert!(matches!(path.segments[1].kind, SegmentKind::Line { .. }));
    }

    #[test]
    fn horizontal_keeps_sign_vertical_flips() {
        assert_eq!(
            kinds("M0 0 H 5 v 3"),
            vec![
                SegmentKind::Move { to: Point2::new(0.0, -0.0) },
                SegmentKind::HorizontalLine { x: 5.0 },
                SegmentKind::VerticalLine { y: -3.0 },
            ]
        );
    }

    #[test]
    fn close_path_returns_to_sub_path_start() {
        let path = parse_path_data("M 1 1 L 5 1 L 5 5 z").unwrap();
        let last = path.segments.last().unwrap();
        assert_eq!(
            last.kind,
            SegmentKind::Line {
                to: Point2::new(1.0, -1.0)
            }
        );
        assert_eq!(last.positioning, Positioning::Absolute);
    }

    #[test]
    fn close_path_uses_latest_relative_move() {
        let path = parse_path_data("M 0 0 L 1 0 m 2 0 l 1 0 z").unwrap();
        let last = path.segments.last().unwrap();
        assert_eq!(
            last.kind,
            SegmentKind::Line {
                to: Point2::new(3.0, 0.0)
            }
        );
    }

    #[test]
    fn numbers_accept_negatives_and_fractions() {
        assert_eq!(
            kinds("L-1.5-2.25"),
            vec![SegmentKind::Line {
                to: Point2::new(-1.5, 2.25)
            }]
        );
        assert_eq!(
            kinds("L 3. 4"),
            vec![SegmentKind::Line {
                to: Point2::new(3.0, -4.0)
            }]
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_path_data("M 0 0 X 1 1"),
            Err(ParseError::UnknownCommand {
                command: 'X',
                offset: 6
            })
        );
    }

    #[test]
    fn unsupported_number_forms_fail() {
        assert_eq!(
            parse_path_data("M +1 0"),
            Err(ParseError::ExpectedNumber { offset: 2 })
        );
        assert_eq!(
            parse_path_data("M .5 0"),
            Err(ParseError::ExpectedNumber { offset: 2 })
        );
        assert_eq!(
            parse_path_data("M 1"),
            Err(ParseError::ExpectedNumber { offset: 3 })
        );
        assert!(matches!(
            parse_path_data("M 0 0 L 1 1e5"),
            Err(ParseError::UnknownCommand { command: 'e', .. })
        ));
    }

    #[test]
    fn arcs_flip_sweep_and_reject_zero_radius() {
        let path = parse_path_data("M 0 0 A 5 5 30 1 1 10 0").unwrap();
        let SegmentKind::EllipticalArc { arc, to } = path.segments[1].kind else {
            panic!("expected an arc");
        };
        assert!(arc.large_arc());
        assert!(!arc.sweep());
        assert_eq!(arc.rotation_degrees(), -30.0);
        assert_eq!(to, Point2::new(10.0, -0.0));

        assert_eq!(
            parse_path_data("M 0 0 A 0 5 0 0 1 10 0"),
            Err(ParseError::Segment(SegmentError::ZeroRadiusArc))
        );
    }

    #[test]
    fn move_without_coordinates_fails() {
        assert_eq!(
            parse_path_data("M L 1 1"),
            Err(ParseError::ExpectedNumber { offset: 2 })
        );
        assert_eq!(
            parse_path_data("M"),
            Err(ParseError::ExpectedNumber { offset: 1 })
        );
        assert!(matches!(
            parse_path_data("M 0 0 L 1 1 m z"),
            Err(ParseError::ExpectedNumber { .. })
        ));
    }

    #[test]
    fn relative_curves_and_arcs_repeat_their_groups() {
        let path =
            parse_path_data("M 0 0 c 1 2 3 4 5 6 7 8 9 10 11 12 h 5 a 2 2 0 0 1 4 0 2 2 0 1 0 4 0")
                .unwrap();
        let segments = &path.segments;
        assert_eq!(segments.len(), 6);
        assert_eq!(segments[0].positioning, Positioning::Absolute);
        assert!(
            segments[1..]
                .iter()
                .all(|s| s.positioning == Positioning::Relative)
        );

        assert_eq!(
            segments[1].kind,
            SegmentKind::CubicBezier {
                control1: Point2::new(1.0, -2.0),
                control2: Point2::new(3.0, -4.0),
                to: Point2::new(5.0, -6.0),
            }
        );
        assert_eq!(
            segments[2].kind,
            SegmentKind::CubicBezier {
                control1: Point2::new(7.0, -8.0),
                control2: Point2::new(9.0, -10.0),
                to: Point2::new(11.0, -12.0),
            }
        );
        assert_eq!(segments[3].kind, SegmentKind::HorizontalLine { x: 5.0 });

        let SegmentKind::EllipticalArc { arc: first, to } = segments[4].kind else {
            panic!("expected an arc");
        };
        assert_eq!(to, Point2::new(4.0, -0.0));
        assert!(!first.large_arc());
        assert!(!first.sweep());
        let SegmentKind::EllipticalArc { arc: second, .. } = segments[5].kind else {
            panic!("expected a repeated arc");
        };
        assert!(second.large_arc());
        assert!(second.sweep());
    }

    #[test]
    fn absolute_curves_repeat_their_groups() {
        let path = parse_path_data("M 0 0 C 1 1 2 2 3 3 4 4 5 5 6 6").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert!(
            path.segments[1..]
                .iter()
                .all(|s| s.positioning == Positioning::Absolute
                    && matches!(s.kind, SegmentKind::CubicBezier { .. }))
        );
    }

    #[test]
    fn empty_input_is_an_empty_path() {
        assert!(parse_path_data("").unwrap().is_empty());
        assert!(parse_path_data("  ,\n").unwrap().is_empty());
    }
}
