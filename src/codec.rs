//! Three-section plain-text terrain format.
//!
//! Land, water, magma, in that order. Each present layer is one
//! comma-separated line per grid row (trailing separator included);
//! an absent layer is a single `-` line. Sections are separated by a
//! blank line. Numbers are locale-independent decimal with `.` as the
//! separator; the shortest round-tripping form is emitted, so
//! serialize/deserialize preserves every f32 bit pattern.

use std::fmt::Write as _;

use crate::error::FormatError;
use crate::grid::Grid;
use crate::terrain::Terrain;

const ABSENT: &str = "-";

pub fn serialize(terrain: &Terrain) -> String {
    let mut out = String::new();
    write_section(&mut out, Some(&terrain.land));
    write_section(&mut out, terrain.water.as_ref());
    write_section(&mut out, terrain.magma.as_ref());
    out
}

fn write_section(out: &mut String, layer: Option<&Grid<f32>>) {
    match layer {
        Some(grid) => {
            for y in 0..grid.h {
                for x in 0..grid.w {
                    let _ = write!(out, "{},", grid.get(x, y));
                }
                out.push('\n');
            }
        }
        None => {
            out.push_str(ABSENT);
            out.push('\n');
        }
    }
    out.push('\n');
}

/// Parse a three-section document. The land section defines the
/// terrain's dimensions; water and magma must match them exactly or be
/// the `-` sentinel. Any malformed token fails the whole read — no
/// partial terrain is ever returned.
pub fn deserialize(text: &str) -> Result<Terrain, FormatError> {
    let sections = split_sections(text);
    if sections.len() != 3 {
        return Err(FormatError::Sections {
            found: sections.len(),
        });
    }

    let land = parse_grid(&sections[0], "land", None)?;
    let want = (land.w, land.h);
    let water = parse_optional(&sections[1], "water", want)?;
    let magma = parse_optional(&sections[2], "magma", want)?;

    Ok(Terrain { land, water, magma })
}

/// Runs of non-blank lines, each line tagged with its 1-based number.
fn split_sections(text: &str) -> Vec<Vec<(usize, &str)>> {
    let mut sections = Vec::new();
    let mut current: Vec<(usize, &str)> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push((i + 1, line));
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

fn parse_optional(
    lines: &[(usize, &str)],
    layer: &'static str,
    want: (usize, usize),
) -> Result<Option<Grid<f32>>, FormatError> {
    if lines.len() == 1 && lines[0].1.trim() == ABSENT {
        return Ok(None);
    }
    parse_grid(lines, layer, Some(want)).map(Some)
}

fn parse_grid(
    lines: &[(usize, &str)],
    layer: &'static str,
    want: Option<(usize, usize)>,
) -> Result<Grid<f32>, FormatError> {
    let h = lines.len();
    let mut data = Vec::new();
    let mut w = 0usize;

    for (row, &(line_no, line)) in lines.iter().enumerate() {
        let before = data.len();
        parse_row(line, line_no, &mut data)?;
        let row_w = data.len() - before;
        if row == 0 {
            w = row_w;
        } else if row_w != w {
            return Err(FormatError::Dimensions {
                layer,
                got_w: row_w,
                got_h: h,
                want_w: w,
                want_h: h,
            });
        }
    }

    if let Some((want_w, want_h)) = want
        && (w, h) != (want_w, want_h)
    {
        return Err(FormatError::Dimensions {
            layer,
            got_w: w,
            got_h: h,
            want_w,
            want_h,
        });
    }

    Ok(Grid { data, w, h })
}

fn parse_row(line: &str, line_no: usize, out: &mut Vec<f32>) -> Result<(), FormatError> {
    // The serializer emits a trailing separator; accept rows without
    // one too.
    let line = line.trim();
    let line = line.strip_suffix(',').unwrap_or(line);
    for token in line.split(',') {
        let token = token.trim();
        let v = token.parse::<f32>().map_err(|_| FormatError::Number {
            token: token.to_string(),
            line: line_no,
        })?;
        out.push(v);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Terrain;

    fn grid(data: Vec<f32>, w: usize, h: usize) -> Grid<f32> {
        Grid { data, w, h }
    }

    #[test]
    fn land_only_document_with_sentinels() {
        let t = deserialize("1,2\n3,4\n\n-\n\n-\n\n").unwrap();
        assert_eq!(t.land, grid(vec![1.0, 2.0, 3.0, 4.0], 2, 2));
        assert!(t.water.is_none());
        assert!(t.magma.is_none());

        // Re-serializing reproduces an equivalent document
        let again = deserialize(&serialize(&t)).unwrap();
        assert_eq!(again, t);
    }

    #[test]
    fn serialized_form_keeps_the_trailing_separator() {
        let t = Terrain {
            land: grid(vec![1.0, 2.0, 3.0, 4.0], 2, 2),
            water: None,
            magma: None,
        };
        assert_eq!(serialize(&t), "1,2,\n3,4,\n\n-\n\n-\n\n");
    }

    #[test]
    fn round_trip_is_exact_for_every_presence_combination() {
        let values = vec![0.0, -1.5, 3.25, 1.0e-7, -2.75e6, 0.1];
        for (water, magma) in [(false, false), (true, false), (false, true), (true, true)] {
            let t = Terrain {
                land: grid(values.clone(), 3, 2),
                water: water.then(|| grid(values.iter().map(|v| v * 3.0).collect(), 3, 2)),
                magma: magma.then(|| grid(values.iter().map(|v| v - 7.0).collect(), 3, 2)),
            };
            let back = deserialize(&serialize(&t)).unwrap();
            assert_eq!(back, t, "water={water} magma={magma}");
        }
    }

    #[test]
    fn malformed_numbers_fail_atomically() {
        let err = deserialize("1,x\n3,4\n\n-\n\n-\n\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::Number {
                token: "x".into(),
                line: 1
            }
        );
        // The mandatory land layer cannot be the absence sentinel
        assert!(matches!(
            deserialize("-\n\n-\n\n-\n\n"),
            Err(FormatError::Number { .. })
        ));
    }

    #[test]
    fn ragged_rows_are_a_dimension_error() {
        let err = deserialize("1,2\n3\n\n-\n\n-\n\n").unwrap_err();
        assert!(matches!(err, FormatError::Dimensions { layer: "land", .. }));
    }

    #[test]
    fn optional_layer_dimensions_must_match_land() {
        let err = deserialize("1,2\n3,4\n\n5,6\n\n-\n\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::Dimensions {
                layer: "water",
                got_w: 2,
                got_h: 1,
                want_w: 2,
                want_h: 2,
            }
        );
    }

    #[test]
    fn missing_or_extra_sections_are_rejected() {
        assert_eq!(
            deserialize("1,2\n\n-\n"),
            Err(FormatError::Sections { found: 2 })
        );
        assert_eq!(deserialize(""), Err(FormatError::Sections { found: 0 }));
        assert_eq!(
            deserialize("1,\n\n-\n\n-\n\n9,\n"),
            Err(FormatError::Sections { found: 4 })
        );
    }
}
