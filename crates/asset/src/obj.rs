//! Wavefront-style geometry parser: vertex positions, normals, texture
//! coordinates, polygonal faces and named groups.
//!
//! Deliberately lenient: unrecognized directives are skipped, malformed
//! numeric fields fall back to defaults, and only an unreadable file aborts
//! the load. Faces are fan-triangulated when a group is flushed.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::real;

/// Sentinel for an attribute reference that is not present on a face corner.
pub const NO_INDEX: i32 = -1;

/// One corner of a face: zero-based references into the attribute arrays,
/// or [`NO_INDEX`] where the sub-field was not written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexIndex {
    pub position: i32,
    pub texcoord: i32,
    pub normal: i32,
}

/// Flat vertex attribute arrays: positions stride 3, normals stride 3,
/// texture coordinates stride 2. Append-only while parsing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjAttrib {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
}

impl ObjAttrib {
    #[inline]
    pub fn position_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    #[inline]
    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len() / 2
    }

    /// Position at `idx`, or `None` for the absent sentinel / out of range.
    pub fn position(&self, idx: i32) -> Option<[f32; 3]> {
        if idx < 0 {
            return None;
        }
        let i = idx as usize * 3;
        Some([
            *self.positions.get(i)?,
            *self.positions.get(i + 1)?,
            *self.positions.get(i + 2)?,
        ])
    }

    pub fn normal(&self, idx: i32) -> Option<[f32; 3]> {
        if idx < 0 {
            return None;
        }
        let i = idx as usize * 3;
        Some([
            *self.normals.get(i)?,
            *self.normals.get(i + 1)?,
            *self.normals.get(i + 2)?,
        ])
    }

    pub fn texcoord(&self, idx: i32) -> Option<[f32; 2]> {
        if idx < 0 {
            return None;
        }
        let i = idx as usize * 2;
        Some([*self.texcoords.get(i)?, *self.texcoords.get(i + 1)?])
    }
}

/// Faces accumulated under one `g` name, flattened to triangle corners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjShape {
    pub name: String,
    /// Triangle corner references, three per triangle after triangulation.
    pub indices: Vec<VertexIndex>,
    /// Vertex count of each source polygon before triangulation. Kept for
    /// completeness; nothing downstream reads it.
    pub face_arities: Vec<u32>,
}

impl ObjShape {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Parse result: the attribute arrays plus the named shapes referencing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjData {
    pub attrib: ObjAttrib,
    pub shapes: Vec<ObjShape>,
}

/// Load a geometry description from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<ObjData> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.display()))?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load a geometry description from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<ObjData> {
    parse_obj(reader)
}

/// Convenience helper to parse a geometry string literal.
pub fn load_obj_from_str(contents: &str) -> Result<ObjData> {
    parse_obj(io::Cursor::new(contents))
}

fn parse_obj<R: BufRead>(mut reader: R) -> Result<ObjData> {
    let mut attrib = ObjAttrib::default();
    let mut shapes: Vec<ObjShape> = Vec::new();

    // Working group state: faces as written, flushed on `g` or end of input.
    let mut face_group: Vec<Vec<VertexIndex>> = Vec::new();
    let mut group_name = String::new();

    let mut line = String::new();
    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .context("Failed to read line from OBJ stream")?;
        if n == 0 {
            break;
        }

        let mut token: &str = line.trim_end_matches(['\n', '\r']);
        skip_space(&mut token);
        if token.is_empty() || token.starts_with('#') {
            continue;
        }

        // Longer keywords first so `vn`/`vt` never classify as `v`.
        if let Some(mut rest) = strip_keyword(token, "vn") {
            let x = parse_real(&mut rest, 0.0);
            let y = parse_real(&mut rest, 0.0);
            let z = parse_real(&mut rest, 0.0);
            attrib.normals.push(x);
            attrib.normals.push(y);
            attrib.normals.push(z);
        } else if let Some(mut rest) = strip_keyword(token, "vt") {
            let u = parse_real(&mut rest, 0.0);
            let v = parse_real(&mut rest, 0.0);
            attrib.texcoords.push(u);
            attrib.texcoords.push(v);
        } else if let Some(mut rest) = strip_keyword(token, "v") {
            let x = parse_real(&mut rest, 0.0);
            let y = parse_real(&mut rest, 0.0);
            let z = parse_real(&mut rest, 0.0);
            attrib.positions.push(x);
            attrib.positions.push(y);
            attrib.positions.push(z);
        } else if let Some(mut rest) = strip_keyword(token, "f") {
            let mut face: Vec<VertexIndex> = Vec::with_capacity(3);
            skip_space(&mut rest);
            while !rest.is_empty() {
                let word = next_word(&mut rest);
                face.push(parse_triple(
                    word,
                    attrib.position_count() as i32,
                    attrib.normal_count() as i32,
                    attrib.texcoord_count() as i32,
                ));
                skip_space(&mut rest);
            }
            if !face.is_empty() {
                face_group.push(face);
            }
        } else if let Some(mut rest) = strip_keyword(token, "g") {
            flush_group(&mut shapes, &mut face_group, &group_name);
            skip_space(&mut rest);
            // Only the first name after `g` is honored; extra names are a
            // known ambiguity of the format and are ignored.
            group_name = next_word(&mut rest).to_string();
        }
        // Unknown directive: ignore.
    }

    flush_group(&mut shapes, &mut face_group, &group_name);

    Ok(ObjData { attrib, shapes })
}

/// Flush the accumulated faces into a shape pushed onto `shapes`.
///
/// Every face with at least three corners is fan-triangulated from its first
/// vertex: `(v0,v1,v2), (v0,v2,v3), ...`, winding preserved. The fan assumes
/// convex planar polygons; non-convex input triangulates incorrectly, an
/// inherited limitation of the format's common readers. Groups that end up
/// with no triangles are dropped.
fn flush_group(shapes: &mut Vec<ObjShape>, face_group: &mut Vec<Vec<VertexIndex>>, name: &str) {
    if face_group.is_empty() {
        return;
    }

    let mut shape = ObjShape {
        name: name.to_string(),
        ..Default::default()
    };
    for face in face_group.iter() {
        if face.len() < 3 {
            continue;
        }
        shape.face_arities.push(face.len() as u32);
        for k in 2..face.len() {
            shape.indices.push(face[0]);
            shape.indices.push(face[k - 1]);
            shape.indices.push(face[k]);
        }
    }
    if !shape.indices.is_empty() {
        shapes.push(shape);
    }
    face_group.clear();
}

/// Strip a line keyword followed by at least one blank; returns the rest of
/// the line, or `None` when the keyword does not match.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.starts_with([' ', '\t']) {
        Some(&rest[1..])
    } else {
        None
    }
}

#[inline]
fn skip_space(token: &mut &str) {
    *token = token.trim_start_matches([' ', '\t']);
}

/// Advance past the next blank-delimited word and return it. The caller
/// skips leading blanks first.
fn next_word<'a>(token: &mut &'a str) -> &'a str {
    let end = token.find([' ', '\t']).unwrap_or(token.len());
    let (word, rest) = token.split_at(end);
    *token = rest;
    word
}

/// Read one real from the cursor, substituting `default` when the token does
/// not start with a number. The load never aborts on a bad field.
fn parse_real(token: &mut &str, default: f64) -> f32 {
    skip_space(token);
    let word = next_word(token);
    real::try_parse_double(word).unwrap_or(default) as f32
}

/// C-style integer prefix parse: optional sign then digits, `0` when nothing
/// parses. Trailing characters are left for the caller.
fn parse_int(field: &str) -> i32 {
    let s = field.as_bytes();
    let mut i = 0usize;
    let mut negative = false;
    if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
        negative = s[i] == b'-';
        i += 1;
    }
    let mut value = 0i64;
    while i < s.len() && s[i].is_ascii_digit() {
        value = (value * 10 + i64::from(s[i] - b'0')).min(i64::from(i32::MAX));
        i += 1;
    }
    if negative {
        value = -value;
    }
    value as i32
}

/// Resolve a signed source index against the current attribute count:
/// positive `k` is 1-based (`k-1`), negative `k` counts back from the end
/// (`n+k`), and the literal `0` stays `0`. Keeping `0` valid instead of
/// treating it as absent matches the files this loader has to stay
/// compatible with.
#[inline]
fn fix_index(idx: i32, n: i32) -> i32 {
    if idx > 0 {
        idx - 1
    } else if idx == 0 {
        0
    } else {
        n + idx
    }
}

/// Parse one face corner of the form `v`, `v/vt`, `v//vn` or `v/vt/vn` and
/// resolve each present field. A sub-field that fails to parse degrades to
/// `0` (and resolves to slot 0) rather than raising an error.
fn parse_triple(word: &str, pos_count: i32, normal_count: i32, texcoord_count: i32) -> VertexIndex {
    let mut vi = VertexIndex {
        position: NO_INDEX,
        texcoord: NO_INDEX,
        normal: NO_INDEX,
    };

    let mut fields = word.split('/');
    vi.position = fix_index(parse_int(fields.next().unwrap_or("")), pos_count);

    let Some(second) = fields.next() else {
        return vi;
    };
    let third = fields.next();

    // `v//vn`: the texcoord slot was skipped entirely.
    if second.is_empty() && third.is_some() {
        vi.normal = fix_index(parse_int(third.unwrap_or("")), normal_count);
        return vi;
    }

    vi.texcoord = fix_index(parse_int(second), texcoord_count);
    if let Some(third) = third {
        vi.normal = fix_index(parse_int(third), normal_count);
    }
    vi
}
