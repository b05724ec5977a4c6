//! SVG documents for relaxed dot fields and stipple marks.
//!
//! Output is byte-stable: one root `<svg>`, a full-size background `<rect>`, then one
//! element group per item with every number printed to six decimal places.
use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::relax::Dot;
use crate::stipple::{Mark, MarkShape};

/// Background and fill colours, as SVG colour keywords or hex strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub fill: &'static str,
}

impl Palette {
    /// White dots on black.
    pub const DOT_FIELD: Palette = Palette {
        background: "black",
        fill: "white",
    };

    /// Black marks on white.
    pub const STIPPLE: Palette = Palette {
        background: "white",
        fill: "black",
    };
}

fn write_header<W: Write>(w: &mut W, width: u32, height: u32, palette: Palette) -> Result<()> {
    write!(
        w,
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    )?;
    write!(
        w,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        palette.background
    )?;
    Ok(())
}

fn write_rotated_ellipse<W: Write>(
    w: &mut W,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    rotation: f64,
    fill: &str,
) -> Result<()> {
    write!(
        w,
        r#"<g transform="rotate({:.6} {cx:.6} {cy:.6})">"#,
        rotation * 180.0 / PI
    )?;
    write!(
        w,
        r#"<ellipse cx="{cx:.6}" cy="{cy:.6}" rx="{rx:.6}" ry="{ry:.6}" fill="{fill}"/>"#
    )?;
    w.write_all(b"</g>")?;
    Ok(())
}

/// Writes relaxed dots as rotated ellipses.
pub fn write_dot_field_svg<W: Write>(
    w: &mut W,
    width: u32,
    height: u32,
    dots: &[Dot],
    palette: Palette,
) -> Result<()> {
    write_header(w, width, height, palette)?;
    for dot in dots {
        write_rotated_ellipse(
            w,
            dot.position.x,
            dot.position.y,
            dot.rx(),
            dot.ry(),
            dot.rotation,
            palette.fill,
        )?;
    }
    w.write_all(b"</svg>")?;
    Ok(())
}

/// Writes stipple marks: rotated ellipses or plain circles depending on their shape.
pub fn write_marks_svg<W: Write>(
    w: &mut W,
    width: u32,
    height: u32,
    marks: &[Mark],
    palette: Palette,
) -> Result<()> {
    write_header(w, width, height, palette)?;
    for mark in marks {
        let (cx, cy) = (mark.center.x, mark.center.y);
        match mark.shape {
            MarkShape::Ellipse => {
                write_rotated_ellipse(w, cx, cy, mark.rx, mark.ry, mark.rotation, palette.fill)?
            }
            MarkShape::Circle => write!(
                w,
                r#"<circle cx="{cx:.6}" cy="{cy:.6}" r="{:.6}" fill="{}"/>"#,
                mark.rx, palette.fill
            )?,
        }
    }
    w.write_all(b"</svg>")?;
    Ok(())
}

/// Creates `path` and writes the dot field into it.
pub fn save_dot_field_svg(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    dots: &[Dot],
) -> Result<()> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    write_dot_field_svg(&mut w, width, height, dots, Palette::DOT_FIELD)?;
    w.flush()?;
    info!("Wrote {} dots to {}.", dots.len(), path.display());
    Ok(())
}

/// Creates `path` and writes the stipple marks into it.
pub fn save_marks_svg(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    marks: &[Mark],
) -> Result<()> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    write_marks_svg(&mut w, width, height, marks, Palette::STIPPLE)?;
    w.flush()?;
    info!("Wrote {} marks to {}.", marks.len(), path.display());
    Ok(())
}
