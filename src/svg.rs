//! Path-description strings and SVG document assembly.

use egui::{Color32, Pos2};
use std::fmt::Write as _;

/// How a path combines with what was painted before it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Paint over earlier content
    #[default]
    SourceOver,
    /// Remove earlier content wherever the path is stroked
    DestinationOut,
}

impl CompositeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::DestinationOut => "destination-out",
        }
    }
}

/// One stroked path ready for a document
#[derive(Clone, Debug, PartialEq)]
pub struct SvgPath {
    pub d: String,
    pub stroke: Color32,
    pub stroke_width: f32,
    pub composite: CompositeMode,
}

/// `M x0 y0 L x1 y1 ...`, plus ` Z` when `closed`. Empty input gives an empty string.
pub fn path_data(points: &[Pos2], closed: bool) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };

    let mut d = String::with_capacity(points.len() * 12);
    let _ = write!(d, "M {} {}", first.x, first.y);
    for p in rest {
        let _ = write!(d, " L {} {}", p.x, p.y);
    }
    if closed {
        d.push_str(" Z");
    }
    d
}

/// Assemble a standalone SVG document.
///
/// Paths are painted in order. An erasing path is rendered as a mask over
/// everything painted before it, so it cuts through earlier paths but never
/// through the background rectangle.
pub fn document(width: u32, height: u32, paths: &[SvgPath], background: Option<Color32>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    if let Some(bg) = background {
        let _ = write!(out, r#"<rect width="100%" height="100%" {}/>"#, paint_attrs("fill", bg));
    }

    let mut content = String::new();
    let mut masks = 0usize;
    for path in paths.iter().filter(|p| !p.d.is_empty()) {
        match path.composite {
            CompositeMode::SourceOver => {
                write_path(&mut content, path, path.stroke);
            }
            CompositeMode::DestinationOut => {
                let id = format!("erase-{masks}");
                masks += 1;

                let mut wrapped = String::new();
                let _ = write!(
                    wrapped,
                    r##"<mask id="{id}" maskUnits="userSpaceOnUse" x="0" y="0" width="{width}" height="{height}"><rect width="100%" height="100%" fill="#ffffff"/>"##
                );
                write_path(&mut wrapped, path, Color32::BLACK);
                let _ = write!(wrapped, r#"</mask><g mask="url(#{id})">{content}</g>"#);
                content = wrapped;
            }
        }
    }

    out.push_str(&content);
    out.push_str("</svg>");
    out
}

fn write_path(out: &mut String, path: &SvgPath, stroke: Color32) {
    let _ = write!(
        out,
        r#"<path d="{}" fill="none" {} stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" data-composite="{}"/>"#,
        path.d,
        paint_attrs("stroke", stroke),
        path.stroke_width,
        path.composite.as_str()
    );
}

fn paint_attrs(attr: &str, color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!(r##"{attr}="#{r:02x}{g:02x}{b:02x}""##)
    } else {
        let opacity = f32::from(a) / 255.0;
        format!(r##"{attr}="#{r:02x}{g:02x}{b:02x}" {attr}-opacity="{opacity:.3}""##)
    }
}

/// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise
pub fn color_to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
pub fn parse_hex_color(s: &str) -> Option<Color32> {
    let hex = s.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
            Some(Color32::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(d: &str) -> SvgPath {
        SvgPath {
            d: d.to_owned(),
            stroke: Color32::from_rgb(0x11, 0x11, 0x11),
            stroke_width: 2.0,
            composite: CompositeMode::SourceOver,
        }
    }

    #[test]
    fn test_path_data_open_and_closed() {
        let pts = [Pos2::new(0.0, 0.0), Pos2::new(1.5, 2.0), Pos2::new(3.0, 4.0)];
        assert_eq!(path_data(&pts, false), "M 0 0 L 1.5 2 L 3 4");
        assert_eq!(path_data(&pts, true), "M 0 0 L 1.5 2 L 3 4 Z");
    }

    #[test]
    fn test_path_data_empty_and_single_point() {
        assert_eq!(path_data(&[], true), "");
        assert_eq!(path_data(&[Pos2::new(2.0, 3.0)], false), "M 2 3");
    }

    #[test]
    fn test_background_only_document() {
        let doc = document(64, 32, &[], Some(Color32::WHITE));
        assert_eq!(
            doc,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32" viewBox="0 0 64 32"><rect width="100%" height="100%" fill="#ffffff"/></svg>"##
        );
        assert!(!doc.contains("<path"));
    }

    #[test]
    fn test_path_styling() {
        let doc = document(10, 10, &[ink("M 0 0 L 1 1")], None);
        assert!(!doc.contains("<rect"));
        assert!(doc.contains(
            r##"<path d="M 0 0 L 1 1" fill="none" stroke="#111111" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" data-composite="source-over"/>"##
        ));
    }

    #[test]
    fn test_empty_paths_are_skipped() {
        let doc = document(10, 10, &[ink("")], None);
        assert!(!doc.contains("<path"));
    }

    #[test]
    fn test_eraser_masks_earlier_paths_only() {
        let eraser = SvgPath {
            d: "M 0 5 L 10 5".to_owned(),
            stroke: Color32::RED,
            stroke_width: 6.0,
            composite: CompositeMode::DestinationOut,
        };
        let doc = document(10, 10, &[ink("M 0 0 L 9 9"), eraser, ink("M 9 0 L 0 9")], Some(Color32::WHITE));

        let mask_at = doc.find(r#"<mask id="erase-0""#).unwrap();
        let group_at = doc.find(r#"<g mask="url(#erase-0)"><path d="M 0 0 L 9 9""#).unwrap();
        let later_at = doc.find(r#"<path d="M 9 0 L 0 9""#).unwrap();
        let bg_at = doc.find("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>").unwrap();

        assert!(bg_at < mask_at);
        assert!(mask_at < group_at);
        assert!(doc[group_at..later_at].contains("</g>"));
        assert!(doc.contains(r##"stroke="#000000" stroke-width="6""##));
        assert!(doc.contains(r#"data-composite="destination-out""#));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(color_to_hex(Color32::from_rgb(0x11, 0xab, 0x00)), "#11ab00");
        assert_eq!(parse_hex_color("#11ab00"), Some(Color32::from_rgb(0x11, 0xab, 0x00)));
        assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_hex_color("#0000"), None);
        assert_eq!(parse_hex_color("111111"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
