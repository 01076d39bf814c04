//! Solid or striped border strips along one canvas edge.
//!
//! A striped fill splits the border's long axis into equal segments of
//! `length / n` pixels (floor division). The last segment absorbs the
//! remainder, so the stripes always cover the whole edge.

use std::{fmt, str::FromStr};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::{Offset, composite};
use crate::image::{Color, ImageError};

/// Canvas edge a border is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Position {
    /// Left and right borders run along the canvas height.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl FromStr for Position {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(ImageError::InvalidPosition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Border paint: one color, or stripes laid out in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Solid(Color),
    Stripes(Vec<Color>),
}

impl Default for Fill {
    fn default() -> Self {
        Self::Solid(Color::BLACK)
    }
}

impl Fill {
    fn colors(&self) -> &[Color] {
        match self {
            Self::Solid(color) => std::slice::from_ref(color),
            Self::Stripes(colors) => colors,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderOptions {
    pub position: Position,
    pub fill: Fill,
}

impl BorderOptions {
    pub fn new(position: Position, fill: Fill) -> Self {
        Self { position, fill }
    }
}

/// A rendered border layer, ready to be composited.
#[derive(Debug, Clone)]
pub struct Border {
    layer: RgbaImage,
    size: u32,
    position: Position,
}

impl Border {
    /// Render the border layer for `canvas`.
    ///
    /// The layer spans the full canvas width for top/bottom borders and the
    /// full canvas height for left/right borders; `size` is its thickness.
    pub fn build(canvas: &RgbaImage, size: u32, options: &BorderOptions) -> Result<Self, ImageError> {
        let colors = options.fill.colors();
        if colors.is_empty() {
            return Err(ImageError::EmptyFill);
        }

        let vertical = options.position.is_vertical();
        let (width, height) = if vertical {
            (size, canvas.height())
        } else {
            (canvas.width(), size)
        };
        let length = if vertical { height } else { width };

        let mut layer = RgbaImage::new(width, height);
        for ((start, len), color) in segments(length, colors.len()).into_iter().zip(colors) {
            let pixel = color.opaque();
            for along in start..start + len {
                for across in 0..size {
                    let (x, y) = if vertical { (across, along) } else { (along, across) };
                    layer.put_pixel(x, y, pixel);
                }
            }
        }

        Ok(Self {
            layer,
            size,
            position: options.position,
        })
    }

    pub fn layer(&self) -> &RgbaImage {
        &self.layer
    }

    /// Top-left corner of the layer on a `width x height` canvas.
    pub fn origin(&self, width: u32, height: u32, offset: Offset) -> (i64, i64) {
        let size = i64::from(self.size);
        match self.position {
            Position::Top => (0, offset.y),
            Position::Bottom => (0, i64::from(height) - size - offset.y),
            Position::Left => (offset.x, 0),
            Position::Right => (i64::from(width) - size - offset.x, 0),
        }
    }

    /// Composite the border onto `canvas`, returning the new canvas.
    pub fn apply<F>(&self, canvas: &RgbaImage, offset: F) -> RgbaImage
    where
        F: FnOnce(&RgbaImage, &RgbaImage) -> Offset,
    {
        let offset = offset(canvas, &self.layer);
        let (x, y) = self.origin(canvas.width(), canvas.height(), offset);
        composite(canvas, &self.layer, x, y)
    }
}

/// Split `length` into `count` contiguous `(start, len)` segments.
///
/// Each segment is `length / count` long; the last one also takes the
/// remainder.
fn segments(length: u32, count: usize) -> Vec<(u32, u32)> {
    if count == 0 {
        return Vec::new();
    }
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    let step = length / count;

    (0..count)
        .map(|i| {
            let start = i * step;
            let len = if i + 1 == count { length - start } else { step };
            (start, len)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn canvas(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Color::WHITE.opaque())
    }

    fn color(hex: &str) -> Color {
        hex.parse().unwrap()
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!("top".parse::<Position>().unwrap(), Position::Top);
        assert_eq!("bottom".parse::<Position>().unwrap(), Position::Bottom);
        assert_eq!("left".parse::<Position>().unwrap(), Position::Left);
        assert_eq!("right".parse::<Position>().unwrap(), Position::Right);

        for bad in ["", "Top", "middle", "diagonal"] {
            assert!(matches!(
                bad.parse::<Position>(),
                Err(ImageError::InvalidPosition(s)) if s == bad
            ));
        }
    }

    #[test]
    fn test_options_from_toml() {
        let opts: BorderOptions =
            toml::from_str("position = \"left\"\nfill = [\"#000000\", \"#ffffff\"]").unwrap();
        assert_eq!(opts.position, Position::Left);
        assert_eq!(opts.fill, Fill::Stripes(vec![Color::BLACK, Color::WHITE]));

        let opts: BorderOptions = toml::from_str("fill = \"#ff0000\"").unwrap();
        assert_eq!(opts.position, Position::Bottom);
        assert_eq!(opts.fill, Fill::Solid(color("#ff0000")));

        assert!(toml::from_str::<BorderOptions>("position = \"center\"").is_err());
    }

    #[test]
    fn test_segments_exact_division() {
        assert_eq!(segments(12, 3), vec![(0, 4), (4, 4), (8, 4)]);
    }

    #[test]
    fn test_segments_last_absorbs_remainder() {
        assert_eq!(segments(1200, 7).last(), Some(&(1026, 174)));
        assert_eq!(segments(10, 4), vec![(0, 2), (2, 2), (4, 2), (6, 4)]);
    }

    #[test]
    fn test_segments_cover_full_length() {
        for length in [0, 1, 5, 599, 600, 1200] {
            for count in 1..=9 {
                let segs = segments(length, count);
                assert_eq!(segs.len(), count);
                let mut cursor = 0;
                for (start, len) in &segs {
                    assert_eq!(*start, cursor, "gap or overlap at {length}/{count}");
                    cursor += len;
                }
                assert_eq!(cursor, length);
            }
        }
    }

    #[test]
    fn test_solid_fill_layer() {
        let red = color("#ff0000");
        let opts = BorderOptions::new(Position::Bottom, Fill::Solid(red));
        let border = Border::build(&canvas(40, 20), 3, &opts).unwrap();

        assert_eq!(border.layer().dimensions(), (40, 3));
        assert!(border.layer().pixels().all(|p| *p == red.opaque()));
    }

    #[test]
    fn test_vertical_layer_dimensions() {
        let opts = BorderOptions::new(Position::Right, Fill::default());
        let border = Border::build(&canvas(40, 20), 5, &opts).unwrap();
        assert_eq!(border.layer().dimensions(), (5, 20));
    }

    #[test]
    fn test_striped_horizontal_layer() {
        let colors = vec![color("#820C02"), color("#A91401"), color("#D51F06")];
        let opts = BorderOptions::new(Position::Top, Fill::Stripes(colors.clone()));
        let border = Border::build(&canvas(10, 10), 2, &opts).unwrap();
        let layer = border.layer();

        // 10 / 3 = 3, last stripe takes 4
        let expected = [0, 0, 0, 1, 1, 1, 2, 2, 2, 2];
        for (x, idx) in expected.iter().enumerate() {
            for y in 0..2 {
                assert_eq!(*layer.get_pixel(x as u32, y), colors[*idx].opaque(), "x={x} y={y}");
            }
        }
    }

    #[test]
    fn test_striped_vertical_layer() {
        let colors = vec![Color::BLACK, Color::WHITE];
        let opts = BorderOptions::new(Position::Left, Fill::Stripes(colors));
        let border = Border::build(&canvas(8, 5), 1, &opts).unwrap();
        let layer = border.layer();

        assert_eq!(layer.dimensions(), (1, 5));
        assert_eq!(*layer.get_pixel(0, 0), Color::BLACK.opaque());
        assert_eq!(*layer.get_pixel(0, 1), Color::BLACK.opaque());
        assert_eq!(*layer.get_pixel(0, 2), Color::WHITE.opaque());
        assert_eq!(*layer.get_pixel(0, 4), Color::WHITE.opaque());
    }

    #[test]
    fn test_more_stripes_than_pixels() {
        let colors = vec![color("#010101"), color("#020202"), color("#030303")];
        let opts = BorderOptions::new(Position::Bottom, Fill::Stripes(colors));
        let border = Border::build(&canvas(2, 2), 1, &opts).unwrap();

        // Only the last stripe has any width left.
        assert!(border.layer().pixels().all(|p| *p == Rgba([3, 3, 3, 255])));
    }

    #[test]
    fn test_empty_stripes_rejected() {
        let opts = BorderOptions::new(Position::Bottom, Fill::Stripes(Vec::new()));
        assert!(matches!(
            Border::build(&canvas(2, 2), 1, &opts),
            Err(ImageError::EmptyFill)
        ));
    }

    #[test]
    fn test_origin_per_position() {
        let c = canvas(100, 50);
        let build = |position| Border::build(&c, 4, &BorderOptions::new(position, Fill::default())).unwrap();
        let offset = Offset::new(3, 7);

        assert_eq!(build(Position::Top).origin(100, 50, offset), (0, 7));
        assert_eq!(build(Position::Bottom).origin(100, 50, offset), (0, 50 - 4 - 7));
        assert_eq!(build(Position::Left).origin(100, 50, offset), (3, 0));
        assert_eq!(build(Position::Right).origin(100, 50, offset), (100 - 4 - 3, 0));
    }

    #[test]
    fn test_apply_bottom_border() {
        let c = canvas(6, 6);
        let opts = BorderOptions::new(Position::Bottom, Fill::Solid(Color::BLACK));
        let out = Border::build(&c, 2, &opts).unwrap().apply(&c, |_, _| Offset::ZERO);

        for x in 0..6 {
            assert_eq!(*out.get_pixel(x, 3), Color::WHITE.opaque());
            assert_eq!(*out.get_pixel(x, 4), Color::BLACK.opaque());
            assert_eq!(*out.get_pixel(x, 5), Color::BLACK.opaque());
        }
        // Source canvas is untouched.
        assert!(c.pixels().all(|p| *p == Color::WHITE.opaque()));
    }

    #[test]
    fn test_apply_offset_sees_layer() {
        let c = canvas(6, 6);
        let opts = BorderOptions::new(Position::Right, Fill::Solid(Color::BLACK));
        let out = Border::build(&c, 1, &opts).unwrap().apply(&c, |canvas, layer| {
            assert_eq!(canvas.dimensions(), (6, 6));
            assert_eq!(layer.dimensions(), (1, 6));
            Offset::new(2, 0)
        });

        // x = 6 - 1 - 2
        assert_eq!(*out.get_pixel(3, 0), Color::BLACK.opaque());
        assert_eq!(*out.get_pixel(5, 0), Color::WHITE.opaque());
    }
}
