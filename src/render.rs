//! Read-only views of a carved grid: box-drawing text and wall images.

use image::{Rgb, RgbImage};
use unicode_width::UnicodeWidthStr;

use crate::bitmap::{self, BLACK, WHITE};
use crate::distance::DistanceField;
use crate::error::{MazeError, Result};
use crate::grid::{Cell, Coord, Direction, Grid};

/// Display columns inside one text cell.
const BODY_W: usize = 3;

pub fn text(grid: &Grid) -> String {
    text_with(grid, |_| String::new())
}

/// Text maze with each cell's label centred in its body.
///
/// Labels wider than the body are written as-is and push the row out of line.
pub fn text_with<F>(grid: &Grid, contents: F) -> String
where
    F: Fn(&Cell) -> String,
{
    let mut output = format!("+{}\n", "---+".repeat(grid.cols()));
    for row in grid.each_row() {
        let mut top = String::from("|");
        let mut bottom = String::from("+");
        for cell in row {
            let coord = cell.coord();
            top.push_str(&centre(&contents(cell)));
            top.push(if linked_toward(grid, coord, Direction::East) { ' ' } else { '|' });
            bottom.push_str(if linked_toward(grid, coord, Direction::South) {
                "   "
            } else {
                "---"
            });
            bottom.push('+');
        }
        output.push_str(&top);
        output.push('\n');
        output.push_str(&bottom);
        output.push('\n');
    }
    output
}

/// Labels reached cells with their distance in base 36.
pub fn text_with_distances(grid: &Grid, field: &DistanceField) -> String {
    text_with(grid, |cell| {
        field
            .distance(cell.coord())
            .ok()
            .flatten()
            .map(distance_label)
            .unwrap_or_default()
    })
}

/// One base-36 digit, or `*` once the distance no longer fits.
pub fn distance_label(distance: usize) -> String {
    u32::try_from(distance)
        .ok()
        .and_then(|d| char::from_digit(d, 36))
        .map_or_else(|| "*".to_string(), String::from)
}

/// Walls in black on white, `cell_size` pixels per cell plus one for the
/// closing border.
///
/// `cell_size` must be non-zero and small enough for both sides to fit in
/// `u32`.
pub fn raster(grid: &Grid, cell_size: usize) -> Result<RgbImage> {
    draw(grid, cell_size, |_| None)
}

/// Same as [`raster`], with reached cells shaded darker the closer they are
/// to the root.
pub fn raster_with_distances(
    grid: &Grid,
    cell_size: usize,
    field: &DistanceField,
) -> Result<RgbImage> {
    let (_, max) = field.max();
    draw(grid, cell_size, |coord| {
        field.distance(coord).ok().flatten().map(|d| shade(d, max))
    })
}

/// Green that fades towards white as `distance` approaches `max`.
pub fn shade(distance: usize, max: usize) -> Rgb<u8> {
    let intensity = if max == 0 {
        1.0
    } else {
        max.saturating_sub(distance) as f64 / max as f64
    };
    let dark = (255.0 * intensity).round() as u8;
    let bright = 128 + (127.0 * intensity).round() as u8;
    Rgb([dark, bright, dark])
}

fn draw<F>(grid: &Grid, cell_size: usize, background: F) -> Result<RgbImage>
where
    F: Fn(Coord) -> Option<Rgb<u8>>,
{
    let side = |cells: usize| {
        cells
            .checked_mul(cell_size)
            .and_then(|n| n.checked_add(1))
            .and_then(|n| u32::try_from(n).ok())
    };
    let (Some(width), Some(height), Ok(size)) = (
        side(grid.cols()),
        side(grid.rows()),
        u32::try_from(cell_size),
    ) else {
        return Err(MazeError::InvalidCellSize(cell_size));
    };
    if size == 0 {
        return Err(MazeError::InvalidCellSize(cell_size));
    }

    let mut img = RgbImage::from_pixel(width, height, WHITE);

    for cell in grid.each_cell() {
        if let Some(color) = background(cell.coord()) {
            let (top_left, bottom_right) = bounds(cell, size);
            bitmap::fill_rect(&mut img, top_left, bottom_right, color);
        }
    }

    for cell in grid.each_cell() {
        let coord = cell.coord();
        let ((x1, y1), (x2, y2)) = bounds(cell, size);

        if grid.neighbor(coord, Direction::North).is_none() {
            bitmap::line(&mut img, (x1, y1), (x2, y1), BLACK);
        }
        if grid.neighbor(coord, Direction::West).is_none() {
            bitmap::line(&mut img, (x1, y1), (x1, y2), BLACK);
        }
        if !linked_toward(grid, coord, Direction::East) {
            bitmap::line(&mut img, (x2, y1), (x2, y2), BLACK);
        }
        if !linked_toward(grid, coord, Direction::South) {
            bitmap::line(&mut img, (x1, y2), (x2, y2), BLACK);
        }
    }

    Ok(img)
}

/// Corner pixels of a cell's square. `draw` has already checked that the
/// whole image fits in `u32`.
fn bounds(cell: &Cell, size: u32) -> ((u32, u32), (u32, u32)) {
    let x1 = cell.col() as u32 * size;
    let y1 = cell.row() as u32 * size;
    ((x1, y1), (x1 + size, y1 + size))
}

fn linked_toward(grid: &Grid, coord: Coord, direction: Direction) -> bool {
    grid.neighbor(coord, direction)
        .map_or(false, |other| grid.is_linked(coord, other))
}

fn centre(label: &str) -> String {
    let w = UnicodeWidthStr::width(label);
    if w >= BODY_W {
        return label.to_string();
    }
    let left = (BODY_W - w) / 2;
    let right = BODY_W - w - left;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::binary_tree;
    use rand::rngs::mock::StepRng;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    fn first_choice_maze() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        binary_tree(&mut grid, &mut StepRng::new(0, 0));
        grid
    }

    #[test]
    fn uncarved_grid_is_fully_walled() {
        let grid = Grid::new(1, 2).unwrap();
        assert_eq!(text(&grid), "+---+---+\n|   |   |\n+---+---+\n");
    }

    #[test]
    fn distance_labels_are_centred() {
        let grid = first_choice_maze();
        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();
        let expected = "\
+---+---+---+
| 0   1   2 |
+   +   +   +
| 1 | 2 | 3 |
+   +   +   +
| 2 | 3 | 4 |
+---+---+---+
";
        assert_eq!(text_with_distances(&grid, &field), expected);
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(text_with(&grid, |_| "●".to_string()), "+---+\n| ● |\n+---+\n");
        assert_eq!(text_with(&grid, |_| "你".to_string()), "+---+\n|你 |\n+---+\n");
    }

    #[test]
    fn labels_past_base_36() {
        assert_eq!(distance_label(0), "0");
        assert_eq!(distance_label(35), "z");
        assert_eq!(distance_label(36), "*");
    }

    #[test]
    fn raster_draws_border_and_open_passages() {
        let grid = first_choice_maze();
        let img = raster(&grid, 4).unwrap();
        assert_eq!(img.dimensions(), (13, 13));

        // outer border
        assert!((0..13).all(|i| *img.get_pixel(i, 0) == BLACK));
        assert!((0..13).all(|i| *img.get_pixel(0, i) == BLACK));
        assert!((0..13).all(|i| *img.get_pixel(12, i) == BLACK));
        assert!((0..13).all(|i| *img.get_pixel(i, 12) == BLACK));
        // (0,0)-(0,1) is open, (1,0)-(1,1) is walled
        assert_eq!(*img.get_pixel(4, 2), WHITE);
        assert_eq!(*img.get_pixel(4, 6), BLACK);
        // (0,0)-(1,0) is open
        assert_eq!(*img.get_pixel(2, 4), WHITE);
    }

    #[test]
    fn raster_rejects_zero_cell_size() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(raster(&grid, 0), Err(MazeError::InvalidCellSize(0)));
    }

    #[test]
    fn raster_rejects_images_too_large_to_address() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            raster(&grid, usize::MAX),
            Err(MazeError::InvalidCellSize(usize::MAX))
        );
        assert!(raster(&grid, u32::MAX as usize).is_err());
    }

    #[test]
    fn shading_fades_with_distance() {
        assert_eq!(shade(0, 4), Rgb([255, 255, 255]));
        assert_eq!(shade(4, 4), Rgb([0, 128, 0]));
        assert_eq!(shade(0, 0), Rgb([255, 255, 255]));

        let grid = first_choice_maze();
        let field = DistanceField::compute(&grid, c(0, 0)).unwrap();
        let img = raster_with_distances(&grid, 4, &field).unwrap();
        assert_eq!(*img.get_pixel(10, 10), shade(4, 4));
        assert_eq!(*img.get_pixel(6, 2), shade(1, 4));
    }
}
