//! SVG rendering of drilling tours.
//!
//! Only boards with hole coordinates can be drawn. The plate is mapped onto
//! the canvas with the y axis pointing up.

use crate::error::{Error, Result};
use crate::instance::{Board, Point, SIDE};
use crate::solution::Solution;
use std::fs;
use std::path::Path;

/// SVG visualization generator
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// Hole radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 800.0,
            height: 800.0,
            margin: 50.0,
            node_radius: 5.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an SVG drawing of the plate, the holes and the closed tour
    pub fn generate_svg(&self, board: &Board, solution: &Solution) -> Result<String> {
        if !board.has_coordinates() {
            return Err(Error::InvalidInstance(format!(
                "board {} has no coordinates to draw",
                board.name
            )));
        }
        if let Some(&hole) = solution.tour.iter().find(|&&h| h >= board.points.len()) {
            return Err(Error::InvalidInstance(format!(
                "tour visits hole {} but the board has {}",
                hole,
                board.points.len()
            )));
        }

        let mut svg = String::new();
        let scale = ((self.width - 2.0 * self.margin) / SIDE).min((self.height - 2.0 * self.margin) / SIDE);

        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .plate {{ fill: #ffffff; stroke: #2c3e50; stroke-width: 1; }}
    .hole {{ fill: #3498db; stroke: #2c3e50; stroke-width: 1; }}
    .start {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 1; }}
    .edge {{ stroke: #34495e; stroke-width: 1.5; fill: none; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ecf0f1"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r##"<text x="{}" y="25" class="title">Board: {} | Holes: {} | Length: {:.2} | {}</text>
"##,
            self.margin,
            board.name,
            board.dimension(),
            solution.cost,
            solution.algorithm
        ));

        let transform = |p: &Point| -> (f64, f64) {
            let tx = self.margin + p.x * scale;
            let ty = self.height - self.margin - p.y * scale;
            (tx, ty)
        };

        let (px, py) = transform(&Point::new(0.0, SIDE));
        svg.push_str(&format!(
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" class="plate"/>
"##,
            px,
            py,
            SIDE * scale,
            SIDE * scale
        ));

        svg.push_str(
            r##"<defs>
<marker id="arrow" markerWidth="10" markerHeight="10" refX="9" refY="3" orient="auto" markerUnits="strokeWidth">
<path d="M0,0 L0,6 L9,3 z" fill="#34495e"/>
</marker>
</defs>
"##,
        );

        for (from, to) in solution.edges() {
            let (x1, y1) = transform(&board.points[from]);
            let (x2, y2) = transform(&board.points[to]);
            svg.push_str(&format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="edge" marker-end="url(#arrow)"/>
"#,
                x1, y1, x2, y2
            ));
        }

        let start = solution.tour.first().copied();
        for (id, point) in board.points.iter().enumerate() {
            let (x, y) = transform(point);
            let class = if Some(id) == start { "start" } else { "hole" };

            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
"##,
                x, y, self.node_radius, class
            ));
            svg.push_str(&format!(
                r##"<text x="{:.2}" y="{:.2}" class="label" text-anchor="middle">{}</text>
"##,
                x,
                y - self.node_radius - 3.0,
                id
            ));
        }

        svg.push_str("</svg>");

        Ok(svg)
    }

    /// Render and write the drawing to `path`
    pub fn save_svg<P: AsRef<Path>>(&self, board: &Board, solution: &Solution, path: P) -> Result<()> {
        let svg = self.generate_svg(board, solution)?;
        let path = path.as_ref();
        fs::write(path, svg).map_err(|e| Error::persistence(path, e))
    }
}
