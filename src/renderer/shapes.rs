//! Vertex generation for draw commands
//!
//! All output is in pixel space (origin top-left, y down). The pipeline maps
//! pixels to clip space.

use super::draw::{DrawCommand, circle_spans};
use super::vertex::{Vertex, linear_color};
use crate::sim::Rect;

/// Two triangles covering an axis-aligned pixel rectangle
pub fn quad(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0, x1, y1) = (x, y, x + width, y + height);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Vertices for a filled rectangle
pub fn filled_rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    quad(rect.left(), rect.top(), rect.width(), rect.height(), color)
}

/// Append the vertices for one draw command
pub fn push_command(vertices: &mut Vec<Vertex>, command: &DrawCommand) {
    match *command {
        DrawCommand::FillRect { rect, color } => {
            vertices.extend_from_slice(&filled_rect(&rect, linear_color(color)));
        }
        DrawCommand::CircleOutline {
            center,
            radius,
            color,
        } => {
            let color = linear_color(color);
            // Each scanline is a one-pixel-tall quad
            for span in circle_spans(center, radius) {
                let width = (span.x_end - span.x_start + 1) as f32;
                vertices.extend_from_slice(&quad(
                    span.x_start as f32,
                    span.y as f32,
                    width,
                    1.0,
                    color,
                ));
            }
        }
    }
}

/// Vertices for a whole frame, in draw order
pub fn frame_vertices(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);
    for command in commands {
        push_command(&mut vertices, command);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rgb;
    use glam::Vec2;

    #[test]
    fn test_filled_rect_corners() {
        let rect = Rect::new(10.0, 20.0, 40, 15);
        let verts = filled_rect(&rect, [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 50.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 35.0);
    }

    #[test]
    fn test_circle_becomes_one_quad_per_span() {
        let command = DrawCommand::CircleOutline {
            center: Vec2::new(50.0, 50.0),
            radius: 8.0,
            color: Rgb::WHITE,
        };
        let verts = frame_vertices(&[command]);
        assert_eq!(verts.len(), circle_spans(Vec2::new(50.0, 50.0), 8.0).len() * 6);
        // Nothing strays outside the bounding square
        assert!(verts.iter().all(|v| {
            (42.0..=58.0).contains(&v.position[0]) && (42.0..=58.0).contains(&v.position[1])
        }));
    }

    #[test]
    fn test_frame_vertices_keep_command_order() {
        let red = Rgb::new(255, 0, 0);
        let commands = [
            DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 1, 1),
                color: Rgb::WHITE,
            },
            DrawCommand::FillRect {
                rect: Rect::new(5.0, 5.0, 1, 1),
                color: red,
            },
        ];
        let verts = frame_vertices(&commands);
        assert_eq!(verts.len(), 12);
        assert_eq!(verts[0].color, linear_color(Rgb::WHITE));
        assert_eq!(verts[6].color, linear_color(red));
    }
}
