use common::game::cell::GridCell;
use common::game::map::GameMap;
use common::game::snake::Snake;
use common::game::types::Direction;
use common::game::wall::WallKind;
use eframe::egui;
use image::RgbaImage;

use crate::tiles::{LoadedTile, TileKind};

const CELL_EVEN: [u8; 3] = [0xC3, 0x94, 0x4E];
const CELL_ODD: [u8; 3] = [0xA5, 0x73, 0x32];
const WALL_COLOR: [u8; 3] = [0x00, 0x66, 0x22];
const BARRIER_COLOR: [u8; 3] = [0x6E, 0x46, 0x33];

/// Washed-out per-player body colors once a snake is dead.
const DEAD_COLORS: [egui::Color32; 2] = [
    egui::Color32::from_rgb(0xBE, 0xDA, 0xFF),
    egui::Color32::from_rgb(0xFD, 0xCD, 0xC5),
];

/// Eye placement relative to the head center, indexed by facing.
const EYE_DX: [[f32; 2]; 4] = [[-1.0, 1.0], [1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]];
const EYE_DY: [[f32; 2]; 4] = [[-1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [1.0, -1.0]];

/// Two-layer board painter. The static layer (checkerboard plus
/// obstacles) is composited into a texture and rebuilt only when the
/// map flags it stale; snakes are painted with vector shapes every
/// frame on top of it.
pub struct BoardRenderer {
    background: Option<egui::TextureHandle>,
    wall_tile: Option<RgbaImage>,
    barrier_tile: Option<RgbaImage>,
}

impl BoardRenderer {
    pub fn new() -> Self {
        Self {
            background: None,
            wall_tile: None,
            barrier_tile: None,
        }
    }

    /// Caller marks the map background dirty so the texture picks the
    /// tile up on the next frame.
    pub fn set_tile(&mut self, tile: LoadedTile) {
        match tile.kind {
            TileKind::Wall => self.wall_tile = Some(tile.pixels),
            TileKind::Barrier => self.barrier_tile = Some(tile.pixels),
        }
    }

    pub fn render(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, map: &mut GameMap) {
        let available = ui.available_size();
        map.update_size(available.x as f64, available.y as f64);

        let cell = map.cell_size() as f32;
        if cell < 1.0 {
            ui.spinner();
            return;
        }

        let canvas = egui::Vec2::new(cell * map.cols() as f32, cell * map.rows() as f32);
        let (response, painter) = ui.allocate_painter(canvas, egui::Sense::hover());

        if map.background_dirty() {
            self.background = Some(self.build_background(ctx, map));
            map.clear_background_dirty();
        }
        if let Some(texture) = &self.background {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), response.rect, uv, egui::Color32::WHITE);
        }

        for (index, snake) in map.snakes().iter().enumerate() {
            let color = parse_hex_color(map.player_color(index));
            draw_snake(&painter, response.rect.min, cell, snake, index, color);
        }
    }

    fn build_background(&self, ctx: &egui::Context, map: &GameMap) -> egui::TextureHandle {
        let cell = map.cell_size() as usize;
        let width = cell * map.cols();
        let height = cell * map.rows();
        let mut pixels = vec![0u8; width * height * 4];

        for row in 0..map.rows() {
            for col in 0..map.cols() {
                let color = if (row + col) % 2 == 0 { CELL_EVEN } else { CELL_ODD };
                fill_cell(&mut pixels, width, cell, row, col, color);
            }
        }

        let scale = |tile: &RgbaImage| {
            image::imageops::resize(
                tile,
                cell as u32,
                cell as u32,
                image::imageops::FilterType::Triangle,
            )
        };
        let wall_tile = self.wall_tile.as_ref().map(scale);
        let barrier_tile = self.barrier_tile.as_ref().map(scale);

        for wall in map.walls() {
            let (base, tile) = match wall.kind {
                WallKind::Structural => (WALL_COLOR, &wall_tile),
                WallKind::Barrier => (BARRIER_COLOR, &barrier_tile),
            };
            let (row, col) = (wall.row as usize, wall.col as usize);
            fill_cell(&mut pixels, width, cell, row, col, base);
            if let Some(tile) = tile {
                blit_tile(&mut pixels, width, cell, row, col, tile);
            }
        }

        let color_image = egui::ColorImage::from_rgba_unmultiplied([width, height], &pixels);
        ctx.load_texture("board_background", color_image, Default::default())
    }
}

fn fill_cell(pixels: &mut [u8], width: usize, cell: usize, row: usize, col: usize, color: [u8; 3]) {
    for y in 0..cell {
        for x in 0..cell {
            let offset = ((row * cell + y) * width + col * cell + x) * 4;
            pixels[offset] = color[0];
            pixels[offset + 1] = color[1];
            pixels[offset + 2] = color[2];
            pixels[offset + 3] = 0xFF;
        }
    }
}

/// Alpha-over blend of a pre-scaled tile onto one board cell.
fn blit_tile(pixels: &mut [u8], width: usize, cell: usize, row: usize, col: usize, tile: &RgbaImage) {
    for y in 0..cell {
        for x in 0..cell {
            let [r, g, b, a] = tile.get_pixel(x as u32, y as u32).0;
            if a == 0 {
                continue;
            }
            let offset = ((row * cell + y) * width + col * cell + x) * 4;
            let alpha = a as u32;
            for (i, channel) in [r, g, b].into_iter().enumerate() {
                let dst = pixels[offset + i] as u32;
                pixels[offset + i] =
                    ((channel as u32 * alpha + dst * (255 - alpha)) / 255) as u8;
            }
        }
    }
}

fn draw_snake(
    painter: &egui::Painter,
    origin: egui::Pos2,
    cell: f32,
    snake: &Snake,
    index: usize,
    alive_color: egui::Color32,
) {
    let color = if snake.is_dead() {
        DEAD_COLORS[index.min(1)]
    } else {
        alive_color
    };
    let to_screen =
        |c: &GridCell| egui::pos2(origin.x + c.x as f32 * cell, origin.y + c.y as f32 * cell);

    let body = snake.body();
    for segment in body.iter() {
        painter.circle_filled(to_screen(segment), cell * 0.4, color);
    }
    // Fill the gaps between consecutive segments with 0.8-cell-wide
    // bars so the body reads as one continuous shape mid-step.
    for i in 1..body.len() {
        let a = to_screen(&body[i - 1]);
        let b = to_screen(&body[i]);
        painter.rect_filled(connection_rect(a, b, cell), 0.0, color);
    }

    draw_eyes(painter, to_screen(&snake.head()), cell, snake.facing(), snake.is_dead());
}

fn connection_rect(a: egui::Pos2, b: egui::Pos2, cell: f32) -> egui::Rect {
    let half = cell * 0.4;
    if (a.x - b.x).abs() < (a.y - b.y).abs() {
        egui::Rect::from_min_max(
            egui::pos2(a.x - half, a.y.min(b.y)),
            egui::pos2(a.x + half, a.y.max(b.y)),
        )
    } else {
        egui::Rect::from_min_max(
            egui::pos2(a.x.min(b.x), a.y - half),
            egui::pos2(a.x.max(b.x), a.y + half),
        )
    }
}

fn eye_centers(head: egui::Pos2, cell: f32, facing: Direction) -> [egui::Pos2; 2] {
    let d = facing.index() as usize;
    [0, 1].map(|i| {
        egui::pos2(
            head.x + EYE_DX[d][i] * cell * 0.2,
            head.y + EYE_DY[d][i] * cell * 0.2,
        )
    })
}

fn draw_eyes(painter: &egui::Painter, head: egui::Pos2, cell: f32, facing: Direction, dead: bool) {
    let d = facing.index() as usize;
    let eye_size = cell * 0.15;

    for (i, center) in eye_centers(head, cell, facing).into_iter().enumerate() {
        if dead {
            let arm = eye_size * 0.7;
            let stroke = egui::Stroke::new(2.0, egui::Color32::WHITE);
            painter.line_segment(
                [
                    egui::pos2(center.x - arm, center.y - arm),
                    egui::pos2(center.x + arm, center.y + arm),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    egui::pos2(center.x - arm, center.y + arm),
                    egui::pos2(center.x + arm, center.y - arm),
                ],
                stroke,
            );
        } else {
            painter.circle_filled(center, eye_size, egui::Color32::WHITE);

            let pupil_size = eye_size * 0.6;
            let pupil = egui::pos2(
                center.x + EYE_DX[d][i] * eye_size * 0.2,
                center.y + EYE_DY[d][i] * eye_size * 0.2,
            );
            painter.circle_filled(pupil, pupil_size, egui::Color32::BLACK);

            let highlight = egui::pos2(pupil.x - pupil_size * 0.3, pupil.y - pupil_size * 0.3);
            painter.circle_filled(highlight, pupil_size * 0.2, egui::Color32::WHITE);
        }
    }
}

pub fn parse_hex_color(hex: &str) -> egui::Color32 {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return egui::Color32::GRAY;
    }
    match u32::from_str_radix(digits, 16) {
        Ok(value) => egui::Color32::from_rgb(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ),
        Err(_) => egui::Color32::GRAY,
    }
}
