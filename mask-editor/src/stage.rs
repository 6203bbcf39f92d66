/// Stage: draws the canvases and frames and feeds pointer input to the editor
///
/// Canvas coordinates are points relative to the stage's top-left corner.

use eframe::egui;
use kurbo::{Point, Rect};
use mask_editor_core::canvas::Canvas;
use mask_editor_core::editor::Editor;
use mask_editor_core::file_io::ProjectStorage;
use mask_editor_core::hit_test::HitTarget;
use mask_editor_core::mask_frame::MaskFrame;
use mask_editor_core::mode::RenderMode;
use mask_editor_core::tool::Corner;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 24, 24);
const CANVAS_FILL: egui::Color32 = egui::Color32::from_rgb(36, 36, 40);
const GRID: egui::Color32 = egui::Color32::from_gray(60);
const FRAME: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);
const FRAME_ACTIVE: egui::Color32 = egui::Color32::from_rgb(255, 200, 80);
const MASK_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(40, 70, 110, 90);
const POINT: egui::Color32 = egui::Color32::from_gray(230);
const CURSOR: egui::Color32 = egui::Color32::from_rgb(255, 90, 90);

pub struct StagePane {
    origin: egui::Pos2,
}

impl Default for StagePane {
    fn default() -> Self {
        Self { origin: egui::Pos2::ZERO }
    }
}

impl StagePane {
    pub fn render<S: ProjectStorage>(&mut self, ui: &mut egui::Ui, editor: &mut Editor<S>) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        self.origin = rect.min;

        self.handle_input(ui, &response, editor);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);
        self.draw_layout(&painter, editor);
        self.draw_status(&painter, rect, editor);
    }

    fn handle_input<S: ProjectStorage>(
        &self,
        ui: &egui::Ui,
        response: &egui::Response,
        editor: &mut Editor<S>,
    ) {
        let (pressed, down, released, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });

        if let Some(pos) = pos {
            let local = pos - self.origin;
            editor.set_mouse_position(local.x as f64, local.y as f64);
        }
        editor.update();

        if pressed && response.hovered() {
            editor.pointer_down();
        } else if down && editor.is_transforming() {
            editor.pointer_drag();
        }
        if released {
            editor.pointer_release();
        }
    }

    fn draw_layout<S: ProjectStorage>(&self, painter: &egui::Painter, editor: &Editor<S>) {
        let layout = editor.layout();
        let (design, live) = (&layout.design_canvas, &layout.live_canvas);
        let mode = editor.mode();
        let highlight = editor.store().highlight();

        if mode != RenderMode::Live {
            self.draw_canvas(painter, design, true);
        }
        self.draw_canvas(painter, live, mode.shows_live_canvas());

        for frame in layout.frames() {
            let target = highlight
                .filter(|h| h.frame_id == frame.id)
                .map(|h| h.target);

            if mode != RenderMode::Live {
                self.draw_frame(painter, frame, target, editor);
            }

            // Live mirror: filled mask only, no handles
            let live_rect = frame.live_rect(design, live);
            let live_points = frame
                .live_mask_points(design, live)
                .into_iter()
                .map(|p| self.to_screen(p))
                .collect();
            self.draw_mask(painter, live_points, mode != RenderMode::Design);
            if mode == RenderMode::Design {
                painter.rect_stroke(
                    self.to_screen_rect(live_rect),
                    0.0,
                    egui::Stroke::new(1.0, FRAME.gamma_multiply(0.5)),
                    egui::StrokeKind::Middle,
                );
            }
        }

        if let Some(cursor) = editor.live_cursor() {
            let c = self.to_screen(cursor);
            let stroke = egui::Stroke::new(1.0, CURSOR);
            painter.line_segment([c - egui::vec2(8.0, 0.0), c + egui::vec2(8.0, 0.0)], stroke);
            painter.line_segment([c - egui::vec2(0.0, 8.0), c + egui::vec2(0.0, 8.0)], stroke);
        }
    }

    fn draw_canvas(&self, painter: &egui::Painter, canvas: &Canvas, with_grid: bool) {
        let rect = self.to_screen_rect(canvas.rect());
        painter.rect_filled(rect, 0.0, CANVAS_FILL);
        if with_grid {
            let stroke = egui::Stroke::new(1.0, GRID);
            for x in canvas.grid_xs() {
                let x = self.origin.x + x as f32;
                painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
            }
            for y in canvas.grid_ys() {
                let y = self.origin.y + y as f32;
                painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
            }
        }
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, GRID), egui::StrokeKind::Middle);
    }

    fn draw_frame<S: ProjectStorage>(
        &self,
        painter: &egui::Painter,
        frame: &MaskFrame,
        target: Option<HitTarget>,
        editor: &Editor<S>,
    ) {
        let handles = editor.store().handle_sizes();
        let active = frame.transform_state().is_active();
        let color = if active || target.is_some() { FRAME_ACTIVE } else { FRAME };

        let points: Vec<egui::Pos2> = frame
            .mask_points()
            .iter()
            .map(|p| self.to_screen(p.position()))
            .collect();
        self.draw_mask(painter, points.clone(), false);

        painter.rect_stroke(
            self.to_screen_rect(frame.rect()),
            0.0,
            egui::Stroke::new(if active { 2.0 } else { 1.0 }, color),
            egui::StrokeKind::Middle,
        );

        let half = (handles.corner / 2.0) as f32;
        for &corner in Corner::all() {
            let c = self.to_screen(frame.corner_position(corner));
            let handle = egui::Rect::from_center_size(c, egui::vec2(half * 2.0, half * 2.0));
            if target == Some(HitTarget::Corner(corner)) {
                painter.rect_filled(handle, 0.0, FRAME_ACTIVE);
            } else {
                painter.rect_stroke(handle, 0.0, egui::Stroke::new(1.0, color), egui::StrokeKind::Middle);
            }
        }

        let radius = handles.mask_point_radius as f32;
        for (index, p) in points.iter().enumerate() {
            if target == Some(HitTarget::MaskPoint(index)) {
                painter.circle_filled(*p, radius, FRAME_ACTIVE);
            } else {
                painter.circle_stroke(*p, radius, egui::Stroke::new(1.0, POINT));
            }
        }
    }

    /// Mask polygon through screen-space `points`
    fn draw_mask(&self, painter: &egui::Painter, points: Vec<egui::Pos2>, filled: bool) {
        if points.len() < 2 {
            return;
        }
        let stroke = egui::Stroke::new(1.0, POINT);
        if filled && points.len() >= 3 {
            painter.add(egui::Shape::convex_polygon(points, MASK_FILL, stroke));
        } else {
            painter.add(egui::Shape::closed_line(points, stroke));
        }
    }

    fn draw_status<S: ProjectStorage>(&self, painter: &egui::Painter, rect: egui::Rect, editor: &Editor<S>) {
        let color = if editor.last_error().is_some() {
            CURSOR
        } else {
            egui::Color32::from_gray(200)
        };
        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            editor.status(),
            egui::FontId::proportional(13.0),
            color,
        );
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32)
    }

    fn to_screen_rect(&self, r: Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(Point::new(r.x0, r.y0)),
            self.to_screen(Point::new(r.x1, r.y1)),
        )
    }
}
