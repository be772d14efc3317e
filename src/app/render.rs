use eframe::egui;
use shapescape::Editor;
use shapescape::geometry::{Point, Rect};

const SELECT_BLUE: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);

fn stroke(color: egui::Color32) -> egui::Stroke {
    egui::Stroke::new(1.0, color)
}

/// Screen rect for a box given in model coordinates.
fn model_rect_to_screen(editor: &Editor, rect: Rect) -> egui::Rect {
    let corners = editor.model_to_screen(&[rect.min, rect.max]);
    Rect::from_min_max(corners[0], corners[1]).to_rect()
}

pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, editor: &Editor, show_grid: bool) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    if !show_grid {
        return;
    }
    let spacing_screen = (editor.grid_size() * editor.space().scale()) as f32;
    if spacing_screen < 6.0 {
        return;
    }
    let grid_color = egui::Color32::from_gray(60);
    let start = editor.space().world_to_view(&[Point::ZERO])[0].to_pos2();
    let x0 = ((rect.min.x - start.x) / spacing_screen).floor() * spacing_screen + start.x;
    let y0 = ((rect.min.y - start.y) / spacing_screen).floor() * spacing_screen + start.y;
    let mut x = x0;
    while x < rect.max.x {
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            stroke(grid_color),
        );
        x += spacing_screen;
    }
    let mut y = y0;
    while y < rect.max.y {
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            stroke(grid_color),
        );
        y += spacing_screen;
    }
}

/// Polyline through the vertices in model order, with a grab box on each.
pub(super) fn draw_shape(painter: &egui::Painter, editor: &Editor) {
    let text_color = painter.ctx().style().visuals.text_color();
    let positions: Vec<Point> = editor
        .model()
        .vertices()
        .map(|(_, v)| v.position())
        .collect();
    let screen: Vec<egui::Pos2> = editor
        .model_to_screen(&positions)
        .into_iter()
        .map(Point::to_pos2)
        .collect();
    for pair in screen.windows(2) {
        painter.line_segment([pair[0], pair[1]], stroke(text_color));
    }

    for (id, vertex) in editor.model().vertices() {
        let r = model_rect_to_screen(editor, vertex.grab_box());
        if editor.is_selected(id) {
            painter.rect_filled(r, 0.0, SELECT_BLUE);
        } else {
            painter.rect_stroke(r, 0.0, stroke(text_color), egui::StrokeKind::Middle);
        }
    }
}

pub(super) fn draw_bounds(painter: &egui::Painter, editor: &Editor) {
    if editor.model().is_empty() {
        return;
    }
    // bounds are kept after the model transform, so only the view applies
    let bounds = editor.model().bounds();
    let corners = editor.space().world_to_view(&[bounds.min, bounds.max]);
    let r = Rect::from_min_max(corners[0], corners[1]).to_rect();
    painter.rect_stroke(
        r,
        0.0,
        stroke(egui::Color32::from_rgb(220, 120, 60)),
        egui::StrokeKind::Middle,
    );
}

pub(super) fn draw_selection_box(painter: &egui::Painter, editor: &Editor) {
    if let Some(selection) = editor.selection_box() {
        let r = model_rect_to_screen(editor, selection);
        painter.rect_filled(r, 0.0, SELECT_BLUE.gamma_multiply(0.15));
        painter.rect_stroke(r, 0.0, stroke(SELECT_BLUE), egui::StrokeKind::Middle);
    }
}
