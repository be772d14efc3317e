use eframe::egui;
use shapescape::geometry::{Affine, Point};
use shapescape::{Change, PointerButton};

use super::render::{draw_background, draw_bounds, draw_selection_box, draw_shape};
use super::EditorApp;

const BUTTONS: [(egui::PointerButton, PointerButton); 3] = [
    (egui::PointerButton::Primary, PointerButton::Primary),
    (egui::PointerButton::Middle, PointerButton::Middle),
    (egui::PointerButton::Secondary, PointerButton::Secondary),
];

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut change = Change::None;
        let wants_keyboard = ctx.wants_keyboard_input();

        if ctx.input(|i| !i.focused) {
            change = change.merge(self.editor.cancel_gesture());
        }

        let (undo, delete) = ctx.input_mut(|i| {
            if wants_keyboard {
                return (false, false);
            }
            (
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z),
                i.consume_key(egui::Modifiers::NONE, egui::Key::Delete),
            )
        });
        if undo {
            change = change.merge(self.undo());
        }
        if delete {
            change = change.merge(self.delete_selected());
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New").clicked() {
                        change = change.merge(self.new_scene());
                        ui.close_menu();
                    }
                    if ui.button("Save (⌘S)").clicked() {
                        self.save();
                        ui.close_menu();
                    }
                    if ui.button("Save As...").clicked() {
                        self.save_as_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Open...").clicked() {
                        change = change.merge(self.open_dialog());
                        ui.close_menu();
                    }
                });
                ui.menu_button("Edit", |ui| {
                    if ui.button("Scale...").clicked() {
                        self.open_scale_dialog();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.editor.queue().can_undo(), egui::Button::new("Undo (⌘Z)"))
                        .clicked()
                    {
                        change = change.merge(self.undo());
                        ui.close_menu();
                    }
                    if ui.button("Delete (Del)").clicked() {
                        change = change.merge(self.delete_selected());
                        ui.close_menu();
                    }
                    if ui.button("Move to Origin").clicked() {
                        change = change.merge(self.editor.move_to_origin());
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.settings.show_grid, "Show Grid").changed() {
                        change = change.merge(Change::View);
                        self.persist_settings();
                    }
                    if ui
                        .checkbox(&mut self.settings.show_bounds, "Show Bounding Box")
                        .changed()
                    {
                        change = change.merge(Change::View);
                        self.persist_settings();
                    }
                    let mut snap = self.editor.snap_to_grid();
                    if ui.checkbox(&mut snap, "Snap to Grid").changed() {
                        self.editor.set_snap_to_grid(snap);
                        self.persist_settings();
                    }
                    ui.horizontal(|ui| {
                        ui.label("Grid size:");
                        let mut grid = self.editor.grid_size();
                        if ui
                            .add(egui::DragValue::new(&mut grid).range(4.0..=256.0).speed(1.0))
                            .changed()
                        {
                            self.editor.set_grid_size(grid);
                            change = change.merge(Change::View);
                            self.persist_settings();
                        }
                    });
                    ui.separator();
                    if ui.button("Reset View").clicked() {
                        change = change.merge(self.editor.reset_view());
                        ui.close_menu();
                    }
                });
            });
        });

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::S)) {
            self.save();
        }

        if let Some(mut dialog) = self.scale_dialog {
            let mut open = true;
            let mut apply = false;
            egui::Window::new("Scale")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Target bounding box");
                    ui.horizontal(|ui| {
                        ui.label("Width:");
                        ui.add(egui::DragValue::new(&mut dialog.width).speed(1.0));
                        ui.label("Height:");
                        ui.add(egui::DragValue::new(&mut dialog.height).speed(1.0));
                    });
                    apply = ui.button("Apply").clicked();
                });
            self.scale_dialog = (open && !apply).then_some(dialog);
            if apply {
                change = change.merge(self.apply_scale(dialog));
            }
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Zoom: {:.0}%", self.zoom_percent));
                    ui.separator();
                    ui.label(format!("Vertices: {}", self.editor.model().len()));
                    ui.separator();
                    ui.label(format!("Selected: {}", self.editor.selected_vertices().len()));
                    if let Some(cursor) = self.cursor {
                        ui.separator();
                        ui.label(format!("x: {:.1}  y: {:.1}", cursor.x, cursor.y));
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            if let Err(e) = self
                .editor
                .set_world(Affine::translation(f64::from(rect.min.x), f64::from(rect.min.y)))
            {
                self.status = Some(format!("View error: {e}"));
            }

            let snap = ctx.input(|i| i.modifiers.ctrl);
            let pointer = ctx.input(|i| i.pointer.interact_pos()).map(Point::from_pos2);
            self.cursor = pointer.and_then(|p| self.editor.cursor_at(p, snap).ok());
            self.zoom_percent = self.editor.space().scale() * 100.0;
            if self.editor.is_panning() {
                ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            }

            let scroll_delta = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.0 {
                if let Some(hover_pos) = ctx.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(hover_pos) {
                        let factor = f64::from((1.0 + scroll_delta * 0.001).clamp(0.8, 1.25));
                        let result = self.editor.zoom_at(factor, Point::from_pos2(hover_pos));
                        change = change.merge(self.handle(result));
                    }
                }
            }

            for (egui_button, button) in BUTTONS {
                if response.drag_started_by(egui_button) {
                    let origin = ctx
                        .input(|i| i.pointer.press_origin())
                        .map(Point::from_pos2)
                        .or(pointer);
                    if let Some(p) = origin {
                        let result = self.editor.pointer_pressed(button, p, snap);
                        change = change.merge(self.handle(result));
                    }
                }
                if response.dragged_by(egui_button) {
                    if let Some(p) = pointer {
                        let result = self.editor.pointer_moved(p, snap);
                        change = change.merge(self.handle(result));
                    }
                }
                if response.drag_stopped_by(egui_button) {
                    if let Some(p) = pointer {
                        let result = self.editor.pointer_released(button, p, snap);
                        change = change.merge(self.handle(result));
                    }
                }
                if response.clicked_by(egui_button) {
                    if let Some(p) = pointer {
                        let result = self.editor.pointer_clicked(button, p, snap);
                        change = change.merge(self.handle(result));
                    }
                }
            }

            let painter = ui.painter_at(rect);
            draw_background(&painter, rect, &self.editor, self.settings.show_grid);
            if self.settings.show_bounds {
                draw_bounds(&painter, &self.editor);
            }
            draw_shape(&painter, &self.editor);
            draw_selection_box(&painter, &self.editor);
        });

        Self::repaint(ctx, change);
    }
}

impl EditorApp {
    /// Rejected view or gesture updates leave the editor as it was; report
    /// them and carry on.
    fn handle(&mut self, result: shapescape::EditorResult<Change>) -> Change {
        match result {
            Ok(change) => change,
            Err(e) => {
                self.status = Some(e.to_string());
                Change::None
            }
        }
    }
}
