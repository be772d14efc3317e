use eframe::egui;
use shapescape::geometry::Point;
use shapescape::settings::{self, Settings};
use shapescape::{Change, Editor};
use std::path::{Path, PathBuf};

mod render;
mod update;

const FILE_FILTER: (&str, &[&str]) = ("Custom Vector Graphics", &["cvg"]);

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScaleDialog {
    width: f64,
    height: f64,
}

pub struct EditorApp {
    editor: Editor,
    settings: Settings,
    settings_path: PathBuf,
    status: Option<String>,
    scale_dialog: Option<ScaleDialog>,
    /// Model-space position under the pointer, for the status bar.
    cursor: Option<Point>,
    /// View zoom as a percentage, refreshed with `cursor`.
    zoom_percent: f64,
}

impl EditorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path =
            settings::config_path().unwrap_or_else(|| PathBuf::from("settings.toml"));
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings(Path::new("settings.json")))
            .unwrap_or_default();
        tracing::info!(path = %settings_path.display(), "settings");

        Self {
            editor: Editor::new(&settings),
            settings,
            settings_path,
            status: None,
            scale_dialog: None,
            cursor: None,
            zoom_percent: 100.0,
        }
    }

    fn repaint(ctx: &egui::Context, change: Change) {
        if change.needs_redraw() {
            ctx.request_repaint();
        }
    }

    fn new_scene(&mut self) -> Change {
        self.settings.file_path = None;
        self.status = Some("New scene".to_string());
        self.editor.new_scene()
    }

    fn undo(&mut self) -> Change {
        let change = self.editor.undo_last();
        if !change.needs_redraw() {
            self.status = Some("Nothing to undo".to_string());
        }
        change
    }

    fn save(&mut self) {
        match self.settings.file_path.clone() {
            Some(path) => self.save_to(PathBuf::from(path)),
            None => self.save_as_dialog(),
        }
    }

    fn save_as_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("shape.cvg")
            .add_filter(FILE_FILTER.0, FILE_FILTER.1)
            .save_file()
        {
            self.save_to(path);
        }
    }

    fn save_to(&mut self, path: PathBuf) {
        let path_str = path.display().to_string();
        match self.editor.save_to_path(&path) {
            Ok(()) => {
                self.settings.file_path = Some(path_str.clone());
                self.status = Some(format!("Saved {path_str}"));
                self.persist_settings();
            }
            Err(e) => {
                tracing::warn!(path = %path_str, error = %e, "save failed");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    fn open_dialog(&mut self) -> Change {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(FILE_FILTER.0, FILE_FILTER.1)
            .pick_file()
        else {
            return Change::None;
        };
        let path_str = path.display().to_string();
        match self.editor.load_from_path(&path) {
            Ok(change) => {
                self.settings.file_path = Some(path_str.clone());
                self.status = Some(format!(
                    "Loaded {} vertices from {path_str}",
                    self.editor.model().len()
                ));
                self.persist_settings();
                change
            }
            Err(e) => {
                self.status = Some(format!("Open failed: {e}"));
                Change::None
            }
        }
    }

    fn open_scale_dialog(&mut self) {
        let bounds = self.editor.model().bounds();
        self.scale_dialog = Some(ScaleDialog {
            width: bounds.width(),
            height: bounds.height(),
        });
    }

    fn apply_scale(&mut self, dialog: ScaleDialog) -> Change {
        match self.editor.scale_to(dialog.width, dialog.height) {
            Ok(change) => {
                self.status = Some(format!("Scaled to {} x {}", dialog.width, dialog.height));
                change
            }
            Err(e) => {
                tracing::warn!(error = %e, "scale rejected");
                self.status = Some(format!("Scale failed: {e}"));
                Change::None
            }
        }
    }

    fn delete_selected(&mut self) -> Change {
        let count = self.editor.selected_vertices().len();
        let change = self.editor.delete_selected();
        if change.needs_redraw() {
            self.status = Some(format!("Deleted {count} vertices"));
        }
        change
    }

    fn persist_settings(&mut self) {
        self.settings.snap_to_grid = self.editor.snap_to_grid();
        self.settings.grid_size = self.editor.grid_size();
        if let Err(e) = settings::save_settings(&self.settings_path, &self.settings) {
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }
}
