use clap::Parser;
use eframe::egui;
use mask_editor_core::command::Command;
use mask_editor_core::editor::Editor;
use mask_editor_core::file_io::JsonFileStorage;
use mask_editor_core::presets::Presets;
use std::path::PathBuf;

mod config;
use config::AppConfig;

mod keymap;

mod stage;
use stage::StagePane;

/// Mask Editor - place and shape projection mask frames
#[derive(Parser, Debug)]
#[command(name = "Mask Editor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project file to open (created on first save)
    #[arg(long)]
    project: Option<PathBuf>,

    /// JSON presets file overriding the built-in layout constants
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = AppConfig::load();

    let presets_path = args.presets.or_else(|| config.presets_path.clone());
    let presets = match &presets_path {
        Some(path) => match Presets::from_file(path) {
            Ok(presets) => {
                log::info!("Loaded presets from {}", path.display());
                presets
            }
            Err(e) => {
                log::warn!("Failed to load presets from {}: {}", path.display(), e);
                Presets::default()
            }
        },
        None => Presets::default(),
    };

    let project_path = args
        .project
        .or_else(|| config.last_project.clone())
        .unwrap_or_else(AppConfig::default_project_path);
    config.remember(&project_path, presets_path.as_deref());

    let fullscreen = args.fullscreen || presets.start_fullscreen;
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([presets.window_width as f32, presets.window_height as f32])
        .with_fullscreen(fullscreen)
        .with_title("Mask Editor")
        .with_app_id("mask-editor");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    log::info!("Starting Mask Editor with project {}", project_path.display());
    eframe::run_native(
        "Mask Editor",
        options,
        Box::new(move |_cc| Ok(Box::new(MaskEditorApp::new(presets, project_path, fullscreen)))),
    )
}

struct MaskEditorApp {
    editor: Editor<JsonFileStorage>,
    stage: StagePane,
    fullscreen: bool,
}

impl MaskEditorApp {
    fn new(presets: Presets, project_path: PathBuf, fullscreen: bool) -> Self {
        let has_project = project_path.exists()
            || JsonFileStorage::new(&project_path).autosave_path().exists();
        let mut editor = Editor::new(presets, JsonFileStorage::new(project_path));
        if has_project {
            editor.load_objects();
        }
        Self {
            editor,
            stage: StagePane::default(),
            fullscreen,
        }
    }

    fn handle_command(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
            }
            other => self.editor.respond_to_command(other),
        }
    }
}

impl eframe::App for MaskEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let commands = ctx.input(keymap::commands_from_input);
        for command in commands {
            self.handle_command(ctx, command);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.stage.render(ui, &mut self.editor);
            });

        // Keep polling while a deferred autosave or drag is pending
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.editor.flush_autosave();
    }
}
