use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use lifecycle_atlas::content::{ContentStore, load_store};
use lifecycle_atlas::layout::{LayoutConfig, LayoutOutput};
use lifecycle_atlas::state::UiState;
use lifecycle_atlas::workflow::WorkflowCursor;

mod graph;
mod highlight;
mod render_utils;
mod ui;

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub data_path: Option<PathBuf>,
    pub expand_all: bool,
}

pub struct AtlasApp {
    load_options: LoadOptions,
    layout_config: LayoutConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<ContentStore, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<ContentStore, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    store: ContentStore,
    layout_config: LayoutConfig,
    ui_state: UiState,
    jump_query: String,
    pan: Vec2,
    zoom: f32,
    fit_requested: bool,
    focus_request: Option<String>,
    layout_cache: Option<LayoutCache>,
    workflow_open: bool,
    workflow_cursor: WorkflowCursor,
}

struct LayoutCache {
    revision: u64,
    output: LayoutOutput,
    index_by_id: HashMap<String, usize>,
}

impl AtlasApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        load_options: LoadOptions,
        layout_config: LayoutConfig,
    ) -> Self {
        let state = Self::start_load(load_options.data_path.clone());
        Self {
            load_options,
            layout_config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: Option<PathBuf>) -> Receiver<Result<ContentStore, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_store(data_path.as_deref()).map_err(|error| {
                tracing::error!("failed to load lifecycle content: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: Option<PathBuf>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }

    fn ready(&self, store: ContentStore) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(
            store,
            self.layout_config.clone(),
            self.load_options.expand_all,
        )))
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(store)) => transition = Some(Ok(store)),
                    Ok(Err(error)) => transition = Some(Err(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading lifecycle content...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load lifecycle content");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(self.load_options.data_path.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.load_options.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(store) => self.ready(store),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
