pub mod catalog;
pub mod config;
pub mod error;
pub mod render_loop;
pub mod texture_cache;

use std::collections::VecDeque;

use stride_media::{GstFrameSource, MediaLayout};
use stride_state::{Event, PlaybackSession, Side};
use stride_ui::notices::RawListing;
use stride_ui::{PoseBadge, SlotPresentation, StatsSummary, UiAction};
use tracing::{debug, info};

use crate::catalog::VideoCatalog;
use crate::config::AppConfig;
use crate::render_loop::{CycleOutput, RenderLoop, SlotOutput};
use crate::texture_cache::TextureCache;

pub struct ComparisonApp {
    config: AppConfig,
    session: Option<PlaybackSession>,
    catalog: VideoCatalog,
    render: RenderLoop<GstFrameSource>,
    textures: TextureCache,
    pending: VecDeque<Event>,
    raw_listing: Option<RawListing>,
}

impl ComparisonApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        stride_ui::theme::apply_theme(&cc.egui_ctx);
        let layout = config.layout();
        info!(data_dir = %layout.root().display(), "starting comparison viewer");
        Self {
            session: None,
            catalog: VideoCatalog::open(layout.clone()),
            render: RenderLoop::new(GstFrameSource::new(), layout, config.display_height),
            textures: TextureCache::default(),
            pending: VecDeque::new(),
            raw_listing: None,
            config,
        }
    }

    fn ensure_session(&mut self) {
        if self.session.is_some() {
            return;
        }
        if let Some((left, right)) = self.catalog.default_pair() {
            info!(%left, %right, "initial comparison");
            self.session = Some(
                PlaybackSession::new(left, right)
                    .with_speed(self.config.default_speed)
                    .with_step_frames(self.config.step_frames),
            );
        }
    }

    fn open_data_dir(&mut self, layout: MediaLayout) {
        info!(data_dir = %layout.root().display(), "switching data directory");
        self.catalog.set_layout(layout.clone());
        self.render.set_layout(layout);
        self.session = None;
        self.pending.clear();
        self.raw_listing = None;
        for side in Side::ALL {
            self.textures.clear_slot(side);
        }
    }

    fn handle_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            match action {
                UiAction::Playback(event) => {
                    debug!(?event, "queued");
                    self.pending.push_back(event);
                }
                UiAction::OpenDataDir(dir) => self.open_data_dir(MediaLayout::new(dir)),
                UiAction::CheckRawVideos => {
                    self.raw_listing = Some(match self.catalog.layout().raw_video_names() {
                        Some(names) => RawListing::Found(names),
                        None => RawListing::DirectoryMissing,
                    });
                }
            }
        }
    }

    fn presentation(&self, output: &SlotOutput, video_id: &str) -> SlotPresentation {
        SlotPresentation {
            display_name: self.catalog.display_name(video_id),
            frame_error: output.frame.as_ref().err().map(|e| e.to_string()),
            pose: output.pose.map(|p| PoseBadge {
                detected: p.has_pose,
                confidence: p.confidence,
            }),
            stats: output.stats.map(|s| StatsSummary {
                detection_rate: s.detection_rate,
                mean_confidence: s.mean_confidence,
                total_frames: s.total_frames,
            }),
        }
    }

    fn show_comparison(
        &self,
        ctx: &egui::Context,
        output: &CycleOutput,
        actions: &mut Vec<UiAction>,
    ) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let views = Side::ALL
            .map(|side| self.presentation(output.slot(side), &session.slot(side).video_id));

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(stride_ui::constants::SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    stride_ui::sidebar::sidebar_panel(
                        ui,
                        session,
                        self.catalog.entries(),
                        actions,
                    );
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                stride_ui::header::header_panel(ui);

                ui.columns(2, |cols| {
                    for (i, side) in Side::ALL.into_iter().enumerate() {
                        stride_ui::slot_panel::info_card(
                            &mut cols[i],
                            session.slot(side),
                            &views[i],
                        );
                    }
                });

                let missing: Vec<&str> = Side::ALL
                    .into_iter()
                    .filter(|side| output.slot(*side).path.is_none())
                    .map(|side| session.slot(side).video_id.as_str())
                    .collect();
                if !missing.is_empty() {
                    stride_ui::notices::missing_videos(ui, &missing);
                }

                ui.add_space(8.0);
                ui.columns(2, |cols| {
                    for (i, side) in Side::ALL.into_iter().enumerate() {
                        stride_ui::slot_panel::slot_panel(
                            &mut cols[i],
                            side,
                            session,
                            &views[i],
                            &self.textures,
                            actions,
                        );
                    }
                });

                ui.add_space(8.0);
                stride_ui::stats::stats_panel(ui, &views[0], &views[1]);
            });
        });
    }

    fn show_empty(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(stride_ui::constants::SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                ui.label(stride_ui::theme::heading("Data"));
                if ui.button("Open data folder…").clicked() {
                    if let Some(dir) = stride_ui::sidebar::pick_data_folder() {
                        actions.push(UiAction::OpenDataDir(dir));
                    }
                }
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            stride_ui::header::header_panel(ui);
            stride_ui::notices::no_processed_videos(ui, self.raw_listing.as_ref(), actions);
        });
    }
}

impl eframe::App for ComparisonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        if self.catalog.poll_changes() {
            self.render.invalidate();
        }
        if self.catalog.is_empty() {
            self.session = None;
        }
        self.ensure_session();

        let mut actions = Vec::new();
        let needs_refresh = match self.session.as_mut() {
            Some(session) => {
                let event = self.pending.pop_front();
                let output = self.render.cycle(session, event, now);
                for side in Side::ALL {
                    match &output.slot(side).frame {
                        Ok(frame) => self.textures.update_slot(ctx, side, frame),
                        Err(_) => self.textures.clear_slot(side),
                    }
                }
                self.show_comparison(ctx, &output, &mut actions);
                output.needs_refresh
            }
            None => {
                self.pending.clear();
                self.show_empty(ctx, &mut actions);
                false
            }
        };

        self.handle_actions(actions);

        if !self.pending.is_empty() {
            ctx.request_repaint();
        } else if needs_refresh {
            ctx.request_repaint_after(self.config.refresh_interval());
        }
    }
}
