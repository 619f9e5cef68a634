use std::time::Instant;

use common::game::map::{GameMap, MatchSetup};
use common::game::scheduler::StepScheduler;
use common::game::types::{Direction, MatchOutcome, SnakeStatus};
use common::replay::{MatchRecord, PlaybackState, ReplayController};
use eframe::egui;
use ringbuffer::{AllocRingBuffer, RingBuffer};
use tokio::sync::mpsc;

use crate::board::BoardRenderer;
use crate::config::ClientConfig;
use crate::tiles::TileLoader;

const EVENT_LOG_CAPACITY: usize = 64;

/// Key bindings for live matches: WASD drives the blue snake, arrow
/// keys the red one.
const KEY_BINDINGS: [(egui::Key, usize, Direction); 8] = [
    (egui::Key::W, 0, Direction::Up),
    (egui::Key::D, 0, Direction::Right),
    (egui::Key::S, 0, Direction::Down),
    (egui::Key::A, 0, Direction::Left),
    (egui::Key::ArrowUp, 1, Direction::Up),
    (egui::Key::ArrowRight, 1, Direction::Right),
    (egui::Key::ArrowDown, 1, Direction::Down),
    (egui::Key::ArrowLeft, 1, Direction::Left),
];

enum MatchMode {
    Live {
        scheduler: StepScheduler,
        command_tx: mpsc::UnboundedSender<(usize, Direction)>,
        command_rx: mpsc::UnboundedReceiver<(usize, Direction)>,
    },
    Replay {
        controller: ReplayController,
    },
}

pub struct DuelApp {
    map: GameMap,
    mode: MatchMode,
    board: BoardRenderer,
    tiles: TileLoader,
    events: AllocRingBuffer<String>,
    last_frame: Option<Instant>,
    outcome_banner: Option<MatchOutcome>,
}

impl DuelApp {
    pub fn new_live(config: &ClientConfig) -> Result<Self, String> {
        let map = GameMap::new(&MatchSetup::demo())?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let mut app = Self::with_map(
            map,
            MatchMode::Live {
                scheduler: StepScheduler::new(),
                command_tx,
                command_rx,
            },
            config,
        );
        app.push_event("Live match started".to_string());
        Ok(app)
    }

    pub fn new_replay(record: &MatchRecord, config: &ClientConfig) -> Result<Self, String> {
        let setup = record.to_setup()?;
        let map = GameMap::new(&setup)?;

        let mut controller = ReplayController::new();
        controller
            .start(&record.a_steps, &record.b_steps, record.outcome)
            .map_err(|e| e.to_string())?;

        let mut app = Self::with_map(map, MatchMode::Replay { controller }, config);
        app.push_event("Replay started".to_string());
        Ok(app)
    }

    fn with_map(map: GameMap, mode: MatchMode, config: &ClientConfig) -> Self {
        Self {
            map,
            mode,
            board: BoardRenderer::new(),
            tiles: TileLoader::spawn(config.wall_tile.clone(), config.barrier_tile.clone()),
            events: AllocRingBuffer::new(EVENT_LOG_CAPACITY),
            last_frame: None,
            outcome_banner: None,
        }
    }

    fn push_event(&mut self, message: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.events.enqueue(format!("[{}] {}", timestamp, message));
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let MatchMode::Live { command_tx, .. } = &self.mode else {
            return;
        };
        ctx.input(|i| {
            for (key, player, direction) in KEY_BINDINGS {
                if i.key_pressed(key) {
                    let _ = command_tx.send((player, direction));
                }
            }
        });
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("match_panel").show(ctx, |ui| {
            ui.heading("Grid Duel");
            ui.separator();

            match &mut self.mode {
                MatchMode::Live { .. } => {
                    ui.label("Live match");
                    ui.label("Blue: WASD");
                    ui.label("Red: arrow keys");
                }
                MatchMode::Replay { controller } => {
                    ui.label(format!(
                        "Replay step {} / {}",
                        controller.step_index(),
                        controller.total_steps()
                    ));
                    match controller.state() {
                        PlaybackState::Playing => {
                            if ui.button("Pause").clicked() {
                                controller.pause(&self.map);
                            }
                        }
                        PlaybackState::Paused => {
                            if ui.button("Resume").clicked() {
                                controller.resume(&mut self.map);
                            }
                        }
                        PlaybackState::Finished => {
                            ui.label("Finished");
                        }
                        PlaybackState::Stopped => {
                            ui.label("Stopped");
                        }
                    }
                }
            }

            ui.separator();
            for (index, snake) in self.map.snakes().iter().enumerate() {
                let name = if index == 0 { "Blue" } else { "Red" };
                let status = match snake.status() {
                    SnakeStatus::Idle => "idle",
                    SnakeStatus::Moving => "moving",
                    SnakeStatus::Dead => "dead",
                };
                ui.label(format!(
                    "{}: step {}, {} cells, {}",
                    name,
                    snake.step(),
                    snake.body().len(),
                    status
                ));
            }

            ui.separator();
            ui.heading("Events");
            for message in self.events.iter() {
                ui.label(message);
            }
        });
    }

    fn shutdown(&mut self) {
        match &mut self.mode {
            MatchMode::Live { scheduler, .. } => scheduler.stop(),
            MatchMode::Replay { controller } => controller.stop(),
        }
        self.map.destroy();
    }
}

impl eframe::App for DuelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let delta_ms = match self.last_frame {
            Some(previous) => (now - previous).as_secs_f64() * 1000.0,
            None => 0.0,
        };
        self.last_frame = Some(now);

        while let Some(tile) = self.tiles.try_next() {
            self.board.set_tile(tile);
            self.map.mark_background_dirty();
        }

        self.handle_input(ctx);

        let mut finished_outcome = None;
        match &mut self.mode {
            MatchMode::Live {
                scheduler,
                command_rx,
                ..
            } => {
                while let Ok((player, direction)) = command_rx.try_recv() {
                    self.map.snake_mut(player.min(1)).enqueue_direction(direction);
                }
                scheduler.tick(&mut self.map, delta_ms);
            }
            MatchMode::Replay { controller } => {
                controller.tick(&mut self.map, delta_ms);
                if controller.take_finished() {
                    finished_outcome = Some(controller.outcome());
                }
            }
        }
        self.map.tick(delta_ms);

        if let Some(outcome) = finished_outcome {
            self.outcome_banner = Some(outcome);
            self.push_event(format!("Replay finished: {}", outcome_text(outcome)));
        }

        self.side_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(outcome) = self.outcome_banner {
                ui.heading(outcome_text(outcome));
            }
            self.board.render(ui, ctx, &mut self.map);
        });

        ctx.request_repaint();
    }
}

impl Drop for DuelApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn outcome_text(outcome: MatchOutcome) -> &'static str {
    match outcome {
        MatchOutcome::Draw => "Draw",
        MatchOutcome::PlayerAWon => "Blue wins",
        MatchOutcome::PlayerBWon => "Red wins",
        MatchOutcome::None => "Match aborted",
    }
}
