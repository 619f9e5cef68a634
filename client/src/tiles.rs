use image::RgbaImage;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Wall,
    Barrier,
}

pub struct LoadedTile {
    pub kind: TileKind,
    pub pixels: RgbaImage,
}

/// Decodes the configured obstacle tile PNGs off the UI thread and
/// hands them over through a channel. A missing or broken file is
/// logged and skipped; the board keeps its flat-color fallback.
pub struct TileLoader {
    rx: mpsc::UnboundedReceiver<LoadedTile>,
}

impl TileLoader {
    pub fn spawn(wall_path: Option<String>, barrier_path: Option<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                let mut tasks = Vec::new();
                for (kind, path) in [
                    (TileKind::Wall, wall_path),
                    (TileKind::Barrier, barrier_path),
                ] {
                    let Some(path) = path else { continue };
                    tasks.push(tokio::task::spawn_blocking(move || {
                        let result = image::open(&path);
                        (kind, path, result)
                    }));
                }

                for task in tasks {
                    match task.await {
                        Ok((kind, path, Ok(decoded))) => {
                            common::log!("Loaded {:?} tile from {}", kind, path);
                            let _ = tx.send(LoadedTile {
                                kind,
                                pixels: decoded.to_rgba8(),
                            });
                        }
                        Ok((kind, path, Err(e))) => {
                            common::warn!("Failed to load {:?} tile {}: {}", kind, path, e);
                        }
                        Err(e) => {
                            common::warn!("Tile decode task failed: {}", e);
                        }
                    }
                }
            });
        });

        Self { rx }
    }

    /// Non-blocking; called once per frame until the channel drains.
    pub fn try_next(&mut self) -> Option<LoadedTile> {
        self.rx.try_recv().ok()
    }
}
