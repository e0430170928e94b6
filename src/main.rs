//! Maze Ball entry point
//!
//! On the web this wires the game to Matter.js and the page. Natively it
//! prints a seeded maze as ASCII art.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;

    use maze_ball::platform::matter::MatterWorld;
    use maze_ball::platform::now_ms;
    use maze_ball::records::{BestTimes, SolveRecord, format_time};
    use maze_ball::sim::{BodyLabel, CollisionPair, Control, Game, GameEvent};
    use maze_ball::{Difficulty, Settings};

    /// Everything the page callbacks share
    struct App {
        game: Game<MatterWorld>,
        settings: Settings,
        best_times: BestTimes,
        started_at: f64,
    }

    impl App {
        fn new(settings: Settings, seed: u64) -> Self {
            let game = new_game(&settings, seed);
            Self {
                game,
                settings,
                best_times: BestTimes::load(),
                started_at: now_ms(),
            }
        }

        fn on_collision(&mut self, a: &str, b: &str) {
            let (Some(a), Some(b)) = (BodyLabel::from_str(a), BodyLabel::from_str(b)) else {
                return;
            };
            if let Some(GameEvent::Won) = self.game.handle_collision_start(&[CollisionPair::new(a, b)]) {
                self.record_solve();
                set_hidden("winner", false);
            }
        }

        fn record_solve(&mut self) {
            let seconds = (now_ms() - self.started_at) / 1000.0;
            let record = SolveRecord {
                difficulty: self.settings.difficulty,
                seconds,
                seed: self.game.seed,
                timestamp: now_ms(),
            };
            match self.best_times.add(record) {
                Some(rank) => {
                    log::info!("Solved in {} (rank {})", format_time(seconds), rank);
                    self.best_times.save();
                }
                None => log::info!("Solved in {}", format_time(seconds)),
            }
            set_text("solve-time", &format_time(seconds));
        }

        fn restart(&mut self, seed: u64) {
            self.game = new_game(&self.settings, seed);
            self.started_at = now_ms();
            set_hidden("winner", true);
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    fn new_game(settings: &Settings, seed: u64) -> Game<MatterWorld> {
        let config = settings.maze_config().expect("Invalid maze settings");
        let world = MatterWorld::new(config.width(), config.height(), settings.wireframes);
        Game::new(config, seed, world).expect("Failed to build maze")
    }

    /// Route the current engine's collisions into the shared app
    ///
    /// The world owns the callback, so it only holds a weak handle back.
    fn subscribe_collisions(app: &Rc<RefCell<App>>) {
        let shared: Weak<RefCell<App>> = Rc::downgrade(app);
        app.borrow_mut()
            .game
            .world_mut()
            .on_collision_start(move |a: String, b: String| {
                if let Some(app) = shared.upgrade() {
                    app.borrow_mut().on_collision(&a, &b);
                }
            });
    }

    fn set_hidden(id: &str, hidden: bool) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    fn set_text(id: &str, text: &str) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Maze Ball starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(settings, seed)));
        subscribe_collisions(&app);

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(app);

        log::info!("Maze Ball running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let handler = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if let Some(control) = Control::from_key(&key) {
                handler.borrow_mut().game.handle_control(control);
                return;
            }

            let next_difficulty = match key.as_str() {
                "Enter" | "r" | "R" => None,
                other => match Difficulty::from_str(other) {
                    Some(d) => Some(d),
                    None => return,
                },
            };

            {
                let mut a = handler.borrow_mut();
                if let Some(difficulty) = next_difficulty {
                    a.settings.difficulty = difficulty;
                    a.settings.save();
                    log::info!("Difficulty: {}", difficulty.as_str());
                }
                a.restart(js_sys::Date::now() as u64);
            }
            subscribe_collisions(&handler);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use maze_ball::sim::generate_maze;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Maze Ball (native) starting...");
    log::info!("Native mode prints mazes only - run with `trunk serve` for the game");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize, default: u64| -> u64 {
        args.get(i)
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    };
    let rows = arg(0, 6) as usize;
    let cols = arg(1, 8) as usize;
    let seed = arg(2, maze_ball::platform::now_ms() as u64);

    let mut rng = Pcg32::seed_from_u64(seed);
    match generate_maze(rows, cols, &mut rng) {
        Ok(walls) => {
            println!("seed {seed}, {rows}x{cols}");
            print!("{walls}");
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
