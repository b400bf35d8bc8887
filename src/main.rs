//! Cottage Olympics - headless native host
//!
//! Plays one round with the autopilot at a fixed frame rate, follows the
//! throw with the camera and prints the result.
//!
//! Usage: `cottage-olympics [item] [angle] [power] [--seed N] [--tuning FILE]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use cottage_olympics::consts::{MAX_SUBSTEPS, SIM_DT};
    use cottage_olympics::hud::{self, HudSnapshot};
    use cottage_olympics::render;
    use cottage_olympics::sim::{
        CameraFollow, FollowCamera, GameEvent, GamePhase, GameState, TickInput, autopilot_input,
        tick,
    };
    use cottage_olympics::{Catalog, Tuning};

    /// Host display rate
    const FRAME_DT: f32 = 1.0 / 30.0;
    /// Give up on rounds that never settle (e.g. fell past the field)
    const MAX_FRAMES: u32 = 30 * 120;

    #[derive(Debug)]
    pub struct Args {
        pub item: String,
        pub angle: Option<f32>,
        pub power: Option<f32>,
        pub seed: Option<u64>,
        pub tuning: Option<PathBuf>,
        pub list: bool,
    }

    pub fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
        let mut parsed = Args {
            item: cottage_olympics::catalog::DEFAULT_ITEM.to_string(),
            angle: None,
            power: None,
            seed: None,
            tuning: None,
            list: false,
        };
        let mut positional = 0;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" => parsed.list = true,
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a value")?;
                    parsed.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
                }
                "--tuning" => {
                    parsed.tuning = Some(args.next().ok_or("--tuning needs a file")?.into());
                }
                _ => {
                    match positional {
                        0 => parsed.item = arg,
                        1 => {
                            parsed.angle =
                                Some(arg.parse().map_err(|_| format!("bad angle: {arg}"))?)
                        }
                        2 => {
                            parsed.power =
                                Some(arg.parse().map_err(|_| format!("bad power: {arg}"))?)
                        }
                        _ => return Err(format!("unexpected argument: {arg}")),
                    }
                    positional += 1;
                }
            }
        }
        Ok(parsed)
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default()
    }

    /// One play session: simulation plus host-side state
    struct Session {
        state: GameState,
        input: TickInput,
        accumulator: f32,
        camera: FollowCamera,
        target_angle: f32,
        target_power: f32,
        frames: u32,
    }

    impl Session {
        fn new(state: GameState, target_angle: f32, target_power: f32) -> Self {
            let camera = FollowCamera::new(state.tuning.view.viewport_width);
            Self {
                state,
                input: TickInput::default(),
                accumulator: 0.0,
                camera,
                target_angle,
                target_power,
                frames: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let auto = autopilot_input(&self.state, self.target_angle, self.target_power);
                self.input.start |= auto.start;
                self.input.power_up |= auto.power_up;
                self.input.power_down |= auto.power_down;
                self.input.aim_up = auto.aim_up;
                self.input.aim_down = auto.aim_down;

                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }

            for event in self.state.drain_events() {
                self.camera.handle_event(&event);
                match event {
                    GameEvent::PhaseChanged { .. } => {
                        println!("{}", HudSnapshot::from_state(&self.state).status_line());
                    }
                    GameEvent::GenerationCapReached { right_edge } => {
                        log::warn!("Field ends at x={right_edge:.0}");
                    }
                    _ => {}
                }
            }
            self.camera.update(self.state.projectile.body.pos);
            self.frames += 1;
        }

        /// Build this frame's geometry (stands in for a GPU upload)
        fn render(&self) {
            let frame = render::build_frame(&self.state, self.camera.scroll_x);
            log::trace!(
                "Frame {}: {} bytes of vertices, {} labels",
                self.frames,
                render::as_bytes(&frame.vertices).len(),
                frame.labels.len()
            );
        }
    }

    pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
        let catalog = Catalog::default();
        if args.list {
            for item in catalog.list_available() {
                println!("{:<10} {:<11} {}", item.id, item.name, item.description);
            }
            return Ok(());
        }

        let tuning = match &args.tuning {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(|| now_ms() as u64);
        let target_angle = args
            .angle
            .unwrap_or(tuning.aim.initial)
            .clamp(tuning.aim.min, tuning.aim.max);
        let target_power = args
            .power
            .unwrap_or(tuning.power.initial)
            .clamp(tuning.power.min, tuning.power.max);

        let state = GameState::new(&catalog, &args.item, tuning, seed);
        println!("{} - {}", hud::TITLE, state.item.name);
        println!("{}", hud::prompt(state.throw.phase));

        let mut session = Session::new(state, target_angle, target_power);
        while session.state.throw.phase != GamePhase::Finish && session.frames < MAX_FRAMES {
            session.update(FRAME_DT);
            session.render();
        }

        let Some(distance) = session.state.final_distance else {
            println!(
                "The {} never came to rest (best {}m)",
                session.state.item.name, session.state.throw.max_distance
            );
            return Ok(());
        };

        for line in HudSnapshot::from_state(&session.state).controls {
            println!("{line}");
        }

        log::info!("Round finished: {} threw {}m", session.state.item.name, distance);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cottage Olympics (native) starting...");

    let result = native::parse_args(std::env::args().skip(1))
        .map_err(Into::into)
        .and_then(native::run);
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly
}
