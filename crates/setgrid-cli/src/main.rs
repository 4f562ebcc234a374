//! setgrid CLI - inspect board layouts, key dispatch and animation.

#![allow(clippy::needless_pass_by_value, clippy::fn_params_excessive_bools)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use setgrid_core::{
    settings::{KEYBOARD_LAYOUT_KEY, VOLUME_KEY},
    BoardAction, BoardState, CardId, CardOrientation, CardSource, CardUniverse, DispatchContext,
    DisplayConfig, DisplaySettings, FileSettings, GameMode, InputConfig, InputDispatcher, Key,
    KeyEvent, KeyboardLayout, KeyboardLayoutId, KeyboardLayoutTable, LayoutOrientation, Modifiers,
    SelectionState, SettingsStore, Spring, SpringConfig,
};
use setgrid_layout::{BoardLayout, LayoutEngine, LayoutParams};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "setgrid")]
#[command(about = "Card board layout, input and animation toolkit")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a board layout and print the card targets
    Layout {
        /// Cards in the universe
        #[arg(long, default_value = "81")]
        cards: u32,

        /// Slots dealt onto the board
        #[arg(short, long, default_value = "12")]
        board_size: usize,

        /// Cards already played (removed from the front of the deck)
        #[arg(short, long, default_value = "0")]
        played: u32,

        /// Show the last K played cards as a chain prefix
        #[arg(long, value_name = "K")]
        chain: Option<u32>,

        /// Landscape board
        #[arg(long)]
        landscape: bool,

        /// Horizontal cards
        #[arg(long)]
        horizontal: bool,

        /// Container width in pixels (unmeasured if omitted)
        #[arg(short, long)]
        width: Option<f32>,

        /// Layout parameters file (TOML)
        #[arg(long)]
        params: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show shortcut tables or dispatch key presses
    Keys {
        /// Keyboard layout name
        #[arg(short, long, default_value = "QWERTY")]
        keyboard: String,

        /// Extra keyboard layouts (TOML or YAML)
        #[arg(long)]
        layouts: Option<PathBuf>,

        /// Key names to dispatch, e.g. q Escape ' '
        #[arg(long, num_args = 1..)]
        press: Vec<String>,

        /// Modifiers held for every press
        #[arg(short, long, value_delimiter = ',')]
        modifiers: Vec<ModifierArg>,

        /// Visible slots
        #[arg(short, long, default_value = "12")]
        board_size: usize,

        /// Landscape board
        #[arg(long)]
        landscape: bool,

        /// Disable toggle sounds
        #[arg(long)]
        mute: bool,
    },

    /// Step a spring from one value to another
    Animate {
        /// Start value
        #[arg(long)]
        from: f64,

        /// Target value
        #[arg(long)]
        to: f64,

        /// Frame duration in seconds
        #[arg(long, default_value = "0.0166667")]
        dt: f64,

        /// Maximum frames to print
        #[arg(long, default_value = "600")]
        frames: usize,

        /// Spring tension
        #[arg(long)]
        tension: Option<f64>,

        /// Spring friction
        #[arg(long)]
        friction: Option<f64>,
    },

    /// Read or update persisted settings
    Settings {
        /// Settings file
        #[arg(short, long)]
        file: PathBuf,

        /// Switch portrait/landscape
        #[arg(long)]
        toggle_layout: bool,

        /// Rotate cards
        #[arg(long)]
        toggle_orientation: bool,

        /// Store a keyboard layout
        #[arg(long)]
        keyboard: Option<String>,

        /// Store the sound setting
        #[arg(long)]
        volume: Option<Volume>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModifierArg {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Volume {
    On,
    Off,
}

impl Volume {
    const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout {
            cards,
            board_size,
            played,
            chain,
            landscape,
            horizontal,
            width,
            params,
            json,
        } => {
            let params = match params {
                Some(path) => load_params(&path)?,
                None => LayoutParams::default(),
            };
            let display = display_config(landscape, horizontal, width);
            let layout = cmd_layout(cards, board_size, played, chain, &display, params)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                print_layout(&layout);
            }
            Ok(())
        }
        Commands::Keys {
            keyboard,
            layouts,
            press,
            modifiers,
            board_size,
            landscape,
            mute,
        } => {
            let layout = resolve_keyboard(&keyboard, layouts.as_deref())?;
            let orientation = if landscape {
                LayoutOrientation::Landscape
            } else {
                LayoutOrientation::Portrait
            };
            if press.is_empty() {
                print_shortcuts(&keyboard, &layout);
                return Ok(());
            }
            let config = InputConfig {
                keyboard_layout: layout,
                sound: !mute,
            };
            for line in cmd_keys(config, &press, &modifiers, board_size, orientation)? {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Animate {
            from,
            to,
            dt,
            frames,
            tension,
            friction,
        } => {
            let base = SpringConfig::default();
            let config = SpringConfig::custom(
                base.mass,
                tension.unwrap_or(base.tension),
                friction.unwrap_or(base.friction),
            );
            for (frame, value, velocity) in cmd_animate(from, to, dt, frames, config)? {
                println!("{frame:>4} {:>8.3}s {value:>12.4} {velocity:>12.4}", frame as f64 * dt);
            }
            Ok(())
        }
        Commands::Settings {
            file,
            toggle_layout,
            toggle_orientation,
            keyboard,
            volume,
        } => {
            let (display, input) =
                cmd_settings(&file, toggle_layout, toggle_orientation, keyboard, volume)?;
            println!("layout:      {}", display.layout);
            println!("orientation: {}", display.card);
            println!(
                "keyboard:    {} / {} (toggles {:?} {:?})",
                input.keyboard_layout.portrait,
                input.keyboard_layout.landscape,
                input.keyboard_layout.orientation_key,
                input.keyboard_layout.layout_key
            );
            println!("sound:       {}", if input.sound { "on" } else { "off" });
            Ok(())
        }
    }
}

/// Initialize logging; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "setgrid={level},setgrid_core={level},setgrid_layout={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn display_config(landscape: bool, horizontal: bool, width: Option<f32>) -> DisplayConfig {
    let layout = if landscape {
        LayoutOrientation::Landscape
    } else {
        LayoutOrientation::Portrait
    };
    let card = if horizontal {
        CardOrientation::Horizontal
    } else {
        CardOrientation::Vertical
    };
    DisplayConfig {
        layout,
        card,
        container_width: width,
    }
}

fn load_params(path: &Path) -> Result<LayoutParams> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout parameters: {}", path.display()))?;
    LayoutParams::from_toml_str(&source)
        .with_context(|| format!("Invalid layout parameters in {}", path.display()))
}

/// Numbered cards `0..count`, the same for every game mode.
struct NumberedDeck(u32);

impl CardSource for NumberedDeck {
    fn generate_cards(&self, _mode: GameMode) -> CardUniverse {
        CardUniverse::sequential(self.0)
    }
}

fn cmd_layout(
    cards: u32,
    board_size: usize,
    played: u32,
    chain: Option<u32>,
    display: &DisplayConfig,
    params: LayoutParams,
) -> Result<BoardLayout> {
    if played > cards {
        bail!("cannot have played {played} of {cards} cards");
    }
    let mut state = BoardState::new((played..cards).map(CardId).collect(), board_size);
    if let Some(k) = chain {
        if k > played {
            bail!("chain prefix of {k} needs at least {k} played cards, got {played}");
        }
        state = state.with_chain((played - k..played).map(CardId).collect());
    }
    let universe = NumberedDeck(cards).generate_cards(state.mode);
    debug!(cards, board_size, played, ?chain, "computing layout");

    LayoutEngine::new(params)
        .try_compute(&universe, &state, &SelectionState::default(), display)
        .context("Board state is inconsistent")
}

fn print_layout(layout: &BoardLayout) {
    let g = &layout.geometry;
    println!(
        "grid {}x{} ({} / {}), card {}x{}, container {}x{} (outer height {})",
        g.cols, g.rows, g.layout, g.card, g.card_width, g.card_height, g.container_width,
        g.container_height, layout.outer_height
    );
    if let Some(divider) = layout.divider {
        println!("divider {:?} at {}", divider.orientation, divider.offset);
    }
    println!(
        "{} cards remaining (caption at left {}, bottom {})",
        layout.caption.remaining, layout.caption.left, layout.caption.bottom
    );
    let mut parked = 0usize;
    for (card, target) in &layout.cards {
        if target.in_play {
            println!(
                "  {card} at ({:>7.1}, {:>7.1}){}{}",
                target.position.x,
                target.position.y,
                if target.active { " active" } else { "" },
                if target.hinted { " hinted" } else { "" },
            );
        } else {
            parked += 1;
        }
    }
    println!("{parked} cards parked off the board");
}

fn resolve_keyboard(name: &str, layouts: Option<&Path>) -> Result<KeyboardLayout> {
    let Some(path) = layouts else {
        let id: KeyboardLayoutId = name.parse()?;
        return Ok(id.layout());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keyboard layouts: {}", path.display()))?;
    let extra = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => KeyboardLayoutTable::from_yaml_str(&source),
        _ => KeyboardLayoutTable::from_toml_str(&source),
    }
    .with_context(|| format!("Invalid keyboard layouts in {}", path.display()))?;
    info!(count = extra.layouts.len(), "loaded keyboard layouts");

    let mut table = KeyboardLayoutTable::standard();
    table.merge(extra);
    Ok(table.get(name)?.clone())
}

fn print_shortcuts(name: &str, layout: &KeyboardLayout) {
    println!("{name}");
    for orientation in [LayoutOrientation::Portrait, LayoutOrientation::Landscape] {
        println!("  {orientation:<9} {}", layout.shortcuts(orientation));
    }
    println!("  rotate    {:?}", layout.orientation_key);
    println!("  layout    {:?}", layout.layout_key);
}

fn modifiers_from(args: &[ModifierArg]) -> Modifiers {
    args.iter().fold(Modifiers::NONE, |mut m, arg| {
        match arg {
            ModifierArg::Ctrl => m.ctrl = true,
            ModifierArg::Alt => m.alt = true,
            ModifierArg::Shift => m.shift = true,
            ModifierArg::Meta => m.meta = true,
        }
        m
    })
}

fn cmd_keys(
    config: InputConfig,
    press: &[String],
    modifiers: &[ModifierArg],
    board_size: usize,
    orientation: LayoutOrientation,
) -> Result<Vec<String>> {
    let modifiers = modifiers_from(modifiers);
    let board: Vec<CardId> = (0..board_size)
        .map(|i| u32::try_from(i).map(CardId))
        .collect::<Result<_, _>>()
        .context("board size too large")?;
    let ctx = DispatchContext::new(&board, orientation);

    let mut dispatcher = InputDispatcher::new(config);
    dispatcher.subscribe();
    let lines = press
        .iter()
        .map(|name| -> Result<String> {
            let key = Key::from_name(name).with_context(|| format!("Unknown key name: {name:?}"))?;
            let outcome = dispatcher.handle_key(&KeyEvent::new(key, modifiers), &ctx);
            Ok(format!("{name:?} -> {}", serde_json::to_string(&outcome)?))
        })
        .collect();
    dispatcher.unsubscribe();
    lines
}

fn cmd_animate(
    from: f64,
    to: f64,
    dt: f64,
    frames: usize,
    config: SpringConfig,
) -> Result<Vec<(usize, f64, f64)>> {
    if !(dt.is_finite() && dt > 0.0) {
        bail!("frame duration must be positive, got {dt}");
    }
    let mut spring = Spring::new(from).with_config(config);
    spring.set_target(to);

    let mut out = vec![(0, spring.value, spring.velocity)];
    for frame in 1..=frames {
        if spring.at_rest {
            break;
        }
        spring.update(dt);
        out.push((frame, spring.value, spring.velocity));
    }
    Ok(out)
}

fn cmd_settings(
    file: &Path,
    toggle_layout: bool,
    toggle_orientation: bool,
    keyboard: Option<String>,
    volume: Option<Volume>,
) -> Result<(DisplaySettings, InputConfig)> {
    let mut store = FileSettings::open(file)?;
    let mut display = DisplaySettings::load(&store);

    if toggle_layout {
        display.apply_and_save(BoardAction::ToggleLayoutOrientation, &mut store)?;
    }
    if toggle_orientation {
        display.apply_and_save(BoardAction::ToggleCardOrientation, &mut store)?;
    }
    if let Some(name) = keyboard {
        let id: KeyboardLayoutId = name.parse()?;
        store.set(KEYBOARD_LAYOUT_KEY, id.as_str())?;
    }
    if let Some(volume) = volume {
        store.set(VOLUME_KEY, volume.as_str())?;
    }

    let input = InputConfig::from_settings(&store)
        .with_context(|| format!("Invalid input settings in {}", file.display()))?;
    Ok((display, input))
}
