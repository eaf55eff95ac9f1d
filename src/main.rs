//! Command line front end: score a hand given as JSON or as tile codes.

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use hk_mahjong_calc::calculate_hand;
use hk_mahjong_calc::game::{GameContext, WinType};
use hk_mahjong_calc::input::HandInput;
use hk_mahjong_calc::tiles::{Wind, parse_tiles};

#[derive(Parser)]
#[command(name = "hk_mahjong_calc")]
#[command(about = "Score a Hong Kong mahjong winning hand in fan", long_about = None)]
struct Cli {
    /// HandInput JSON file (tiles plus context)
    #[arg(long, conflicts_with = "tiles")]
    input: Option<PathBuf>,

    /// Space separated tile codes, e.g. "1d 2d 3d E E E Rd Rd F1"; prefix `*` for exposed
    #[arg(long)]
    tiles: Option<String>,

    /// selfPick, discard, kongReplacement, doubleKongReplacement, robbingKong,
    /// moonUnderSea, heaven, earth or man
    #[arg(long, default_value = "selfPick")]
    win_type: WinType,

    #[arg(long, default_value = "east")]
    seat_wind: Wind,

    #[arg(long, default_value = "east")]
    round_wind: Wind,

    /// Seat number 1-4, selects the seat flower and season
    #[arg(long, default_value_t = 1)]
    seat: u8,

    #[arg(long)]
    dealer: bool,

    /// A pong, chow or kong was called from a discard
    #[arg(long)]
    open_hand: bool,

    /// Declare that no flowers or seasons were drawn
    #[arg(long)]
    no_flowers: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn context(&self) -> GameContext {
        GameContext {
            win_type: self.win_type,
            seat_wind: self.seat_wind,
            round_wind: self.round_wind,
            seat_number: self.seat,
            is_dealer: self.dealer,
            fully_concealed_hand: !self.open_hand,
            flowers: BTreeSet::new(),
            seasons: BTreeSet::new(),
            no_flowers_seasons: self.no_flowers,
        }
    }

    fn hand_input(&self) -> Result<HandInput> {
        if let Some(path) = &self.input {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let input: HandInput = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            return Ok(input);
        }

        let tiles = match &self.tiles {
            Some(codes) => parse_tiles(codes)?,
            None => {
                info!("No hand given, scoring the built-in example");
                create_example_hand()?
            }
        };
        Ok(HandInput {
            tiles,
            context: self.context(),
        })
    }
}

/// Mixed flush with a red dragon pong: 123d 456d 789d RdRdRd + EE.
fn create_example_hand() -> Result<Vec<hk_mahjong_calc::tiles::Tile>> {
    Ok(parse_tiles("1d 2d 3d 4d 5d 6d 7d 8d 9d Rd Rd Rd E E")?)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = cli.hand_input()?;
    let result = match calculate_hand(&input.tiles, &input.context) {
        Ok(result) => result,
        Err(e) if e.is_structural() => bail!("Not a winning hand: {}", e),
        Err(e) => bail!("Invalid input: {}", e),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
    }
    Ok(())
}
