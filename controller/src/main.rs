use std::io::{BufRead, Write};

use bingo::{visualize_game, Action, GameState};
use clap::{Parser, ValueEnum};
use controller::{play_game, AiTurn, Config, ControllerError, GameController, GameResult, Seat};
use minimax_bot::Strategy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SeatArg {
    Human,
    Minimax,
    Greedy,
}

impl From<SeatArg> for Seat {
    fn from(arg: SeatArg) -> Self {
        match arg {
            SeatArg::Human => Seat::Human,
            SeatArg::Minimax => Seat::Computer(Strategy::default()),
            SeatArg::Greedy => Seat::Computer(Strategy::Greedy),
        }
    }
}

#[derive(Parser)]
struct Args {
    /// Who plays as player 1
    #[arg(long, value_enum, default_value_t = SeatArg::Human)]
    player_one: SeatArg,

    /// Who plays as player 2
    #[arg(long, value_enum, default_value_t = SeatArg::Minimax)]
    player_two: SeatArg,

    /// How many games to play when neither player is human
    #[arg(short, long, default_value_t = 10)]
    num_games: usize,

    /// RNG seed for drawing the target colors
    #[arg(long)]
    seed: Option<u64>,

    /// Print the game state as JSON instead of drawing the board
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

const HELP: &str = "Commands:
  place <row>,<col> <tile type> [flipped]   e.g. place 0,3 yellow-red flipped
  move <row>,<col> <row>,<col>              e.g. move 1,1 1,2
  flip <row>,<col>                          e.g. flip 2,0
  state                                     show the board again
  new                                       start a new game
  help                                      show this message
  quit";

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    draws: usize,
}

fn play_matchup(
    controller: &mut GameController,
    player_names: [SeatArg; 2],
    num_games: usize,
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        match play_game(controller)? {
            GameResult::WonByPlayer { player } => {
                debug!(winner = ?player_names[player.index()], game_idx);
                match_score.wins[player.index()] += 1;
            }
            GameResult::Draw => {
                debug!(game_idx, "Draw");
                match_score.draws += 1;
            }
        }
    }

    eprintln!(
        "End result:\n- {} wins by player 1 ({:?})\n- {} wins by player 2 ({:?})\n- {} draws",
        match_score.wins[0], player_names[0], match_score.wins[1], player_names[1], match_score.draws
    );

    Ok(match_score)
}

fn print_state(state: &GameState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        println!("{}", visualize_game(state));
    }
    Ok(())
}

fn print_error(err: &ControllerError) {
    let mut err_dyn = err as &dyn std::error::Error;
    while let Some(src_err) = err_dyn.source() {
        println!("{}", err_dyn);
        err_dyn = src_err;
    }
    println!("{}", err_dyn);
}

fn play_interactively(controller: &mut GameController, json: bool) -> anyhow::Result<()> {
    println!("{}", HELP);
    print_state(&controller.state(), json)?;
    let mut lines = std::io::stdin().lock().lines();
    loop {
        let state = controller.state();
        if let Some(winner) = state.winner() {
            println!("{} wins! Type 'new' for another game or 'quit'.", winner);
        } else if controller.is_computer_turn() {
            let player = state.turn();
            controller.request_ai_move()?;
            match controller.wait_for_ai_move()? {
                AiTurn::Applied { action, .. } => println!("{} plays: {}", player, action),
                AiTurn::Passed { .. } => println!("{} has no legal move and passes", player),
            }
            print_state(&controller.state(), json)?;
            continue;
        } else {
            println!("{} to move", state.turn());
        }

        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        match line?.trim() {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => println!("{}", HELP),
            "state" => print_state(&controller.state(), json)?,
            "new" => {
                let state = controller.new_game();
                print_state(&state, json)?;
            }
            text => match text.parse::<Action>() {
                Ok(action) => match controller.apply(action) {
                    Ok(_) => print_state(&controller.state(), json)?,
                    Err(err) => print_error(&err),
                },
                Err(err) => println!("{}", err),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let player_names = [args.player_one, args.player_two];
    let mut controller = GameController::new(Config {
        rng: StdRng::seed_from_u64(seed),
        seats: player_names.map(Seat::from),
    });

    if player_names.contains(&SeatArg::Human) {
        play_interactively(&mut controller, args.json)
    } else {
        play_matchup(&mut controller, player_names, args.num_games)?;
        Ok(())
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
