use std::path::PathBuf;

use chutes::RandomSpinner;
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use judge::{
    append_outcomes, compute_elo, load_outcomes, standings, GameConfig, GameRecording,
    GameRunner, Outcome, OutcomeRecord, Player, PlayerConfig, ProcessPlayer, Reason, Recorder,
    TracingObserver, INITIAL_RATING, K_FACTOR,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Play every pairing of the given bots against each other
    Run(RunArgs),
    /// Compute Elo ratings from an outcomes file
    Elo {
        #[arg(default_value = "results/outcomes.json")]
        outcomes_file: PathBuf,
    },
    /// Print the tool schemas and the rules given to agents
    Tools,
}

#[derive(Args)]
struct RunArgs {
    /// Path to the config JSON files of players
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play per pairing
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A game is a draw after this many turns
    #[arg(long, default_value_t = 200)]
    max_turns: usize,

    /// A turn is abandoned after this many actions
    #[arg(long, default_value_t = 20)]
    max_actions_per_turn: usize,

    /// Stop the tournament as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record every game as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// Append the outcome of every game to this JSON file
    #[arg(short, long)]
    outcomes_file: Option<PathBuf>,
}

/// Results of one pairing, indexed by the pairing's player order, not by seat.
#[derive(Debug, Default, PartialEq)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    draws: usize,
    /// Play was cut short by an illegal move.
    stopped: bool,
}

impl MatchScore {
    /// Counts one game. `winner` is an index into the pairing.
    fn add_game(&mut self, winner: Option<usize>, reason: Reason) {
        match winner {
            Some(winner) => {
                self.wins[winner] += 1;
                if reason == Reason::IllegalMove {
                    self.illegal_moves[1 - winner] += 1;
                }
            }
            None => self.draws += 1,
        }
    }

    fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.draws
    }

    /// Win, win and draw rates in percent.
    fn percentages(&self) -> [f32; 3] {
        let num_games = self.num_games().max(1) as f32;
        [self.wins[0], self.wins[1], self.draws].map(|n| n as f32 / num_games * 100.0)
    }
}

fn play_matchup(
    players: [&mut ProcessPlayer; 2],
    args: &RunArgs,
    rng: &mut StdRng,
    recorder: &mut Option<Recorder>,
    outcomes: &mut Vec<OutcomeRecord>,
) -> anyhow::Result<MatchScore> {
    let [player_1, player_2] = players;
    let player_names = [player_1.name.clone(), player_2.name.clone()];
    let config = GameConfig {
        max_turns: args.max_turns,
        max_actions_per_turn: args.max_actions_per_turn,
    };
    let mut match_score = MatchScore::default();

    for game_idx in 0..args.num_games {
        // Take turns going first
        let first = game_idx % 2;
        let seats: [&mut dyn Player; 2] = if first == 0 {
            [&mut *player_1 as &mut dyn Player, &mut *player_2]
        } else {
            [&mut *player_2 as &mut dyn Player, &mut *player_1]
        };
        let seat_names = [
            player_names[first].as_str(),
            player_names[1 - first].as_str(),
        ];

        let result = GameRunner::new(seats, config, RandomSpinner::new(&mut *rng))
            .with_observer(TracingObserver)
            .play()?;

        if let Some(recorder) = recorder {
            let path = recorder.write_game_recording(&GameRecording::new(seat_names, &result))?;
            debug!(path = %path.display(), "Recorded game");
        }
        outcomes.push(OutcomeRecord::new(seat_names, &result));

        let winner = result.winner.map(|seat| if first == 0 { seat } else { 1 - seat });
        match winner {
            Some(winner) => debug!(winner = %player_names[winner], game_idx, reason = %result.reason),
            None => debug!(game_idx, reason = %result.reason, "Draw"),
        }
        match_score.add_game(winner, result.reason);

        if result.reason == Reason::IllegalMove && args.stop_on_illegal_move {
            match_score.stopped = true;
            break;
        }
    }

    let illegal_note = |loser: usize| match match_score.illegal_moves[loser] {
        0 => String::new(),
        n => format!(" ({} through illegal moves by {})", n, player_names[loser]),
    };
    eprintln!(
        "End result after {} games:\n- {} wins by {}{}\n- {} wins by {}{}\n- {} draws",
        match_score.num_games(),
        match_score.wins[0],
        player_names[0],
        illegal_note(1),
        match_score.wins[1],
        player_names[1],
        illegal_note(0),
        match_score.draws
    );

    Ok(match_score)
}

fn print_tournament_results(
    player_configs: &[PlayerConfig],
    match_results: &[((usize, usize), MatchScore)],
) {
    println!("\nTournament results");
    println!(
        "{:>20}   {:<20} {:>7} {:>7} {:>7} {:>6}",
        "p1", "p2", "p1 win", "p2 win", "draw", "games"
    );
    for ((i, j), score) in match_results {
        let [p1, p2, draw] = score.percentages();
        println!(
            "{:>20} v {:<20} {:>6.1}% {:>6.1}% {:>6.1}% {:>6}",
            player_configs[*i].nick,
            player_configs[*j].nick,
            p1,
            p2,
            draw,
            score.num_games()
        );
    }
}

fn print_elo<'a>(outcomes: impl IntoIterator<Item = &'a OutcomeRecord>) {
    let outcomes: Vec<Outcome> = outcomes
        .into_iter()
        .map(|record| record.outcome.clone())
        .collect();
    let ratings = compute_elo(&outcomes, INITIAL_RATING, K_FACTOR);
    println!("\nElo ratings");
    println!("{}", "=".repeat(40));
    for (name, rating) in standings(&ratings) {
        println!("  {:30} {:7.1}", name, rating);
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = match &args.record_games_to_directory {
        Some(dir_path) => Some(Recorder::new(dir_path.clone())?),
        None => None,
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let matchups: Vec<(usize, usize)> = (0..player_configs.len()).tuple_combinations().collect();

    let mut outcomes = Vec::new();
    let mut match_results = Vec::new();
    for (i1, i2) in matchups {
        let mut player_1 = ProcessPlayer::from_config(&player_configs[i1])?;
        let mut player_2 = ProcessPlayer::from_config(&player_configs[i2])?;

        let match_score = play_matchup(
            [&mut player_1, &mut player_2],
            &args,
            &mut rng,
            &mut recorder,
            &mut outcomes,
        )?;

        let stopped = match_score.stopped;
        match_results.push(((i1, i2), match_score));
        if stopped {
            break;
        }
    }

    if player_configs.len() > 2 {
        print_tournament_results(&player_configs, &match_results);
    }
    print_elo(&outcomes);

    if let Some(path) = &args.outcomes_file {
        let total = append_outcomes(path, &outcomes)?;
        info!(path = %path.display(), total, "Saved outcomes");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    initialize_logging(cli.log_level);

    match cli.command {
        Command::Run(args) => run(args),
        Command::Elo { outcomes_file } => {
            let outcomes = load_outcomes(&outcomes_file)?;
            if outcomes.is_empty() {
                anyhow::bail!("No outcomes found in '{}'", outcomes_file.display());
            }
            print_elo(&outcomes);
            Ok(())
        }
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&chutes::tool_schemas())?);
            println!("\n{}", chutes::rules_text());
            Ok(())
        }
    }
}

/// `RUST_LOG` directives, if set, take precedence over `level`.
fn initialize_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_moves_count_as_wins_for_the_opponent() {
        let mut score = MatchScore::default();
        score.add_game(Some(0), Reason::Win);
        score.add_game(Some(1), Reason::IllegalMove);
        score.add_game(None, Reason::MaxTurns);
        score.add_game(Some(0), Reason::IllegalMove);
        assert_eq!(score.wins, [2, 2]);
        assert_eq!(score.illegal_moves, [1, 1]);
        assert_eq!(score.draws, 1);
        assert_eq!(score.num_games(), 5);
    }

    #[test]
    fn percentages() {
        let mut score = MatchScore::default();
        assert_eq!(score.percentages(), [0.0, 0.0, 0.0]);
        score.add_game(Some(1), Reason::Forfeit);
        score.add_game(None, Reason::Draw);
        assert_eq!(score.percentages(), [0.0, 50.0, 50.0]);
    }

    #[test]
    fn run_args() {
        let cli = Cli::try_parse_from(["judge", "run", "a.json", "b.json", "-s", "--seed", "3"])
            .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected the run command");
        };
        assert_eq!(args.player_configs.len(), 2);
        assert!(args.stop_on_illegal_move);
        assert_eq!(args.seed, Some(3));
        assert_eq!(args.num_games, 100);
        assert_eq!(args.max_actions_per_turn, 20);
    }
}
