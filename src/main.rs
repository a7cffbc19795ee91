use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordgrid::{
    cli::{self, Args, TurnInput},
    config::Config,
    game::{GameOverReason, GRID_SIZE},
    Dictionary, GameEngine,
};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordgrid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    tracing::debug!("Configuration loaded: {:?}", config);

    let dictionary_path = args.dictionary.unwrap_or(config.game.dictionary_path);
    let dictionary = match Dictionary::load(&dictionary_path).await {
        Ok(dict) => dict,
        Err(e) => {
            tracing::warn!("{:#}. Using empty dictionary, no word will score.", e);
            Dictionary::empty()
        }
    };

    let mut input = BufReader::new(io::stdin()).lines();

    let initial_word = if args.random_word {
        dictionary
            .random_word(GRID_SIZE)
            .map(str::to_string)
            .context("Dictionary has no five-letter words to start with")?
    } else {
        match args.word {
            Some(word) => word,
            None => match prompt_initial_word(&mut input).await? {
                Some(word) => word,
                None => return Ok(()),
            },
        }
    };

    let num_players = match args.players.or(config.game.default_players) {
        Some(n) => n,
        None => match prompt_player_count(&mut input).await? {
            Some(n) => n,
            None => return Ok(()),
        },
    };

    let log_path = args.log.unwrap_or(config.game.log_path);
    let mut game =
        GameEngine::with_log_file(&initial_word, Arc::new(dictionary), num_players, &log_path)
            .context("Failed to initialize the game")?;

    play(&mut game, &mut input).await?;
    Ok(())
}

async fn prompt(input: &mut Input, message: &str) -> Result<Option<String>> {
    print!("{message}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

async fn prompt_initial_word(input: &mut Input) -> Result<Option<String>> {
    loop {
        let Some(line) = prompt(input, "Enter the initial 5-letter word: ").await? else {
            return Ok(None);
        };
        let word = line.trim();
        if word.chars().count() == GRID_SIZE && word.chars().all(char::is_alphabetic) {
            return Ok(Some(word.to_string()));
        }
        println!("The word must be exactly {GRID_SIZE} letters.");
    }
}

async fn prompt_player_count(input: &mut Input) -> Result<Option<usize>> {
    loop {
        let Some(line) = prompt(input, "Enter the number of players (2-4): ").await? else {
            return Ok(None);
        };
        if let Some(n) = cli::parse_player_count(&line) {
            return Ok(Some(n));
        }
    }
}

async fn play(game: &mut GameEngine, input: &mut Input) -> Result<()> {
    while !game.is_game_over() {
        println!();
        print!("{}", game.grid());
        game.log_board();

        let message = format!(
            "Player {}'s turn. Enter row, col, and letter (or -1 to skip): ",
            game.current_player() + 1
        );
        let Some(line) = prompt(input, &message).await? else {
            println!();
            tracing::info!("Input closed, leaving game {}", game.game_id());
            break;
        };

        match cli::parse_turn(&line) {
            Ok(TurnInput::Skip) => {
                game.skip_turn();
                print_scores(game);
            }
            Ok(TurnInput::Place { row, col, letter }) => match game.play_letter(row, col, letter) {
                Ok(placement) => {
                    for credited in &placement.words {
                        println!("{} scores {} points!", credited.word, credited.points);
                    }
                    print_scores(game);
                }
                Err(e) => println!("Invalid move ({e}). Try again."),
            },
            Err(e) => println!("{e}"),
        }
    }

    println!("\nGame over!");
    match game.game_over_reason() {
        Some(GameOverReason::BoardFull) => println!("Every cell is filled."),
        Some(GameOverReason::Stalemate) => println!("Every player skipped in a row."),
        None => {}
    }
    print!("{}", game.grid());
    print_scores(game);
    println!("{}", cli::winner_line(game));
    game.log_game_over();

    Ok(())
}

fn print_scores(game: &mut GameEngine) {
    for line in cli::score_lines(game) {
        println!("{line}");
    }
    game.log_scores();
}
