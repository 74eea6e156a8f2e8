//! Wordtrie CLI
//!
//! Interactive command-line interface for playing games against a word list.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wordtrie::analysis::{self, GuessAnalysis};
use wordtrie::{Config, Dictionary, FeedbackPattern, Game, GuessOutcome};

const HELP_TEXT: &str = "\
Commands:
  new <reference>          start a game with a hidden reference word
  guess <word>             play a guess (in a game)
  remaining                list the words still compatible
  count                    number of words still compatible
  add <word>...            add words to the dictionary
  suggest [n]              the n most informative guesses (default 5)
  hard                     toggle hard mode suggestions (in a game)
  feedback <ref> <guess>   show the feedback for a guess against a reference
  end                      abandon the current game
  help                     this text
  quit                     exit";

#[derive(Parser, Debug)]
#[command(name = "wordtrie", version, about = "Play Wordle-style games against a word list")]
struct Args {
    /// Word list, one word per line
    #[arg(long, short = 'd')]
    dictionary: PathBuf,
    /// Length of every word
    #[arg(long, short = 'k', default_value_t = 5)]
    length: usize,
    /// Attempts per game
    #[arg(long, default_value_t = 6)]
    max_guesses: usize,
    /// Initial arena block size in bytes
    #[arg(long, default_value_t = 4096)]
    block_size: usize,
    /// Start a game against this reference right away
    #[arg(long)]
    reference: Option<String>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            word_len: self.length,
            max_guesses: self.max_guesses,
            arena_block_size: self.block_size,
        }
    }
}

/// Where the in-game loop hands control back to.
enum Next {
    Menu,
    NewGame(String),
    Quit,
}

struct Prompt<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> Prompt<R> {
    /// Read the next non-empty command, `None` on end of input.
    fn read(&mut self, prompt: &str) -> io::Result<Option<Vec<String>>> {
        loop {
            print!("{}> ", prompt);
            io::stdout().flush()?;
            let line = match self.lines.next() {
                Some(line) => line?,
                None => return Ok(None),
            };
            let parts: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
            if !parts.is_empty() {
                return Ok(Some(parts));
            }
        }
    }
}

fn print_analyses(analyses: &[GuessAnalysis]) {
    if analyses.is_empty() {
        println!("No possible words remaining.");
        return;
    }
    println!();
    println!("{:>4} {:>10} {:>8} {:>12} Possible?", "#", "Word", "Entropy", "Exp. Remain");
    println!("{}", "-".repeat(52));
    for (i, analysis) in analyses.iter().enumerate() {
        println!(
            "{:>4} {:>10} {:>8.3} {:>12.1} {}",
            i + 1,
            analysis.word,
            analysis.entropy,
            analysis.expected_remaining,
            if analysis.is_possible_answer { "✓" } else { "" }
        );
    }
    println!();
}

fn print_words<I: Iterator<Item = String>>(words: I) {
    let mut count = 0;
    for word in words {
        println!("{}", word);
        count += 1;
    }
    println!("({} words)", count);
}

fn add_words<F>(words: &[String], mut insert: F)
where
    F: FnMut(&str) -> Result<bool, String>,
{
    for word in words {
        match insert(word) {
            Ok(true) => println!("Added {}", word),
            Ok(false) => println!("{} is already in the dictionary", word),
            Err(e) => println!("Cannot add {}: {}", word, e),
        }
    }
}

fn show_feedback(parts: &[String]) {
    if parts.len() < 3 {
        println!("Usage: feedback <reference> <guess>");
        return;
    }
    let pattern = FeedbackPattern::generate(&parts[1], &parts[2]);
    println!("{}  {}", pattern, pattern.to_emoji_string());
}

fn play<R: BufRead>(game: &mut Game<'_>, prompt: &mut Prompt<R>) -> io::Result<Next> {
    println!(
        "New game: {} words, {} attempts.",
        game.remaining(),
        game.guesses_left()
    );

    while let Some(parts) = prompt.read("game")? {
        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => println!("{}", HELP_TEXT),
            "quit" | "exit" | "q" => return Ok(Next::Quit),
            "end" => {
                println!("The word was {}.", game.reference());
                return Ok(Next::Menu);
            }
            "new" => match parts.get(1) {
                Some(reference) => return Ok(Next::NewGame(reference.clone())),
                None => println!("Usage: new <reference>"),
            },
            "guess" | "g" => {
                let Some(word) = parts.get(1) else {
                    println!("Usage: guess <word>");
                    continue;
                };
                let prev_count = game.remaining();
                match game.guess(word) {
                    Ok(GuessOutcome::NotInDictionary) => println!("not_exists"),
                    Ok(GuessOutcome::Solved { attempts }) => {
                        println!("ok");
                        println!("🎉 Solved in {} guesses!", attempts);
                        return Ok(Next::Menu);
                    }
                    Ok(GuessOutcome::Feedback { pattern, remaining }) => {
                        println!("{}  {}", pattern, pattern.to_emoji_string());
                        println!(
                            "{} ({} → {}, {} attempts left)",
                            remaining,
                            prev_count,
                            remaining,
                            game.guesses_left()
                        );
                    }
                    Ok(GuessOutcome::Lost { pattern, remaining }) => {
                        println!("{}  {}", pattern, pattern.to_emoji_string());
                        println!("{}", remaining);
                        println!("ko");
                        println!("The word was {}.", game.reference());
                        return Ok(Next::Menu);
                    }
                    Err(e) => println!("Invalid guess: {}", e),
                }
            }
            "remaining" | "r" | "left" => print_words(game.candidates()),
            "count" | "c" => println!("{}", game.remaining()),
            "add" => add_words(&parts[1..], |w| game.insert(w).map_err(|e| e.to_string())),
            "suggest" | "s" | "top" => {
                let n = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                print_analyses(&game.suggest(n));
            }
            "hard" | "hardmode" => {
                let enabled = !game.is_hard_mode();
                game.set_hard_mode(enabled);
                println!("Hard mode: {}", if enabled { "ON" } else { "OFF" });
            }
            "feedback" | "f" => show_feedback(&parts),
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
            }
        }
    }
    Ok(Next::Quit)
}

fn run_interactive<R: BufRead>(
    dictionary: &mut Dictionary,
    prompt: &mut Prompt<R>,
    mut pending: Option<String>,
) -> io::Result<()> {
    loop {
        if let Some(reference) = pending.take() {
            match dictionary.new_game(&reference) {
                Ok(mut game) => match play(&mut game, prompt)? {
                    Next::Menu => {}
                    Next::NewGame(next) => pending = Some(next),
                    Next::Quit => return Ok(()),
                },
                Err(e) => println!("Cannot start a game: {}", e),
            }
            continue;
        }

        let Some(parts) = prompt.read("")? else {
            return Ok(());
        };
        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => println!("{}", HELP_TEXT),
            "quit" | "exit" | "q" => return Ok(()),
            "new" => match parts.get(1) {
                Some(reference) => pending = Some(reference.clone()),
                None => println!("Usage: new <reference>"),
            },
            "remaining" | "r" | "words" => print_words(dictionary.words()),
            "count" | "c" => println!("{}", dictionary.len()),
            "add" => add_words(&parts[1..], |w| {
                dictionary.insert(w).map_err(|e| e.to_string())
            }),
            "suggest" | "s" | "top" => {
                let n = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                let words: Vec<String> = dictionary.words().collect();
                print_analyses(&analysis::rank_guesses(&words, &words, n));
            }
            "feedback" | "f" => show_feedback(&parts),
            "guess" | "g" | "end" | "hard" => println!("No game in progress. Use 'new <reference>'."),
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let file = match File::open(&args.dictionary) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open {}: {}", args.dictionary.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let mut dictionary = match Dictionary::from_reader(args.config(), BufReader::new(file)) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("Cannot load {}: {}", args.dictionary.display(), e);
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} words.", dictionary.len());
    println!("Type 'help' for commands or 'new <reference>' to start a game.");

    let stdin = io::stdin();
    let mut prompt = Prompt {
        lines: stdin.lock().lines(),
    };
    match run_interactive(&mut dictionary, &mut prompt, args.reference.clone()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}
