use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use board_games::core::utils::{file_labels, parse_move, rank_label};
use board_games::{
    Board, Color, Game, GameError, GameEvent, GameShell, GameState, GameVariant, Position, Prompt,
};
use clap::Parser;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Chess, checkers and extended chess in the terminal", long_about = None)]
struct Args {
    /// Game to play: chess, checkers or extended. Asked interactively when omitted.
    #[arg(long)]
    variant: Option<GameVariant>,
}

struct Console<R> {
    input: R,
    closed: bool,
}

impl<R: BufRead> Console<R> {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        println!("{question}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Like `ask`, but a broken stdin just closes the console.
    fn answer(&mut self, question: &str) -> Option<String> {
        self.ask(question).unwrap_or_else(|err| {
            warn!("Failed to read input: {err}");
            self.closed = true;
            None
        })
    }
}

impl<R: BufRead> GameShell for Console<R> {
    fn confirm(&mut self, player: Color, prompt: Prompt) -> bool {
        let question = match prompt {
            Prompt::Castle => format!("{player}, castle king-side? (yes/no):"),
            Prompt::Undo => format!("{player}, undo the last move? (yes/no):"),
        };
        self.answer(&question)
            .is_some_and(|answer| matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
    }

    fn read_move(&mut self, player: Color) -> Result<(Position, Position), GameError> {
        let line = self
            .answer(&format!("{player} to move (e.g. e7 e5):"))
            .ok_or(GameError::MalformedInput)?;
        parse_move(&line)
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Moved { from, to } => println!("Moved {from} -> {to}"),
            GameEvent::Captured { by, at } => println!("{by} captures on {at}"),
            GameEvent::Promoted { color, at } => println!("{color} piece on {at} became a king!"),
            GameEvent::ExtraTurn(player) => println!("{player} may capture again"),
            GameEvent::Castled(player) => println!("{player} castled"),
            GameEvent::Undone => println!("Last move undone"),
            GameEvent::Rejected(err) => println!("{err}, try again"),
            GameEvent::GameOver(Some(winner)) => {
                println!("Game over! {winner} wins, {} lost", winner.opposite())
            }
            GameEvent::GameOver(None) => println!("Game over! Nobody is left standing"),
        }
    }
}

fn print_board(board: &Board) {
    let files: String = file_labels().iter().map(|file| format!("{file} ")).collect();
    println!("\n     {files}\n");
    for (row, glyphs) in board.render().iter().enumerate() {
        let glyphs: Vec<String> = glyphs.iter().map(char::to_string).collect();
        let rank = rank_label(row);
        println!("{rank}    {}    {rank}", glyphs.join(" "));
    }
    println!("\n     {files}\n");
}

fn choose_variant<R: BufRead>(console: &mut Console<R>) -> Result<Option<GameVariant>> {
    let answer = console
        .ask("Choose a game: 'chess', 'checkers' or 'extended':")
        .context("failed to read the game choice")?;
    match answer {
        Some(answer) => Ok(Some(answer.parse()?)),
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut console = Console {
        input: io::stdin().lock(),
        closed: false,
    };
    let variant = match args.variant {
        Some(variant) => variant,
        None => match choose_variant(&mut console)? {
            Some(variant) => variant,
            None => return Ok(()),
        },
    };
    info!("Starting a game of {variant}");

    let mut game = Game::new(variant);
    loop {
        print_board(game.board());
        if let GameState::Finished(_) = game.play_turn(&mut console) {
            print_board(game.board());
            break;
        }
        if console.closed {
            info!("Input closed, leaving the game");
            break;
        }
    }
    Ok(())
}
