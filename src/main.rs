use std::{env, fs, process};

use chess_pgn::Game;

fn main() {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: chess-notation <game.pgn>");
            process::exit(2);
        }
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
    };

    let game = match Game::from_pgn(&text) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
    };

    for position in game.positions() {
        println!("{}", position.to_fen());
    }
    if let Some(last) = game.positions().last() {
        println!();
        print!("{}", last);
    }
}
