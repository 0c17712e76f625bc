use minefield::{Action, Game, GameError, GameStatus, Position, MINE};
use std::io::{self, Write};

fn main() {
    match run_game() {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game() -> Result<(), GameError> {
    let mut game = Game::new(10, 10, 10)?;

    while game.status() == GameStatus::InProgress {
        print_board(&game);

        if let Some((pos, action)) = get_user_input(&game) {
            if let Err(e) = game.perform_action(pos, action) {
                println!("Error: {}", e);
                continue;
            }
        }
    }

    print_board(&game);
    match game.status() {
        GameStatus::Won => println!("Congratulations! You won!"),
        GameStatus::Lost => println!("Game Over!"),
        GameStatus::InProgress => unreachable!(),
    }

    Ok(())
}

fn print_board(game: &Game) {
    let (rows, cols) = game.dimensions();

    // Print column numbers
    print!("  ");
    for col in 0..cols {
        print!("{} ", col);
    }
    println!();

    // Print rows
    for row in 0..rows {
        print!("{} ", row);
        for col in 0..cols {
            let pos = Position::new(row as i32, col as i32);
            let cell = game.get_cell(pos).unwrap();
            match (cell.revealed, cell.flagged, cell.value) {
                (false, true, _) => print!("⚑ "),
                (false, false, _) => print!("□ "),
                (true, _, MINE) => print!("* "),
                (true, _, 0) => print!("  "),
                (true, _, n) => print!("{} ", n),
            }
        }
        println!();
    }

    println!("Mines left: {}", game.flags_remaining());
}

fn get_user_input(game: &Game) -> Option<(Position, Action)> {
    print!("Enter command (row col [r/f]): ");
    io::stdout().flush().unwrap();

    let mut input = String::new();
    io::stdin().read_line(&mut input).ok()?;

    let mut parts = input.split_whitespace();

    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    let action = parts.next()?.chars().next()?;

    let pos = Position::new(row, col);

    if game.get_cell(pos).is_err() {
        println!("Position out of bounds");
        return None;
    }

    let action = match action {
        'r' => Some(Action::Reveal),
        'f' => Some(Action::Flag),
        _ => {
            println!("Invalid action. Use 'r' to reveal or 'f' to flag");
            None
        }
    }?;

    Some((pos, action))
}
