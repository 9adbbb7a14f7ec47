//! CLI Montana example.

use std::io::{self, Write};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use montana::{COLUMNS, Card, Game, GameOptions, GamePhase, ROWS, SlotId, Suit};

fn main() {
    println!("Montana CLI example");
    println!("Enter a slot as 'row col' (e.g. '2 5'), 's' to shuffle, 'n' for a new game, 'q' to quit.");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let game = Game::new(GameOptions::default(), seed);

    game.on_new_game_requested();
    deal(&game);

    loop {
        print_table(&game);

        if game.phase() == GamePhase::Won {
            println!("All rows complete. You win!");
            match prompt_line("Play again? (y/n): ").as_str() {
                "y" | "yes" => {
                    game.on_new_game_requested();
                    deal(&game);
                    continue;
                }
                _ => break,
            }
        }

        let input = prompt_line(&format!("[{} shuffles left] > ", game.shuffles_left()));
        match input.as_str() {
            "q" | "quit" => break,
            "s" | "shuffle" => match game.request_shuffle() {
                Ok(_) => deal(&game),
                Err(err) => println!("Shuffle error: {err}"),
            },
            "n" | "new" => {
                if game.needs_confirmation()
                    && !matches!(prompt_line("Abandon this game? (y/n): ").as_str(), "y" | "yes")
                {
                    continue;
                }
                game.on_new_game_requested();
                deal(&game);
            }
            _ => match parse_slot(&input) {
                Some(id) => {
                    if let Err(err) = game.activate_slot(id) {
                        println!("Move error: {err}");
                    }
                }
                None => println!("Unknown command."),
            },
        }
    }
}

fn deal(game: &Game) {
    if let Err(err) = game.run_dealing(thread::sleep) {
        println!("Deal error: {err}");
    }
}

fn parse_slot(input: &str) -> Option<SlotId> {
    let mut parts = input.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let column = parts.next()?.parse().ok()?;
    SlotId::new(row, column)
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::from("q");
    }
    input.trim().to_lowercase()
}

fn print_table(game: &Game) {
    println!();
    print!("    ");
    for column in 0..COLUMNS {
        print!("{column:>4}");
    }
    println!();

    for row in 0..ROWS {
        print!("{row:>3} ");
        for column in 0..COLUMNS {
            let cell = SlotId::new(row, column)
                .and_then(|id| game.card_at(id))
                .map_or_else(|| "  ..".to_string(), |card| format_card(game, card));
            print!("{cell}");
        }
        println!();
    }
    println!();
}

fn format_card(game: &Game, card: Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs | Suit::Spades => "34",
    };
    let label = card.to_string();
    let text = format!("{label:>4}");
    if game.is_marked(card) {
        colorize(&text, &format!("1;{color_code};42"))
    } else {
        colorize(&text, color_code)
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
