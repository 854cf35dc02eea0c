use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::thread;

use tsp_puzzle::events::{Channel, EventEmitter};
use tsp_puzzle::game::{Session, Settings};
use tsp_puzzle::helpers::format_distance;
use tsp_puzzle::model::{
    CitySet, Difficulty, ReplayChoice, RoundOutcome, SessionCommand, SessionEvent, SessionState,
};
use tsp_puzzle::Destroyable;

const HELP: &str = "\
commands:
  <n>     visit city n
  r       reveal the optimal tour
  y / n   after a loss: replay the same map / play a new map
  new     new map
  easy    4 cities (resets score)
  hard    7 cities (resets score)
  reset   reset score and start over
  stats   print session statistics
  q       quit";

fn init_logging() {
    env_logger::init();
}

fn print_round(cities: &CitySet) {
    println!("cities:");
    print!("{}", cities);
    println!("distances:");
    for (from, to, length) in cities.pairwise_distances() {
        println!(
            "  {} - {}: {}",
            CitySet::label(from),
            CitySet::label(to),
            format_distance(length, 1)
        );
    }
}

fn render_event(event: &SessionEvent) {
    match event {
        SessionEvent::RoundStarted {
            cities, difficulty, ..
        } => {
            println!("\n== new {} round ==", difficulty);
            print_round(cities);
        }
        SessionEvent::RoundReplayed { cities } => {
            println!("\n== same map again ==");
            print_round(cities);
        }
        SessionEvent::DistancesReset => println!("your distance: 0 | optimal distance: 0"),
        SessionEvent::EdgeAdded { from, to } => {
            println!("  {} -> {}", CitySet::label(*from), CitySet::label(*to))
        }
        SessionEvent::OptimalLengthRevealed(length) => {
            println!("optimal distance: {}", format_distance(*length, 2))
        }
        SessionEvent::RevealEdge { from, to } => {
            println!("  bot: {} -> {}", CitySet::label(*from), CitySet::label(*to))
        }
        SessionEvent::RevealCompleted => println!("bot finished"),
        SessionEvent::RoundCompleted(result) => {
            let player = result
                .player_length
                .map(|length| format_distance(length, 2))
                .unwrap_or_else(|| "incomplete".to_string());
            println!(
                "your distance: {} | optimal distance: {} ({})",
                player,
                format_distance(result.optimal_length, 2),
                result.optimal_tour
            );
            match result.outcome {
                RoundOutcome::Win => println!("You found the optimal tour! +1 point."),
                RoundOutcome::Loss => println!("Your tour is not optimal. -1 point."),
                RoundOutcome::GameOver => {
                    println!("Your tour is not optimal. Game over, starting again.")
                }
            }
        }
        SessionEvent::DecisionRequested => {
            println!("Replay the current map? [y/n]")
        }
        SessionEvent::ScoreChanged(score) => println!("score: {}", score),
        SessionEvent::StateChanged(_) => (),
    }
}

fn parse_command(line: &str) -> Option<SessionCommand> {
    let command = match line {
        "r" | "reveal" => SessionCommand::RevealOptimal,
        "y" | "yes" => SessionCommand::Decide(ReplayChoice::ReplaySameCities),
        "n" | "no" => SessionCommand::Decide(ReplayChoice::NewRound),
        "new" => SessionCommand::StartRound {
            difficulty: None,
            seed: None,
        },
        "reset" => SessionCommand::ResetGame,
        other => {
            if let Ok(difficulty) = other.parse::<Difficulty>() {
                SessionCommand::ChangeDifficulty(difficulty)
            } else {
                let label = other.parse::<usize>().ok()?;
                SessionCommand::SelectCity(label.checked_sub(1)?)
            }
        }
    };
    Some(command)
}

fn run_reveal(session: &Rc<RefCell<Session>>, commands: &EventEmitter<SessionCommand>) {
    let interval = session.borrow().reveal_interval();
    while session.borrow().state() == SessionState::BotRevealing {
        thread::sleep(interval);
        commands.emit(&SessionCommand::AdvanceTime(interval));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::from_env(),
    };

    let (command_emitter, command_observer) = Channel::<SessionCommand>::new();
    let (event_emitter, event_observer) = Channel::<SessionEvent>::new();
    let _renderer = event_observer.subscribe(render_event);

    println!("{}", HELP);
    let session = Session::new(command_observer, event_emitter, settings)?;

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim().to_ascii_lowercase();
        match line.as_str() {
            "" => (),
            "q" | "quit" => break,
            "h" | "help" => println!("{}", HELP),
            "stats" => println!("{}", session.borrow().stats_json()?),
            other => match parse_command(other) {
                Some(command) => {
                    command_emitter.emit(&command);
                    if matches!(command, SessionCommand::RevealOptimal) {
                        run_reveal(&session, &command_emitter);
                    }
                }
                None => println!("unknown command: {}", other),
            },
        }
        print!("> ");
        io::stdout().flush()?;
    }

    session.borrow_mut().destroy();
    Ok(())
}
