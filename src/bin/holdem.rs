use anyhow::{Context, Result};
use clap::Parser;
use holdem_engine::agents::{AgentTable, BotAgent, Progress, Style};
use holdem_engine::config::TableConfig;
use holdem_engine::events::GameEvent;
use holdem_engine::game::GameSession;
use std::path::PathBuf;

/// Seat a table of bots and play rounds of Texas Hold'em, printing every event.
#[derive(Parser, Debug)]
#[command(name = "holdem", version, about)]
struct Cli {
    /// TOML file with table settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of rounds to play
    #[arg(long, default_value_t = 5)]
    rounds: u64,
    /// Seated players (overrides the config file)
    #[arg(long)]
    players: Option<usize>,
    #[arg(long)]
    small_blind: Option<u64>,
    #[arg(long)]
    big_blind: Option<u64>,
    #[arg(long)]
    starting_chips: Option<u64>,
    /// Seed for shuffling and bot decisions
    #[arg(long)]
    seed: Option<u64>,
    /// Bot styles assigned in seating order, cycling when shorter than the table
    #[arg(long, value_delimiter = ',', default_value = "check-call,tight,loose,aggressive,conservative")]
    styles: Vec<Style>,
}

impl Cli {
    fn table_config(&self) -> Result<TableConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                TableConfig::from_toml_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => TableConfig::default(),
        };
        if let Some(n) = self.players {
            config.player_count = n;
        }
        if let Some(v) = self.small_blind {
            config.small_blind = v;
        }
        if let Some(v) = self.big_blind {
            config.big_blind = v;
        }
        if let Some(v) = self.starting_chips {
            config.starting_chips = v;
        }
        config.validate().context("invalid table settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = cli.table_config()?;

    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(config.clone(), seed)?,
        None => GameSession::new(config.clone())?,
    };
    session.set_sink(|event: &GameEvent| println!("{event}"));

    let styles = if cli.styles.is_empty() { vec![Style::CheckCall] } else { cli.styles.clone() };
    let mut agents = AgentTable::for_seats(config.table_size);
    for (i, seat) in config.seating_order().into_iter().enumerate() {
        let style = styles[i % styles.len()];
        let mut bot = BotAgent::new(style);
        if let Some(seed) = cli.seed {
            bot = bot.with_seed(seed.wrapping_add(seat as u64));
        }
        println!("seat {seat}: {style} bot");
        agents.set_agent(seat, Some(Box::new(bot)));
    }

    for _ in 0..cli.rounds {
        let funded = session.players().iter().filter(|p| p.chips() > 0).count();
        if funded < 2 {
            println!("only {funded} player(s) left with chips, stopping");
            break;
        }
        session.start_round()?;
        match agents.progress(&mut session)? {
            Progress::RoundComplete(settlement) => {
                for (seat, hand) in &settlement.hands {
                    println!("seat {seat} shows {hand}");
                }
            }
            Progress::AwaitingInput { seat } => {
                anyhow::bail!("seat {seat} has no agent to act for it");
            }
        }
    }

    println!("final stacks:");
    for seat in config.seating_order() {
        if let Some(p) = session.player(seat) {
            println!("  {} (seat {seat}): {}", p.name(), p.chips());
        }
    }
    Ok(())
}
