use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use multitrainer::{
    app::{App, AppAction},
    config::{ConfigStore, FileConfigStore, GameConfig},
    constants::TICK_RATE_MS,
    history::HistoryStore,
    runtime::{CrosstermEventSource, DrillEvent, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// multiplication drill tui with speed bonuses and score history
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice multiplication tables against the clock. Questions are dealt like cards so nothing repeats until every combination has come up, quick correct answers earn a bonus, and each player's scores are kept between runs."
)]
pub struct Cli {
    /// player name used for score history
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// comma separated factors to practice, e.g. 3,4,7
    #[clap(short = 'f', long, value_delimiter = ',')]
    factors: Option<Vec<u32>>,

    /// smallest second factor
    #[clap(long)]
    min: Option<u32>,

    /// largest second factor
    #[clap(long)]
    max: Option<u32>,

    /// seconds allowed per question
    #[clap(short = 's', long)]
    secs: Option<f64>,

    /// number of questions per game
    #[clap(short = 'q', long)]
    questions: Option<usize>,

    /// do not read or write score history
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    /// Layers the command line flags over the last-used settings.
    fn apply_to(&self, mut config: GameConfig) -> GameConfig {
        if let Some(name) = &self.name {
            config.player_name = name.clone();
        }
        if let Some(factors) = &self.factors {
            config.first_factors = factors.iter().copied().filter(|f| *f > 0).collect();
        }
        let (min, max) = config.second_factor_range;
        config.second_factor_range = (self.min.unwrap_or(min), self.max.unwrap_or(max));
        if let Some(secs) = self.secs.filter(|s| s.is_finite() && *s > 0.0) {
            config.time_per_question = secs;
        }
        if let Some(questions) = self.questions.filter(|q| *q > 0) {
            config.total_questions = questions;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let config = cli.apply_to(config_store.load());
    if config.second_factor_range.0 > config.second_factor_range.1 {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, "--min must not exceed --max").exit();
    }

    let history = if cli.no_save {
        HistoryStore::unavailable()
    } else {
        HistoryStore::open_default()
    };
    let mut app = App::new(config, history).with_config_store(config_store);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let shown = app.question_index();
        match runner.step() {
            DrillEvent::Tick(dt) => app.on_tick(dt),
            DrillEvent::Resize => {}
            DrillEvent::Key(key) => {
                if app.handle_key(key) == AppAction::Quit {
                    break;
                }
            }
        }
        if app.question_index() != shown {
            // a fresh question gets its full countdown
            runner.restart_clock();
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["multitrainer"]).unwrap();
        assert!(cli.name.is_none());
        assert!(cli.factors.is_none());
        assert!(!cli.no_save);
        assert_eq!(cli.apply_to(GameConfig::default()), GameConfig::default());
    }

    #[test]
    fn test_cli_factor_list() {
        let cli = Cli::try_parse_from(["multitrainer", "-f", "3,4,12"]).unwrap();
        assert_eq!(cli.factors, Some(vec![3, 4, 12]));
    }

    #[test]
    fn test_cli_rejects_non_numeric_factor() {
        assert!(Cli::try_parse_from(["multitrainer", "--factors", "3,x"]).is_err());
    }

    #[test]
    fn test_cli_overrides_stored_config() {
        let stored = GameConfig {
            player_name: "Old".into(),
            first_factors: vec![2],
            second_factor_range: (1, 10),
            time_per_question: 8.0,
            total_questions: 20,
        };
        let cli =
            Cli::try_parse_from(["multitrainer", "-n", "New", "--max", "5", "-s", "3"]).unwrap();
        let merged = cli.apply_to(stored);
        assert_eq!(merged.player_name, "New");
        assert_eq!(merged.first_factors, vec![2]);
        assert_eq!(merged.second_factor_range, (1, 5));
        assert_eq!(merged.time_per_question, 3.0);
        assert_eq!(merged.total_questions, 20);
    }

    #[test]
    fn test_cli_ignores_non_positive_values() {
        let cli = Cli::try_parse_from(["multitrainer", "-q", "0", "-s", "0", "-f", "0,6"]).unwrap();
        let merged = cli.apply_to(GameConfig::default());
        assert_eq!(merged.total_questions, 10);
        assert_eq!(merged.time_per_question, 5.0);
        assert_eq!(merged.first_factors, vec![6]);
    }

    #[test]
    fn test_cli_ignores_infinite_secs() {
        for secs in ["inf", "NaN"] {
            let cli = Cli::try_parse_from(["multitrainer", "-s", secs]).unwrap();
            assert_eq!(cli.apply_to(GameConfig::default()).time_per_question, 5.0);
        }
    }

    #[test]
    fn test_cli_no_save_flag() {
        let cli = Cli::try_parse_from(["multitrainer", "--no-save"]).unwrap();
        assert!(cli.no_save);
    }
}
