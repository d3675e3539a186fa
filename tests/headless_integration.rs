use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use multitrainer::app::{App, AppAction};
use multitrainer::runtime::{DrillEvent, Runner, TestEventSource};
use multitrainer::{GameConfig, GamePhase, HistoryStore};

fn key(c: char) -> DrillEvent {
    DrillEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> DrillEvent {
    DrillEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

fn drive(app: &mut App, runner: &Runner<TestEventSource>, max_steps: u32) {
    for _ in 0..max_steps {
        let shown = app.question_index();
        match runner.step() {
            DrillEvent::Tick(dt) => app.on_tick(dt),
            DrillEvent::Resize => {}
            DrillEvent::Key(k) => {
                if app.handle_key(k) == AppAction::Quit {
                    break;
                }
            }
        }
        if app.question_index() != shown {
            runner.restart_clock();
        }
        if app.game.phase() == GamePhase::Results {
            break;
        }
    }
}

// Headless run: setup, answer every question through the event runner,
// land on the results screen with the session saved.
#[test]
fn headless_round_completes() {
    let config = GameConfig {
        player_name: "Headless".into(),
        first_factors: vec![1],
        second_factor_range: (2, 2),
        total_questions: 3,
        ..GameConfig::default()
    };
    let mut app = App::new(config, HistoryStore::in_memory());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    // 1 x 2 is the only possible question
    tx.send(enter()).unwrap();
    for _ in 0..3 {
        tx.send(key('2')).unwrap();
        tx.send(enter()).unwrap();
    }

    drive(&mut app, &runner, 200);

    assert_eq!(app.game.phase(), GamePhase::Results);
    let session = app.game.session().unwrap();
    assert_eq!(session.questions().len(), 3);
    assert!(session.questions().iter().all(|q| q.is_correct()));
    assert!(session.total_score() >= 30);
    assert_eq!(app.history().get_player_history("Headless").len(), 1);
}

#[test]
fn headless_timed_out_round_scores_zero() {
    let config = GameConfig {
        first_factors: vec![9],
        time_per_question: 0.02,
        total_questions: 2,
        ..GameConfig::default()
    };
    let mut app = App::new(config, HistoryStore::in_memory());
    app.game.start_game(app.game.config().clone());

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    drive(&mut app, &runner, 200);

    assert_eq!(app.game.phase(), GamePhase::Results);
    let session = app.game.session().unwrap();
    assert!(session.questions().iter().all(|q| !q.is_answered()));
    assert_eq!(session.total_score(), 0);
}
