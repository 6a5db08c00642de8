use bubbletea_rs::{KeyMsg, Model, Msg};
use countdown_timer::config::{Settings, Startup};
use countdown_timer::prelude::*;
use countdown_timer::App;
use crossterm::event::{KeyCode, KeyModifiers};

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn quiet_app() -> App {
    App::with_alerts(Startup::default(), Box::new(Silent))
}

#[test]
fn test_full_countdown_cycle() {
    let mut countdown = Countdown::new(Silent);
    assert_eq!(countdown.configure("0", "3"), Ok(3));

    let effects = countdown.start().unwrap();
    assert_eq!(effects.tick, Some(TickControl::Arm));

    let shown: Vec<String> = (0..3)
        .filter_map(|_| countdown.on_tick().display)
        .collect();
    assert_eq!(shown, vec!["00:02", "00:01", "00:00"]);
    assert_eq!(countdown.phase(), Phase::Finished);
    assert_eq!(countdown.alerts_fired(), 1);

    // Extra ticks after finishing change nothing.
    let effects = countdown.on_tick();
    assert_eq!(effects, Effects::default());
    assert_eq!(countdown.alerts_fired(), 1);
}

#[test]
fn test_pause_resume_then_reset() {
    let mut countdown = Countdown::new(Silent);
    countdown.configure("1", "0").unwrap();
    let _ = countdown.start();
    let _ = countdown.on_tick();

    let effects = countdown.pause().unwrap();
    assert_eq!(effects.tick, Some(TickControl::Disarm));
    let _ = countdown.on_tick();
    assert_eq!(countdown.remaining_seconds(), 59);

    let effects = countdown.start().unwrap();
    assert_eq!(effects.display.as_deref(), Some("00:59"));

    let effects = countdown.reset();
    assert_eq!(effects.display.as_deref(), Some("00:00"));
    assert_eq!(countdown.phase(), Phase::Idle);
    assert_eq!(countdown.remaining_seconds(), 0);
}

#[test]
fn test_invalid_durations_are_rejected() {
    let mut countdown = Countdown::new(Silent);
    assert_eq!(countdown.configure("0", "0"), Err(InvalidInput::NotPositive));
    assert!(matches!(
        countdown.configure("x", "5"),
        Err(InvalidInput::NotNumeric { .. })
    ));
    assert!(countdown.start().is_none());
    assert_eq!(countdown.phase(), Phase::Idle);
}

#[test]
fn test_app_starts_from_prefilled_fields() {
    let mut app = App::with_alerts(
        Startup {
            settings: Settings::default(),
            minutes: Some("2".into()),
            seconds: Some("5".into()),
        },
        Box::new(Silent),
    );

    assert!(app.update(key(KeyCode::Enter)).is_some());
    assert_eq!(app.phase(), Phase::Running);
    assert_eq!(app.clock(), "02:05");

    let _ = app.update(key(KeyCode::Char('p')));
    assert_eq!(app.phase(), Phase::Paused);
    let view = strip_ansi_escapes::strip_str(app.view());
    assert!(view.contains("Paused"));
    assert!(view.contains("enter resume"));

    let _ = app.update(key(KeyCode::Char('r')));
    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(app.clock(), "00:00");
}

#[test]
fn test_app_reports_bad_input_in_a_modal() {
    let mut app = quiet_app();
    let _ = app.update(key(KeyCode::Enter));
    assert_eq!(app.phase(), Phase::Idle);

    let view = strip_ansi_escapes::strip_str(app.view());
    assert!(view.contains("Invalid Input"));
    assert!(view.contains("Enter a positive time!"));

    let _ = app.update(key(KeyCode::Enter));
    assert!(app.modal().is_none());
}

#[test]
fn test_app_preset_keys_fill_fields() {
    let mut app = quiet_app();
    let _ = app.update(key(KeyCode::F(3)));
    assert_eq!(app.fields(), ("10", "0"));

    assert!(app.update(key(KeyCode::Enter)).is_some());
    assert_eq!(app.clock(), "10:00");
}
