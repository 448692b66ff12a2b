//! Shell integration tests — keys in, engine calls out, text back.

use narrative_shell::core::config::ShellConfig;
use narrative_shell::core::dispatch::{dispatch, CommandDispatcher, DispatchError};
use narrative_shell::core::engine::{GameState, NarrativeEngine};
use narrative_shell::core::session::{Session, SessionError};
use narrative_shell::schema::command::Key;
use narrative_shell::schema::glyph::Weight;
use std::cell::RefCell;
use std::fmt;

#[derive(Debug)]
struct StoryError(String);

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StoryError {}

/// Records every call with the state token it was given. The token is a
/// turn counter that each call increments.
#[derive(Default)]
struct RecordingEngine {
    narrative: String,
    calls: RefCell<Vec<(String, u32)>>,
}

impl RecordingEngine {
    fn calls(&self) -> Vec<(String, u32)> {
        self.calls.borrow().clone()
    }

    fn respond(&self, call: String, state: u32) -> GameState<u32> {
        let text = format!("#{}# at turn {}", call, state + 1);
        self.calls.borrow_mut().push((call, state));
        GameState::new(text, state + 1)
    }
}

impl NarrativeEngine for RecordingEngine {
    type State = u32;
    type Error = StoryError;

    fn compile(narrative: &str) -> Result<Self, StoryError> {
        if narrative.trim().is_empty() {
            return Err(StoryError("empty narrative".to_string()));
        }
        Ok(Self {
            narrative: narrative.to_string(),
            ..Self::default()
        })
    }

    fn start(&self) -> Result<GameState<u32>, StoryError> {
        Ok(GameState::new(self.narrative.clone(), 0))
    }

    fn query(&self, verb: &str, arg: &str, state: &u32) -> Result<GameState<u32>, StoryError> {
        if arg == "crash" {
            return Err(StoryError(format!("{} cannot handle crash", verb)));
        }
        Ok(self.respond(format!("{} {}", verb, arg), *state))
    }

    fn print_current_room(&self, state: &u32) -> Result<GameState<u32>, StoryError> {
        Ok(self.respond("ROOM".to_string(), *state))
    }

    fn print_inventory(&self, state: &u32) -> Result<GameState<u32>, StoryError> {
        Ok(self.respond("INVENTORY".to_string(), *state))
    }
}

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn type_line(session: &mut Session<RecordingEngine>, text: &str) -> Result<bool, DispatchError> {
    for ch in text.chars() {
        session.handle_key(&Key::Char(ch))?;
    }
    session.handle_key(&Key::Enter)
}

fn engine() -> RecordingEngine {
    RecordingEngine::compile("A cellar.").unwrap()
}

#[test]
fn examine_issues_query_with_current_state() {
    let engine = engine();
    let next = dispatch(&toks(&["examine", "lantern"]), &engine, &5).unwrap();
    assert_eq!(engine.calls(), vec![("EXAMINE lantern".to_string(), 5)]);
    assert_eq!(*next.to_state(), 6);
    assert_eq!(next.to_string(), "#EXAMINE lantern# at turn 6");
}

#[test]
fn blank_command_describes_room() {
    let engine = engine();
    dispatch(&toks(&[""]), &engine, &0).unwrap();
    assert_eq!(engine.calls(), vec![("ROOM".to_string(), 0)]);
}

#[test]
fn verbs_map_to_engine_calls() {
    let engine = engine();
    let cases: [(&[&str], &str); 7] = [
        (&["use", "key"], "USE key"),
        (&["talk", "to", "keeper"], "TALK keeper"),
        (&["go", "north"], "GO north"),
        (&["take", "rope"], "TAKE rope"),
        (&["help"], "HELP help"),
        (&["inventory"], "INVENTORY"),
        (&["dance", "wildly"], "MISC dance"),
    ];
    for (words, _) in &cases {
        dispatch(&toks(words), &engine, &0).unwrap();
    }
    let recorded: Vec<String> = engine.calls().into_iter().map(|(c, _)| c).collect();
    let expected: Vec<String> = cases.iter().map(|(_, c)| c.to_string()).collect();
    assert_eq!(recorded, expected);
}

#[test]
fn dispatcher_threads_latest_state() {
    let (mut dispatcher, opening) = CommandDispatcher::start(engine()).unwrap();
    assert_eq!(opening, "A cellar.");
    assert_eq!(*dispatcher.state(), 0);

    dispatcher.dispatch(&toks(&["go", "up"])).unwrap();
    dispatcher.dispatch(&toks(&["inventory"])).unwrap();
    dispatcher.dispatch(&toks(&[""])).unwrap();

    assert_eq!(*dispatcher.state(), 3);
    let states: Vec<u32> = dispatcher.engine().calls().into_iter().map(|(_, s)| s).collect();
    assert_eq!(states, vec![0, 1, 2]);
}

#[test]
fn engine_error_keeps_previous_state() {
    let (mut dispatcher, _) = CommandDispatcher::start(engine()).unwrap();
    dispatcher.dispatch(&toks(&["go", "up"])).unwrap();

    let err = dispatcher.dispatch(&toks(&["take", "crash"])).unwrap_err();
    assert!(matches!(err, DispatchError::Engine { .. }));
    assert!(err.to_string().contains("TAKE"));
    assert_eq!(*dispatcher.state(), 1);

    dispatcher.dispatch(&toks(&["go", "down"])).unwrap();
    assert_eq!(dispatcher.engine().calls().last().unwrap().1, 1);
}

#[test]
fn session_bootstrap_joins_lines() {
    let lines = ["You wake in a cellar.", "A #lantern# hangs here."];
    let session: Session<RecordingEngine> =
        Session::bootstrap(&lines, ShellConfig::default()).unwrap();
    assert_eq!(
        session.display_text(),
        "You wake in a cellar. A lantern hangs here."
    );
    assert_eq!(*session.state(), 0);
}

#[test]
fn session_bootstrap_reports_compile_failure() {
    let lines: [&str; 1] = ["   "];
    let result: Result<Session<RecordingEngine>, _> =
        Session::bootstrap(&lines, ShellConfig::default());
    assert!(matches!(result, Err(SessionError::Compile(_))));
}

#[test]
fn typed_command_reaches_engine_and_redraws() {
    let mut session = Session::with_engine(engine(), ShellConfig::default()).unwrap();

    assert!(!session.handle_key(&Key::Char('G')).unwrap());
    assert!(!session.handle_key(&Key::Char('o')).unwrap());
    assert_eq!(session.frame().command_line, "> Go");

    assert!(type_line(&mut session, " North").unwrap());
    assert_eq!(session.display_text(), "GO north at turn 1");
    assert_eq!(session.display()[0].weight, Weight::Bold);
    assert_eq!(session.frame().command_line, "> ");
    assert_eq!(*session.state(), 1);
}

#[test]
fn empty_enter_redescribes_room() {
    let mut session = Session::with_engine(engine(), ShellConfig::default()).unwrap();
    assert!(session.handle_key(&Key::Enter).unwrap());
    assert_eq!(session.display_text(), "ROOM at turn 1");
}

#[test]
fn failed_command_keeps_display() {
    let mut session = Session::with_engine(engine(), ShellConfig::default()).unwrap();
    type_line(&mut session, "look around").unwrap();
    let before = session.display_text();

    assert!(type_line(&mut session, "take crash").is_err());
    assert_eq!(session.display_text(), before);
    assert_eq!(*session.state(), 1);
    assert_eq!(session.editor().line(), "> ");
}

#[test]
fn frame_is_stable_between_keys() {
    let config = ShellConfig::parse_ron(
        "(prompt: \"$ \", text_box: (origin_x: 1.0, origin_y: 2.0, width: 10.0, \
         slack: 3.0, line_height: 1.0, advance: 1.0), prompt_origin: (1.0, 9.0))",
    )
    .unwrap();
    let session = Session::with_engine(engine(), config).unwrap();

    let first = session.frame();
    let second = session.frame();
    assert_eq!(first, second);
    assert_eq!(first.command_line, "$ ");
    assert_eq!(first.command_origin, (1.0, 9.0));
    assert_eq!((first.text[0].x, first.text[0].y), (1.0, 2.0));
}
