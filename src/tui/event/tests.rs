use super::*;
use crate::stream::ServerEvent;
use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};
use futures::stream;
use tokio::time::timeout;

fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn idle_input() -> stream::Pending<io::Result<CrosstermEvent>> {
    stream::pending()
}

fn scripted_input(
    events: Vec<CrosstermEvent>,
) -> impl Stream<Item = io::Result<CrosstermEvent>> + Unpin {
    stream::iter(events.into_iter().map(Ok)).chain(stream::pending())
}

// --- key mapping ---

fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Action {
    handle_key_event(make_key(code, modifiers))
}

#[test]
fn test_q_quits() {
    assert_eq!(action_for(KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit);
}

#[test]
fn test_ctrl_c_quits() {
    assert_eq!(
        action_for(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Action::Quit
    );
}

#[test]
fn test_plain_c_does_not_quit() {
    assert_eq!(action_for(KeyCode::Char('c'), KeyModifiers::NONE), Action::None);
}

#[test]
fn test_enter_and_esc_do_not_quit() {
    assert_eq!(action_for(KeyCode::Enter, KeyModifiers::NONE), Action::None);
    assert_eq!(action_for(KeyCode::Esc, KeyModifiers::NONE), Action::None);
}

#[test]
fn test_r_requests_refresh() {
    assert_eq!(
        handle_key_event(make_key(KeyCode::Char('r'), KeyModifiers::NONE)),
        Action::Refresh
    );
}

#[test]
fn test_other_keys_are_ignored() {
    for code in [KeyCode::Char('x'), KeyCode::Up, KeyCode::F(5), KeyCode::Tab] {
        assert_eq!(
            handle_key_event(make_key(code, KeyModifiers::NONE)),
            Action::None
        );
    }
}

#[test]
fn test_event_handler_creation() {
    let handler = EventHandler::new(Some(Duration::from_millis(250)));
    assert_eq!(handler.tick_rate, Some(Duration::from_millis(250)));
    assert!(handler.stream_open());
}

// --- multiplexing ---

#[tokio::test]
async fn test_key_press_is_reported() {
    let mut handler = EventHandler::new(None);
    let (_tx, mut rx) = mpsc::channel(4);
    let key = make_key(KeyCode::Char('q'), KeyModifiers::NONE);
    let mut input = scripted_input(vec![CrosstermEvent::Key(key)]);

    let event = handler.next(&mut input, &mut rx).await.expect("event");
    assert_eq!(event, Event::Key(key));
}

#[tokio::test]
async fn test_key_release_and_mouse_are_skipped() {
    let mut handler = EventHandler::new(None);
    let (_tx, mut rx) = mpsc::channel(4);
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    let mouse = MouseEvent {
        kind: MouseEventKind::Moved,
        column: 1,
        row: 1,
        modifiers: KeyModifiers::NONE,
    };
    let mut input = scripted_input(vec![
        CrosstermEvent::Key(release),
        CrosstermEvent::Mouse(mouse),
        CrosstermEvent::FocusGained,
        CrosstermEvent::Resize(100, 30),
    ]);

    let event = handler.next(&mut input, &mut rx).await.expect("event");
    assert_eq!(event, Event::Resize(100, 30));
}

#[tokio::test]
async fn test_stream_messages_arrive_in_order() {
    let mut handler = EventHandler::new(None);
    let (tx, mut rx) = mpsc::channel(4);
    let mut input = idle_input();
    for i in 0..3 {
        tx.send(StreamMessage::Event(ServerEvent {
            event: "message".to_string(),
            data: format!("{{\"levels\":[{i}]}}"),
            id: None,
        }))
        .await
        .expect("send");
    }

    for i in 0..3 {
        match handler.next(&mut input, &mut rx).await.expect("event") {
            Event::Stream(StreamMessage::Event(event)) => {
                assert_eq!(event.data, format!("{{\"levels\":[{i}]}}"));
            }
            other => panic!("expected stream event, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_closed_stream_reported_once() {
    let mut handler = EventHandler::new(Some(Duration::from_millis(10)));
    let (tx, mut rx) = mpsc::channel::<StreamMessage>(1);
    drop(tx);
    let mut input = idle_input();

    let event = handler.next(&mut input, &mut rx).await.expect("event");
    assert_eq!(event, Event::StreamClosed);
    assert!(!handler.stream_open());

    let event = timeout(Duration::from_secs(2), handler.next(&mut input, &mut rx))
        .await
        .expect("tick within timeout")
        .expect("event");
    assert_eq!(event, Event::Tick);
}

#[tokio::test]
async fn test_tick_fires_after_rate() {
    let mut handler = EventHandler::new(Some(Duration::from_millis(20)));
    let (_tx, mut rx) = mpsc::channel::<StreamMessage>(1);
    let mut input = idle_input();

    let started = Instant::now();
    let event = timeout(Duration::from_secs(2), handler.next(&mut input, &mut rx))
        .await
        .expect("tick within timeout")
        .expect("event");
    assert_eq!(event, Event::Tick);
    assert!(started.elapsed() >= Duration::from_millis(20));
}

#[tokio::test]
async fn test_no_tick_when_disabled() {
    let mut handler = EventHandler::new(None);
    let (_tx, mut rx) = mpsc::channel::<StreamMessage>(1);
    let mut input = idle_input();

    let waited = timeout(
        Duration::from_millis(50),
        handler.next(&mut input, &mut rx),
    )
    .await;
    assert!(waited.is_err());
}

#[tokio::test]
async fn test_input_end_is_an_error() {
    let mut handler = EventHandler::new(None);
    let (_tx, mut rx) = mpsc::channel::<StreamMessage>(1);
    let mut input = stream::iter(Vec::<io::Result<CrosstermEvent>>::new());

    let err = handler
        .next(&mut input, &mut rx)
        .await
        .expect_err("ended input");
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[tokio::test]
async fn test_input_error_propagates() {
    let mut handler = EventHandler::new(None);
    let (_tx, mut rx) = mpsc::channel::<StreamMessage>(1);
    let mut input = stream::iter(vec![Err(io::Error::other("tty gone"))]);

    let err = handler
        .next(&mut input, &mut rx)
        .await
        .expect_err("input error");
    assert_eq!(err.to_string(), "tty gone");
}
