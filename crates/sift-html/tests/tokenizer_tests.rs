//! Integration tests for the markup tokenizer.

use sift_dom::Attributes;
use sift_html::{Event, ParseError, ParseOptions, Position, Tokenizer, TokenizerState};

/// Helper to run the tokenizer over a string and collect every event.
fn events(markup: &str) -> Vec<Event> {
    Tokenizer::new(markup.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .expect("in-memory input cannot fail")
}

fn text(content: &str) -> Event {
    Event::Text(content.to_string())
}

fn at(offset: u64, line: u32, column: u32) -> Position {
    Position {
        offset,
        line,
        column,
    }
}

/// Tag names of start and end events, prefixed with `/` for end tags.
fn tag_trace(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::StartTag { name, .. } => Some(name.clone()),
            Event::EndTag { name, .. } => Some(format!("/{name}")),
            _ => None,
        })
        .collect()
}

#[test]
fn test_simple_element() {
    let events = events("<p class=\"a\">Hi &amp; bye</p>");
    let attributes: Attributes = [("class", "a")].into_iter().collect();

    assert_eq!(
        events,
        vec![
            Event::StartTag {
                name: "p".to_string(),
                attributes,
                position: at(0, 1, 1),
            },
            text("Hi & bye"),
            Event::EndTag {
                name: "p".to_string(),
                position: at(25, 1, 26),
            },
        ]
    );
}

#[test]
fn test_self_closing_synthesizes_end_tag() {
    let events = events("<br/><img src=a.png />");
    assert_eq!(tag_trace(&events), vec!["br", "/br", "img", "/img"]);
}

#[test]
fn test_quoted_greater_than_does_not_end_tag() {
    let events = events("<a title=\"x>y\" alt='1>0'>t</a>");
    let Event::StartTag { attributes, .. } = &events[0] else {
        panic!("expected start tag, got {:?}", events[0]);
    };
    assert_eq!(attributes.get("title"), Some("x>y"));
    assert_eq!(attributes.get("alt"), Some("1>0"));
    assert_eq!(events[1], text("t"));
}

#[test]
fn test_script_body_is_raw() {
    let events = events("<script>if (a<b) { x(\"</div>\"); }</SCRIPT ><p>");
    assert_eq!(tag_trace(&events), vec!["script", "/script", "p"]);
    assert_eq!(events[1], text("if (a<b) { x(\"</div>\"); }"));
}

#[test]
fn test_raw_text_is_not_unescaped() {
    let events = events("<style>a::after { content: \"&amp;\" }</style>");
    assert_eq!(events[1], text("a::after { content: \"&amp;\" }"));
}

#[test]
fn test_raw_text_end_tag_position() {
    let events = events("<script>x</script>");
    assert_eq!(
        events[2],
        Event::EndTag {
            name: "script".to_string(),
            position: at(9, 1, 10),
        }
    );
}

#[test]
fn test_unterminated_raw_text_runs_to_end() {
    let events = events("<style>p { color: red }");
    assert_eq!(tag_trace(&events), vec!["style"]);
    assert_eq!(events[1], text("p { color: red }"));
}

#[test]
fn test_self_closing_script_has_no_body() {
    let events = events("<script src=\"a.js\"/><p>x</p>");
    assert_eq!(tag_trace(&events), vec!["script", "/script", "p", "/p"]);
}

#[test]
fn test_comments_produce_no_events() {
    let events = events("a<!-- <b>x</b> -->c<!---->d");
    assert_eq!(events, vec![text("a"), text("c"), text("d")]);
}

#[test]
fn test_unterminated_comment_swallows_rest() {
    let events = events("a<!-- never closed <p>");
    assert_eq!(events, vec![text("a")]);
}

#[test]
fn test_processing_instruction() {
    let events = events("<?xml version=\"1.0\" encoding=\"utf-8\"?><r/>");
    assert_eq!(
        events[0],
        Event::ProcessingInstruction {
            target: "xml".to_string(),
            data: "version=\"1.0\" encoding=\"utf-8\"".to_string(),
        }
    );
    assert_eq!(tag_trace(&events), vec!["r", "/r"]);
}

#[test]
fn test_doctype_is_discarded() {
    let events = events("<!DOCTYPE html><html></html>");
    assert_eq!(tag_trace(&events), vec!["html", "/html"]);
    assert_eq!(events.len(), 2);
}

#[test]
fn test_cdata_is_passed_through() {
    let events = events("<x><![CDATA[a < b && c]]></x>");
    assert_eq!(tag_trace(&events), vec!["x", "/x"]);
    assert_eq!(events[1], text("a < b && c"));
}

#[test]
fn test_nameless_fragment_is_text() {
    let events = events("a < b > c");
    assert_eq!(events, vec![text("a "), text("< b >"), text(" c")]);
}

#[test]
fn test_unterminated_tag_at_end_is_text() {
    let events = events("hello <b");
    assert_eq!(events, vec![text("hello "), text("<b")]);
}

#[test]
fn test_empty_end_tag_is_ignored() {
    let events = events("a</>b");
    assert_eq!(events, vec![text("a"), text("b")]);
}

#[test]
fn test_end_tag_name_stops_at_whitespace() {
    let events = events("<div></div class=\"x\">");
    assert_eq!(tag_trace(&events), vec!["div", "/div"]);
}

#[test]
fn test_positions_track_lines_and_columns() {
    let events = events("<a>\n  <b>\r\n<c>");
    let positions: Vec<Position> = events
        .iter()
        .filter_map(|event| match event {
            Event::StartTag { position, .. } => Some(*position),
            _ => None,
        })
        .collect();

    assert_eq!(positions, vec![at(0, 1, 1), at(6, 2, 3), at(11, 3, 1)]);
}

#[test]
fn test_custom_raw_text_elements() {
    let options = ParseOptions {
        raw_text_elements: vec!["textarea".to_string()],
        ..ParseOptions::default()
    };
    let markup = "<textarea><b>x</b></textarea><script><i>";
    let events: Vec<Event> = Tokenizer::with_options(markup.as_bytes(), options)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(tag_trace(&events), vec!["textarea", "/textarea", "script", "i"]);
    assert_eq!(events[1], text("<b>x</b>"));
}

#[test]
fn test_invalid_utf8_is_a_stream_error() {
    let mut tokenizer = Tokenizer::new(&b"<p>\xff</p>"[..]);
    assert!(matches!(tokenizer.next(), Some(Err(ParseError::Stream(_)))));
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_state_returns_to_default() {
    let mut tokenizer = Tokenizer::new("<p>x</p>".as_bytes());
    assert_eq!(tokenizer.state(), TokenizerState::Default);
    let consumed: Vec<_> = tokenizer.by_ref().collect();
    assert_eq!(consumed.len(), 3);
    assert_eq!(tokenizer.state(), TokenizerState::Default);
    assert_eq!(tokenizer.position().offset, 8);
}
