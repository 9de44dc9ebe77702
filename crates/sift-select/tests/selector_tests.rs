//! Tests for selector tokenization and compilation.

use sift_select::{
    MatchMode, SelectorChain, SelectorError, StackToken, StepToken, tokenize_stack, tokenize_step,
};

fn step(text: &str) -> StackToken {
    StackToken::Step(text.to_string())
}

#[test]
fn test_stack_splits_on_whitespace_and_child() {
    let tokens = tokenize_stack("div.article > p  a[title=\"x > y\"]").unwrap();
    assert_eq!(
        tokens,
        vec![
            step("div.article"),
            StackToken::Child,
            step("p"),
            step("a[title=\"x > y\"]"),
        ]
    );
}

#[test]
fn test_stack_child_without_spaces() {
    let tokens = tokenize_stack("html>head>meta").unwrap();
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[1], StackToken::Child);
    assert_eq!(tokens[4], step("meta"));
}

#[test]
fn test_stack_brackets_keep_whitespace() {
    let tokens = tokenize_stack("[data-x = 'a b'] .c").unwrap();
    assert_eq!(tokens, vec![step("[data-x = 'a b']"), step(".c")]);
}

#[test]
fn test_step_parts() {
    let tokens = tokenize_step("a.b.c#d[href][rel='x y']").unwrap();
    assert_eq!(
        tokens,
        vec![
            StepToken::Tag("a".to_string()),
            StepToken::Class("b".to_string()),
            StepToken::Class("c".to_string()),
            StepToken::Id("d".to_string()),
            StepToken::Attribute("href".to_string()),
            StepToken::Attribute("rel='x y'".to_string()),
        ]
    );
}

#[test]
fn test_step_quoted_bracket_content_is_opaque() {
    let tokens = tokenize_step("a[title=\"x]y.z\"]").unwrap();
    assert_eq!(
        tokens,
        vec![
            StepToken::Tag("a".to_string()),
            StepToken::Attribute("title=\"x]y.z\"".to_string()),
        ]
    );
}

#[test]
fn test_step_drops_empty_parts_and_trailing_text() {
    let tokens = tokenize_step("div.[]#").unwrap();
    assert_eq!(tokens, vec![StepToken::Tag("div".to_string())]);

    let tokens = tokenize_step("a[href]junk").unwrap();
    assert_eq!(
        tokens,
        vec![
            StepToken::Tag("a".to_string()),
            StepToken::Attribute("href".to_string()),
        ]
    );
}

#[test]
fn test_chain_compiles_steps() {
    let chain = SelectorChain::parse("div.article > p[data-x = \"1\"] *").unwrap();
    let steps = chain.steps();
    assert_eq!(steps.len(), 3);

    assert_eq!(steps[0].tag.as_deref(), Some("div"));
    assert!(steps[0].classes.contains("article"));
    assert!(!steps[0].direct_child);

    assert!(steps[1].direct_child);
    assert_eq!(steps[1].attribute_values.get("data-x").map(String::as_str), Some("1"));

    assert_eq!(steps[2].tag, None);
    assert_eq!(chain.match_mode(), MatchMode::Compatible);
}

#[test]
fn test_attribute_value_quotes_are_stripped() {
    let chain: SelectorChain = "meta[name='k'][content=v][rel=\"a b\"][flag]".parse().unwrap();
    let selector = &chain.steps()[0];
    assert_eq!(selector.attribute_values.get("name").map(String::as_str), Some("k"));
    assert_eq!(selector.attribute_values.get("content").map(String::as_str), Some("v"));
    assert_eq!(selector.attribute_values.get("rel").map(String::as_str), Some("a b"));
    assert!(selector.attributes.contains("flag"));
}

#[test]
fn test_leading_child_marks_first_step() {
    let chain = SelectorChain::parse("> p").unwrap();
    assert_eq!(chain.steps().len(), 1);
    assert!(chain.steps()[0].direct_child);
}

#[test]
fn test_unterminated_bracket() {
    assert_eq!(
        SelectorChain::parse("div[href"),
        Err(SelectorError::UnterminatedBracket {
            selector: "div[href".to_string()
        })
    );
    assert!(matches!(
        SelectorChain::parse("a[title=\"x]"),
        Err(SelectorError::UnterminatedBracket { .. })
    ));
}

#[test]
fn test_duplicate_id() {
    assert_eq!(
        SelectorChain::parse("div a#x#y"),
        Err(SelectorError::DuplicateId {
            step: "a#x#y".to_string()
        })
    );
}

#[test]
fn test_empty_selector() {
    assert_eq!(SelectorChain::parse(""), Err(SelectorError::Empty));
    assert_eq!(SelectorChain::parse("  >  "), Err(SelectorError::Empty));
}

#[test]
fn test_display_normalizes() {
    let chain = SelectorChain::parse("div.a  >  p[x='y']   *").unwrap();
    assert_eq!(chain.to_string(), "div.a > p[x=\"y\"] *");

    let chain = SelectorChain::parse(">#main .b.a").unwrap();
    assert_eq!(chain.to_string(), "> #main .a.b");
}

#[test]
fn test_match_mode_names() {
    assert_eq!("conjunctive".parse::<MatchMode>(), Ok(MatchMode::Conjunctive));
    assert_eq!("compatible".parse::<MatchMode>(), Ok(MatchMode::Compatible));
    assert!("strict".parse::<MatchMode>().is_err());
    assert_eq!(MatchMode::default().to_string(), "compatible");

    let chain = SelectorChain::parse("p").unwrap().with_match_mode(MatchMode::Conjunctive);
    assert_eq!(chain.match_mode(), MatchMode::Conjunctive);
}
