//! Integration tests for tag fragment interpretation.

use sift_html::interpret;

#[test]
fn test_mixed_quoting_styles() {
    let tag = interpret("<img src='image.jpg' width=500 height=600 title=\"Monster! S&amp;P\"/>");

    assert_eq!(tag.name, "img");
    assert!(tag.self_closing);
    assert!(!tag.is_end_tag);
    assert_eq!(tag.attributes.len(), 4);
    assert_eq!(tag.attributes.get("src"), Some("image.jpg"));
    assert_eq!(tag.attributes.get("width"), Some("500"));
    assert_eq!(tag.attributes.get("height"), Some("600"));
    assert_eq!(tag.attributes.get("title"), Some("Monster! S&P"));
}

#[test]
fn test_whitespace_around_equals() {
    let variants = [
        "<div class = 'post_content entry-content'>",
        "<div class= 'post_content entry-content'>",
        "<div class=\n\t 'post_content entry-content'>",
        "<div class    \n\n\n=\n\t 'post_content entry-content'>",
        "<div class ='post_content entry-content'>",
        "<div class=\"post_content entry-content\">",
    ];
    for fragment in variants {
        let tag = interpret(fragment);
        assert_eq!(tag.name, "div", "{fragment:?}");
        assert_eq!(tag.attributes.len(), 1, "{fragment:?}");
        assert_eq!(
            tag.attributes.get("class"),
            Some("post_content entry-content"),
            "{fragment:?}"
        );
        assert!(!tag.self_closing);
    }
}

#[test]
fn test_quote_inside_name_commits_boolean_attribute() {
    let tag = interpret("<span clas\"/>");

    assert_eq!(tag.name, "span");
    assert!(tag.self_closing);
    assert_eq!(tag.attributes.len(), 1);
    assert_eq!(tag.attributes.get("clas"), Some("clas"));
}

#[test]
fn test_boolean_attribute_takes_its_name() {
    let tag = interpret("<input disabled type=checkbox checked>");

    assert_eq!(tag.attributes.get("disabled"), Some("disabled"));
    assert_eq!(tag.attributes.get("type"), Some("checkbox"));
    assert_eq!(tag.attributes.get("checked"), Some("checked"));
    let names: Vec<&str> = tag.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["disabled", "type", "checked"]);
}

#[test]
fn test_quoted_value_keeps_other_quote_and_equals() {
    let tag = interpret("<a data-x=\"it's a=b c\" data-y='say \"hi\"'>");

    assert_eq!(tag.attributes.get("data-x"), Some("it's a=b c"));
    assert_eq!(tag.attributes.get("data-y"), Some("say \"hi\""));
}

#[test]
fn test_unquoted_value_runs_to_whitespace() {
    let tag = interpret("<a href=/search?q=1&amp;page=2 rel=next>");

    assert_eq!(tag.attributes.get("href"), Some("/search?q=1&page=2"));
    assert_eq!(tag.attributes.get("rel"), Some("next"));
}

#[test]
fn test_unterminated_quote_keeps_residue() {
    let tag = interpret("<a title=\"abc>");
    assert_eq!(tag.attributes.get("title"), Some("abc"));
}

#[test]
fn test_repeated_attribute_names_are_kept() {
    let tag = interpret("<meta content=\"a\" content=\"b\">");

    assert_eq!(tag.attributes.len(), 2);
    assert_eq!(tag.attributes.get("content"), Some("a"));
    let all: Vec<&str> = tag.attributes.get_all("content").collect();
    assert_eq!(all, vec!["a", "b"]);
}

#[test]
fn test_end_tag_fragment() {
    let tag = interpret("</div class=x>");
    assert!(tag.is_end_tag);
    assert_eq!(tag.name, "div");

    let empty = interpret("</>");
    assert!(empty.is_end_tag);
    assert_eq!(empty.name, "");
}

#[test]
fn test_fragment_without_name() {
    let tag = interpret("< b >");
    assert_eq!(tag.name, "");
}

#[test]
fn test_non_breaking_space_separates_attributes() {
    let tag = interpret("<div\u{a0}id=\"x\">");
    assert_eq!(tag.name, "div");
    assert_eq!(tag.attributes.get("id"), Some("x"));
}

#[test]
fn test_self_closing_without_space() {
    let tag = interpret("<br/>");
    assert_eq!(tag.name, "br");
    assert!(tag.self_closing);
    assert!(tag.attributes.is_empty());
}

#[test]
fn test_tag_name_case_is_preserved() {
    let tag = interpret("<DiV ID=main>");
    assert_eq!(tag.name, "DiV");
    assert_eq!(tag.attributes.get("ID"), Some("main"));
}
