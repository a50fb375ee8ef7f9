//! End-to-end scenarios mirroring a handful of adversarial HTML inputs
//! the lexer must survive without panicking or losing synchronization.

use marksafe_html5::{HtmlLexer, HtmlTokenType};

fn collect(input: &str) -> Vec<(HtmlTokenType, &str)> {
    let mut lexer = HtmlLexer::new(input);
    let mut out = Vec::new();
    while let Some(tok) = lexer.next() {
        out.push((tok.token_type, tok.text(input)));
    }
    out
}

#[test]
fn rawtext_swallows_partial_end_tag() {
    let input = "<script>w('</b')</script>";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::TagBegin, "<script"),
            (HtmlTokenType::TagEnd, ">"),
            (HtmlTokenType::Unescaped, "w('</b')"),
            (HtmlTokenType::TagBegin, "</script"),
            (HtmlTokenType::TagEnd, ">"),
        ]
    );
}

#[test]
fn unquoted_attribute_value_stops_at_whitespace_or_close() {
    let input = "<a href=http://foo.com/>Clicky</a>";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::TagBegin, "<a"),
            (HtmlTokenType::AttrName, "href"),
            (HtmlTokenType::AttrValue, "http://foo.com/"),
            (HtmlTokenType::TagEnd, ">"),
            (HtmlTokenType::Text, "Clicky"),
            (HtmlTokenType::TagBegin, "</a"),
            (HtmlTokenType::TagEnd, ">"),
        ]
    );
}

#[test]
fn short_tag_quirk_and_empty_close_tag_are_literal() {
    let input = "<p<a href=\"/\">first part of the text</> second part";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::TagBegin, "<p"),
            (HtmlTokenType::AttrName, "<a"),
            (HtmlTokenType::AttrName, "href"),
            (HtmlTokenType::AttrValue, "\"/\""),
            (HtmlTokenType::TagEnd, ">"),
            (HtmlTokenType::Text, "first part of the text</> second part"),
        ]
    );
}

#[test]
fn stray_equals_attaches_to_previous_attribute_name() {
    let input = "<a foo= =bar baz=qux>";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::TagBegin, "<a"),
            (HtmlTokenType::AttrName, "foo= ="),
            (HtmlTokenType::AttrValue, "bar"),
            (HtmlTokenType::AttrName, "baz"),
            (HtmlTokenType::AttrValue, "qux"),
            (HtmlTokenType::TagEnd, ">"),
        ]
    );
}

#[test]
fn unterminated_comment_still_emits_a_comment_token() {
    let input = "<!-- never closed";
    let got = collect(input);
    assert_eq!(got, vec![(HtmlTokenType::Comment, "<!-- never closed")]);
}

#[test]
fn cdata_section_is_its_own_token() {
    let input = "before<![CDATA[<not a tag>]]>after";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::Text, "before"),
            (HtmlTokenType::Cdata, "<![CDATA[<not a tag>]]>"),
            (HtmlTokenType::Text, "after"),
        ]
    );
}

#[test]
fn directive_and_servercode_blocks_are_recognized() {
    let input = "<!DOCTYPE html><?php echo 1; ?><% asp %>";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::Directive, "<!DOCTYPE html>"),
            (HtmlTokenType::Servercode, "<?php echo 1; ?>"),
            (HtmlTokenType::Servercode, "<% asp %>"),
        ]
    );
}

#[test]
fn self_closing_tag_does_not_enter_rawtext() {
    let input = "<br/>after";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::TagBegin, "<br"),
            (HtmlTokenType::TagEnd, "/>"),
            (HtmlTokenType::Text, "after"),
        ]
    );
}

#[test]
fn eof_inside_open_tag_never_synthesizes_a_tagend() {
    let input = "<div class=\"x";
    let mut lexer = HtmlLexer::new(input);
    let got = collect_rest(&mut lexer, input);
    assert!(got.iter().all(|(t, _)| *t != HtmlTokenType::TagEnd));
    assert_eq!(got[0], (HtmlTokenType::TagBegin, "<div"));
    assert!(!lexer.errors.is_empty());
}

#[test]
fn raw_text_without_closing_tag_reports_unescaped_to_eof() {
    let input = "<style>body { color: red; }";
    let got = collect(input);
    assert_eq!(
        got,
        vec![
            (HtmlTokenType::TagBegin, "<style"),
            (HtmlTokenType::TagEnd, ">"),
            (HtmlTokenType::Unescaped, "body { color: red; }"),
        ]
    );
}

#[test]
fn peeking_does_not_disturb_the_real_token_stream() {
    let input = "<a href=http://foo.com/>Clicky</a>";
    let mut lexer = HtmlLexer::new(input);
    let peeked = lexer.peek();
    let next = lexer.next();
    assert_eq!(peeked, next);
    assert_eq!(collect_rest(&mut lexer, input).len(), 6);
}

fn collect_rest<'a>(lexer: &mut HtmlLexer<'a>, input: &'a str) -> Vec<(HtmlTokenType, &'a str)> {
    let mut out = Vec::new();
    while let Some(tok) = lexer.next() {
        out.push((tok.token_type, tok.text(input)));
    }
    out
}
