use boxtree::error::{Error, TokenizeError};
use boxtree::html::tokenizer::{State, Tokenizer};
use boxtree::html::{Attribute, StartTag, Token};

fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut tokenizer = Tokenizer::new();
    tokenizer.feed(input, &mut tokens)?;
    tokenizer.end(&mut tokens)?;
    Ok(tokens)
}

fn start(name: &str, attributes: &[(&str, &str)], self_closing: bool) -> Token {
    Token::StartTag(StartTag {
        name: name.to_owned(),
        attributes: attributes
            .iter()
            .map(|&(n, v)| Attribute::new(n, v))
            .collect(),
        self_closing,
    })
}

fn end(name: &str) -> Token {
    Token::EndTag {
        name: name.to_owned(),
    }
}

fn tokenize_error(input: &str) -> TokenizeError {
    match tokenize(input) {
        Err(Error::Tokenize(e)) => e,
        other => panic!("expected a tokenize error for {:?}, got {:?}", input, other),
    }
}

#[test]
fn text_and_tags() {
    assert_eq!(
        tokenize("<P>hi</P>").unwrap(),
        vec![
            start("p", &[], false),
            Token::Text('h'),
            Token::Text('i'),
            end("p"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn attribute_values() {
    assert_eq!(
        tokenize(r#"<div ID="a" class='b c' data-x=1 hidden>"#).unwrap(),
        vec![
            start(
                "div",
                &[("id", "a"), ("class", "b c"), ("data-x", "1"), ("hidden", "")],
                false
            ),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn self_closing_tags() {
    assert_eq!(
        tokenize(r#"<br/><img src="a.png" /><a href=x/>"#).unwrap(),
        vec![
            start("br", &[], true),
            start("img", &[("src", "a.png")], true),
            // The slash is part of an unquoted value.
            start("a", &[("href", "x/")], false),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn attribute_right_after_quoted_value() {
    assert_eq!(
        tokenize(r#"<p a="1"b="2">"#).unwrap(),
        vec![start("p", &[("a", "1"), ("b", "2")], false), Token::EndOfInput]
    );
}

#[test]
fn duplicate_attribute_keeps_the_first() {
    assert_eq!(
        tokenize(r#"<p id="a" ID="b">"#).unwrap(),
        vec![start("p", &[("id", "a")], false), Token::EndOfInput]
    );
}

#[test]
fn whitespace_separates_attributes() {
    assert_eq!(
        tokenize("<p\ta=1\nb = '2'\x0Cc>").unwrap(),
        vec![
            start("p", &[("a", "1"), ("b", "2"), ("c", "")], false),
            Token::EndOfInput
        ]
    );
}

#[test]
fn input_in_pieces() {
    let mut tokens = Vec::new();
    let mut tokenizer = Tokenizer::new();
    for piece in &["<di", "v cla", "ss=\"", "x\">", "y</", "div>"] {
        tokenizer.feed(piece, &mut tokens).unwrap();
    }
    assert_eq!(tokenizer.state(), State::Data);
    tokenizer.end(&mut tokens).unwrap();
    assert_eq!(
        tokens,
        vec![
            start("div", &[("class", "x")], false),
            Token::Text('y'),
            end("div"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn end_of_input_in_attribute_value_drops_the_tag() {
    for input in &[
        r#"a<p id="x"#,
        "a<p id='x",
        "a<p id=x",
        r#"a<p id="x""#,
    ] {
        assert_eq!(
            tokenize(input).unwrap(),
            vec![Token::Text('a'), Token::EndOfInput],
            "{:?}",
            input
        );
    }
}

#[test]
fn end_of_input_in_a_tag() {
    assert_eq!(
        tokenize_error("<p"),
        TokenizeError::UnexpectedEndOfInput {
            state: State::TagName
        }
    );
    assert_eq!(
        tokenize_error("<"),
        TokenizeError::UnexpectedEndOfInput {
            state: State::TagOpen
        }
    );
    assert_eq!(
        tokenize_error("<p id"),
        TokenizeError::UnexpectedEndOfInput {
            state: State::AfterAttributeName
        }
    );
    assert_eq!(
        tokenize_error("<p id="),
        TokenizeError::UnexpectedEndOfInput {
            state: State::BeforeAttributeValue
        }
    );
}

#[test]
fn unexpected_characters() {
    assert_eq!(
        tokenize_error("a < b"),
        TokenizeError::UnexpectedCharacter {
            state: State::TagOpen,
            found: ' '
        }
    );
    assert_eq!(
        tokenize_error("</1>"),
        TokenizeError::UnexpectedCharacter {
            state: State::EndTagOpen,
            found: '1'
        }
    );
    assert_eq!(
        tokenize_error("<br/ >"),
        TokenizeError::UnexpectedCharacter {
            state: State::SelfClosingStartTag,
            found: ' '
        }
    );
}

#[test]
fn equals_without_attribute_name() {
    assert_eq!(
        tokenize_error("<p =x>"),
        TokenizeError::MissingAttributeName
    );
}

#[test]
fn nul_in_attribute_value() {
    for input in &["<p a=\"\0\">", "<p a='\0'>", "<p a=x\0>"] {
        assert_eq!(tokenize_error(input), TokenizeError::NulInAttributeValue);
    }
}
