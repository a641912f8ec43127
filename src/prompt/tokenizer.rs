use std::fmt;

/// One lexical piece of a preprompt template. `{{name}}` is a first-class
/// token; everything else passes through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(text) => f.write_str(text),
            Token::Placeholder(name) => write!(f, "{{{{{name}}}}}"),
        }
    }
}

/// Split a template into literal and placeholder tokens. An opening `{{`
/// with no closing `}}` stays literal text.
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        if open > 0 {
            tokens.push(Token::Text(&rest[..open]));
        }
        tokens.push(Token::Placeholder(&after_open[..close]));
        rest = &after_open[close + 2..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    tokens
}
