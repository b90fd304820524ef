//! Lexer for the lesson-script language.
//!
//! Built on [`logos`] for fast table-driven tokenization. Whitespace and
//! comments (`//` line comments and `/* */` block comments) are skipped.

use logos::Logos;

/// A token in lesson-script source.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Token {
    // Keywords
    #[token("def")]
    Def,
    #[token("qubit")]
    Qubit,
    #[token("bit")]
    Bit,
    #[token("measure")]
    Measure,
    #[token("pi")]
    Pi,

    // Literals
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    FloatLiteral(f64),
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLiteral(u64),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token("->")]
    Arrow,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
}

/// A token together with its byte span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize lesson-script source.
///
/// Returns the token stream, or the byte offset and offending text of the
/// first character sequence that is not part of the language.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, (usize, String)> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(SpannedToken {
                token,
                span: lexer.span(),
            }),
            Err(()) => return Err((lexer.span().start, lexer.slice().to_string())),
        }
    }
    Ok(tokens)
}

/// Convert a byte offset into a 1-based line number.
pub fn line_of(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_declaration() {
        let tokens = tokenize("qubit[2] q;").unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Qubit,
                Token::LBracket,
                Token::IntLiteral(2),
                Token::RBracket,
                Token::Identifier("q".into()),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn tokenize_gate_call_with_angle() {
        let tokens = tokenize("rx(pi/2) q[0];").unwrap();
        assert_eq!(tokens[0].token, Token::Identifier("rx".into()));
        assert_eq!(tokens[2].token, Token::Pi);
        assert_eq!(tokens[3].token, Token::Slash);
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = tokenize("// nothing here\nh q[0]; /* block */").unwrap();
        assert_eq!(tokens[0].token, Token::Identifier("h".into()));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn rejects_foreign_syntax() {
        // Python-style colons are not part of the language.
        let err = tokenize("def build():").unwrap_err();
        assert_eq!(err.1, ":");
    }

    #[test]
    fn line_numbers() {
        let src = "def build() {\nh q[0];\n}";
        assert_eq!(line_of(src, 0), 1);
        assert_eq!(line_of(src, 14), 2);
        assert_eq!(line_of(src, src.len() - 1), 3);
    }
}
