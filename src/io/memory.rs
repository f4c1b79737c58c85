//! An in-memory token transport, mostly useful for tests and for inspecting what a codec emits.

use crate::error::{CodecError, Result};
use crate::io::stream::{TokenKind, TokenReader, TokenWriter};
use crate::options::DecodeOptions;
use crate::scalar::Coordinates;

/// A single token in a [TokenBuffer].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Null,
    ArrayStart,
    ArrayEnd,
    Coordinates(Coordinates),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Null => TokenKind::Null,
            Token::ArrayStart => TokenKind::ArrayStart,
            Token::ArrayEnd => TokenKind::ArrayEnd,
            Token::Coordinates(_) => TokenKind::Value,
        }
    }
}

impl From<Coordinates> for Token {
    fn from(value: Coordinates) -> Self {
        Token::Coordinates(value)
    }
}

/// A growable list of tokens that can be written to and then read back from the start.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    options: DecodeOptions,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer positioned at the first of `tokens`.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// All tokens in the buffer, including any already read.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// The number of tokens not yet read.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        match self.peek() {
            Some(token) if token.kind() == expected => {
                let token = *token;
                self.cursor += 1;
                Ok(token)
            }
            Some(token) => Err(CodecError::MalformedStream(format!(
                "expected {expected} at token {}, found {}",
                self.cursor,
                token.kind()
            ))),
            None => Err(CodecError::MalformedStream(format!(
                "expected {expected}, found end of input"
            ))),
        }
    }
}

impl TokenReader for TokenBuffer {
    fn current_token_kind(&mut self) -> Result<TokenKind> {
        Ok(self.peek().map_or(TokenKind::EndOfInput, Token::kind))
    }

    fn read_null(&mut self) -> Result<()> {
        self.expect(TokenKind::Null)?;
        Ok(())
    }

    fn read_array_start(&mut self) -> Result<()> {
        self.expect(TokenKind::ArrayStart)?;
        if self.depth >= self.options.max_depth {
            log::warn!(
                "rejecting token stream nested deeper than {}",
                self.options.max_depth
            );
            return Err(CodecError::MalformedStream(format!(
                "array nesting exceeds maximum depth of {}",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn read_array_end(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(CodecError::MalformedStream(
                "array end without a matching array start".to_string(),
            ));
        }
        self.expect(TokenKind::ArrayEnd)?;
        self.depth -= 1;
        Ok(())
    }

    fn read_coordinates(&mut self) -> Result<Coordinates> {
        match self.peek() {
            Some(Token::Coordinates(coords)) => {
                let coords = *coords;
                self.cursor += 1;
                Ok(coords)
            }
            Some(token) => Err(CodecError::TypeMismatch(format!(
                "expected coordinates at token {}, found {}",
                self.cursor,
                token.kind()
            ))),
            None => Err(CodecError::MalformedStream(
                "expected coordinates, found end of input".to_string(),
            )),
        }
    }
}

impl TokenWriter for TokenBuffer {
    fn write_null(&mut self) -> Result<()> {
        self.tokens.push(Token::Null);
        Ok(())
    }

    fn write_array_start(&mut self) -> Result<()> {
        self.tokens.push(Token::ArrayStart);
        Ok(())
    }

    fn write_array_end(&mut self) -> Result<()> {
        self.tokens.push(Token::ArrayEnd);
        Ok(())
    }

    fn write_coordinates(&mut self, coords: &Coordinates) -> Result<()> {
        self.tokens.push(Token::Coordinates(*coords));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut buffer = TokenBuffer::from_tokens(vec![Token::Null]);
        assert_eq!(buffer.current_token_kind().unwrap(), TokenKind::Null);
        assert_eq!(buffer.current_token_kind().unwrap(), TokenKind::Null);
        buffer.read_null().unwrap();
        assert_eq!(buffer.current_token_kind().unwrap(), TokenKind::EndOfInput);
    }

    #[test]
    fn mismatched_marker_is_malformed() {
        let mut buffer = TokenBuffer::from_tokens(vec![Token::Null]);
        let err = buffer.read_array_start().unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
        // nothing was consumed
        assert_eq!(buffer.remaining(), 1);
    }

    #[test]
    fn unbalanced_array_end() {
        let mut buffer = TokenBuffer::from_tokens(vec![Token::ArrayEnd]);
        let err = buffer.read_array_end().unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
    }

    #[test]
    fn max_depth() {
        let mut buffer =
            TokenBuffer::from_tokens(vec![Token::ArrayStart, Token::ArrayStart, Token::ArrayStart])
                .with_options(DecodeOptions::default().with_max_depth(2));
        buffer.read_array_start().unwrap();
        buffer.read_array_start().unwrap();
        let err = buffer.read_array_start().unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
    }

    #[test]
    fn coordinates_on_array_start_is_type_mismatch() {
        let mut buffer = TokenBuffer::from_tokens(vec![Token::ArrayStart]);
        let err = buffer.read_coordinates().unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch(_)));
    }

    #[test]
    fn written_tokens_read_back() {
        let mut buffer = TokenBuffer::new();
        buffer.write_array_start().unwrap();
        buffer.write_coordinates(&Coordinates::xy(1., 2.)).unwrap();
        buffer.write_array_end().unwrap();

        buffer.read_array_start().unwrap();
        assert_eq!(buffer.read_coordinates().unwrap(), Coordinates::xy(1., 2.));
        buffer.read_array_end().unwrap();
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn into_tokens_keeps_write_order() {
        let mut buffer = TokenBuffer::new();
        buffer.write_array_start().unwrap();
        buffer.write_coordinates(&Coordinates::xy(5., 6.)).unwrap();
        buffer.write_null().unwrap();
        buffer.write_array_end().unwrap();

        assert_eq!(
            buffer.into_tokens(),
            vec![
                Token::ArrayStart,
                Coordinates::xy(5., 6.).into(),
                Token::Null,
                Token::ArrayEnd
            ]
        );
    }
}
