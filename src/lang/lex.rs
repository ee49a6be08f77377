use super::{token::*, Error, LineNumber};

type Result<T> = std::result::Result<T, Error>;

/// Scans source text into tokens. Length limits on identifiers and
/// numbers are left for the translator to enforce.
pub fn lex(s: &str) -> Result<Vec<Token>> {
    Pl0Lexer {
        chars: s.chars().peekable(),
        line: 1,
    }
    .collect()
}

fn is_pl0_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn is_pl0_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_pl0_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;
    fn line(&mut self) -> &mut usize;

    fn line_number(&mut self) -> LineNumber {
        Some(*self.line())
    }

    fn whitespace(&mut self) {
        while let Some(pk) = self.chars().peek() {
            if !is_pl0_whitespace(*pk) {
                break;
            }
            if *pk == '\n' {
                *self.line() += 1;
            }
            self.chars().next();
        }
    }

    fn number(&mut self) -> Result<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_pl0_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        if let Some(pk) = self.chars().peek() {
            if is_pl0_alphabetic(*pk) {
                while let Some(pk) = self.chars().peek() {
                    if !is_pl0_alphabetic(*pk) && !is_pl0_digit(*pk) {
                        break;
                    }
                    s.push(*pk);
                    self.chars().next();
                }
                return Err(error!(InvalidIdent, self.line_number(); &s));
            }
        }
        Ok(Token::Number(s))
    }

    fn alphabetic(&mut self) -> Result<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_pl0_alphabetic(*pk) && !is_pl0_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        match Token::from_string(&s) {
            Some(token) => Ok(token),
            None => Ok(Token::Ident(s)),
        }
    }

    /// Skips the remainder of a `/* ... */` comment; the opening `/*`
    /// has already been consumed.
    fn comment(&mut self) -> Result<()> {
        let start = self.line_number();
        let mut star = false;
        while let Some(ch) = self.chars().next() {
            if ch == '\n' {
                *self.line() += 1;
            }
            if star && ch == '/' {
                return Ok(());
            }
            star = ch == '*';
        }
        Err(error!(UnterminatedComment, start))
    }

    fn minutia(&mut self) -> Result<Option<Token>> {
        let ch = match self.chars().next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        let mut s = ch.to_string();
        if let Some(pk) = self.chars().peek() {
            if ch == '/' && *pk == '*' {
                self.chars().next();
                self.comment()?;
                return Ok(None);
            }
            s.push(*pk);
            if let Some(t) = Token::from_string(&s) {
                self.chars().next();
                return Ok(Some(t));
            }
            s.pop();
        }
        match Token::from_string(&s) {
            Some(t) => Ok(Some(t)),
            None => Err(error!(InvalidSymbol, self.line_number(); &format!("'{}'", s))),
        }
    }
}

struct Pl0Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Tokenizers<'a> for Pl0Lexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
    fn line(&mut self) -> &mut usize {
        &mut self.line
    }
}

impl<'a> Iterator for Pl0Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.whitespace();
            let pk = *self.chars.peek()?;
            if is_pl0_digit(pk) {
                return Some(self.number());
            }
            if is_pl0_alphabetic(pk) {
                return Some(self.alphabetic());
            }
            match self.minutia() {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
