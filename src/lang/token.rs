use super::Error;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

thread_local!(
    static STRING_TO_TOKEN: HashMap<&'static str, Token> = Token::field_less()
        .drain(..)
        .map(|t| (t.source_text(), t))
        .chain(Some(("int", Token::Var)))
        .collect();
);

/// ## Lexical tokens
///
/// Every kind has a fixed numeric code which is what a token file stores.
/// Only `Ident` and `Number` carry text.

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    Null,
    Ident(String),
    Number(String),
    Plus,
    Minus,
    Multiply,
    Slash,
    Odd,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Period,
    Becomes,
    Begin,
    End,
    If,
    Then,
    While,
    Do,
    Call,
    Const,
    Var,
    Procedure,
    Out,
    In,
    Else,
}

impl Token {
    fn field_less() -> Vec<Token> {
        use Token::*;
        vec![
            Plus, Minus, Multiply, Slash, Odd, Equal, NotEqual, Less, LessEqual, Greater,
            GreaterEqual, LParen, RParen, Comma, Semicolon, Period, Becomes, Begin, End, If, Then,
            While, Do, Call, Const, Var, Procedure, Out, In, Else,
        ]
    }

    /// Reserved word or operator spelled exactly `s`.
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }

    pub fn from_kind(kind: u8, text: Option<String>) -> Option<Token> {
        use Token::*;
        let token = match (kind, text) {
            (1, None) => Null,
            (2, Some(s)) => Ident(s),
            (3, Some(s)) => Number(s),
            (2, None) | (3, None) | (_, Some(_)) => return None,
            (k, None) => Token::field_less()
                .into_iter()
                .find(|t| t.kind() == k)?,
        };
        Some(token)
    }

    pub fn kind(&self) -> u8 {
        use Token::*;
        match self {
            Null => 1,
            Ident(_) => 2,
            Number(_) => 3,
            Plus => 4,
            Minus => 5,
            Multiply => 6,
            Slash => 7,
            Odd => 8,
            Equal => 9,
            NotEqual => 10,
            Less => 11,
            LessEqual => 12,
            Greater => 13,
            GreaterEqual => 14,
            LParen => 15,
            RParen => 16,
            Comma => 17,
            Semicolon => 18,
            Period => 19,
            Becomes => 20,
            Begin => 21,
            End => 22,
            If => 23,
            Then => 24,
            While => 25,
            Do => 26,
            Call => 27,
            Const => 28,
            Var => 29,
            Procedure => 30,
            Out => 31,
            In => 32,
            Else => 33,
        }
    }

    /// Tokens which may begin an expression.
    pub fn starts_expression(&self) -> bool {
        use Token::*;
        matches!(self, Ident(_) | Number(_) | LParen | Plus | Minus)
    }

    pub fn symbol_name(&self) -> &'static str {
        use Token::*;
        match self {
            Null => "nulsym",
            Ident(_) => "identsym",
            Number(_) => "numbersym",
            Plus => "plussym",
            Minus => "minussym",
            Multiply => "multsym",
            Slash => "slashsym",
            Odd => "oddsym",
            Equal => "eqsym",
            NotEqual => "neqsym",
            Less => "lessym",
            LessEqual => "leqsym",
            Greater => "gtrsym",
            GreaterEqual => "geqsym",
            LParen => "lparentsym",
            RParen => "rparentsym",
            Comma => "commasym",
            Semicolon => "semicolonsym",
            Period => "periodsym",
            Becomes => "becomessym",
            Begin => "beginsym",
            End => "endsym",
            If => "ifsym",
            Then => "thensym",
            While => "whilesym",
            Do => "dosym",
            Call => "callsym",
            Const => "constsym",
            Var => "varsym",
            Procedure => "procsym",
            Out => "outsym",
            In => "insym",
            Else => "elsesym",
        }
    }

    fn source_text(&self) -> &'static str {
        use Token::*;
        match self {
            Null | Ident(_) | Number(_) => "",
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Slash => "/",
            Odd => "odd",
            Equal => "=",
            NotEqual => "<>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            LParen => "(",
            RParen => ")",
            Comma => ",",
            Semicolon => ";",
            Period => ".",
            Becomes => ":=",
            Begin => "begin",
            End => "end",
            If => "if",
            Then => "then",
            While => "while",
            Do => "do",
            Call => "call",
            Const => "const",
            Var => "var",
            Procedure => "procedure",
            Out => "out",
            In => "in",
            Else => "else",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Ident(s) | Token::Number(s) => write!(f, "{}", s),
            t => write!(f, "{}", t.source_text()),
        }
    }
}

/// Token file form: `29 2 x 18 ...`
pub fn tokens_to_string(tokens: &[Token]) -> String {
    let words: Vec<String> = tokens
        .iter()
        .map(|t| match t {
            Token::Ident(s) | Token::Number(s) => format!("{} {}", t.kind(), s),
            _ => t.kind().to_string(),
        })
        .collect();
    words.join(" ")
}

/// Symbolic token file form: `varsym identsym.x semicolonsym ...`
pub fn tokens_to_symbolic(tokens: &[Token]) -> String {
    let words: Vec<String> = tokens
        .iter()
        .map(|t| match t {
            Token::Ident(s) | Token::Number(s) => format!("{}.{}", t.symbol_name(), s),
            _ => t.symbol_name().to_string(),
        })
        .collect();
    words.join(" ")
}

pub fn parse_tokens(s: &str) -> Result<Vec<Token>> {
    let mut words = s.split_whitespace();
    let mut tokens = vec![];
    while let Some(word) = words.next() {
        let kind = match word.parse::<u8>() {
            Ok(kind) => kind,
            Err(_) => return Err(error!(MalformedFile; &format!("BAD TOKEN KIND {}", word))),
        };
        let text = if kind == 2 || kind == 3 {
            match words.next() {
                Some(text) => Some(text.to_string()),
                None => return Err(error!(MalformedFile; "MISSING TOKEN TEXT")),
            }
        } else {
            None
        };
        match Token::from_kind(kind, text) {
            Some(token) => tokens.push(token),
            None => return Err(error!(MalformedFile; &format!("BAD TOKEN KIND {}", kind))),
        }
    }
    Ok(tokens)
}
