use pl0::lang::{lex, parse, parse_tokens, tokens_to_string, tokens_to_symbolic, Token};
use pl0::mach::Runtime;
use pl0::Limits;
use pretty_assertions::assert_eq;

#[test]
fn test_program_tokens() {
    let tokens = lex("var x;\nbegin x := 10; out x end.").unwrap();
    assert_eq!(
        tokens_to_string(&tokens),
        "29 2 x 18 21 2 x 20 3 10 18 31 2 x 22 19"
    );
    assert_eq!(
        tokens_to_symbolic(&tokens),
        "varsym identsym.x semicolonsym beginsym identsym.x becomessym numbersym.10 \
         semicolonsym outsym identsym.x endsym periodsym"
    );
}

#[test]
fn test_token_file_compiles() {
    let tokens = parse_tokens("29 2 x 18 21 2 x 20 3 10 18 31 2 x 22 19").unwrap();
    let limits = Limits::default();
    let program = parse(tokens, &limits).unwrap();
    let mut r = Runtime::new(program, &limits);
    assert_eq!(r.run(std::iter::empty()).unwrap(), vec![10]);
}

#[test]
fn test_reserved_words() {
    let tokens = lex("const var int procedure call begin end if then else while do in out odd").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Const,
            Token::Var,
            Token::Var,
            Token::Procedure,
            Token::Call,
            Token::Begin,
            Token::End,
            Token::If,
            Token::Then,
            Token::Else,
            Token::While,
            Token::Do,
            Token::In,
            Token::Out,
            Token::Odd,
        ]
    );
}

#[test]
fn test_long_names_are_left_to_the_translator() {
    assert_eq!(
        lex("abcdefghijklmnop 1234567").unwrap(),
        vec![
            Token::Ident("abcdefghijklmnop".into()),
            Token::Number("1234567".into()),
        ]
    );
}

#[test]
fn test_scanner_errors() {
    assert_eq!(lex("out 1 # 2.").unwrap_err().code(), 34);
    assert_eq!(lex("x : 1").unwrap_err().code(), 34);
    assert_eq!(lex("out 1 /* never closed").unwrap_err().code(), 35);
    assert_eq!(lex("var 2x;").unwrap_err().code(), 36);
    assert_eq!(lex("\n\n 9a").unwrap_err().line_number(), Some(3));
}
