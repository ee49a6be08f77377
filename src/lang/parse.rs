use super::symbol::{Kind, Symbol, SymbolTable};
use super::{token::*, Error, ErrorCode, Limits};
use crate::mach::{Address, Opcode, Operation, Program, FRAME_HEADER};
use std::convert::TryFrom;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// Translates a whole program in one pass. The first error ends the
/// translation and is returned unchanged.
pub fn parse<I: IntoIterator<Item = Token>>(tokens: I, limits: &Limits) -> Result<Program> {
    let mut parser = Parser {
        tokens: tokens.into_iter(),
        token: Token::Null,
        symbols: SymbolTable::new(limits.symbols, limits.max_level),
        prog: Program::new(limits.code),
        limits: *limits,
        depth: 0,
    };
    parser.program()?;
    debug!(len = parser.prog.len(), "translated");
    Ok(parser.prog)
}

struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    token: Token,
    symbols: SymbolTable,
    prog: Program,
    limits: Limits,
    depth: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    fn next(&mut self) {
        self.token = self.tokens.next().unwrap_or(Token::Null);
    }

    fn program(&mut self) -> Result<()> {
        self.next();
        self.block()?;
        if self.token != Token::Period {
            return Err(error!(PeriodExpected));
        }
        self.emit(Opcode::Opr, 0, Operation::Ret as i32)?;
        Ok(())
    }

    fn block(&mut self) -> Result<()> {
        let level = self.symbols.level();
        let mut slots = FRAME_HEADER;
        if self.token == Token::Const {
            loop {
                self.next();
                let name = self.ident(ErrorCode::DeclarationNeedsIdent)?;
                match self.token {
                    Token::Equal => self.next(),
                    Token::Becomes => return Err(error!(UseEqual)),
                    _ => return Err(error!(IdentNeedsEqual)),
                }
                let value = match &self.token {
                    Token::Number(digits) => self.number(digits)?,
                    _ => return Err(error!(EqualNeedsNumber)),
                };
                self.next();
                self.symbols.declare(&name, Kind::Constant, level)?.value = value;
                if !self.separator()? {
                    break;
                }
            }
        }
        if self.token == Token::Var {
            loop {
                self.next();
                let name = self.ident(ErrorCode::DeclarationNeedsIdent)?;
                self.symbols.declare(&name, Kind::Variable, level)?.address = slots;
                slots += 1;
                if !self.separator()? {
                    break;
                }
            }
        }
        self.emit(Opcode::Inc, 0, to_m(slots)?)?;
        while self.token == Token::Procedure {
            self.procedure()?;
        }
        self.statement()
    }

    /// After one declaration: `true` on a comma, `false` after the closing
    /// semicolon.
    fn separator(&mut self) -> Result<bool> {
        match self.token {
            Token::Comma => Ok(true),
            Token::Semicolon => {
                self.next();
                Ok(false)
            }
            _ => Err(error!(SemicolonOrComma)),
        }
    }

    fn procedure(&mut self) -> Result<()> {
        self.next();
        let name = self.ident(ErrorCode::DeclarationNeedsIdent)?;
        let level = self.symbols.level();
        let entry = self.prog.len() + 1;
        self.symbols.declare(&name, Kind::Procedure, level)?.address = entry;
        self.expect(Token::Semicolon, ErrorCode::SemicolonOrComma)?;
        let jump = self.emit(Opcode::Jmp, 0, 0)?;
        let inner = self.symbols.open_scope()?;
        debug!(name = %name, entry, level = inner, "procedure");
        self.block()?;
        self.emit(Opcode::Opr, 0, Operation::Ret as i32)?;
        self.prog.patch(jump, self.prog.len())?;
        self.symbols.close_scope();
        self.expect(Token::Semicolon, ErrorCode::SemicolonOrComma)
    }

    fn statement(&mut self) -> Result<()> {
        self.descend()?;
        let result = self.statement_body();
        self.depth -= 1;
        result
    }

    fn statement_body(&mut self) -> Result<()> {
        match self.token {
            Token::Ident(_) => {
                let sym = self.lookup(ErrorCode::UndeclaredIdent)?;
                if sym.kind != Kind::Variable {
                    return Err(error!(AssignToNonVariable; &sym.name));
                }
                self.expect(Token::Becomes, ErrorCode::BecomesExpected)?;
                self.expression()?;
                self.store(&sym)
            }
            Token::Call => {
                self.next();
                let sym = self.lookup(ErrorCode::CallNeedsIdent)?;
                if sym.kind != Kind::Procedure {
                    return Err(error!(CallOfNonProcedure; &sym.name));
                }
                let l = self.distance(&sym);
                self.emit(Opcode::Cal, l, to_m(sym.address)?)?;
                Ok(())
            }
            Token::Begin => {
                self.next();
                self.statement()?;
                while self.token == Token::Semicolon {
                    self.next();
                    self.statement()?;
                }
                match self.token {
                    Token::End => {
                        self.next();
                        Ok(())
                    }
                    Token::Period | Token::Null => Err(error!(SemicolonOrEnd)),
                    _ => Err(error!(SemicolonBetweenStatements)),
                }
            }
            Token::If => {
                self.next();
                self.condition()?;
                self.expect(Token::Then, ErrorCode::ThenExpected)?;
                let jpc = self.emit(Opcode::Jpc, 0, 0)?;
                self.statement()?;
                let jmp = self.emit(Opcode::Jmp, 0, 0)?;
                self.prog.patch(jpc, self.prog.len())?;
                if self.token == Token::Else {
                    self.next();
                    self.statement()?;
                }
                self.prog.patch(jmp, self.prog.len())
            }
            Token::While => {
                let top = self.prog.len();
                self.next();
                self.condition()?;
                let jpc = self.emit(Opcode::Jpc, 0, 0)?;
                self.expect(Token::Do, ErrorCode::DoExpected)?;
                self.statement()?;
                self.emit(Opcode::Jmp, 0, to_m(top)?)?;
                self.prog.patch(jpc, self.prog.len())
            }
            Token::Out => {
                self.next();
                if !self.token.starts_expression() {
                    return Err(error!(OutNeedsExpression));
                }
                self.expression()?;
                self.emit(Opcode::Out, 0, 1)?;
                Ok(())
            }
            Token::In => {
                self.next();
                let sym = self.lookup(ErrorCode::InNeedsIdent)?;
                if sym.kind != Kind::Variable {
                    return Err(error!(InNeedsIdent; &sym.name));
                }
                self.emit(Opcode::In, 0, 2)?;
                self.store(&sym)
            }
            _ => Ok(()),
        }
    }

    fn condition(&mut self) -> Result<()> {
        if self.token == Token::Odd {
            self.next();
            self.expression()?;
            return self.operate(Operation::Odd);
        }
        self.expression()?;
        let operation = match self.token {
            Token::Equal => Operation::Eql,
            Token::NotEqual => Operation::Neq,
            Token::Less => Operation::Lss,
            Token::LessEqual => Operation::Leq,
            Token::Greater => Operation::Gtr,
            Token::GreaterEqual => Operation::Geq,
            _ => return Err(error!(RelationExpected)),
        };
        self.next();
        self.expression()?;
        self.operate(operation)
    }

    fn expression(&mut self) -> Result<()> {
        self.descend()?;
        let result = self.expression_body();
        self.depth -= 1;
        result
    }

    fn expression_body(&mut self) -> Result<()> {
        let negate = match self.token {
            Token::Plus => {
                self.next();
                false
            }
            Token::Minus => {
                self.next();
                true
            }
            _ => false,
        };
        self.term()?;
        if negate {
            self.operate(Operation::Neg)?;
        }
        loop {
            let operation = match self.token {
                Token::Plus => Operation::Add,
                Token::Minus => Operation::Sub,
                _ => return Ok(()),
            };
            self.next();
            self.term()?;
            self.operate(operation)?;
        }
    }

    fn term(&mut self) -> Result<()> {
        self.factor()?;
        loop {
            let operation = match self.token {
                Token::Multiply => Operation::Mul,
                Token::Slash => Operation::Div,
                _ => return Ok(()),
            };
            self.next();
            self.factor()?;
            self.operate(operation)?;
        }
    }

    fn factor(&mut self) -> Result<()> {
        match &self.token {
            Token::Ident(_) => {
                let sym = self.lookup(ErrorCode::FactorStart)?;
                match sym.kind {
                    Kind::Constant => self.emit(Opcode::Lit, 0, sym.value)?,
                    Kind::Variable => {
                        let l = self.distance(&sym);
                        self.emit(Opcode::Lod, l, to_m(sym.address)?)?
                    }
                    Kind::Procedure => return Err(error!(ProcedureInExpression; &sym.name)),
                };
                Ok(())
            }
            Token::Number(digits) => {
                let value = self.number(digits)?;
                self.emit(Opcode::Lit, 0, value)?;
                self.next();
                if self.token == Token::Null {
                    return Err(error!(SemicolonOrEnd));
                }
                Ok(())
            }
            Token::LParen => {
                self.next();
                self.expression()?;
                self.expect(Token::RParen, ErrorCode::RightParenMissing)
            }
            Token::Null => Err(error!(SemicolonOrEnd)),
            _ => Err(error!(FactorStart)),
        }
    }

    /// Bounds the recursion of nested statements and parenthesized
    /// expressions.
    fn descend(&mut self) -> Result<()> {
        if self.depth >= self.limits.nesting {
            return Err(error!(TooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    /// Consumes an identifier, reporting `code` if the token is anything else.
    fn ident(&mut self, code: ErrorCode) -> Result<String> {
        let name = match &self.token {
            Token::Ident(name) => name.clone(),
            _ => return Err(Error::new(code)),
        };
        if name.chars().count() > self.limits.ident_len {
            return Err(error!(IdentTooLong; &name));
        }
        self.next();
        Ok(name)
    }

    /// Consumes an identifier and finds the declaration it refers to.
    fn lookup(&mut self, code: ErrorCode) -> Result<Symbol> {
        let name = self.ident(code)?;
        match self.symbols.resolve(&name, self.symbols.level()) {
            Some(sym) => Ok(sym.clone()),
            None => Err(error!(UndeclaredIdent; &name)),
        }
    }

    fn number(&self, digits: &str) -> Result<i32> {
        if digits.len() > self.limits.number_digits {
            return Err(error!(NumberTooLarge; digits));
        }
        digits
            .parse::<i32>()
            .map_err(|_| error!(NumberTooLarge; digits))
    }

    fn expect(&mut self, token: Token, code: ErrorCode) -> Result<()> {
        if self.token != token {
            return Err(Error::new(code));
        }
        self.next();
        Ok(())
    }

    /// Static links to follow from the current level to the declaring one.
    fn distance(&self, sym: &Symbol) -> usize {
        self.symbols.level().saturating_sub(sym.level)
    }

    fn store(&mut self, sym: &Symbol) -> Result<()> {
        let l = self.distance(sym);
        self.emit(Opcode::Sto, l, to_m(sym.address)?)?;
        Ok(())
    }

    fn operate(&mut self, operation: Operation) -> Result<()> {
        self.emit(Opcode::Opr, 0, operation as i32)?;
        Ok(())
    }

    fn emit(&mut self, op: Opcode, l: usize, m: i32) -> Result<Address> {
        self.prog.emit(op, l, m)
    }
}

fn to_m(addr: usize) -> Result<i32> {
    i32::try_from(addr).map_err(|_| error!(CodeTooLong))
}

#[cfg(test)]
mod tests {
    use super::super::lex;
    use super::*;
    use crate::mach::Instruction;

    fn compile(s: &str) -> Result<Program> {
        parse(lex(s)?, &Limits::default())
    }

    fn compile_with(s: &str, limits: Limits) -> Result<Program> {
        parse(lex(s)?, &limits)
    }

    fn code(s: &str) -> String {
        compile(s).unwrap().to_string()
    }

    fn error_code(s: &str) -> u16 {
        compile(s).unwrap_err().code()
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(code("."), "6 0 3\n2 0 0\n");
    }

    #[test]
    fn test_out_expression() {
        assert_eq!(code("out 1+2."), "6 0 3\n1 0 1\n1 0 2\n2 0 2\n9 0 1\n2 0 0\n");
    }

    #[test]
    fn test_assign_and_out() {
        assert_eq!(
            code("var x; begin x:=5; out x end."),
            "6 0 4\n1 0 5\n4 0 3\n3 0 3\n9 0 1\n2 0 0\n"
        );
    }

    #[test]
    fn test_constants_are_substituted() {
        assert_eq!(
            code("const a = 7, b = 2; out -a * b."),
            "6 0 3\n1 0 7\n1 0 2\n2 0 4\n2 0 1\n9 0 1\n2 0 0\n"
        );
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            code("var x; if x = 1 then x := 2 else x := 3."),
            "6 0 4\n3 0 3\n1 0 1\n2 0 8\n8 0 8\n1 0 2\n4 0 3\n7 0 10\n1 0 3\n4 0 3\n2 0 0\n"
        );
    }

    #[test]
    fn test_while() {
        assert_eq!(
            code("var x; while x < 3 do x := x + 1."),
            "6 0 4\n3 0 3\n1 0 3\n2 0 10\n8 0 10\n3 0 3\n1 0 1\n2 0 2\n4 0 3\n7 0 1\n2 0 0\n"
        );
    }

    #[test]
    fn test_nested_procedure_levels() {
        let prog = compile(
            "var x;
            procedure p;
              var y;
              begin y := x; x := y + 1 end;
            call p.",
        )
        .unwrap();
        let ops = prog.ops();
        assert_eq!(ops[1], Instruction::new(Opcode::Jmp, 0, 10));
        assert_eq!(ops[2], Instruction::new(Opcode::Inc, 0, 4));
        assert_eq!(ops[3], Instruction::new(Opcode::Lod, 1, 3));
        assert_eq!(ops[4], Instruction::new(Opcode::Sto, 0, 3));
        assert_eq!(ops[5], Instruction::new(Opcode::Lod, 0, 3));
        assert_eq!(ops[8], Instruction::new(Opcode::Sto, 1, 3));
        assert_eq!(ops[10], Instruction::new(Opcode::Cal, 0, 2));
        assert_eq!(prog.len(), 12);
    }

    #[test]
    fn test_call_distance() {
        let prog = compile(
            "procedure a;
              procedure b;
                procedure c;
                  call a;
                call c;
              call b;
            call a.",
        )
        .unwrap();
        let calls: Vec<(usize, i32)> = prog
            .ops()
            .iter()
            .filter(|op| op.op == Opcode::Cal)
            .map(|op| (op.l, op.m))
            .collect();
        assert_eq!(calls, vec![(3, 2), (0, 6), (0, 4), (0, 2)]);
    }

    #[test]
    fn test_jumps_are_patched() {
        let prog = compile(
            "var i;
            procedure p;
              if odd i then out i else out 0;
            begin
              i := 0;
              while i < 4 do begin call p; i := i + 1 end
            end.",
        )
        .unwrap();
        for op in prog.ops() {
            if op.op == Opcode::Jmp || op.op == Opcode::Jpc {
                assert!(op.m > 0);
                assert!((op.m as usize) <= prog.len());
            }
        }
    }

    #[test]
    fn test_declaration_errors() {
        assert_eq!(error_code("const a := 1;."), 1);
        assert_eq!(error_code("const a = b;."), 2);
        assert_eq!(error_code("const a 1;."), 3);
        assert_eq!(error_code("const = 1;."), 4);
        assert_eq!(error_code("var ;."), 4);
        assert_eq!(error_code("procedure 1;."), 4);
        assert_eq!(error_code("var a b;."), 5);
        assert_eq!(error_code("procedure p . "), 5);
        assert_eq!(error_code("procedure p; out 1."), 5);
        assert_eq!(error_code("var x, x;."), 28);
        assert_eq!(error_code("procedure p;; procedure p;;."), 28);
        assert_eq!(error_code("const c = 1, c = 2;."), 29);
        assert_eq!(error_code("const c = 1; var c;."), 28);
    }

    #[test]
    fn test_statement_errors() {
        assert_eq!(error_code("var x; x := x"), 9);
        assert_eq!(error_code("out 1 out 2."), 9);
        assert_eq!(error_code("var x; begin x := 1 x := 2 end."), 10);
        assert_eq!(error_code("x := 1."), 11);
        assert_eq!(error_code("call p."), 11);
        assert_eq!(error_code("const c = 1; c := 2."), 12);
        assert_eq!(error_code("procedure p;; p := 2."), 12);
        assert_eq!(error_code("var x; x = 1."), 13);
        assert_eq!(error_code("call 1."), 14);
        assert_eq!(error_code("var x; call x."), 15);
        assert_eq!(error_code("var x; if odd x x := 1."), 16);
        assert_eq!(error_code("var x; begin x := 1."), 17);
        assert_eq!(error_code("var x; while odd x x := 1."), 18);
        assert_eq!(error_code("out ."), 26);
        assert_eq!(error_code("in 5."), 27);
        assert_eq!(error_code("const c = 1; in c."), 27);
    }

    #[test]
    fn test_expression_errors() {
        assert_eq!(error_code("var x; if x x := 1."), 20);
        assert_eq!(error_code("procedure p; out p;."), 21);
        assert_eq!(error_code("out (1."), 22);
        assert_eq!(error_code("out 1 * )."), 23);
        assert_eq!(error_code("out 1 +"), 17);
        assert_eq!(error_code("out 3"), 17);
    }

    #[test]
    fn test_identifier_length() {
        assert!(compile("var abcdefghijk; abcdefghijk := 1.").is_ok());
        assert_eq!(error_code("var abcdefghijkl;."), 31);
        assert_eq!(error_code("out abcdefghijkl."), 31);
    }

    #[test]
    fn test_number_length() {
        assert!(compile("out 99999.").is_ok());
        assert!(compile("out 00001.").is_ok());
        assert_eq!(error_code("out 123456."), 25);
        assert_eq!(error_code("const big = 100000;."), 25);
    }

    #[test]
    fn test_capacities() {
        let limits = Limits {
            code: 5,
            ..Limits::default()
        };
        assert_eq!(compile_with("out 1+2.", limits).unwrap_err().code(), 30);
        let limits = Limits {
            symbols: 1,
            ..Limits::default()
        };
        assert_eq!(compile_with("var a, b;.", limits).unwrap_err().code(), 32);
        let limits = Limits {
            max_level: 1,
            ..Limits::default()
        };
        assert!(compile_with("procedure a;;.", limits).is_ok());
        assert_eq!(
            compile_with("procedure a; procedure b;;;.", limits)
                .unwrap_err()
                .code(),
            33
        );
    }

    #[test]
    fn test_deep_parentheses() {
        let nested = |n: usize| format!("out {}1{}.", "(".repeat(n), ")".repeat(n));
        assert!(compile(&nested(200)).is_ok());
        assert_eq!(error_code(&nested(300)), 38);
        assert_eq!(error_code(&nested(200_000)), 38);
    }

    #[test]
    fn test_deep_statements() {
        let nested = |n: usize| format!("{}{}.", "begin ".repeat(n), "end ".repeat(n));
        assert!(compile(&nested(200)).is_ok());
        assert_eq!(error_code(&nested(200_000)), 38);
        let limits = Limits {
            nesting: 4,
            ..Limits::default()
        };
        let src = "var x; while odd x do if x = 1 then x := 2.";
        assert!(compile_with(src, limits).is_ok());
        let src = "var x; while odd x do if x = 1 then begin x := 2 end.";
        assert_eq!(compile_with(src, limits).unwrap_err().code(), 38);
    }

    #[test]
    fn test_scope_closes_with_procedure() {
        assert_eq!(error_code("procedure p; var y;; y := 1."), 11);
        assert!(compile("var y; procedure p; var y; y := 1; y := 2.").is_ok());
    }
}
