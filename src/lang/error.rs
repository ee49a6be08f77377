use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            message: String::new(),
        }
    }

    /// The catalogue number. Zero is never produced; success is `Ok`.
    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn is_runtime(&self) -> bool {
        self.code >= ErrorCode::StackOverflow as u16
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: line,
            message: self.message.clone(),
        }
    }

    /// Adds detail to the message, after any detail already present.
    pub fn message(&self, message: &str) -> Error {
        let message = if self.message.is_empty() {
            message.to_string()
        } else {
            format!("{} {}", self.message, message)
        };
        Error {
            code: self.code,
            line_number: self.line_number,
            message,
        }
    }

    pub fn description(&self) -> &'static str {
        ErrorCode::describe(self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UseEqual = 1,
    EqualNeedsNumber = 2,
    IdentNeedsEqual = 3,
    DeclarationNeedsIdent = 4,
    SemicolonOrComma = 5,
    AfterProcedure = 6,
    StatementExpected = 7,
    AfterStatementPart = 8,
    PeriodExpected = 9,
    SemicolonBetweenStatements = 10,
    UndeclaredIdent = 11,
    AssignToNonVariable = 12,
    BecomesExpected = 13,
    CallNeedsIdent = 14,
    CallOfNonProcedure = 15,
    ThenExpected = 16,
    SemicolonOrEnd = 17,
    DoExpected = 18,
    AfterStatement = 19,
    RelationExpected = 20,
    ProcedureInExpression = 21,
    RightParenMissing = 22,
    FactorStart = 23,
    ExpressionStart = 24,
    NumberTooLarge = 25,
    OutNeedsExpression = 26,
    InNeedsIdent = 27,
    CannotReuse = 28,
    RedefineConstant = 29,

    // *** Capacity and scanner
    CodeTooLong = 30,
    IdentTooLong = 31,
    SymbolTableFull = 32,
    NestingTooDeep = 33,
    InvalidSymbol = 34,
    UnterminatedComment = 35,
    InvalidIdent = 36,
    MalformedFile = 37,
    TooDeep = 38,

    // *** Machine
    StackOverflow = 50,
    StackUnderflow = 51,
    DivisionByZero = 52,
    Overflow = 53,
    InvalidInstruction = 54,
    Break = 55,
    InvalidInput = 56,
}

impl ErrorCode {
    fn describe(code: u16) -> &'static str {
        match code {
            1 => "Use = instead of :=.",
            2 => "= must be followed by a number.",
            3 => "Identifier must be followed by =.",
            4 => "const, var, procedure must be followed by identifier.",
            5 => "Semicolon or comma missing.",
            6 => "Incorrect symbol after procedure declaration.",
            7 => "Statement expected.",
            8 => "Incorrect symbol after statement part in block.",
            9 => "Period expected.",
            10 => "Semicolon between statements missing.",
            11 => "Undeclared identifier.",
            12 => "Assignment to constant or procedure is not allowed.",
            13 => "Assignment operator expected.",
            14 => "call must be followed by an identifier.",
            15 => "Call of a constant or variable is meaningless.",
            16 => "then expected.",
            17 => "Semicolon or end expected.",
            18 => "do expected.",
            19 => "Incorrect symbol following statement.",
            20 => "Relational operator expected.",
            21 => "Expression must not contain a procedure identifier.",
            22 => "Right parenthesis missing.",
            23 => "The preceding factor cannot begin with this symbol.",
            24 => "An expression cannot begin with this symbol.",
            25 => "This number is too large.",
            26 => "out must be followed by an expression.",
            27 => "in must be followed by an identifier.",
            28 => "Cannot reuse this symbol here.",
            29 => "Cannot redefine constants.",
            30 => "Generated code is too long.",
            31 => "This identifier is too long.",
            32 => "Too many symbols.",
            33 => "Procedures are nested too deeply.",
            34 => "Invalid symbol.",
            35 => "Reached end of input before end of comment.",
            36 => "Identifier does not start with a letter.",
            37 => "Malformed input file.",
            38 => "Statements or expressions are nested too deeply.",
            50 => "Stack overflow.",
            51 => "Stack access out of range.",
            52 => "Division by zero.",
            53 => "Arithmetic overflow.",
            54 => "Invalid instruction.",
            55 => "Break.",
            56 => "Input must be an integer.",
            _ => "",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = self.description();
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" (line {})", line_number));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "Error number {}{}", self.code, suffix)
        } else {
            write!(f, "Error number {}, {}{}", self.code, code_str, suffix)
        }
    }
}

impl std::error::Error for Error {}
