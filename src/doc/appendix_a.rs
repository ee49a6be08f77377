/*!
# Error Messages

Errors print as `Error number N, message`.

## Compiler

| N  | message |
|----|---------|
| 1  | Use = instead of :=. |
| 2  | = must be followed by a number. |
| 3  | Identifier must be followed by =. |
| 4  | const, var, procedure must be followed by identifier. |
| 5  | Semicolon or comma missing. |
| 9  | Period expected. |
| 10 | Semicolon between statements missing. |
| 11 | Undeclared identifier. |
| 12 | Assignment to constant or procedure is not allowed. |
| 13 | Assignment operator expected. |
| 14 | call must be followed by an identifier. |
| 15 | Call of a constant or variable is meaningless. |
| 16 | then expected. |
| 17 | Semicolon or end expected. |
| 18 | do expected. |
| 20 | Relational operator expected. |
| 21 | Expression must not contain a procedure identifier. |
| 22 | Right parenthesis missing. |
| 23 | The preceding factor cannot begin with this symbol. |
| 25 | This number is too large. |
| 26 | out must be followed by an expression. |
| 27 | in must be followed by an identifier. |
| 28 | Cannot reuse this symbol here. |
| 29 | Cannot redefine constants. |
| 30 | Generated code is too long. |
| 31 | This identifier is too long. |
| 32 | Too many symbols. |
| 33 | Procedures are nested too deeply. |
| 38 | Statements or expressions are nested too deeply. |

Numbers 6, 7, 8, 19 and 24 belong to the classic catalogue and keep their
messages, but this compiler never reports them.

## Scanner and files

| N  | message |
|----|---------|
| 34 | Invalid symbol. |
| 35 | Reached end of input before end of comment. |
| 36 | Identifier does not start with a letter. |
| 37 | Malformed input file. |

## Machine

| N  | message |
|----|---------|
| 50 | Stack overflow. |
| 51 | Stack access out of range. |
| 52 | Division by zero. |
| 53 | Arithmetic overflow. |
| 54 | Invalid instruction. |
| 55 | Break. |
| 56 | Input must be an integer. |

*/
