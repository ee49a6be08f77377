/*!
# The Language

```text
program    = block "." .
block      = [ "const" ident "=" number { "," ident "=" number } ";" ]
             [ ( "var" | "int" ) ident { "," ident } ";" ]
             { "procedure" ident ";" block ";" }
             statement .
statement  = [ ident ":=" expression
             | "call" ident
             | "begin" statement { ";" statement } "end"
             | "if" condition "then" statement [ "else" statement ]
             | "while" condition "do" statement
             | "in" ident
             | "out" expression ] .
condition  = "odd" expression
           | expression ( "=" | "<>" | "<" | "<=" | ">" | ">=" ) expression .
expression = [ "+" | "-" ] term { ( "+" | "-" ) term } .
term       = factor { ( "*" | "/" ) factor } .
factor     = ident | number | "(" expression ")" .
```

## Names

Identifiers start with a letter and continue with letters and digits, up
to 11 characters. Reserved words are lowercase and may not be used as
names. Comments are written `/* like this */`.

Numbers are unsigned decimal literals of at most 5 digits. Values are
32 bit signed integers at run time.

## Scope

Every procedure opens a new lexical level. A name declared in a block is
visible in that block and in every procedure nested inside it, unless a
nested block declares the same name again. Procedures may call
themselves and any procedure visible at the call.

Constants are replaced by their value where they are used. Variables
live in the activation record of the block that declares them, so a
recursive procedure gets fresh variables on every call.

```text
var n, f;
procedure fact;
  var m;
  begin
    m := n;
    if m > 1 then
    begin
      n := n - 1;
      call fact;
      f := f * m
    end
    else f := 1
  end;
begin
  n := 5;
  call fact;
  out f
end.
```

## Errors

Compilation stops at the first error. See the appendix for the list.

*/
