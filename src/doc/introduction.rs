/*!
# Introductory Tutorial for PL/0

PL/0 programs live in plain text files. Write this one to `hello.pl0`.

```text
out 1 + 2.
```

Then compile and run it.

<pre><code>&nbsp;$ pl0 hello.pl0
&nbsp;3
</code></pre>

Every program is a block followed by a period. A block declares its
constants, variables and procedures, then runs one statement. Use
`begin` and `end` to make many statements into one.

```text
const limit = 10;
var i, sum;
begin
  i := 1;
  sum := 0;
  while i <= limit do
  begin
    sum := sum + i;
    i := i + 1
  end;
  out sum
end.
```

Semicolons separate statements, they do not end them. Placing one
before `end` is allowed because an empty statement is a statement.

Programs read numbers with `in`. The machine stops and prompts with `?`
until you type an integer.

```text
var n;
begin
  in n;
  if odd n then out 1 else out 0
end.
```

Stop a running program with CTRL-C.

## Looking inside

`-l` prints the tokens the scanner found. `-a` prints the machine code
the compiler generated, first as raw `op l m` triples and then as a
listing with mnemonics. `-v` prints the registers and the stack after
every instruction the machine executes.

<pre><code>&nbsp;$ pl0 -a hello.pl0
&nbsp;6 0 3
&nbsp;1 0 1
&nbsp;1 0 2
&nbsp;2 0 2
&nbsp;9 0 1
&nbsp;2 0 0
&nbsp;
&nbsp;# | OP  L M
&nbsp;0 | INC 0 3
&nbsp;1 | LIT 0 1
&nbsp;2 | LIT 0 2
&nbsp;3 | OPR 0 ADD
&nbsp;4 | SIO 0 1
&nbsp;5 | OPR 0 RET
&nbsp;
&nbsp;3
</code></pre>

The raw form can be saved and run later with `--bytecode`. A token
file in the classic numeric format runs with `--tokens`.

*/
