/*!
# The Machine

Code is a list of `(op, l, m)` instructions. The machine has a program
counter `pc`, a base pointer `bp` to the current activation record and
a stack pointer `sp`. It starts with `pc = 0, bp = 1, sp = 0`.

| op | name | effect |
|----|------|--------|
| 1  | LIT  | push `m` |
| 2  | OPR  | operation `m` on the top of the stack |
| 3  | LOD  | push the cell at offset `m` of the frame `l` levels out |
| 4  | STO  | pop into the cell at offset `m` of the frame `l` levels out |
| 5  | CAL  | call the procedure at `m` declared `l` levels out |
| 6  | INC  | reserve `m` cells |
| 7  | JMP  | jump to `m` |
| 8  | JPC  | pop and jump to `m` if zero |
| 9  | SIO  | pop and print |
| 10 | SIO  | read and push |

The operations of `OPR` are `RET` 0, `NEG` 1, `ADD` 2, `SUB` 3, `MUL` 4,
`DIV` 5, `ODD` 6, `MOD` 7, `EQL` 8, `NEQ` 9, `LSS` 10, `LEQ` 11, `GTR` 12
and `GEQ` 13.

## Activation records

Every frame begins with three cells: the static link to the frame of the
lexically enclosing procedure, the dynamic link to the caller's frame and
the return address. `CAL` writes them above the stack and points `bp` at
the first one. The callee's `INC` then reserves them along with its own
variables, which start at offset 3. `RET` restores `bp` and `pc` from the
links and drops the frame.

The `-v` trace prints the stack with frames separated by `|`.

```text
  pc    bp    sp  stack
   4     1     4  0 0 0 5
```

## Limits

The stack holds 2000 cells unless `--stack-height` says otherwise. Every
stack access is checked, so a runaway recursion ends with a stack
overflow error. Division by zero and arithmetic overflow are errors too.

*/
