/// Machine Dialect programs understood by the stub toolchain
pub mod code_samples {
    pub const ASSIGN_NUMBER: &str = "Define `x` as number.\nSet `x` to _42_.";
    pub const ARITHMETIC: &str = "Define `a` as number.
Define `b` as number.
Define `result` as number.
Set `a` to _10_.
Set `b` to _5_.
Set `result` to `a` + `b`.";
    pub const NOT_A_PROGRAM: &str = "This is not valid Machine Dialect code!";
    pub const UNDECLARED_ASSIGNMENT: &str = "Set `undefined_var` to _123_.";
    pub const SILENT: &str = "Define `quiet` as number.";
    pub const SILENT_CRASH: &str = "Define `crash` as number.";
    pub const NEVER_ENDS: &str = "Define `forever` as number.";
}

/// Expected stub toolchain output
pub mod expected {
    pub const ASSIGN_OUTPUT: &str = "x = 42";
    pub const UNDECLARED_ERROR: &str = "Runtime error: assignment to undeclared variable";
}

/// POSIX shell stand-in for the `machine-dialect` executable.
///
/// `compile` accepts sources whose lines start with `Define` or `Set` and
/// copies them to the `.mdbc` artifact. `run` picks its behaviour from marker
/// variable names in the artifact.
pub const STUB_TOOLCHAIN: &str = r##"#!/bin/sh
cmd="$1"
shift
case "$cmd" in
  compile)
    src="$1"
    if ! grep -Eq '^(Define|Set) ' "$src"; then
      echo "Unexpected token" >&2
      exit 1
    fi
    cp "$src" "${src%.md}.mdbc"
    ;;
  run)
    debug=0
    if [ "$1" = "--debug" ]; then
      debug=1
      shift
    fi
    artifact="$1"
    if [ ! -f "$artifact" ]; then
      echo "No such artifact: $artifact" >&2
      exit 2
    fi
    if [ "$debug" = 1 ]; then
      echo "debug: loaded $artifact" >&2
    fi
    if grep -q 'forever' "$artifact"; then
      exec sleep 30
    fi
    if grep -q 'quiet' "$artifact"; then
      exit 0
    fi
    if grep -q 'crash' "$artifact"; then
      exit 3
    fi
    if ! grep -q '^Define' "$artifact"; then
      echo "Runtime error: assignment to undeclared variable" >&2
      exit 1
    fi
    echo "x = 42"
    ;;
  *)
    echo "unknown command: $cmd" >&2
    exit 64
    ;;
esac
"##;
