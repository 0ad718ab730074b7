#[macro_use]
mod common;

tests_ok!(
    counts_up,
    "var i = 0; while (i < 3) { print i; i = i + 1; }",
    ["0", "1", "2"]
);

tests_ok!(
    condition_false_never_runs_body,
    "while (false) print \"bad\"; print \"ok\";",
    ["ok"]
);

tests_ok!(
    closure_in_body_shares_the_loop_variable,
    r#"
    fun loopClosure() {
        var i = 0;
        var closures = nil;
        while (i < 3) {
            fun closure() { print i; }
            closures = closure;
            i = i + 1;
        }
        return closures;
    }
    loopClosure()();
    "#,
    ["3"]
);

tests_ok!(
    return_from_inside_while,
    "fun f() { while (true) { return \"ok\"; } } print f();",
    ["ok"]
);
