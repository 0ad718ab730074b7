#[macro_use]
mod common;

tests_ok!(
    return_nil_if_no_value,
    "fun f() { return; } print f();",
    ["nil"]
);

tests_ok!(
    after_if,
    "fun f() { if (true) return \"ok\"; return \"bad\"; } print f();",
    ["ok"]
);

tests_ok!(
    after_while,
    "fun f() { while (true) return \"ok\"; } print f();",
    ["ok"]
);

tests_ok!(
    in_method,
    "class Foo { method() { return \"ok\"; } } print Foo().method();",
    ["ok"]
);

tests_err!(
    at_top_level,
    "return \"bad\";\n",
    65,
    "[line 1] Error at 'return': Can't return from top-level code.\n"
);
