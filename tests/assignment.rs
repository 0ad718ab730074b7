#[macro_use]
mod common;

tests_ok!(global, "var a = \"before\"; print a; a = \"after\"; print a;", ["before", "after"]);

tests_ok!(
    local,
    "{ var a = \"before\"; print a; a = \"after\"; print a; }",
    ["before", "after"]
);

tests_ok!(
    chained,
    "var a; var b; var c; a = b = c = \"value\"; print a; print b; print c;",
    ["value", "value", "value"]
);

tests_err!(
    grouping,
    "var a = \"a\";\n(a) = \"value\";\n",
    65,
    "[line 2] Error at '=': Invalid assignment target.\n"
);

tests_err!(
    infix_operator,
    "var a = \"a\";\nvar b = \"b\";\na + b = \"value\";\n",
    65,
    "[line 3] Error at '=': Invalid assignment target.\n"
);

tests_err!(undefined, "unknown = \"value\";\n", 70, "Undefined variable 'unknown'.\n[line 1]\n");
