#[macro_use]
mod common;

tests_ok!(empty_file, "", []);

tests_ok!(
    operator_precedence,
    r#"
    print 2 + 3 * 4;
    print (2 + 3) * 4;
    print 2 - 3 - 4;
    print 16 / 4 / 2;
    print 1 < 2 and 2 < 3;
    print !(1 == 2);
    "#,
    ["14", "20", "-5", "2", "true", "true"]
);

tests_err!(
    unexpected_character,
    "print 1;\nprint 2 | 3;\n",
    65,
    "[line 2] Error: Unexpected character.\n"
);
