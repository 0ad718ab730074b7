#[macro_use]
mod common;

tests_ok!(
    literals,
    "print \"(\" + \")\"; print \"a string\";",
    ["()", "a string"]
);

tests_ok!(
    multiline,
    "var s = \"1\n2\n3\"; print s;",
    ["1\n2\n3"]
);

tests_ok!(
    unicode,
    "print \"\u{00e9}\u{00f1}\u{00fc}\";",
    ["\u{00e9}\u{00f1}\u{00fc}"]
);

tests_err!(
    unterminated,
    "\"oh no, a newline in the string\nis fine, but this never closes;\n",
    65,
    "[line 2] Error: Unterminated string.\n"
);
