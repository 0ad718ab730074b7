#[macro_use]
mod common;

tests_ok!(
    then_branch,
    "if (true) print \"then\"; if (false) print \"else\";",
    ["then"]
);

tests_ok!(
    else_branch,
    "if (true) print \"then\"; else print \"else\";\nif (false) print \"then\"; else print \"else\";",
    ["then", "else"]
);

tests_ok!(
    dangling_else_binds_to_nearest_if,
    "if (true) if (false) print \"bad\"; else print \"good\";",
    ["good"]
);

tests_ok!(
    truthiness,
    r#"
    if (false) print "bad"; else print "false is falsey";
    if (nil) print "bad"; else print "nil is falsey";
    if (0) print "0 is truthy"; else print "bad";
    if ("") print "empty string is truthy"; else print "bad";
    "#,
    ["false is falsey", "nil is falsey", "0 is truthy", "empty string is truthy"]
);
