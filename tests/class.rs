#[macro_use]
mod common;

tests_ok!(empty, "class Foo {} print Foo;", ["Foo"]);

tests_ok!(
    reference_self,
    "class Foo { returnSelf() { return Foo; } } print Foo().returnSelf();",
    ["Foo"]
);

tests_ok!(
    local_reference_self,
    "{ class Foo { returnSelf() { return Foo; } } print Foo().returnSelf(); }",
    ["Foo"]
);

tests_ok!(
    local_inherit_other,
    "class A {} { class B < A {} print B; }",
    ["B"]
);

tests_err!(
    inherit_self,
    "class Foo < Foo {}\n",
    65,
    "[line 1] Error at 'Foo': A class can't inherit from itself.\n"
);

tests_err!(
    local_inherit_self,
    "{\nclass Foo < Foo {}\n}\n",
    65,
    "[line 2] Error at 'Foo': A class can't inherit from itself.\n"
);

tests_ok!(
    inherited_method,
    r#"
    class Foo {
        inFoo() { print "in foo"; }
    }
    class Bar < Foo {
        inBar() { print "in bar"; }
    }
    class Baz < Bar {
        inBaz() { print "in baz"; }
    }
    var baz = Baz();
    baz.inFoo();
    baz.inBar();
    baz.inBaz();
    "#,
    ["in foo", "in bar", "in baz"]
);
