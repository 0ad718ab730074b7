#[macro_use]
mod common;

tests_ok!(
    reference_closure_multiple_times,
    r#"
    fun makeCounter() {
        var a = "a";
        fun inner() { print a; }
        return inner;
    }
    var counter = makeCounter();
    counter();
    counter();
    "#,
    ["a", "a"]
);

tests_ok!(
    close_over_later_variable,
    r#"
    var f;
    {
        var a = "a";
        var b = "b";
        fun g() { print b; print a; }
        f = g;
    }
    f();
    "#,
    ["b", "a"]
);

tests_ok!(
    assign_to_closure,
    r#"
    var f; var g;
    {
        var local = "local";
        fun f_() {
            print local;
            local = "after f";
            print local;
        }
        f = f_;

        fun g_() { print local; }
        g = g_;
    }
    f();
    g();
    "#,
    ["local", "after f", "after f"]
);

tests_ok!(
    nested_closures_each_capture_their_own_variable,
    r#"
    fun outer() {
        var x = "a";
        fun middle() {
            var y = "b";
            fun inner() {
                var z = "c";
                print x; print y; print z;
            }
            inner();
        }
        middle();
    }
    outer();
    "#,
    ["a", "b", "c"]
);
