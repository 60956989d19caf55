use crate::padding::eval_expr;
use crate::*;

#[test]
fn eval_expr_literals() {
    assert_eq!(eval_expr("20").unwrap(), 20.0);
    assert_eq!(eval_expr(" 2.5 ").unwrap(), 2.5);
    assert_eq!(eval_expr(".5").unwrap(), 0.5);
    assert_eq!(eval_expr("1e2").unwrap(), 100.0);
}

#[test]
fn eval_expr_precedence_and_grouping() {
    assert_eq!(eval_expr("720 - 90 / 4").unwrap(), 697.5);
    assert_eq!(eval_expr("2 + 3 * 4").unwrap(), 14.0);
    assert_eq!(eval_expr("(2 + 3) * 4").unwrap(), 20.0);
    assert_eq!(eval_expr("10 - 4 - 3").unwrap(), 3.0);
    assert_eq!(eval_expr("48 / 4 / 2").unwrap(), 6.0);
}

#[test]
fn eval_expr_unary_signs() {
    assert_eq!(eval_expr("-5").unwrap(), -5.0);
    assert_eq!(eval_expr("+5").unwrap(), 5.0);
    assert_eq!(eval_expr("-(2 + 3) * -2").unwrap(), 10.0);
    assert_eq!(eval_expr("3 - -2").unwrap(), 5.0);
}

#[test]
fn eval_expr_rejects_anything_but_arithmetic() {
    for bad in [
        "",
        "   ",
        "__import__('os')",
        "2 ** 3",
        "abs(2)",
        "1 2",
        "(1 + 2",
        "1 + 2)",
        "1 +",
        ".",
        "1e",
        "2 % 3",
    ] {
        assert!(eval_expr(bad).is_err(), "accepted {bad:?}");
    }
}

#[test]
fn eval_expr_rejects_division_by_zero() {
    assert_eq!(eval_expr("1 / (2 - 2)").unwrap_err().message, "division by zero");
}

#[test]
fn eval_expr_limits_nesting_depth() {
    let deep_parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert_eq!(
        eval_expr(&deep_parens).unwrap_err().message,
        "expression nested too deeply"
    );
    assert!(eval_expr(&format!("{}1", "(".repeat(100_000))).is_err());
    assert!(eval_expr(&format!("{}1", "-".repeat(100_000))).is_err());
    assert!(eval_expr(&format!("{}1", "+".repeat(100_000))).is_err());
}

#[test]
fn eval_expr_allows_reasonable_nesting() {
    let nested = format!("{}7{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(eval_expr(&nested).unwrap(), 7.0);
    assert_eq!(eval_expr(&format!("{}3", "-".repeat(100))).unwrap(), 3.0);
}

#[test]
fn padding_from_exprs_names_the_bad_side() {
    let err = Padding::from_exprs("20", "20", "x", "24").unwrap_err();
    match &err {
        Error::InvalidPadding { side, expr, .. } => {
            assert_eq!(*side, "top");
            assert_eq!(expr, "x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn padding_from_exprs_evaluates_each_side() {
    let p = Padding::from_exprs("10 + 10", "20", "40 / 2", "24").unwrap();
    assert_eq!(p, Padding::default());
}
