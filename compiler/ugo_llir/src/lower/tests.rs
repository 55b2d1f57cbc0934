#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use ugo_ir::{BinaryOp, Module, ModuleBuilder, StmtId, StringInterner, UnaryOp};

use super::Lowerer;
use crate::error::LowerError;
use crate::mangle::Mangler;
use crate::scope::Symbol;

/// Lower `body` with `exit` as the only builtin and `globals` bound in the
/// module root scope. Also checks the scope chain is balanced afterwards,
/// whether lowering succeeded or not.
fn lower(
    module: &Module,
    interner: &StringInterner,
    globals: &[&str],
    body: StmtId,
) -> Result<String, LowerError> {
    let mangler = Mangler::new("ugo");
    let universe = [Symbol::builtin(interner.intern("exit"), mangler.builtin("exit"))];
    let mut lowerer = Lowerer::new(&module.arena, interner, mangler, universe);
    lowerer.scopes.enter();
    for (index, name) in globals.iter().enumerate() {
        lowerer.scopes.insert(Symbol::global(
            interner.intern(name),
            mangler.global("main", name),
            index,
        ));
    }

    let depth = lowerer.scopes.depth();
    let result = lowerer.lower_stmt(body);
    assert_eq!(lowerer.scopes.depth(), depth, "scope chain left unbalanced");
    result.map(|()| lowerer.finish())
}

/// Slot name of the local declared by `stmt`.
fn local(module: &Module, stmt: StmtId, name: &str) -> String {
    format!("%local_{name}.pos.{}", module.arena.get_stmt(stmt).span.start)
}

#[test]
fn literal_is_normalized_to_add_from_zero() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let seven = b.int(7);
    let decl = b.var("x", Some(seven));
    let body = b.block([decl]);
    let module = b.finish();

    let x = local(&module, decl, "x");
    assert_eq!(
        lower(&module, &interner, &[], body).unwrap(),
        format!(
            "\t%t0 = add i32 0, 7\n\
             \t{x} = alloca i32, align 4\n\
             \tstore i32 %t0, i32* {x}\n"
        )
    );
}

#[test]
fn declaration_without_initializer_stores_zero() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let decl = b.var("x", None);
    let body = b.block([decl]);
    let module = b.finish();

    let x = local(&module, decl, "x");
    assert_eq!(
        lower(&module, &interner, &[], body).unwrap(),
        format!("\t{x} = alloca i32, align 4\n\tstore i32 0, i32* {x}\n")
    );
}

#[test]
fn binary_operands_lower_left_to_right() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let a = b.ident("a");
    let c = b.ident("b");
    let diff = b.binary(BinaryOp::Sub, a, c);
    let stmt = b.expr_stmt(diff);
    let body = b.block([stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &["a", "b"], body).unwrap(),
        "\t%t0 = load i32, i32* @ugo_main_a, align 4\n\
         \t%t1 = load i32, i32* @ugo_main_b, align 4\n\
         \t%t2 = sub i32 %t0, %t1\n"
    );
}

#[test]
fn nested_binary_combines_last_values_of_each_side() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let one = b.int(1);
    let two = b.int(2);
    let mul = b.binary(BinaryOp::Mul, one, two);
    let three = b.int(3);
    let div = b.binary(BinaryOp::Div, mul, three);
    let stmt = b.expr_stmt(div);
    let body = b.block([stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &[], body).unwrap(),
        "\t%t0 = add i32 0, 1\n\
         \t%t1 = add i32 0, 2\n\
         \t%t2 = mul i32 %t0, %t1\n\
         \t%t3 = add i32 0, 3\n\
         \t%t4 = div i32 %t2, %t3\n"
    );
}

#[test]
fn negation_subtracts_from_zero() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let a = b.ident("a");
    let neg = b.unary(UnaryOp::Neg, a);
    let stmt = b.expr_stmt(neg);
    let body = b.block([stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &["a"], body).unwrap(),
        "\t%t0 = load i32, i32* @ugo_main_a, align 4\n\
         \t%t1 = sub i32 0, %t0\n"
    );
}

#[test]
fn unary_plus_and_parens_are_transparent() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let a = b.ident("a");
    let paren = b.paren(a);
    let pos = b.unary(UnaryOp::Pos, paren);
    let outer = b.paren(pos);
    let decl = b.var("x", Some(outer));
    let body = b.block([decl]);
    let module = b.finish();

    let x = local(&module, decl, "x");
    assert_eq!(
        lower(&module, &interner, &["a"], body).unwrap(),
        format!(
            "\t%t0 = load i32, i32* @ugo_main_a, align 4\n\
             \t{x} = alloca i32, align 4\n\
             \tstore i32 %t0, i32* {x}\n"
        )
    );
}

#[test]
fn repeated_subexpressions_are_recomputed() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let first = b.ident("a");
    let second = b.ident("a");
    let sum = b.binary(BinaryOp::Add, first, second);
    let stmt = b.expr_stmt(sum);
    let body = b.block([stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &["a"], body).unwrap(),
        "\t%t0 = load i32, i32* @ugo_main_a, align 4\n\
         \t%t1 = load i32, i32* @ugo_main_a, align 4\n\
         \t%t2 = add i32 %t0, %t1\n"
    );
}

#[test]
fn builtin_call_takes_argument_value() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let a = b.ident("a");
    let call = b.call("exit", [a]);
    let stmt = b.expr_stmt(call);
    let body = b.block([stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &["a"], body).unwrap(),
        "\t%t0 = load i32, i32* @ugo_main_a, align 4\n\
         \t%t1 = call i32(i32) @ugo_builtin_exit(i32 %t0)\n"
    );
}

#[test]
fn assignment_stores_into_existing_slot() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let decl = b.var("x", None);
    let five = b.int(5);
    let assign_local = b.assign("x", five);
    let six = b.int(6);
    let assign_global = b.assign("g", six);
    let body = b.block([decl, assign_local, assign_global]);
    let module = b.finish();

    let x = local(&module, decl, "x");
    assert_eq!(
        lower(&module, &interner, &["g"], body).unwrap(),
        format!(
            "\t{x} = alloca i32, align 4\n\
             \tstore i32 0, i32* {x}\n\
             \t%t0 = add i32 0, 5\n\
             \tstore i32 %t0, i32* {x}\n\
             \t%t1 = add i32 0, 6\n\
             \tstore i32 %t1, i32* @ugo_main_g\n"
        )
    );
}

#[test]
fn initializer_sees_enclosing_binding() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let outer = b.var("x", None);
    let x = b.ident("x");
    let inner = b.var("x", Some(x));
    let nested = b.block([inner]);
    let body = b.block([outer, nested]);
    let module = b.finish();

    let outer_slot = local(&module, outer, "x");
    let inner_slot = local(&module, inner, "x");
    assert_eq!(
        lower(&module, &interner, &[], body).unwrap(),
        format!(
            "\t{outer_slot} = alloca i32, align 4\n\
             \tstore i32 0, i32* {outer_slot}\n\
             \t%t0 = load i32, i32* {outer_slot}, align 4\n\
             \t{inner_slot} = alloca i32, align 4\n\
             \tstore i32 %t0, i32* {inner_slot}\n"
        )
    );
}

#[test]
fn shadowing_is_limited_to_the_inner_block() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let outer = b.var("x", None);
    let inner = b.var("x", None);
    let read_inner = b.ident("x");
    let use_inner = b.expr_stmt(read_inner);
    let nested = b.block([inner, use_inner]);
    let read_outer = b.ident("x");
    let use_outer = b.expr_stmt(read_outer);
    let body = b.block([outer, nested, use_outer]);
    let module = b.finish();

    let outer_slot = local(&module, outer, "x");
    let inner_slot = local(&module, inner, "x");
    assert_ne!(outer_slot, inner_slot);
    let text = lower(&module, &interner, &[], body).unwrap();
    let loads: Vec<_> = text.lines().filter(|l| l.contains("= load")).collect();
    assert_eq!(
        loads,
        [
            format!("\t%t0 = load i32, i32* {inner_slot}, align 4"),
            format!("\t%t1 = load i32, i32* {outer_slot}, align 4"),
        ]
    );
}

#[test]
fn redeclaration_in_same_block_gets_new_slot() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let first = b.var("x", None);
    let second = b.var("x", None);
    let read = b.ident("x");
    let use_x = b.expr_stmt(read);
    let body = b.block([first, second, use_x]);
    let module = b.finish();

    let second_slot = local(&module, second, "x");
    let text = lower(&module, &interner, &[], body).unwrap();
    assert_eq!(text.matches("alloca").count(), 2);
    assert!(text.ends_with(&format!("\t%t0 = load i32, i32* {second_slot}, align 4\n")));
}

#[test]
fn undefined_identifier_is_reported() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let y = b.ident("y");
    let stmt = b.expr_stmt(y);
    let body = b.block([stmt]);
    let module = b.finish();

    let err = lower(&module, &interner, &[], body).unwrap_err();
    assert_eq!(
        err,
        LowerError::undefined_variable("y", module.arena.get_expr(y).span)
    );
}

#[test]
fn undefined_assignment_target_is_reported() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let one = b.int(1);
    let assign = b.assign("missing", one);
    let body = b.block([assign]);
    let module = b.finish();

    let err = lower(&module, &interner, &[], body).unwrap_err();
    assert!(matches!(err, LowerError::UndefinedVariable { ref name, .. } if name == "missing"));
}

#[test]
fn inner_declaration_is_gone_after_block() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let inner = b.var("t", None);
    let nested = b.block([inner]);
    let read = b.ident("t");
    let use_t = b.expr_stmt(read);
    let body = b.block([nested, use_t]);
    let module = b.finish();

    let err = lower(&module, &interner, &[], body).unwrap_err();
    assert!(matches!(err, LowerError::UndefinedVariable { .. }));
}

#[test]
fn failure_deep_inside_blocks_keeps_scopes_balanced() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let missing = b.ident("missing");
    let stmt = b.expr_stmt(missing);
    let level3 = b.block([stmt]);
    let level2 = b.block([level3]);
    let body = b.block([level2]);
    let module = b.finish();

    // `lower` asserts the depth is restored.
    assert!(lower(&module, &interner, &[], body).is_err());
}

#[test]
fn unsupported_operators_are_rejected() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let a = b.ident("a");
    let two = b.int(2);
    let rem = b.binary(BinaryOp::Mod, a, two);
    let rem_stmt = b.expr_stmt(rem);
    let rem_body = b.block([rem_stmt]);
    let c = b.ident("a");
    let not = b.unary(UnaryOp::Not, c);
    let not_stmt = b.expr_stmt(not);
    let not_body = b.block([not_stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &["a"], rem_body).unwrap_err(),
        LowerError::unsupported("binary operator", "a % 2", module.arena.get_expr(rem).span)
    );
    assert_eq!(
        lower(&module, &interner, &["a"], not_body).unwrap_err(),
        LowerError::unsupported("unary operator", "!a", module.arena.get_expr(not).span)
    );
}

#[test]
fn unsupported_calls_are_rejected() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let no_args = b.call("exit", Vec::new());
    let s0 = b.expr_stmt(no_args);
    let body0 = b.block([s0]);
    let one = b.int(1);
    let two = b.int(2);
    let two_args = b.call("exit", [one, two]);
    let s1 = b.expr_stmt(two_args);
    let body1 = b.block([s1]);
    let three = b.int(3);
    let user = b.call("helper", [three]);
    let s2 = b.expr_stmt(user);
    let body2 = b.block([s2]);
    let module = b.finish();

    for (body, repr) in [(body0, "exit()"), (body1, "exit(1, 2)"), (body2, "helper(3)")] {
        match lower(&module, &interner, &[], body).unwrap_err() {
            LowerError::UnsupportedNode { repr: got, .. } => assert_eq!(got, repr),
            other => panic!("expected UnsupportedNode, got {other:?}"),
        }
    }
}

#[test]
fn builtin_is_not_a_variable() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let exit = b.ident("exit");
    let read = b.expr_stmt(exit);
    let read_body = b.block([read]);
    let one = b.int(1);
    let write = b.assign("exit", one);
    let write_body = b.block([write]);
    let module = b.finish();

    for body in [read_body, write_body] {
        let err = lower(&module, &interner, &[], body).unwrap_err();
        assert!(matches!(err, LowerError::UnsupportedNode { kind: "identifier", .. }));
    }
}

#[test]
fn builtin_call_ignores_shadowing_variable() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let decl = b.var("exit", None);
    let zero = b.int(0);
    let call = b.call("exit", [zero]);
    let stmt = b.expr_stmt(call);
    let body = b.block([decl, stmt]);
    let module = b.finish();

    let slot = local(&module, decl, "exit");
    assert_eq!(
        lower(&module, &interner, &[], body).unwrap(),
        format!(
            "\t{slot} = alloca i32, align 4\n\
             \tstore i32 0, i32* {slot}\n\
             \t%t0 = add i32 0, 0\n\
             \t%t1 = call i32(i32) @ugo_builtin_exit(i32 %t0)\n"
        )
    );
}

#[test]
fn builtin_call_ignores_global_of_same_name() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let one = b.int(1);
    let call = b.call("exit", [one]);
    let stmt = b.expr_stmt(call);
    let body = b.block([stmt]);
    let module = b.finish();

    let text = lower(&module, &interner, &["exit"], body).unwrap();
    assert!(text.ends_with("\t%t1 = call i32(i32) @ugo_builtin_exit(i32 %t0)\n"), "{text}");
}

#[test]
fn call_to_global_variable_is_rejected() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let one = b.int(1);
    let call = b.call("helper", [one]);
    let stmt = b.expr_stmt(call);
    let body = b.block([stmt]);
    let module = b.finish();

    let err = lower(&module, &interner, &["helper"], body).unwrap_err();
    assert!(matches!(
        err,
        LowerError::UnsupportedNode { kind: "call to non-builtin function", .. }
    ));
}

#[test]
fn parser_error_placeholders_are_rejected() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let bad_expr = b.error_expr();
    let decl = b.var("x", Some(bad_expr));
    let expr_body = b.block([decl]);
    let bad_stmt = b.error_stmt();
    let stmt_body = b.block([bad_stmt]);
    let module = b.finish();

    assert!(matches!(
        lower(&module, &interner, &[], expr_body).unwrap_err(),
        LowerError::UnsupportedNode { kind: "error expression", .. }
    ));
    assert!(matches!(
        lower(&module, &interner, &[], stmt_body).unwrap_err(),
        LowerError::UnsupportedNode { kind: "error statement", .. }
    ));
}

#[test]
fn deeply_nested_expression_does_not_overflow() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let mut expr = b.int(0);
    for _ in 0..50_000 {
        expr = b.paren(expr);
    }
    let stmt = b.expr_stmt(expr);
    let body = b.block([stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &[], body).unwrap(),
        "\t%t0 = add i32 0, 0\n"
    );
}

#[test]
fn unsupported_operator_over_deep_operand_is_an_error() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let mut operand = b.int(0);
    for _ in 0..200_000 {
        operand = b.paren(operand);
    }
    let two = b.int(2);
    let rem = b.binary(BinaryOp::Mod, operand, two);
    let stmt = b.expr_stmt(rem);
    let body = b.block([stmt]);
    let module = b.finish();

    match lower(&module, &interner, &[], body).unwrap_err() {
        LowerError::UnsupportedNode { kind, repr, .. } => {
            assert_eq!(kind, "binary operator");
            assert!(repr.contains("...") && repr.ends_with(" % 2"), "{repr}");
        }
        other => panic!("expected UnsupportedNode, got {other:?}"),
    }
}

#[test]
fn literals_outside_i32_are_rejected() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner, "main");
    let big = b.int(5_000_000_000);
    let big_stmt = b.expr_stmt(big);
    let big_body = b.block([big_stmt]);
    let max = b.int(i64::from(i32::MAX));
    let min = b.int(i64::from(i32::MIN));
    let max_stmt = b.expr_stmt(max);
    let min_stmt = b.expr_stmt(min);
    let edge_body = b.block([max_stmt, min_stmt]);
    let module = b.finish();

    assert_eq!(
        lower(&module, &interner, &[], big_body).unwrap_err(),
        LowerError::unsupported(
            "integer literal outside i32 range",
            "5000000000",
            module.arena.get_expr(big).span
        )
    );
    assert_eq!(
        lower(&module, &interner, &[], edge_body).unwrap(),
        "\t%t0 = add i32 0, 2147483647\n\
         \t%t1 = add i32 0, -2147483648\n"
    );
}
