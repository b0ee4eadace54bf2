// ABOUTME: Integration tests for render and registration failures
// ABOUTME: Covers arity and parameter type faults, raw block misuse, helper errors and partials

use serde_json::json;

use mustachio::{
    Block, Expr, Helper, Mustache, Node, Options, ParamKind, RegistryError, RenderError, Template,
};

mod common;
use common::*;

fn render_err(engine: &mustachio::Engine, nodes: Vec<Node>) -> RenderError {
    engine
        .render_json(&Template::new(nodes), &json!({"name": "Alan"}))
        .unwrap_err()
}

#[test]
fn test_arity_mismatch_names_the_helper() {
    let engine = engine_with(vec![(
        "echo",
        Helper::unary(|s: String| Ok(s)),
    )]);

    let err = render_err(&engine, vec![var("echo")]);
    match err {
        RenderError::ArityMismatch {
            name,
            expected,
            found,
        } => {
            assert_eq!(name, "echo");
            assert_eq!(expected, 1);
            assert_eq!(found, 0);
        }
        other => panic!("unexpected error: {}", other),
    }

    let err = render_err(
        &engine,
        vec![Mustache::new("echo")
            .param(Expr::string("a"))
            .param(Expr::string("b"))
            .into()],
    );
    assert!(matches!(err, RenderError::ArityMismatch { found: 2, .. }));
}

#[test]
fn test_parameter_type_fault() {
    let engine = engine_with(vec![(
        "repeat",
        Helper::binary(|s: String, n: i64| Ok(s.repeat(n.max(0) as usize))),
    )]);

    let ok = engine
        .render_json(
            &Template::new(vec![Mustache::new("repeat")
                .param(Expr::string("ab"))
                .param(Expr::string("3"))
                .into()]),
            &json!({}),
        )
        .unwrap();
    assert_eq!(ok, "ababab");

    let err = render_err(
        &engine,
        vec![Mustache::new("repeat")
            .param(Expr::path("name"))
            .param(Expr::bool(true))
            .into()],
    );
    match err {
        RenderError::ParamType {
            name,
            index,
            expected,
            found,
        } => {
            assert_eq!(name, "repeat");
            assert_eq!(index, 1);
            assert_eq!(expected, ParamKind::Integer);
            assert_eq!(found, "boolean");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_out_of_range_float_is_a_parameter_fault() {
    let engine = engine_with(vec![(
        "tag",
        Helper::unary(|id: i64| Ok(format!("#{}", id))),
    )]);

    let ok = engine
        .render_json(
            &Template::new(vec![Mustache::new("tag").param(Expr::float(7.0)).into()]),
            &json!({}),
        )
        .unwrap();
    assert_eq!(ok, "#7");

    let err = render_err(&engine, vec![Mustache::new("tag").param(Expr::float(1e20)).into()]);
    match err {
        RenderError::ParamType {
            name,
            index,
            expected,
            found,
        } => {
            assert_eq!(name, "tag");
            assert_eq!(index, 0);
            assert_eq!(expected, ParamKind::Integer);
            assert_eq!(found, "float");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_raw_helper_used_as_mustache_or_block() {
    let mut engine = engine_with(vec![]);
    engine.register_raw_helper("raw", Helper::block(raw_helper)).unwrap();

    let err = render_err(&engine, vec![var("raw")]);
    assert!(matches!(err, RenderError::RawHelperMisuse { ref name } if name == "raw"));

    let err = render_err(&engine, vec![Block::new("raw").body(vec![text("x")]).into()]);
    assert!(matches!(err, RenderError::RawHelperMisuse { .. }));
}

#[test]
fn test_plain_helper_rejects_raw_body() {
    let engine = engine_with(vec![("form", Helper::block(form_helper))]);

    let err = render_err(&engine, vec![Block::raw("form", "{{x}}").into()]);
    assert!(matches!(err, RenderError::RawBodyRejected { ref name } if name == "form"));
}

#[test]
fn test_helper_failure_aborts_render() {
    let engine = engine_with(vec![(
        "explode",
        Helper::unary(|reason: String| -> mustachio::HelperResult {
            anyhow::bail!("cannot render {}", reason)
        }),
    )]);

    let err = render_err(
        &engine,
        vec![
            text("partial output "),
            Mustache::new("explode").param(Expr::path("name")).into(),
        ],
    );
    match err {
        RenderError::HelperFailed { ref name, ref source } => {
            assert_eq!(name, "explode");
            assert_eq!(source.to_string(), "cannot render Alan");
        }
        ref other => panic!("unexpected error: {}", other),
    }
    assert_eq!(err.to_string(), "Helper 'explode' failed: cannot render Alan");
}

#[test]
fn test_nested_render_error_propagates_unchanged() {
    let engine = engine_with(vec![
        ("form", Helper::block(form_helper)),
        ("echo", Helper::unary(|s: String| Ok(s))),
    ]);

    // The inner arity fault surfaces as-is, not wrapped as a failure of `form`
    let err = render_err(
        &engine,
        vec![Block::new("form").body(vec![var("echo")]).into()],
    );
    assert!(matches!(err, RenderError::ArityMismatch { ref name, .. } if name == "echo"));
}

#[test]
fn test_partials_are_unsupported() {
    let engine = engine_with(vec![]);
    let err = render_err(&engine, vec![text("a"), Node::partial("footer")]);
    assert!(matches!(err, RenderError::UnsupportedPartial { ref name } if name == "footer"));
}

#[test]
fn test_unresolved_helper_renders_empty() {
    let engine = engine_with(vec![]);
    let output = render(
        &engine,
        vec![
            text("["),
            Mustache::new("missing").param(Expr::int(1)).into(),
            text("]"),
        ],
        json!({}),
    );
    assert_eq!(output, "[]");
}

#[test]
fn test_registration_faults() {
    let mut engine = engine_with(vec![]);

    let err = engine
        .register_helper("", Helper::nullary(|| Ok(String::new())))
        .unwrap_err();
    assert!(matches!(err, RegistryError::EmptyName));

    let err = engine
        .register_raw_helper("raw", Helper::unary(|s: String| Ok(s)))
        .unwrap_err();
    assert!(matches!(err, RegistryError::RawWithoutOptions { ref name } if name == "raw"));
}

#[test]
fn test_block_helper_error_from_body_callback() {
    let engine = engine_with(vec![(
        "guard",
        Helper::block(|options: &Options| {
            if options.hash_bool("deny") {
                anyhow::bail!("denied");
            }
            Ok(options.render_body()?)
        }),
    )]);

    let template = vec![Block::new("guard")
        .hash("deny", Expr::bool(true))
        .body(vec![text("secret")])
        .into()];
    let err = render_err(&engine, template);
    assert!(matches!(err, RenderError::HelperFailed { ref name, .. } if name == "guard"));
}
