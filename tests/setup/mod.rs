#![allow(dead_code)]

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::OnceLock,
};

use texmath::{
    MathContext, ParseError, Settings, StrictSetting, TrustSetting,
    mathml_tree::MathNode,
    parse,
    parser::parse_node::{AnyParseNode, ParseNode},
    render_to_string, render_to_tree,
};

/// Route the crate's tracing records to the test output.
/// Run with `--nocapture` to see strict-mode warnings and expansion traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

static DEFAULT_CONTEXT: OnceLock<MathContext> = OnceLock::new();
pub fn default_ctx() -> &'static MathContext {
    DEFAULT_CONTEXT.get_or_init(|| {
        init_tracing();
        MathContext::with_builtins().unwrap_or_else(|e| panic!("builtins failed: {e}"))
    })
}

pub struct TestExpr<'a> {
    pub expr: String,
    pub ctx: &'a MathContext,
    pub file: &'static str,
    pub line: u32,
    pub code: &'static str,
}

/// Set all `loc` to None for easier comparison
pub fn strip_positions(nodes: &mut [ParseNode]) {
    for node in nodes.iter_mut() {
        strip_positions_single(node);
    }
}

fn strip_optional(node: Option<&mut AnyParseNode>) {
    if let Some(node) = node {
        strip_positions_single(node);
    }
}

pub fn strip_positions_single(node: &mut ParseNode) {
    match node {
        AnyParseNode::OrdGroup(group) => {
            group.loc = None;
            strip_positions(&mut group.body);
        }
        AnyParseNode::Genfrac(frac) => {
            frac.loc = None;
            strip_positions_single(&mut frac.numer);
            strip_positions_single(&mut frac.denom);
        }
        AnyParseNode::MathOrd(ord) => ord.loc = None,
        AnyParseNode::TextOrd(ord) => ord.loc = None,
        AnyParseNode::Text(text) => {
            text.loc = None;
            strip_positions(&mut text.body);
        }
        AnyParseNode::Hphantom(phantom) => {
            phantom.loc = None;
            strip_positions_single(&mut phantom.body);
        }
        AnyParseNode::Lap(lap) => {
            lap.loc = None;
            strip_positions_single(&mut lap.body);
        }
        AnyParseNode::XArrow(arrow) => {
            arrow.loc = None;
            strip_optional(arrow.body.as_deref_mut());
            strip_optional(arrow.below.as_deref_mut());
        }
        AnyParseNode::StackedArrow(arrow) => {
            arrow.loc = None;
            strip_optional(arrow.body.as_mut());
            strip_optional(arrow.below.as_mut());
            strip_optional(arrow.upper_arrow_below.as_mut());
            strip_optional(arrow.lower_arrow_body.as_mut());
        }
    }
}

impl TestExpr<'_> {
    fn at(&self) -> String {
        format!("{} at {}:{}", self.code, self.file, self.line)
    }

    pub fn to_parse(self, settings: &Settings) -> Result<(), ParseError> {
        parse(self.ctx, &self.expr, settings).map(|_| ())
    }

    pub fn not_to_parse(self, settings: &Settings) -> Result<(), ParseError> {
        if let Ok(tree) = parse(self.ctx, &self.expr, settings) {
            panic!("expected '{}' not to parse ({}), got {tree:#?}", self.expr, self.at());
        }
        Ok(())
    }

    pub fn to_parse_like(self, other: &str, settings: &Settings) -> Result<(), ParseError> {
        let mut tree1 = parse(self.ctx, &self.expr, settings)?;
        let mut tree2 = parse(self.ctx, other, settings)?;

        strip_positions(&mut tree1);
        strip_positions(&mut tree2);

        assert_eq!(
            tree1, tree2,
            "Parse trees do not match between '{}' and '{}'",
            self.expr, other
        );
        Ok(())
    }

    pub fn to_build(self, settings: &Settings) -> Result<(), ParseError> {
        render_to_tree(self.ctx, &self.expr, settings).map(|_| ())
    }

    pub fn not_to_build(self, settings: &Settings) -> Result<(), ParseError> {
        if let Ok(tree) = render_to_tree(self.ctx, &self.expr, settings) {
            panic!("expected '{}' not to build ({}), got {tree:#?}", self.expr, self.at());
        }
        Ok(())
    }

    pub fn to_build_like(self, other: &str, settings: &Settings) -> Result<(), ParseError> {
        let left = render_to_string(self.ctx, &self.expr, settings)?;
        let right = render_to_string(self.ctx, other, settings)?;
        assert_eq!(
            left, right,
            "Markup does not match between '{}' and '{}'",
            self.expr, other
        );
        Ok(())
    }

    pub fn to_markup(self, expected: &str, settings: &Settings) -> Result<(), ParseError> {
        let markup = render_to_string(self.ctx, &self.expr, settings)?;
        assert_eq!(markup, expected, "unexpected markup for {}", self.at());
        Ok(())
    }
}

pub fn expect_impl(
    expr: &str,
    file: &'static str,
    line: u32,
    code: &'static str,
) -> TestExpr<'static> {
    TestExpr {
        expr: expr.to_owned(),
        ctx: default_ctx(),
        file,
        line,
        code,
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::setup::expect_impl($e, file!(), line!(), stringify!($e))
    };
}

pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), ParseError>,
{
    match catch_unwind(AssertUnwindSafe(test_fn)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test '{desc}' failed with Result::Err: {e}\n{:?}", e.kind),
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_owned()
            };
            panic!("Test '{desc}' panicked: {msg}");
        }
    }
}

/// Settings helpers
pub fn strict_settings() -> Settings {
    Settings::builder().strict(StrictSetting::Bool(true)).build()
}

pub fn nonstrict_settings() -> Settings {
    Settings::builder().strict(StrictSetting::Bool(false)).build()
}

pub fn trust_settings() -> Settings {
    Settings::builder().trust(TrustSetting::Bool(true)).build()
}

pub fn display_settings() -> Settings {
    Settings::builder().display_mode(true).build()
}

pub fn get_parsed(expr: &str, settings: &Settings) -> Result<Vec<ParseNode>, ParseError> {
    parse(default_ctx(), expr, settings)
}

pub fn get_parsed_strict(expr: &str) -> Result<Vec<ParseNode>, ParseError> {
    get_parsed(expr, &strict_settings())
}

/// The first node inside the document `<mrow>`.
pub fn get_built(expr: &str, settings: &Settings) -> Result<MathNode, ParseError> {
    let math = render_to_tree(default_ctx(), expr, settings)?;
    let row = math.children[0]
        .as_math_node()
        .unwrap_or_else(|| panic!("expected a row in {math:#?}"));
    let first = if row.children.is_empty() {
        row.clone()
    } else {
        row.children[0]
            .as_math_node()
            .cloned()
            .unwrap_or_else(|| row.clone())
    };
    Ok(first)
}

pub fn render_to_string_strict(expr: &str) -> Result<String, ParseError> {
    render_to_string(default_ctx(), expr, &strict_settings())
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{} \n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}
