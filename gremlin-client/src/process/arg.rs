use crate::io::groovy;
use crate::process::traversal::Traversal;
use crate::GremlinResult;

/// An already-rendered or still-to-render Groovy literal, per the
/// argument rendering table. Every step method takes its arguments as
/// `Arg` (or `impl Into<Arg>`), so the step vocabulary never has to know
/// how to quote a string or render a nested traversal itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A bare identifier emitted verbatim, unquoted: cardinality markers
    /// (`single`/`list`/`set`), order markers (`asc`/`desc`), and the like.
    Ident(String),
    Str(String),
    /// An inclusive Groovy range literal, `a..b`.
    Range(i64, i64),
    Vertex(VertexId),
    Predicate(Predicate),
    Traversal(Box<Traversal>),
}

/// The id half of a `V(id)` argument: numeric ids render unquoted,
/// string ids render as a quoted Groovy literal.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexId {
    Int(i64),
    Str(String),
}

/// A comparison predicate such as `gt(100)` or `within(1, 2, 3)`, rendered
/// as `operator(args...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    operator: String,
    values: Vec<Arg>,
}

impl Predicate {
    fn new(operator: &str, values: Vec<Arg>) -> Predicate {
        Predicate {
            operator: operator.to_string(),
            values,
        }
    }
}

pub fn eq<T: Into<Arg>>(value: T) -> Arg {
    Arg::Predicate(Predicate::new("eq", vec![value.into()]))
}

pub fn neq<T: Into<Arg>>(value: T) -> Arg {
    Arg::Predicate(Predicate::new("neq", vec![value.into()]))
}

pub fn gt<T: Into<Arg>>(value: T) -> Arg {
    Arg::Predicate(Predicate::new("gt", vec![value.into()]))
}

pub fn gte<T: Into<Arg>>(value: T) -> Arg {
    Arg::Predicate(Predicate::new("gte", vec![value.into()]))
}

pub fn lt<T: Into<Arg>>(value: T) -> Arg {
    Arg::Predicate(Predicate::new("lt", vec![value.into()]))
}

pub fn within(values: Vec<Arg>) -> Arg {
    Arg::Predicate(Predicate::new("within", values))
}

pub fn without(values: Vec<Arg>) -> Arg {
    Arg::Predicate(Predicate::new("without", values))
}

impl From<i32> for Arg {
    fn from(v: i32) -> Self {
        Arg::Int(v as i64)
    }
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        Arg::Float(v as f64)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<Traversal> for Arg {
    fn from(t: Traversal) -> Self {
        Arg::Traversal(Box::new(t))
    }
}

impl From<VertexId> for Arg {
    fn from(v: VertexId) -> Self {
        Arg::Vertex(v)
    }
}

impl From<i64> for VertexId {
    fn from(v: i64) -> Self {
        VertexId::Int(v)
    }
}

impl From<i32> for VertexId {
    fn from(v: i32) -> Self {
        VertexId::Int(v as i64)
    }
}

impl From<&str> for VertexId {
    fn from(v: &str) -> Self {
        VertexId::Str(v.to_string())
    }
}

impl From<String> for VertexId {
    fn from(v: String) -> Self {
        VertexId::Str(v)
    }
}

/// Renders a single argument to its Groovy literal form.
pub(crate) fn render_arg(arg: &Arg) -> GremlinResult<String> {
    match arg {
        Arg::Null => Ok("none".to_string()),
        Arg::Int(i) => Ok(i.to_string()),
        Arg::Float(f) => Ok(render_float(*f)),
        Arg::Bool(b) => Ok(b.to_string()),
        Arg::Ident(s) => Ok(s.clone()),
        Arg::Str(s) => Ok(groovy::quote(s)),
        Arg::Range(a, b) => Ok(format!("{}..{}", a, b)),
        Arg::Vertex(VertexId::Int(i)) => Ok(format!("V({})", i)),
        Arg::Vertex(VertexId::Str(s)) => Ok(format!("V({})", groovy::quote(s))),
        Arg::Predicate(p) => {
            let rendered = p
                .values
                .iter()
                .map(render_arg)
                .collect::<GremlinResult<Vec<_>>>()?;
            Ok(format!("{}({})", p.operator, rendered.join(", ")))
        }
        Arg::Traversal(t) => t.encode_nested(),
    }
}

fn render_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

pub(crate) fn render_args(args: &[Arg]) -> GremlinResult<String> {
    let rendered = args
        .iter()
        .map(render_arg)
        .collect::<GremlinResult<Vec<_>>>()?;
    Ok(rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_string_argument_with_escaping() {
        assert_eq!("'O\\'Brien'", render_arg(&Arg::from("O'Brien")).unwrap());
    }

    #[test]
    fn renders_integer_vertex_id() {
        assert_eq!(
            "V(1)",
            render_arg(&Arg::Vertex(VertexId::Int(1))).unwrap()
        );
    }

    #[test]
    fn renders_string_vertex_id() {
        assert_eq!(
            "V('abc')",
            render_arg(&Arg::Vertex(VertexId::Str("abc".to_string()))).unwrap()
        );
    }

    #[test]
    fn renders_predicate_with_multiple_values() {
        let p = within(vec![Arg::from(1), Arg::from(2), Arg::from(3)]);
        assert_eq!("within(1, 2, 3)", render_arg(&p).unwrap());
    }

    #[test]
    fn renders_gt_predicate() {
        assert_eq!("gt(100)", render_arg(&gt(100)).unwrap());
    }

    #[test]
    fn renders_whole_float_with_decimal_point() {
        assert_eq!("100.0", render_arg(&Arg::from(100.0_f64)).unwrap());
    }

    #[test]
    fn renders_ident_verbatim_unquoted() {
        assert_eq!("asc", render_arg(&Arg::Ident("asc".to_string())).unwrap());
    }
}
