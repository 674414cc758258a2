//! Parser voor de parametersectie van DMP-bestanden (Surface Evolver dumps).
//!
//! Alleen regels van de vorm `PARAMETER <naam> = <expressie>` (of
//! `OPTIMIZING_PARAMETER`) worden gelezen; `//`- en `/* */`-commentaar telt niet mee;
//! al het andere in het bestand wordt overgeslagen. Expressies mogen eerder
//! gedefinieerde parameters en de standaardfuncties van `meval` gebruiken.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use meval::{Context, ContextProvider, Expr};
use regex::{Captures, Regex};
use thiserror::Error;

/// Result type voor het parsen van DMP-parameters.
pub type ParseResult<T> = Result<T, ParseError>;

/// Beschrijft fouten tijdens het parsen.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Een `PARAMETER`-regel zonder naam of toewijzing.
    #[error("regel {line}: onleesbare parameterdefinitie `{text}`")]
    Syntax { line: usize, text: String },
    /// De expressie kon niet tot een eindig getal geëvalueerd worden.
    #[error("regel {line}: ongeldige waarde voor `{name}`: {reason}")]
    InvalidValue {
        line: usize,
        name: String,
        reason: String,
    },
    /// Een opgevraagde parameter komt niet voor in het bestand.
    #[error("parameter `{0}` ontbreekt")]
    MissingParameter(String),
}

/// Benoemde parameterwaarden uit een DMP-bestand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DmpParameters {
    values: BTreeMap<String, f64>,
}

impl DmpParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Voegt een waarde toe; een bestaande naam wordt overschreven.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Zoals [`DmpParameters::get`], maar een ontbrekende naam is een fout.
    pub fn require(&self, name: &str) -> ParseResult<f64> {
        self.get(name)
            .ok_or_else(|| ParseError::MissingParameter(name.to_owned()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl ContextProvider for DmpParameters {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

/// Vaste regelpatronen, eenmalig gecompileerd.
struct Patterns {
    block_comment: Regex,
    keyword: Regex,
    definition: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        block_comment: Regex::new(r"(?s)/\*.*?\*/").expect("geldig commentaarpatroon"),
        keyword: Regex::new(r"(?i)^\s*(?:optimizing_)?parameter\b").expect("geldig sleutelwoordpatroon"),
        definition: Regex::new(
            r"(?i)^\s*(optimizing_)?parameter\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?::=|=)\s*(\S.*?)\s*$",
        )
        .expect("geldig definitiepatroon"),
    })
}

/// Leest alle `PARAMETER`- en `OPTIMIZING_PARAMETER`-definities uit een
/// DMP-document.
pub fn parse_parameters(input: &str) -> ParseResult<DmpParameters> {
    log::debug!("Start parsing DMP parameters");
    let patterns = patterns();
    let context = build_context();

    let uncommented = strip_block_comments(&patterns.block_comment, input);
    let mut parameters = DmpParameters::new();
    for (index, raw_line) in uncommented.lines().enumerate() {
        let line = index + 1;
        let text = strip_line_comment(raw_line);
        if !patterns.keyword.is_match(text) {
            continue;
        }

        let captures = patterns.definition.captures(text).ok_or_else(|| ParseError::Syntax {
            line,
            text: raw_line.trim().to_owned(),
        })?;
        let name = &captures[2];
        if captures.get(1).is_some() {
            log::debug!("optimizing parameter `{name}` op regel {line}");
        }
        let value = evaluate(&captures[3], &parameters, &context).map_err(|reason| {
            ParseError::InvalidValue {
                line,
                name: name.to_owned(),
                reason,
            }
        })?;

        if parameters.insert(name, value).is_some() {
            log::warn!("parameter `{name}` op regel {line} overschrijft een eerdere definitie");
        }
    }

    log::debug!("Found {} parameters", parameters.len());
    Ok(parameters)
}

/// Vervangt `/* ... */` door evenveel regeleinden, zodat regelnummers kloppen.
fn strip_block_comments<'a>(pattern: &Regex, input: &'a str) -> Cow<'a, str> {
    pattern.replace_all(input, |caps: &Captures<'_>| "\n".repeat(caps[0].matches('\n').count()))
}

fn strip_line_comment(line: &str) -> &str {
    line.find("//").map_or(line, |idx| &line[..idx])
}

fn evaluate(
    expression: &str,
    known: &DmpParameters,
    context: &Context<'static>,
) -> Result<f64, String> {
    let expr: Expr = expression
        .parse()
        .map_err(|error| format!("expressie `{expression}` kon niet geparsed worden: {error}"))?;
    let value = expr
        .eval_with_context((known, context))
        .map_err(|error| format!("expressie `{expression}` kon niet geëvalueerd worden: {error}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("expressie `{expression}` levert geen eindig getal op ({value})"))
    }
}

fn build_context() -> Context<'static> {
    let mut context = Context::new();
    context.func("deg", |value| value.to_degrees());
    context.func("rad", |value| value.to_radians());
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
// foam.dmp: Surface Evolver dump
SPACE_DIMENSION 2
PARAMETER x0 = 1.5
parameter y0 = -0.25   // offset in y
PARAMETER angle = pi/4
PARAMETER twice := 2 * x0

vertices
  1  0.0 0.0
";

    #[test]
    fn reads_parameter_lines_only() {
        let params = parse_parameters(SAMPLE).expect("parse sample");
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("x0"), Some(1.5));
        assert_eq!(params.get("y0"), Some(-0.25));
        assert!((params.require("angle").unwrap() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(params.get("twice"), Some(3.0));
    }

    #[test]
    fn missing_parameter_is_reported() {
        let params = parse_parameters(SAMPLE).unwrap();
        let err = params.require("theta").unwrap_err();
        assert!(matches!(err, ParseError::MissingParameter(ref name) if name == "theta"));
    }

    #[test]
    fn non_finite_value_is_invalid() {
        let err = parse_parameters("PARAMETER a = 1\nPARAMETER b = a / 0\n").unwrap_err();
        match err {
            ParseError::InvalidValue { line, name, .. } => {
                assert_eq!(line, 2);
                assert_eq!(name, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_identifier_is_invalid() {
        let err = parse_parameters("PARAMETER a = later + 1\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { line: 1, .. }));
    }

    #[test]
    fn malformed_definition_is_syntax_error() {
        let err = parse_parameters("PARAMETER = 3\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn parameter_prefix_in_other_words_is_ignored() {
        let params = parse_parameters("parameters_file foo\nPARAMETER k = deg(pi)\n").unwrap();
        assert_eq!(params.len(), 1);
        assert!((params.get("k").unwrap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn block_comments_are_ignored() {
        let input = "\
PARAMETER x_translation = 0.125 /* offset */
PARAMETER y_translation = /* inline */ -0.5
/* uitgeschakeld:
PARAMETER y_translation = 99
*/
PARAMETER broken = 1 +
";
        let err = parse_parameters(input).unwrap_err();
        // Regelnummers tellen de regels binnen het blokcommentaar mee.
        assert!(matches!(err, ParseError::InvalidValue { line: 6, .. }));

        let params = parse_parameters(&input.replace("PARAMETER broken = 1 +\n", "")).unwrap();
        assert_eq!(params.get("x_translation"), Some(0.125));
        assert_eq!(params.get("y_translation"), Some(-0.5));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn optimizing_parameters_are_read() {
        let params = parse_parameters("OPTIMIZING_PARAMETER rot_angle = 0.5\nparameter scale = 2*rot_angle\n").unwrap();
        assert_eq!(params.get("rot_angle"), Some(0.5));
        assert_eq!(params.get("scale"), Some(1.0));
    }

    #[test]
    fn redefinition_keeps_last_value() {
        let params = parse_parameters("PARAMETER a = 1\nPARAMETER a = a + 1\n").unwrap();
        assert_eq!(params.get("a"), Some(2.0));
    }
}
