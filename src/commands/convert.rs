//! Argument converters and the positional binding of tokens to parameters.
//!
//! A [`Param`] declares zero, one, or several candidate [`Converter`]s. With
//! several candidates the first one that accepts a token wins; only when all
//! of them reject it does conversion fail.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::error::{CommandError, SetupError};

// ============================================================================
// Converted values
// ============================================================================

/// A converted argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Arg {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Floats and integers both read as `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// ============================================================================
// Converters
// ============================================================================

/// Rejection reported by a single converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConvertError(pub String);

type ConvertFn = dyn Fn(&str) -> Result<Arg, ConvertError> + Send + Sync;

/// A named token-to-value conversion.
#[derive(Clone)]
pub struct Converter {
    name: Cow<'static, str>,
    func: Arc<ConvertFn>,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Converter").field(&self.name).finish()
    }
}

impl Converter {
    /// A converter backed by an arbitrary function.
    pub fn custom<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Arg, ConvertError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Identity conversion.
    pub fn string() -> Self {
        Self::custom("str", |token| Ok(Arg::Str(token.to_string())))
    }

    /// Base-10 signed integer.
    pub fn int() -> Self {
        Self::custom("int", |token| {
            token
                .parse::<i64>()
                .map(Arg::Int)
                .map_err(|e| ConvertError(e.to_string()))
        })
    }

    /// Floating point number.
    pub fn float() -> Self {
        Self::custom("float", |token| {
            token
                .parse::<f64>()
                .map(Arg::Float)
                .map_err(|e| ConvertError(e.to_string()))
        })
    }

    /// Boolean accepting `true`/`yes` and `false`/`no`, case-insensitively.
    pub fn boolean() -> Self {
        Self::boolean_words(
            vec!["true".to_string(), "yes".to_string()],
            vec!["false".to_string(), "no".to_string()],
        )
    }

    /// Boolean with custom word lists.
    ///
    /// Fails when either list is empty or a word appears in both.
    pub fn boolean_with<T, F>(truthy: T, falsy: F) -> Result<Self, SetupError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let truthy: Vec<String> = truthy
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        let falsy: Vec<String> = falsy
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();

        if truthy.is_empty() || falsy.is_empty() {
            return Err(SetupError::InvalidWordList(
                "true and false words must not be empty".to_string(),
            ));
        }
        if let Some(word) = truthy.iter().find(|w| falsy.contains(w)) {
            return Err(SetupError::InvalidWordList(format!(
                "'{word}' is both true and false"
            )));
        }
        Ok(Self::boolean_words(truthy, falsy))
    }

    fn boolean_words(truthy: Vec<String>, falsy: Vec<String>) -> Self {
        Self::custom("bool", move |token| {
            let word = token.to_lowercase();
            if truthy.contains(&word) {
                Ok(Arg::Bool(true))
            } else if falsy.contains(&word) {
                Ok(Arg::Bool(false))
            } else {
                Err(ConvertError(format!("'{token}' is not a boolean")))
            }
        })
    }

    /// Number strictly between `from` and `to`.
    ///
    /// Integers stay integers; anything else must parse as a float.
    pub fn range(from: f64, to: f64) -> Self {
        Self::custom(format!("range({from}, {to})"), move |token| {
            let (value, arg) = match token.parse::<i64>() {
                Ok(v) => (v as f64, Arg::Int(v)),
                Err(_) => {
                    let v = token
                        .parse::<f64>()
                        .map_err(|e| ConvertError(e.to_string()))?;
                    (v, Arg::Float(v))
                }
            };
            if from < value && value < to {
                Ok(arg)
            } else {
                Err(ConvertError(format!("{token} not between {from} and {to}")))
            }
        })
    }

    /// Name shown in conversion errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn convert(&self, token: &str) -> Result<Arg, ConvertError> {
        (self.func)(token)
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// A declared positional parameter of a command.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    converters: Vec<Converter>,
    default: Option<Arg>,
}

impl Param {
    /// An untyped parameter; tokens pass through as strings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            converters: Vec::new(),
            default: None,
        }
    }

    /// Replace the candidate types with a single converter.
    pub fn of(mut self, converter: Converter) -> Self {
        self.converters = vec![converter];
        self
    }

    /// Add a further union candidate, tried after the existing ones.
    pub fn or(mut self, converter: Converter) -> Self {
        self.converters.push(converter);
        self
    }

    /// Make the parameter optional.
    pub fn with_default(mut self, value: impl Into<Arg>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&Arg> {
        self.default.as_ref()
    }

    pub fn converters(&self) -> &[Converter] {
        &self.converters
    }

    /// Convert one token, trying union candidates in declaration order.
    pub fn convert(&self, token: &str) -> Result<Arg, CommandError> {
        let bad = |expected: String| CommandError::BadArgument {
            token: token.to_string(),
            expected,
        };

        match self.converters.as_slice() {
            [] => Ok(Arg::Str(token.to_string())),
            [single] => single
                .convert(token)
                .map_err(|_| bad(format!("'{}'", single.name()))),
            many => many
                .iter()
                .find_map(|c| c.convert(token).ok())
                .ok_or_else(|| {
                    let names: Vec<&str> = many.iter().map(Converter::name).collect();
                    bad(format!("one of ({})", names.join(", ")))
                }),
        }
    }
}

/// Bind tokens to parameters positionally.
///
/// Returns only the values converted from tokens; defaults are filled in by
/// [`Args::resolve`].
pub fn convert_args(tokens: &[String], params: &[Param]) -> Result<Vec<Arg>, CommandError> {
    let mut values = Vec::with_capacity(tokens.len().min(params.len()));
    for (token, param) in tokens.iter().zip(params) {
        values.push(param.convert(token)?);
    }

    if tokens.len() > params.len() {
        return Err(CommandError::TooManyArguments {
            max: params.len(),
            given: tokens.len(),
        });
    }

    if let Some(missing) = params[tokens.len()..]
        .iter()
        .find(|p| p.default.is_none())
    {
        return Err(CommandError::MissingArguments {
            name: missing.name.clone(),
        });
    }

    Ok(values)
}

// ============================================================================
// Bound arguments
// ============================================================================

/// Arguments handed to a command handler, one per declared parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Arg>);

impl Args {
    /// Complete converted values with the defaults of the remaining params.
    pub fn resolve(mut converted: Vec<Arg>, params: &[Param]) -> Self {
        let start = converted.len().min(params.len());
        converted.extend(params[start..].iter().filter_map(|p| p.default.clone()));
        Self(converted)
    }

    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.0.get(index)
    }

    pub fn str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Arg::as_str)
    }

    pub fn int(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(Arg::as_int)
    }

    pub fn float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(Arg::as_float)
    }

    pub fn bool(&self, index: usize) -> Option<bool> {
        self.get(index).and_then(Arg::as_bool)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Arg> {
        self.0
    }
}

impl From<Vec<Arg>> for Args {
    fn from(values: Vec<Arg>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_str_int_conversion() {
        let params = [Param::new("a").of(Converter::string()), Param::new("b").of(Converter::int())];
        let values = convert_args(&tokens(&["foo", "12"]), &params).unwrap();
        assert_eq!(values, [Arg::from("foo"), Arg::Int(12)]);
    }

    #[test]
    fn test_untyped_param_passes_through() {
        let params = [
            Param::new("a").of(Converter::string()),
            Param::new("b"),
            Param::new("c").of(Converter::int()),
        ];
        let values = convert_args(&tokens(&["foo", "bar", "12"]), &params).unwrap();
        assert_eq!(values, [Arg::from("foo"), Arg::from("bar"), Arg::Int(12)]);
    }

    #[test]
    fn test_bad_argument() {
        let params = [Param::new("a").of(Converter::string()), Param::new("b").of(Converter::int())];
        let err = convert_args(&tokens(&["foo", "bar"]), &params).unwrap_err();
        assert_eq!(
            err,
            CommandError::BadArgument {
                token: "bar".into(),
                expected: "'int'".into(),
            }
        );
        assert_eq!(err.to_string(), "could not convert 'bar' to 'int'");
    }

    #[test]
    fn test_too_many_arguments() {
        let params = [Param::new("a").of(Converter::string()), Param::new("b").of(Converter::int())];
        let err = convert_args(&tokens(&["foo", "12", "13"]), &params).unwrap_err();
        assert_eq!(err, CommandError::TooManyArguments { max: 2, given: 3 });
    }

    #[test]
    fn test_missing_arguments() {
        let params = [
            Param::new("a").of(Converter::string()),
            Param::new("b").of(Converter::int()),
            Param::new("c").of(Converter::float()),
        ];
        let err = convert_args(&tokens(&["foo", "12"]), &params).unwrap_err();
        assert_eq!(err, CommandError::MissingArguments { name: "c".into() });
    }

    #[test]
    fn test_defaults_are_optional() {
        let params = [
            Param::new("a").of(Converter::string()),
            Param::new("b").of(Converter::int()).with_default(12i64),
        ];
        let values = convert_args(&tokens(&["foo"]), &params).unwrap();
        assert_eq!(values, [Arg::from("foo")]);

        let args = Args::resolve(values, &params);
        assert_eq!(args.str(0), Some("foo"));
        assert_eq!(args.int(1), Some(12));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_explicit_value_overrides_default() {
        let params = [Param::new("b").of(Converter::int()).with_default(12i64)];
        let args = Args::resolve(convert_args(&tokens(&["5"]), &params).unwrap(), &params);
        assert_eq!(args.int(0), Some(5));
    }

    #[test]
    fn test_union_first_match_wins() {
        let params = [Param::new("a").of(Converter::int()).or(Converter::float())];
        assert_eq!(convert_args(&tokens(&["10"]), &params).unwrap(), [Arg::Int(10)]);
        assert_eq!(convert_args(&tokens(&["2.5"]), &params).unwrap(), [Arg::Float(2.5)]);

        let err = convert_args(&tokens(&["x"]), &params).unwrap_err();
        assert_eq!(err.to_string(), "could not convert 'x' to one of (int, float)");
    }

    #[test]
    fn test_union_with_custom_converter() {
        let even = Converter::custom("even", |t| match t.parse::<i64>() {
            Ok(v) if v % 2 == 0 => Ok(Arg::Int(v)),
            _ => Err(ConvertError("odd".into())),
        });
        let params = [Param::new("a").of(even).or(Converter::string())];
        assert_eq!(convert_args(&tokens(&["4"]), &params).unwrap(), [Arg::Int(4)]);
        assert_eq!(convert_args(&tokens(&["3"]), &params).unwrap(), [Arg::from("3")]);
    }

    #[test]
    fn test_no_params() {
        assert!(convert_args(&[], &[]).unwrap().is_empty());
        let err = convert_args(&tokens(&["x"]), &[]).unwrap_err();
        assert_eq!(err, CommandError::TooManyArguments { max: 0, given: 1 });
    }

    #[test]
    fn test_boolean() {
        let b = Converter::boolean();
        for (word, expected) in [("true", true), ("YES", true), ("False", false), ("no", false)] {
            assert_eq!(b.convert(word).unwrap(), Arg::Bool(expected), "{word}");
        }
        assert!(b.convert("maybe").is_err());
    }

    #[test]
    fn test_boolean_custom_words() {
        let b = Converter::boolean_with(["on", "1"], ["off", "0"]).unwrap();
        assert_eq!(b.convert("ON").unwrap(), Arg::Bool(true));
        assert_eq!(b.convert("0").unwrap(), Arg::Bool(false));
        assert!(b.convert("true").is_err());
    }

    #[test]
    fn test_boolean_duplicate_words() {
        let err = Converter::boolean_with(["on", "yes"], ["YES"]).unwrap_err();
        assert!(matches!(err, SetupError::InvalidWordList(_)));

        let err = Converter::boolean_with(Vec::<&str>::new(), ["off"]).unwrap_err();
        assert!(matches!(err, SetupError::InvalidWordList(_)));
        let err = Converter::boolean_with(["on"], Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, SetupError::InvalidWordList(_)));
    }

    #[test]
    fn test_range_is_exclusive() {
        let r = Converter::range(0.0, 10.0);
        assert_eq!(r.convert("5").unwrap(), Arg::Int(5));
        assert_eq!(r.convert("9.5").unwrap(), Arg::Float(9.5));
        assert!(r.convert("0").is_err());
        assert!(r.convert("10").is_err());
        assert!(r.convert("abc").is_err());
        assert_eq!(r.name(), "range(0, 10)");
    }

    #[test]
    fn test_arg_accessors() {
        assert_eq!(Arg::Int(3).as_float(), Some(3.0));
        assert_eq!(Arg::Int(3).as_str(), None);
        assert_eq!(Arg::from("x").to_string(), "x");
        assert_eq!(Arg::Bool(true).as_bool(), Some(true));
    }
}
